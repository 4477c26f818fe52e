use serde::Deserialize;
use serde::Serialize;

/// Edit/trigger event exactly as the host reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawTrigger {
    /// Explicit request to open or refresh the list.
    Invoke,
    /// Explicit request that should commit immediately when the list has
    /// exactly one eligible candidate.
    InvokeAndCommitIfUnique,
    /// A character was typed at the caret.
    Insertion(char),
    /// A character was removed with the delete key.
    Deletion(char),
    /// A character was removed with backspace.
    Backspace(char),
    /// A snippet or template expansion changed the buffer.
    SnippetsMode,
    /// Anything else the host reports; never drives an update.
    Other,
}

impl RawTrigger {
    /// The character carried by the edit, when there is one.
    pub fn character(self) -> Option<char> {
        match self {
            RawTrigger::Insertion(ch) | RawTrigger::Deletion(ch) | RawTrigger::Backspace(ch) => {
                Some(ch)
            }
            _ => None,
        }
    }

    /// True for the two deletion-flavored edits.
    pub fn is_deletion(self) -> bool {
        matches!(self, RawTrigger::Deletion(_) | RawTrigger::Backspace(_))
    }
}

/// Semantic trigger kind the pipeline branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    Invoke,
    Insertion,
    Deletion,
    Snippet,
}

/// How strict downstream matching should be for this update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterReason {
    Insertion,
    Deletion,
    Other,
}

/// A raw trigger normalized into the pair the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedTrigger {
    pub kind: TriggerKind,
    pub reason: FilterReason,
}

/// Normalize a raw host trigger.
///
/// `None` means the trigger is outside the recognized table (an `Other`
/// event, or an edit carrying a control character); callers must leave the
/// prior model in place rather than treat it as an error.
pub fn classify(raw: RawTrigger) -> Option<ClassifiedTrigger> {
    let kind = match raw {
        RawTrigger::Invoke | RawTrigger::InvokeAndCommitIfUnique => TriggerKind::Invoke,
        RawTrigger::Insertion(ch) => {
            if ch.is_control() {
                return None;
            }
            TriggerKind::Insertion
        }
        RawTrigger::Deletion(_) | RawTrigger::Backspace(_) => TriggerKind::Deletion,
        RawTrigger::SnippetsMode => TriggerKind::Snippet,
        RawTrigger::Other => return None,
    };
    let reason = match kind {
        TriggerKind::Insertion => FilterReason::Insertion,
        TriggerKind::Deletion => FilterReason::Deletion,
        TriggerKind::Invoke | TriggerKind::Snippet => FilterReason::Other,
    };
    Some(ClassifiedTrigger { kind, reason })
}
