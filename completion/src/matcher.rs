use parking_lot::Mutex;

use crate::item::CandidateItem;
use crate::trigger::FilterReason;
use crate::trigger::TriggerKind;
use glint_textmatch::FuzzyScorer;
use glint_textmatch::MatchSpan;

/// The text-matching collaborator the pipeline consumes. Hosts supply
/// their own scoring rules by implementing this; [`TextMatcher`] is the
/// default used when none is provided.
pub trait Matcher: Send + Sync {
    /// Does this candidate match the typed filter text under the current
    /// trigger? `recent` is a consistent recency snapshot, least recent
    /// first; implementations may use it to admit recently committed
    /// items on an empty query.
    fn matches(
        &self,
        item: &CandidateItem,
        filter_text: &str,
        trigger: TriggerKind,
        reason: FilterReason,
        recent: &[String],
    ) -> bool;

    /// Label spans to emphasize for a matching candidate.
    fn highlight_spans(&self, candidate: &str, filter_text: &str) -> Vec<MatchSpan>;
}

/// Default matcher: subsequence fuzzy matching over the candidate's
/// filter text. On an empty query only preselected or recently committed
/// candidates count as matching, so an empty list of typed characters
/// never produces a confident unique match.
pub struct TextMatcher {
    scorer: Mutex<FuzzyScorer>,
}

impl TextMatcher {
    pub fn new() -> Self {
        Self {
            scorer: Mutex::new(FuzzyScorer::new()),
        }
    }
}

impl Default for TextMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher for TextMatcher {
    fn matches(
        &self,
        item: &CandidateItem,
        filter_text: &str,
        _trigger: TriggerKind,
        _reason: FilterReason,
        recent: &[String],
    ) -> bool {
        if filter_text.is_empty() {
            return item.preselect || recent.iter().any(|id| *id == item.id);
        }
        self.scorer
            .lock()
            .score(&item.filter_text, filter_text)
            .is_some()
    }

    fn highlight_spans(&self, candidate: &str, filter_text: &str) -> Vec<MatchSpan> {
        if filter_text.is_empty() {
            return Vec::new();
        }
        self.scorer.lock().spans(candidate, filter_text)
    }
}
