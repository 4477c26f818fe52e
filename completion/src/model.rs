use serde::Deserialize;
use serde::Serialize;

use crate::item::CandidateItem;
use crate::item::FacetState;
use crate::item::FacetTag;
use crate::trigger::RawTrigger;
use glint_textmatch::MatchSpan;

/// Everything the engine needs to know about one keystroke. Built fresh
/// per edit and never mutated; the next edit supersedes it with a new
/// snapshot carrying a higher sequence number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    /// The user-typed filter text at the caret.
    pub filter_text: String,

    /// The edit that produced this snapshot.
    pub trigger: RawTrigger,

    /// Full facet states, selection flags included.
    #[serde(default)]
    pub facets: Vec<FacetState>,

    /// Monotonically increasing edit counter.
    pub sequence: u64,

    /// Caret position in the buffer, when the host can provide it.
    #[serde(default)]
    pub caret: Option<usize>,

    /// Character immediately before the filter span, when any. Drives
    /// the leading-digit guard.
    #[serde(default)]
    pub preceding_char: Option<char>,
}

impl FilterSnapshot {
    pub fn new(filter_text: impl Into<String>, trigger: RawTrigger, sequence: u64) -> Self {
        Self {
            filter_text: filter_text.into(),
            trigger,
            facets: Vec::new(),
            sequence,
            caret: None,
            preceding_char: None,
        }
    }

    pub fn with_facets(mut self, facets: Vec<FacetState>) -> Self {
        self.facets = facets;
        self
    }

    pub fn with_caret(mut self, caret: usize) -> Self {
        self.caret = Some(caret);
        self
    }

    pub fn with_preceding_char(mut self, ch: char) -> Self {
        self.preceding_char = Some(ch);
        self
    }

    /// Facet tags the user currently has toggled on.
    pub fn selected_facets(&self) -> Vec<&FacetTag> {
        self.facets
            .iter()
            .filter(|f| f.selected)
            .map(|f| &f.tag)
            .collect()
    }
}

/// How confidently the selected candidate should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionHint {
    /// Confident; commit keys act on it without further confirmation.
    Selected,
    /// Tentative; highlighted but requires explicit confirmation.
    SoftSelected,
    /// Keep whatever the host was already showing.
    NoChange,
}

/// A visible candidate plus the label spans to emphasize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightedItem {
    pub item: CandidateItem,
    pub spans: Vec<MatchSpan>,
}

/// The engine's per-keystroke output: the visible list in order, the
/// selection and its confidence, refreshed facet states, and the single
/// candidate (if any) eligible for blind commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultModel {
    pub items: Vec<HighlightedItem>,

    /// Index into `items`; `None` means nothing is selected (the visible
    /// set may be empty).
    pub selected: Option<usize>,

    pub hint: SelectionHint,

    pub facets: Vec<FacetState>,

    /// Index into `items` of the unique fully-matched candidate, set only
    /// when exactly one candidate matched non-empty filter text.
    pub unique: Option<usize>,
}

impl ResultModel {
    /// The selected candidate, when there is one.
    pub fn selected_item(&self) -> Option<&CandidateItem> {
        self.selected
            .and_then(|idx| self.items.get(idx))
            .map(|h| &h.item)
    }

    /// The blind-commit candidate, when there is one.
    pub fn unique_item(&self) -> Option<&CandidateItem> {
        self.unique
            .and_then(|idx| self.items.get(idx))
            .map(|h| &h.item)
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum ListUpdate {
    /// A new model to render.
    Model(ResultModel),
    /// Close the list.
    Dismiss,
    /// Nothing to publish this round (unsupported trigger, stale
    /// snapshot, or cooperative cancellation); the prior model stands.
    NoUpdate,
}

impl ListUpdate {
    pub fn as_model(&self) -> Option<&ResultModel> {
        match self {
            ListUpdate::Model(model) => Some(model),
            _ => None,
        }
    }

    pub fn is_dismiss(&self) -> bool {
        matches!(self, ListUpdate::Dismiss)
    }
}
