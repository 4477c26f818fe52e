use serde::Deserialize;
use serde::Serialize;

/// Opaque category label a candidate can carry and a user can toggle to
/// narrow the visible list (for example "method", "keyword", "snippet").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetTag(String);

impl FacetTag {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FacetTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-keystroke state of one facet: whether the user has toggled it on,
/// and whether any currently visible candidate still carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetState {
    pub tag: FacetTag,
    #[serde(default)]
    pub selected: bool,
    #[serde(default = "default_true")]
    pub available: bool,
}

impl FacetState {
    pub fn new(tag: FacetTag) -> Self {
        Self {
            tag,
            selected: false,
            available: true,
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

fn default_true() -> bool {
    true
}

/// One completion-list entry. Immutable once handed to a session; the
/// session's initial snapshot owns the full set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Stable identifier, also the key used by the recency cache.
    pub id: String,

    /// Text rendered in the list.
    pub display: String,

    /// Text the user's typed filter is matched against.
    pub filter_text: String,

    /// Key for the initial one-time ordering of the list.
    pub sort_text: String,

    /// Facets this candidate belongs to.
    #[serde(default)]
    pub facets: Vec<FacetTag>,

    /// Candidate the producer wants selected before any text is typed.
    #[serde(default)]
    pub preselect: bool,

    /// Extra characters (beyond letters, digits and `_`) that keep the
    /// list filtering instead of dismissing it when typed.
    #[serde(default)]
    pub filter_characters: Vec<char>,

    /// Producer-defined payload carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl CandidateItem {
    /// Create a candidate whose filter and sort text both default to the
    /// display text.
    pub fn new(id: impl Into<String>, display: impl Into<String>) -> Self {
        let display = display.into();
        Self {
            id: id.into(),
            filter_text: display.clone(),
            sort_text: display.clone(),
            display,
            facets: Vec::new(),
            preselect: false,
            filter_characters: Vec::new(),
            payload: None,
        }
    }

    pub fn with_filter_text(mut self, filter_text: impl Into<String>) -> Self {
        self.filter_text = filter_text.into();
        self
    }

    pub fn with_sort_text(mut self, sort_text: impl Into<String>) -> Self {
        self.sort_text = sort_text.into();
        self
    }

    pub fn with_facets(mut self, facets: Vec<FacetTag>) -> Self {
        self.facets = facets;
        self
    }

    pub fn preselected(mut self) -> Self {
        self.preselect = true;
        self
    }

    pub fn with_filter_characters(mut self, chars: Vec<char>) -> Self {
        self.filter_characters = chars;
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Whether `ch` continues filtering for this candidate rather than
    /// ending the session. Letters, digits and `_` always do; anything
    /// else must be listed in `filter_characters`.
    pub fn accepts_filter_char(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || self.filter_characters.contains(&ch)
    }
}
