use serde::Deserialize;
use serde::Serialize;

use crate::error::CompletionError;
use crate::error::Result;

/// Host-facing presentation switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Compute highlight spans for the matched portions of each label.
    #[serde(default = "default_true")]
    pub highlight_matching_portions: bool,

    /// Publish facet states with each model; when off, models carry no
    /// facets and the availability pass is skipped entirely.
    #[serde(default = "default_true")]
    pub show_item_facets: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            highlight_matching_portions: true,
            show_item_facets: true,
        }
    }
}

impl EngineConfig {
    /// Configuration for hosts that render a bare list: no highlighting,
    /// no facet row.
    pub fn minimal() -> Self {
        Self {
            highlight_matching_portions: false,
            show_item_facets: false,
        }
    }
}

/// Domain-supplied completion rules; how aggressively the list closes and
/// which characters count as member access for the numeric guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRules {
    /// Dismiss the list when typing filters every candidate out.
    #[serde(default)]
    pub dismiss_if_empty: bool,

    /// Dismiss the list when backspace removes the last typed character.
    #[serde(default)]
    pub dismiss_if_last_character_deleted: bool,

    /// Characters that read as member access immediately before the
    /// filter span. A leading digit in the filter text only filters the
    /// list when one of these precedes it.
    #[serde(default = "default_member_access_characters")]
    pub member_access_characters: Vec<char>,
}

impl Default for CompletionRules {
    fn default() -> Self {
        Self {
            dismiss_if_empty: false,
            dismiss_if_last_character_deleted: false,
            member_access_characters: default_member_access_characters(),
        }
    }
}

impl CompletionRules {
    /// Rules for languages that close the list eagerly on both empty
    /// results and fully deleted filter text.
    pub fn dismissive() -> Self {
        Self {
            dismiss_if_empty: true,
            dismiss_if_last_character_deleted: true,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ch) = self
            .member_access_characters
            .iter()
            .find(|ch| ch.is_alphanumeric() || **ch == '_')
        {
            return Err(CompletionError::InvalidConfig(format!(
                "member access character {ch:?} collides with identifier characters"
            )));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_member_access_characters() -> Vec<char> {
    vec!['.']
}
