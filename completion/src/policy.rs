use parking_lot::Mutex;

use crate::filter::RetainedItem;
use crate::item::CandidateItem;
use crate::trigger::FilterReason;
use crate::trigger::TriggerKind;
use glint_textmatch::FuzzyScorer;
use glint_textmatch::common_prefix_len_ignore_case;
use glint_textmatch::starts_with_ignore_case;

/// Domain ranking and selection-confidence rules. Hosts with their own
/// language-specific ranking implement this; [`DefaultPolicy`] covers
/// tests and hosts without one.
pub trait SelectionPolicy: Send + Sync {
    /// From the candidates that matched the filter text, pick the
    /// shortlist of best matches (indices into `matched`). The recency
    /// tie-break between shortlisted candidates happens upstream.
    fn choose_best(&self, matched: &[&RetainedItem], filter_text: &str) -> Vec<usize>;

    /// Pairwise comparator for the deletion path: is `a` a better match
    /// for the remaining filter text than `b`?
    fn is_better_deletion_match(
        &self,
        a: &RetainedItem,
        b: &RetainedItem,
        filter_text: &str,
    ) -> bool;

    /// Should the selected candidate be hard-selected (committed by any
    /// commit key) rather than tentatively highlighted?
    #[allow(clippy::too_many_arguments)]
    fn is_hard_selection(
        &self,
        item: &CandidateItem,
        filter_text: &str,
        trigger: TriggerKind,
        reason: FilterReason,
        caret: Option<usize>,
        recent: &[String],
        has_suggestion_mode: bool,
    ) -> bool;
}

/// Default policy:
///
/// - best matches are the highest-scoring fuzzy matches of the filter
///   text, all ties included
/// - a deletion match is better when it shares a longer prefix with the
///   filter text, then when it sits earlier in the original order
/// - selection is hard when the typed text is a genuine prefix of the
///   candidate and no suggestion-item mode is active; on empty text only
///   preselected or recently committed candidates are hard-selected
pub struct DefaultPolicy {
    scorer: Mutex<FuzzyScorer>,
}

impl DefaultPolicy {
    pub fn new() -> Self {
        Self {
            scorer: Mutex::new(FuzzyScorer::new()),
        }
    }
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPolicy for DefaultPolicy {
    fn choose_best(&self, matched: &[&RetainedItem], filter_text: &str) -> Vec<usize> {
        if matched.is_empty() {
            return Vec::new();
        }
        if filter_text.is_empty() {
            return (0..matched.len()).collect();
        }

        let mut scorer = self.scorer.lock();
        let scores: Vec<Option<u16>> = matched
            .iter()
            .map(|r| scorer.score(&r.item.filter_text, filter_text))
            .collect();
        let Some(best) = scores.iter().flatten().max().copied() else {
            // Matched via preselection or recency rather than text; keep
            // them all in contention.
            return (0..matched.len()).collect();
        };
        scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score == Some(best))
            .map(|(idx, _)| idx)
            .collect()
    }

    fn is_better_deletion_match(
        &self,
        a: &RetainedItem,
        b: &RetainedItem,
        filter_text: &str,
    ) -> bool {
        let prefix_a = common_prefix_len_ignore_case(&a.item.filter_text, filter_text);
        let prefix_b = common_prefix_len_ignore_case(&b.item.filter_text, filter_text);
        if prefix_a != prefix_b {
            return prefix_a > prefix_b;
        }
        a.position < b.position
    }

    fn is_hard_selection(
        &self,
        item: &CandidateItem,
        filter_text: &str,
        _trigger: TriggerKind,
        _reason: FilterReason,
        _caret: Option<usize>,
        recent: &[String],
        has_suggestion_mode: bool,
    ) -> bool {
        if has_suggestion_mode {
            return false;
        }
        if filter_text.is_empty() {
            return item.preselect || recent.iter().any(|id| *id == item.id);
        }
        starts_with_ignore_case(&item.filter_text, filter_text)
    }
}
