use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::CompletionRules;
use crate::item::CandidateItem;
use crate::item::FacetTag;
use crate::matcher::Matcher;
use crate::model::FilterSnapshot;
use crate::trigger::FilterReason;
use crate::trigger::TriggerKind;

/// One candidate that survived filtering for the current keystroke,
/// together with its match outcome. The set is rebuilt from scratch on
/// every edit; match outcomes are never carried across snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedItem {
    pub item: CandidateItem,
    /// Index of the candidate in the session's sorted list.
    pub position: usize,
    /// Whether the candidate matched the typed filter text.
    pub matched: bool,
}

/// True when the snapshot is a bare numeric token: the filter text leads
/// with a digit and nothing that reads as member access precedes it.
/// Such edits should close the list instead of filtering it; typing
/// `3` after a space is a literal, not a lookup.
pub(crate) fn is_unguarded_numeric_filter(snapshot: &FilterSnapshot, rules: &CompletionRules) -> bool {
    let Some(first) = snapshot.filter_text.chars().next() else {
        return false;
    };
    if !first.is_numeric() {
        return false;
    }
    !snapshot
        .preceding_char
        .is_some_and(|ch| rules.member_access_characters.contains(&ch))
}

/// Build the retained working set for one keystroke.
///
/// Facet filtering applies only when a non-empty strict subset of facets
/// is selected. Candidates that fail text matching are still retained on
/// deletion or explicit invoke, and while at most one character has been
/// typed; a single keystroke should not prune the list.
///
/// Returns `None` when the pass was cancelled mid-loop; nothing may be
/// published from a cancelled pass.
#[allow(clippy::too_many_arguments)]
pub(crate) fn retain_candidates(
    candidates: &[CandidateItem],
    snapshot: &FilterSnapshot,
    current_kind: TriggerKind,
    initial_kind: TriggerKind,
    reason: FilterReason,
    matcher: &dyn Matcher,
    recent: &[String],
    cancel: &CancellationToken,
) -> Option<Vec<RetainedItem>> {
    let selected: Vec<&FacetTag> = snapshot.selected_facets();
    let need_to_filter = !selected.is_empty() && selected.len() < snapshot.facets.len();
    let single_character = snapshot.filter_text.chars().count() <= 1;

    let mut retained = Vec::new();
    for (position, item) in candidates.iter().enumerate() {
        if cancel.is_cancelled() {
            debug!(position, "filter pass cancelled");
            return None;
        }

        if need_to_filter && !carries_selected_facet(item, &selected) {
            continue;
        }

        let matched = matcher.matches(item, &snapshot.filter_text, initial_kind, reason, recent);
        if matched
            || current_kind == TriggerKind::Deletion
            || current_kind == TriggerKind::Invoke
            || single_character
        {
            retained.push(RetainedItem {
                item: item.clone(),
                position,
                matched,
            });
        }
    }

    debug!(
        total = candidates.len(),
        retained = retained.len(),
        "filtered candidate list"
    );
    Some(retained)
}

fn carries_selected_facet(item: &CandidateItem, selected: &[&FacetTag]) -> bool {
    item.facets.iter().any(|facet| selected.contains(&facet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::FacetState;
    use crate::matcher::TextMatcher;
    use crate::trigger::RawTrigger;
    use pretty_assertions::assert_eq;

    fn sample_candidates() -> Vec<CandidateItem> {
        vec![
            CandidateItem::new("w", "Write").with_facets(vec![FacetTag::new("method")]),
            CandidateItem::new("wl", "WriteLine").with_facets(vec![FacetTag::new("method")]),
            CandidateItem::new("if", "if").with_facets(vec![FacetTag::new("keyword")]),
        ]
    }

    fn retain(
        snapshot: &FilterSnapshot,
        current_kind: TriggerKind,
    ) -> Vec<RetainedItem> {
        let matcher = TextMatcher::new();
        retain_candidates(
            &sample_candidates(),
            snapshot,
            current_kind,
            TriggerKind::Insertion,
            FilterReason::Insertion,
            &matcher,
            &[],
            &CancellationToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn multi_character_insertion_drops_non_matches() {
        let snapshot = FilterSnapshot::new("Wri", RawTrigger::Insertion('i'), 1);
        let retained = retain(&snapshot, TriggerKind::Insertion);
        let ids: Vec<&str> = retained.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["w", "wl"]);
        assert!(retained.iter().all(|r| r.matched));
    }

    #[test]
    fn single_character_keeps_non_matches() {
        let snapshot = FilterSnapshot::new("W", RawTrigger::Insertion('W'), 1);
        let retained = retain(&snapshot, TriggerKind::Insertion);
        assert_eq!(retained.len(), 3);
        assert!(!retained[2].matched, "keyword kept but unmatched");
    }

    #[test]
    fn deletion_keeps_everything() {
        let snapshot = FilterSnapshot::new("xyzq", RawTrigger::Backspace('!'), 1);
        let retained = retain(&snapshot, TriggerKind::Deletion);
        assert_eq!(retained.len(), 3);
        assert!(retained.iter().all(|r| !r.matched));
    }

    #[test]
    fn invoke_keeps_everything() {
        let snapshot = FilterSnapshot::new("zzzz", RawTrigger::Invoke, 1);
        let retained = retain(&snapshot, TriggerKind::Invoke);
        assert_eq!(retained.len(), 3);
    }

    #[test]
    fn strict_facet_subset_drops_unrelated_candidates() {
        let snapshot = FilterSnapshot::new("", RawTrigger::Invoke, 1).with_facets(vec![
            FacetState::new(FacetTag::new("method")).selected(),
            FacetState::new(FacetTag::new("keyword")),
        ]);
        let retained = retain(&snapshot, TriggerKind::Invoke);
        let ids: Vec<&str> = retained.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["w", "wl"]);
    }

    #[test]
    fn selecting_every_facet_filters_nothing() {
        let snapshot = FilterSnapshot::new("", RawTrigger::Invoke, 1).with_facets(vec![
            FacetState::new(FacetTag::new("method")).selected(),
            FacetState::new(FacetTag::new("keyword")).selected(),
        ]);
        let retained = retain(&snapshot, TriggerKind::Invoke);
        assert_eq!(retained.len(), 3);
    }

    #[test]
    fn positions_reference_the_sorted_list() {
        let snapshot = FilterSnapshot::new("", RawTrigger::Invoke, 1).with_facets(vec![
            FacetState::new(FacetTag::new("method")),
            FacetState::new(FacetTag::new("keyword")).selected(),
        ]);
        let retained = retain(&snapshot, TriggerKind::Invoke);
        assert_eq!(retained.len(), 1);
        assert_eq!(retained[0].position, 2);
    }

    #[test]
    fn cancelled_pass_returns_none() {
        let matcher = TextMatcher::new();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let snapshot = FilterSnapshot::new("W", RawTrigger::Insertion('W'), 1);
        let result = retain_candidates(
            &sample_candidates(),
            &snapshot,
            TriggerKind::Insertion,
            TriggerKind::Insertion,
            FilterReason::Insertion,
            &matcher,
            &[],
            &cancel,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn numeric_guard_fires_without_member_access() {
        let rules = CompletionRules::default();
        let bare = FilterSnapshot::new("3", RawTrigger::Insertion('3'), 1);
        assert!(is_unguarded_numeric_filter(&bare, &rules));

        let after_dot = FilterSnapshot::new("3", RawTrigger::Insertion('3'), 1)
            .with_preceding_char('.');
        assert!(!is_unguarded_numeric_filter(&after_dot, &rules));
    }

    #[test]
    fn numeric_guard_ignores_non_numeric_text() {
        let rules = CompletionRules::default();
        let snapshot = FilterSnapshot::new("a3", RawTrigger::Insertion('3'), 1);
        assert!(!is_unguarded_numeric_filter(&snapshot, &rules));
        let empty = FilterSnapshot::new("", RawTrigger::Invoke, 1);
        assert!(!is_unguarded_numeric_filter(&empty, &rules));
    }
}
