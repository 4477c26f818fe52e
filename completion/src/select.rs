use tracing::debug;

use crate::config::CompletionRules;
use crate::config::EngineConfig;
use crate::facet::update_facet_availability;
use crate::filter::RetainedItem;
use crate::highlight::build_highlighted_list;
use crate::item::FacetState;
use crate::matcher::Matcher;
use crate::model::FilterSnapshot;
use crate::model::ListUpdate;
use crate::model::ResultModel;
use crate::model::SelectionHint;
use crate::policy::SelectionPolicy;
use crate::trigger::FilterReason;
use crate::trigger::RawTrigger;
use crate::trigger::TriggerKind;
use glint_textmatch::starts_with_ignore_case;

/// Everything the selection handlers need besides the retained set.
pub(crate) struct SelectionContext<'a> {
    pub snapshot: &'a FilterSnapshot,
    pub initial_kind: TriggerKind,
    pub reason: FilterReason,
    pub matcher: &'a dyn Matcher,
    pub policy: &'a dyn SelectionPolicy,
    pub recent: &'a [String],
    pub has_suggestion_mode: bool,
    pub config: &'a EngineConfig,
}

impl SelectionContext<'_> {
    fn facets_for_model(&self, retained: &[RetainedItem]) -> Vec<FacetState> {
        if self.config.show_item_facets {
            update_facet_availability(&self.snapshot.facets, retained)
        } else {
            Vec::new()
        }
    }
}

/// Non-deletion path: the policy shortlists the best of the matched
/// candidates, recency breaks the tie, and the hard/soft hint comes from
/// the policy's confidence predicate. A candidate becomes the unique
/// blind-commit item only when it was the single match for non-empty
/// filter text.
pub(crate) fn handle_normal_filtering(
    retained: &[RetainedItem],
    cx: &SelectionContext<'_>,
) -> ListUpdate {
    let Some(first_retained) = retained.first() else {
        return ListUpdate::NoUpdate;
    };
    let filter_text = &cx.snapshot.filter_text;

    let highlighted = build_highlighted_list(
        retained,
        filter_text,
        cx.config.highlight_matching_portions,
        cx.matcher,
    );

    let matched: Vec<&RetainedItem> = retained.iter().filter(|r| r.matched).collect();
    let shortlist = cx.policy.choose_best(&matched, filter_text);
    let best = pick_most_recent(&matched, &shortlist, cx.recent);
    debug!(
        matched = matched.len(),
        shortlisted = shortlist.len(),
        best = best.map(|r| r.item.id.as_str()),
        "resolved normal selection"
    );

    let mut selected = 0usize;
    let mut unique = None;
    if let Some(best) = best
        && let Some(idx) = retained.iter().position(|r| r.item.id == best.item.id)
    {
        selected = idx;
        if matched.len() == 1 && !filter_text.is_empty() {
            unique = Some(idx);
        }
    }

    let best_or_first = best.unwrap_or(first_retained);

    // A typed character that is neither an identifier character nor one
    // the candidate declares as a filter character ends the session
    // instead of filtering it.
    if let RawTrigger::Insertion(ch) = cx.snapshot.trigger
        && !is_potential_filter_char(ch)
        && !filter_text.is_empty()
        && !best_or_first.item.accepts_filter_char(ch)
    {
        debug!(typed = %ch, "character does not continue filtering; dismissing");
        return ListUpdate::Dismiss;
    }

    let hint = if best.is_some() {
        let hard = cx.policy.is_hard_selection(
            &best_or_first.item,
            filter_text,
            cx.initial_kind,
            cx.reason,
            cx.snapshot.caret,
            cx.recent,
            cx.has_suggestion_mode,
        );
        if hard {
            SelectionHint::Selected
        } else {
            SelectionHint::SoftSelected
        }
    } else {
        // Nothing matched; the first retained item is only a provisional
        // selection.
        SelectionHint::SoftSelected
    };

    ListUpdate::Model(ResultModel {
        facets: cx.facets_for_model(retained),
        items: highlighted,
        selected: Some(selected),
        hint,
        unique,
    })
}

/// Deletion path: keep a running best over the matched candidates with
/// the pairwise deletion comparator, then hard-select it only when the
/// remaining filter text is genuinely a prefix of the candidate. Deleting
/// a separator must not snap selection to a different, longer-matching
/// symbol.
pub(crate) fn handle_deletion_trigger(
    retained: &[RetainedItem],
    cx: &SelectionContext<'_>,
) -> ListUpdate {
    let filter_text = &cx.snapshot.filter_text;

    let mut best: Option<&RetainedItem> = None;
    for current in retained.iter().filter(|r| r.matched) {
        let better = match best {
            None => true,
            Some(b) => cx.policy.is_better_deletion_match(current, b, filter_text),
        };
        if better {
            best = Some(current);
        }
    }

    let highlighted = build_highlighted_list(
        retained,
        filter_text,
        cx.config.highlight_matching_portions,
        cx.matcher,
    );
    let facets = cx.facets_for_model(retained);

    match best {
        Some(best) => {
            let hard = starts_with_ignore_case(&best.item.filter_text, filter_text);
            let selected = retained
                .iter()
                .position(|r| r.item.id == best.item.id)
                .unwrap_or(0);
            debug!(best = %best.item.id, hard, "resolved deletion selection");
            ListUpdate::Model(ResultModel {
                items: highlighted,
                selected: Some(selected),
                hint: if hard {
                    SelectionHint::Selected
                } else {
                    SelectionHint::SoftSelected
                },
                facets,
                unique: None,
            })
        }
        None => {
            // Deleting down to nothing matchable keeps the list up with a
            // tentative selection on the first entry.
            let selected = if retained.is_empty() { None } else { Some(0) };
            ListUpdate::Model(ResultModel {
                items: highlighted,
                selected,
                hint: SelectionHint::SoftSelected,
                facets,
                unique: None,
            })
        }
    }
}

/// Everything got filtered out. On plain typing this either dismisses
/// (when the domain wants that) or freezes the list; otherwise an empty
/// visible set is published so the user can see their facet choices led
/// nowhere and toggle them back.
pub(crate) fn handle_all_filtered_out(
    snapshot: &FilterSnapshot,
    rules: &CompletionRules,
) -> ListUpdate {
    let hint = if matches!(snapshot.trigger, RawTrigger::Insertion(_)) {
        if rules.dismiss_if_empty {
            debug!("list emptied by typing; dismissing");
            return ListUpdate::Dismiss;
        }
        SelectionHint::NoChange
    } else if snapshot.selected_facets().is_empty() {
        SelectionHint::SoftSelected
    } else {
        SelectionHint::NoChange
    };

    ListUpdate::Model(ResultModel {
        items: Vec::new(),
        selected: None,
        hint,
        // Incoming facet states pass through untouched; with no retained
        // items an availability pass would disable all of them.
        facets: snapshot.facets.clone(),
        unique: None,
    })
}

fn is_potential_filter_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Of the shortlisted candidates, prefer the one committed most recently;
/// when none appears in the recency snapshot, the shortlist's own first
/// choice stands.
fn pick_most_recent<'a>(
    matched: &[&'a RetainedItem],
    shortlist: &[usize],
    recent: &[String],
) -> Option<&'a RetainedItem> {
    let candidates: Vec<&RetainedItem> = shortlist
        .iter()
        .filter_map(|&idx| matched.get(idx).copied())
        .collect();

    candidates
        .iter()
        .filter_map(|r| {
            recent
                .iter()
                .position(|id| *id == r.item.id)
                .map(|rank| (rank, *r))
        })
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, r)| r)
        .or_else(|| candidates.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::CandidateItem;
    use crate::item::FacetState;
    use crate::item::FacetTag;
    use crate::matcher::TextMatcher;
    use crate::policy::DefaultPolicy;
    use pretty_assertions::assert_eq;

    fn retained(id: &str, text: &str, position: usize, matched: bool) -> RetainedItem {
        RetainedItem {
            item: CandidateItem::new(id, text),
            position,
            matched,
        }
    }

    struct Fixture {
        matcher: TextMatcher,
        policy: DefaultPolicy,
        config: EngineConfig,
        recent: Vec<String>,
        has_suggestion_mode: bool,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                matcher: TextMatcher::new(),
                policy: DefaultPolicy::new(),
                config: EngineConfig::default(),
                recent: Vec::new(),
                has_suggestion_mode: false,
            }
        }

        fn context<'a>(
            &'a self,
            snapshot: &'a FilterSnapshot,
            initial_kind: TriggerKind,
            reason: FilterReason,
        ) -> SelectionContext<'a> {
            SelectionContext {
                snapshot,
                initial_kind,
                reason,
                matcher: &self.matcher,
                policy: &self.policy,
                recent: &self.recent,
                has_suggestion_mode: self.has_suggestion_mode,
                config: &self.config,
            }
        }
    }

    #[test]
    fn unique_item_set_for_single_match_with_text() {
        let fixture = Fixture::new();
        let snapshot = FilterSnapshot::new("WriteL", RawTrigger::Insertion('L'), 1);
        let cx = fixture.context(&snapshot, TriggerKind::Insertion, FilterReason::Insertion);
        let items = vec![
            retained("w", "Write", 0, false),
            retained("wl", "WriteLine", 1, true),
        ];

        let update = handle_normal_filtering(&items, &cx);
        let model = update.as_model().expect("model");
        assert_eq!(model.selected, Some(1));
        assert_eq!(model.unique, Some(1));
        assert_eq!(model.unique_item().map(|i| i.id.as_str()), Some("wl"));
    }

    #[test]
    fn empty_filter_text_never_produces_unique() {
        let fixture = Fixture::new();
        let snapshot = FilterSnapshot::new("", RawTrigger::Invoke, 1);
        let cx = fixture.context(&snapshot, TriggerKind::Invoke, FilterReason::Other);
        let items = vec![retained("only", "Only", 0, true)];

        let update = handle_normal_filtering(&items, &cx);
        let model = update.as_model().expect("model");
        assert_eq!(model.unique, None);
    }

    #[test]
    fn recency_breaks_shortlist_ties() {
        let mut fixture = Fixture::new();
        fixture.recent = vec!["b".to_string(), "a".to_string()];
        let snapshot = FilterSnapshot::new("item", RawTrigger::Insertion('m'), 1);
        let cx = fixture.context(&snapshot, TriggerKind::Insertion, FilterReason::Insertion);
        // Identical filter text so the policy shortlist keeps both.
        let items = vec![
            RetainedItem {
                item: CandidateItem::new("a", "itemA").with_filter_text("item"),
                position: 0,
                matched: true,
            },
            RetainedItem {
                item: CandidateItem::new("b", "itemB").with_filter_text("item"),
                position: 1,
                matched: true,
            },
        ];

        let update = handle_normal_filtering(&items, &cx);
        let model = update.as_model().expect("model");
        // "a" was committed after "b", so it wins the tie.
        assert_eq!(model.selected_item().map(|i| i.id.as_str()), Some("a"));
    }

    #[test]
    fn no_match_soft_selects_first_retained() {
        let fixture = Fixture::new();
        let snapshot = FilterSnapshot::new("q", RawTrigger::Insertion('q'), 1);
        let cx = fixture.context(&snapshot, TriggerKind::Insertion, FilterReason::Insertion);
        let items = vec![
            retained("a", "Alpha", 0, false),
            retained("b", "Beta", 1, false),
        ];

        let update = handle_normal_filtering(&items, &cx);
        let model = update.as_model().expect("model");
        assert_eq!(model.selected, Some(0));
        assert_eq!(model.hint, SelectionHint::SoftSelected);
        assert_eq!(model.unique, None);
    }

    #[test]
    fn non_filter_character_dismisses() {
        let fixture = Fixture::new();
        let snapshot = FilterSnapshot::new("Wri!", RawTrigger::Insertion('!'), 1);
        let cx = fixture.context(&snapshot, TriggerKind::Insertion, FilterReason::Insertion);
        let items = vec![retained("w", "Write", 0, true)];

        assert!(handle_normal_filtering(&items, &cx).is_dismiss());
    }

    #[test]
    fn declared_filter_character_keeps_the_list() {
        let fixture = Fixture::new();
        let snapshot = FilterSnapshot::new("Wri!", RawTrigger::Insertion('!'), 1);
        let cx = fixture.context(&snapshot, TriggerKind::Insertion, FilterReason::Insertion);
        let items = vec![RetainedItem {
            item: CandidateItem::new("w", "Write").with_filter_characters(vec!['!']),
            position: 0,
            matched: true,
        }];

        assert!(handle_normal_filtering(&items, &cx).as_model().is_some());
    }

    #[test]
    fn deletion_hard_selects_on_prefix() {
        let fixture = Fixture::new();
        let snapshot = FilterSnapshot::new("Cons", RawTrigger::Backspace('o'), 1);
        let cx = fixture.context(&snapshot, TriggerKind::Deletion, FilterReason::Deletion);
        let items = vec![
            retained("co", "Collection", 0, true),
            retained("cn", "Console", 1, true),
        ];

        let update = handle_deletion_trigger(&items, &cx);
        let model = update.as_model().expect("model");
        assert_eq!(model.selected_item().map(|i| i.id.as_str()), Some("cn"));
        assert_eq!(model.hint, SelectionHint::Selected);
    }

    #[test]
    fn deletion_soft_selects_when_not_a_prefix() {
        let fixture = Fixture::new();
        let snapshot = FilterSnapshot::new("conx", RawTrigger::Backspace('y'), 1);
        let cx = fixture.context(&snapshot, TriggerKind::Deletion, FilterReason::Deletion);
        let items = vec![retained("cn", "Console", 0, true)];

        let update = handle_deletion_trigger(&items, &cx);
        let model = update.as_model().expect("model");
        assert_eq!(model.selected, Some(0));
        assert_eq!(model.hint, SelectionHint::SoftSelected);
    }

    #[test]
    fn deletion_with_no_matches_soft_selects_first() {
        let fixture = Fixture::new();
        let snapshot = FilterSnapshot::new("x", RawTrigger::Backspace('y'), 1);
        let cx = fixture.context(&snapshot, TriggerKind::Deletion, FilterReason::Deletion);
        let items = vec![
            retained("a", "Alpha", 0, false),
            retained("b", "Beta", 1, false),
        ];

        let update = handle_deletion_trigger(&items, &cx);
        let model = update.as_model().expect("model");
        assert_eq!(model.selected, Some(0));
        assert_eq!(model.hint, SelectionHint::SoftSelected);
        assert_eq!(model.unique, None);
    }

    #[test]
    fn all_filtered_out_insertion_dismisses_when_rules_say_so() {
        let snapshot = FilterSnapshot::new("zzz", RawTrigger::Insertion('z'), 1);
        let update = handle_all_filtered_out(&snapshot, &CompletionRules::dismissive());
        assert!(update.is_dismiss());
    }

    #[test]
    fn all_filtered_out_insertion_freezes_otherwise() {
        let snapshot = FilterSnapshot::new("zzz", RawTrigger::Insertion('z'), 1);
        let update = handle_all_filtered_out(&snapshot, &CompletionRules::default());
        let model = update.as_model().expect("model");
        assert!(model.items.is_empty());
        assert_eq!(model.selected, None);
        assert_eq!(model.hint, SelectionHint::NoChange);
    }

    #[test]
    fn all_filtered_out_without_facets_soft_selects_empty_set() {
        let snapshot = FilterSnapshot::new("zzz", RawTrigger::Invoke, 1);
        let update = handle_all_filtered_out(&snapshot, &CompletionRules::default());
        let model = update.as_model().expect("model");
        assert_eq!(model.hint, SelectionHint::SoftSelected);
    }

    #[test]
    fn all_filtered_out_with_active_facets_keeps_prior_model() {
        let snapshot = FilterSnapshot::new("zzz", RawTrigger::Invoke, 1)
            .with_facets(vec![FacetState::new(FacetTag::new("method")).selected()]);
        let update = handle_all_filtered_out(&snapshot, &CompletionRules::default());
        let model = update.as_model().expect("model");
        assert_eq!(model.hint, SelectionHint::NoChange);
        // Facet states pass through as the host sent them.
        assert_eq!(model.facets, snapshot.facets);
    }
}
