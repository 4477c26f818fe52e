use crate::filter::RetainedItem;
use crate::matcher::Matcher;
use crate::model::HighlightedItem;

/// Attach label highlight spans to every retained candidate.
///
/// With highlighting disabled every item gets empty spans and the matcher
/// is never consulted; disabled and "no spans" render identically, so
/// skipping the computation changes nothing observable.
pub(crate) fn build_highlighted_list(
    retained: &[RetainedItem],
    filter_text: &str,
    enabled: bool,
    matcher: &dyn Matcher,
) -> Vec<HighlightedItem> {
    retained
        .iter()
        .map(|r| HighlightedItem {
            item: r.item.clone(),
            spans: if enabled {
                matcher.highlight_spans(&r.item.filter_text, filter_text)
            } else {
                Vec::new()
            },
        })
        .collect()
}
