/*!
# Glint completion engine

Decision core for an interactive, incremental completion list: given a
candidate set and the user's in-progress edits, it decides on every
keystroke which candidates stay visible, which one is selected and how
confidently, which label spans to highlight, and which facets remain
available.

## Pipeline

```text
FilterSnapshot (one per keystroke)
  ├─> trigger classification (Invoke / Insertion / Deletion / Snippet)
  ├─> numeric-literal guard
  ├─> candidate retention (facets + text matching + retention policy)
  └─> branch
        ├─> all filtered out  → dismiss / freeze / empty set
        ├─> deletion session  → prefix-gated best deletion match
        └─> normal session    → policy shortlist + recency tie-break
              └─> highlights + facet availability → ResultModel
```

## Collaborators

Text matching ([`Matcher`]) and domain ranking ([`SelectionPolicy`]) are
trait seams. The bundled [`TextMatcher`] and [`DefaultPolicy`] are backed
by `glint-textmatch` and are what tests and stock hosts use; language
services substitute their own scoring without touching the pipeline.

## Sessions and commits

[`CompletionEngine`] holds the state shared across sessions, most
importantly the bounded [`RecencyCache`] of recently committed items that
breaks selection ties. Each open list is a [`CompletionSession`]; the
host calls `update` per keystroke, `on_commit` when an item is accepted,
and `on_dismiss` when the list closes. Updates for one session are
synchronous per edit; commits may arrive concurrently from other
sessions.

## Example

```rust
use glint_completion::{
    CandidateItem, CompletionEngine, CompletionRules, EngineConfig, FilterSnapshot, RawTrigger,
};
use tokio_util::sync::CancellationToken;

let engine = CompletionEngine::new(EngineConfig::default());
let mut session = engine
    .begin_session(
        vec![
            CandidateItem::new("write", "Write"),
            CandidateItem::new("write-line", "WriteLine"),
        ],
        RawTrigger::Insertion('W'),
        CompletionRules::default(),
        false,
    )
    .expect("supported trigger");

let snapshot = FilterSnapshot::new("WriteL", RawTrigger::Insertion('L'), 1);
let update = session.update(&snapshot, &CancellationToken::new());
let model = update.as_model().expect("list still open");
assert_eq!(model.unique_item().map(|i| i.id.as_str()), Some("write-line"));
```
*/

mod config;
mod error;
mod facet;
mod filter;
mod highlight;
mod item;
mod matcher;
mod model;
mod policy;
mod recency;
mod select;
mod session;
mod trigger;

pub use config::CompletionRules;
pub use config::EngineConfig;
pub use error::CompletionError;
pub use error::Result;
pub use filter::RetainedItem;
pub use item::CandidateItem;
pub use item::FacetState;
pub use item::FacetTag;
pub use matcher::Matcher;
pub use matcher::TextMatcher;
pub use model::FilterSnapshot;
pub use model::HighlightedItem;
pub use model::ListUpdate;
pub use model::ResultModel;
pub use model::SelectionHint;
pub use policy::DefaultPolicy;
pub use policy::SelectionPolicy;
pub use recency::MAX_RECENT;
pub use recency::RecencyCache;
pub use session::CompletionEngine;
pub use session::CompletionSession;
pub use trigger::ClassifiedTrigger;
pub use trigger::FilterReason;
pub use trigger::RawTrigger;
pub use trigger::TriggerKind;
pub use trigger::classify;

pub use glint_textmatch::MatchSpan;
