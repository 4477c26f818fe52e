/*!
# Glint text matching

Text-matching primitives shared by the completion engine:

- **Fuzzy scoring** via nucleo-matcher for fast subsequence matching
- **Matched-character spans** for highlighting the portions of a label
  that correspond to the typed text
- **Prefix helpers** with Unicode case folding for selection decisions

The crate knows nothing about completion items or triggers; it operates on
plain strings so it can be reused (and tested) in isolation.
*/

mod fuzzy;
mod prefix;

pub use fuzzy::FuzzyScorer;
pub use fuzzy::MatchSpan;
pub use prefix::common_prefix_len;
pub use prefix::common_prefix_len_ignore_case;
pub use prefix::starts_with_ignore_case;
