use nucleo_matcher::Config;
use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use serde::Deserialize;
use serde::Serialize;

/// A half-open `[start, end)` range of character positions in a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Fuzzy scorer over plain strings, backed by nucleo-matcher.
///
/// Scoring is subsequence-based: every character of the needle must appear
/// in the haystack in order. Prefix runs are preferred so that completion
/// labels that start with the typed text outrank scattered matches.
pub struct FuzzyScorer {
    matcher: Matcher,
    haystack_buf: Vec<char>,
    needle_buf: Vec<char>,
    indices_buf: Vec<u32>,
}

impl FuzzyScorer {
    pub fn new() -> Self {
        let mut config = Config::DEFAULT;
        config.prefer_prefix = true;
        Self {
            matcher: Matcher::new(config),
            haystack_buf: Vec::new(),
            needle_buf: Vec::new(),
            indices_buf: Vec::new(),
        }
    }

    /// Score `needle` against `haystack`. `None` means no match.
    pub fn score(&mut self, haystack: &str, needle: &str) -> Option<u16> {
        let haystack = Utf32Str::new(haystack, &mut self.haystack_buf);
        let needle = Utf32Str::new(needle, &mut self.needle_buf);
        self.matcher.fuzzy_match(haystack, needle)
    }

    /// Compute the character spans of `haystack` matched by `needle`,
    /// with adjacent matched characters merged into single spans.
    ///
    /// Returns an empty list when the needle does not match at all.
    pub fn spans(&mut self, haystack: &str, needle: &str) -> Vec<MatchSpan> {
        self.indices_buf.clear();
        let haystack = Utf32Str::new(haystack, &mut self.haystack_buf);
        let needle = Utf32Str::new(needle, &mut self.needle_buf);
        if self
            .matcher
            .fuzzy_indices(haystack, needle, &mut self.indices_buf)
            .is_none()
        {
            return Vec::new();
        }
        merge_indices(&self.indices_buf)
    }
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse a sorted index list into half-open spans.
fn merge_indices(indices: &[u32]) -> Vec<MatchSpan> {
    let mut spans: Vec<MatchSpan> = Vec::new();
    for &idx in indices {
        let idx = idx as usize;
        match spans.last_mut() {
            Some(last) if last.end == idx => last.end = idx + 1,
            _ => spans.push(MatchSpan::new(idx, idx + 1)),
        }
    }
    spans
}
