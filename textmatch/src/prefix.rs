/// True when `text` starts with `prefix`, folding Unicode case.
///
/// Comparison is per character with full case folding via
/// `char::to_lowercase`, which is what the selection logic needs for
/// "did the user type the beginning of this label" checks.
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut text_chars = text.chars();
    for p in prefix.chars() {
        match text_chars.next() {
            Some(t) if chars_eq_ignore_case(t, p) => {}
            _ => return false,
        }
    }
    true
}

/// Length (in characters) of the longest common prefix of `a` and `b`.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Case-folded variant of [`common_prefix_len`].
pub fn common_prefix_len_ignore_case(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| chars_eq_ignore_case(*x, *y))
        .count()
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prefix_ignores_case() {
        assert!(starts_with_ignore_case("WriteLine", "writel"));
        assert!(starts_with_ignore_case("writeline", "WRITE"));
        assert!(!starts_with_ignore_case("WriteLine", "writeX"));
    }

    #[test]
    fn empty_prefix_always_matches() {
        assert!(starts_with_ignore_case("anything", ""));
        assert!(starts_with_ignore_case("", ""));
    }

    #[test]
    fn prefix_longer_than_text_never_matches() {
        assert!(!starts_with_ignore_case("Wri", "Write"));
    }

    #[test]
    fn common_prefix_counts_characters() {
        assert_eq!(common_prefix_len("WriteLine", "WriteHost"), 5);
        assert_eq!(common_prefix_len("abc", "xyz"), 0);
        assert_eq!(common_prefix_len("same", "same"), 4);
    }

    #[test]
    fn common_prefix_ignore_case_folds() {
        assert_eq!(common_prefix_len_ignore_case("WRITE", "write"), 5);
        assert_eq!(common_prefix_len_ignore_case("WriteLine", "writeH"), 5);
    }

    #[test]
    fn non_ascii_case_folding() {
        assert!(starts_with_ignore_case("Äpfel", "äp"));
        assert_eq!(common_prefix_len_ignore_case("Straße", "STRA"), 4);
    }
}
