// encodings/mod.rs - Per-encoding primitives behind EncodedView.
// Each storage kind maps to one module; `regview` dispatches over them.

pub mod bytes;
pub mod utf32;
pub mod utf8;

use std::ops::Range;

/// Code point U+000A, the only line separator recognized by `lines()`.
pub const NEWLINE_CODE: u32 = 0x0a;

/// Split `len` units into line ranges given the separator positions.
/// A trailing line without a separator is still produced; an empty input
/// produces nothing.
pub(crate) fn ranges_between(
    separators: impl Iterator<Item = usize>,
    len: usize,
) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for sep in separators {
        lines.push(start..sep);
        start = sep + 1;
    }
    if start < len {
        lines.push(start..len);
    }
    lines
}

/// Compare two decoded character streams under Unicode simple lowercase folding.
pub fn chars_eq_ignore_case(
    a: impl Iterator<Item = char>,
    b: impl Iterator<Item = char>,
) -> bool {
    a.flat_map(char::to_lowercase)
        .eq(b.flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_with_trailing_line() {
        assert_eq!(ranges_between([1, 3].into_iter(), 5), vec![0..1, 2..3, 4..5]);
    }

    #[test]
    fn ranges_with_terminated_last_line() {
        assert_eq!(ranges_between([1].into_iter(), 2), vec![0..1]);
    }

    #[test]
    fn ranges_keep_empty_lines() {
        assert_eq!(ranges_between([0, 1].into_iter(), 3), vec![0..0, 1..1, 2..3]);
    }

    #[test]
    fn ranges_empty_input() {
        assert!(ranges_between(std::iter::empty(), 0).is_empty());
    }

    #[test]
    fn fold_compare() {
        assert!(chars_eq_ignore_case("ÄbC".chars(), "äBc".chars()));
        assert!(!chars_eq_ignore_case("abc".chars(), "abd".chars()));
        assert!(!chars_eq_ignore_case("ab".chars(), "abc".chars()));
    }
}
