// encodings/utf32.rs - Decoded UTF-32 code points (Utf32View).
//
// One unit per stored u32, O(1) indexing. Values are trusted; anything that
// is not a Unicode scalar renders as U+FFFD when projected to text.

use std::ops::Range;

use super::{ranges_between, NEWLINE_CODE};

#[inline]
pub fn to_char(code: u32) -> char {
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

pub fn chars(code_points: &[u32]) -> impl Iterator<Item = char> + '_ {
    code_points.iter().map(|&c| to_char(c))
}

/// Materialize the textual form. Allocates.
pub fn decode(code_points: &[u32]) -> String {
    chars(code_points).collect()
}

/// Line ranges split on U+000A, located by index.
pub fn line_ranges(code_points: &[u32]) -> Vec<Range<usize>> {
    let separators = code_points
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == NEWLINE_CODE)
        .map(|(i, _)| i);
    ranges_between(separators, code_points.len())
}
