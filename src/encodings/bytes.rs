// encodings/bytes.rs - Raw 8-bit code units (ByteView).
//
// One unit per byte, no Unicode awareness. Units widen to code points as
// unsigned values 0..=255.

use std::ops::Range;

use memchr::memchr_iter;

use super::ranges_between;

/// Widen a byte to a 32-bit code point.
#[inline]
pub fn byte_to_code(b: u8) -> u32 {
    b as u32
}

/// Line ranges split on 0x0a.
pub fn line_ranges(data: &[u8]) -> Vec<Range<usize>> {
    ranges_between(memchr_iter(b'\n', data), data.len())
}

/// Narrow code points to bytes, keeping the low 8 bits of each.
pub fn from_code_points(code_points: &[u32]) -> Vec<u8> {
    code_points.iter().map(|&c| c as u8).collect()
}
