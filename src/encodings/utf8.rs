// encodings/utf8.rs - Decoded UTF-8 code points over byte storage (Utf8View).
//
// Storage is byte-addressed, the logical unit is the code point. Every
// unit-local offset has to be translated by walking lead bytes from the
// start of the view; nothing is cached.

use std::ops::Range;

use super::{ranges_between, NEWLINE_CODE};

// === UTF-8 Helpers ===

#[inline]
fn utf8_islead(c: u8) -> bool {
    (c & 0xc0) != 0x80
}

// === EncLen_UTF8 Table ===
// Maps first byte to character length (RFC 3629: max 4 bytes).

static ENC_LEN_UTF8: [u8; 256] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

/// Byte length of the character whose lead byte is `lead`.
#[inline]
pub fn char_len(lead: u8) -> usize {
    ENC_LEN_UTF8[lead as usize] as usize
}

/// Decode the character starting at `p[0]`.
pub fn mbc_to_code(p: &[u8]) -> u32 {
    let len = char_len(p[0]).min(p.len());
    let c = p[0] as u32;
    if len > 1 {
        let remaining = len - 1;
        let mut n = c & ((1u32 << (6 - remaining)) - 1);
        for &b in &p[1..len] {
            n = (n << 6) | ((b as u32) & 0x3f);
        }
        n
    } else {
        c
    }
}

/// Number of code points in `s`.
pub fn code_point_count(s: &str) -> usize {
    s.bytes().filter(|&b| utf8_islead(b)).count()
}

/// Byte offset of the `code_points`-th character, walking from the start.
/// `Some(s.len())` addresses the end of the view.
pub fn byte_offset(s: &[u8], code_points: usize) -> Option<usize> {
    let mut p = 0;
    for _ in 0..code_points {
        if p >= s.len() {
            return None;
        }
        p += char_len(s[p]);
    }
    Some(p.min(s.len()))
}

/// The `index`-th code point, found by an O(index) walk.
pub fn code_point_at(s: &str, index: usize) -> Option<u32> {
    let bytes = s.as_bytes();
    let p = byte_offset(bytes, index)?;
    if p < bytes.len() {
        Some(mbc_to_code(&bytes[p..]))
    } else {
        None
    }
}

/// Translate a code-point range into the byte range that stores it.
pub fn substring_range(s: &str, offset: usize, length: usize) -> Option<Range<usize>> {
    let bytes = s.as_bytes();
    let start = byte_offset(bytes, offset)?;
    let end = start + byte_offset(&bytes[start..], length)?;
    Some(start..end)
}

/// Line ranges in bytes. A 0x0a byte never occurs inside a multi-byte
/// sequence, so every range lands on character boundaries.
pub fn line_ranges(s: &str) -> Vec<Range<usize>> {
    let nl = NEWLINE_CODE as u8;
    ranges_between(memchr::memchr_iter(nl, s.as_bytes()), s.len())
}

/// Check whether the decoded prefix of `s` equals `needle`.
pub fn starts_with_code_points(s: &str, needle: &[u32]) -> bool {
    let mut chars = s.chars();
    needle
        .iter()
        .all(|&cp| chars.next().map(u32::from) == Some(cp))
}

/// Encode raw code points as UTF-8. Values that are not Unicode scalars
/// become U+FFFD.
pub fn from_code_points(code_points: &[u32]) -> String {
    code_points
        .iter()
        .map(|&c| char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
