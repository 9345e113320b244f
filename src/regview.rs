// regview.rs - Encoding-agnostic subject views.
//
// EncodedView is a closed sum over the three storage kinds the matcher runs
// on. Every operation dispatches exhaustively over the kind (and, for binary
// operations, over the kind pair). Unit-local offsets are raw bytes for
// ByteView and code points for Utf8View / Utf32View.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::encodings::{bytes, chars_eq_ignore_case, utf32, utf8};
use crate::error::{trap, MatchError};

/// The storage kind behind a non-null view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Bytes,
    Utf8,
    Utf32,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewKind::Bytes => "ByteView",
            ViewKind::Utf8 => "Utf8View",
            ViewKind::Utf32 => "Utf32View",
        })
    }
}

/// A borrowed view over subject text in one of three encodings.
///
/// `Null` is the unset sentinel (e.g. a default-constructed fragment) and is
/// distinct from an empty view of any kind.
///
/// # Examples
///
/// ```
/// use regmatch::regview::EncodedView;
///
/// let view = EncodedView::from("hello");
/// assert_eq!(view.length(), 5);
/// assert_eq!(view.substring_view(1, 3).to_string(), "ell");
/// ```
#[derive(Clone, Copy, Default)]
pub enum EncodedView<'a> {
    #[default]
    Null,
    /// Raw 8-bit units.
    Bytes(&'a [u8]),
    /// UTF-8 storage addressed by code point.
    Utf8(&'a str),
    /// UTF-32 storage.
    Utf32(&'a [u32]),
}

use EncodedView::{Bytes, Null, Utf32, Utf8};

impl<'a> EncodedView<'a> {
    pub fn kind(&self) -> Option<ViewKind> {
        match self {
            Null => None,
            Bytes(_) => Some(ViewKind::Bytes),
            Utf8(_) => Some(ViewKind::Utf8),
            Utf32(_) => Some(ViewKind::Utf32),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Null)
    }

    pub fn is_empty(&self) -> bool {
        match *self {
            Null => true,
            Bytes(b) => b.is_empty(),
            Utf8(s) => s.is_empty(),
            Utf32(c) => c.is_empty(),
        }
    }

    /// Unit-local length. O(n) for Utf8View.
    pub fn length(&self) -> usize {
        match *self {
            Null => 0,
            Bytes(b) => b.len(),
            Utf8(s) => utf8::code_point_count(s),
            Utf32(c) => c.len(),
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_utf8(&self) -> Option<&'a str> {
        match *self {
            Utf8(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_utf32(&self) -> Option<&'a [u32]> {
        match *self {
            Utf32(c) => Some(c),
            _ => None,
        }
    }

    // === Indexing ===

    /// The `index`-th unit as a 32-bit scalar.
    ///
    /// Bytes read as unsigned 0..=255. Utf8View walks from the start of the
    /// view on every call.
    ///
    /// # Panics
    ///
    /// Panics on a null view or when `index >= self.length()`.
    #[track_caller]
    pub fn at(&self, index: usize) -> u32 {
        self.try_at(index).unwrap_or_else(|e| trap(e))
    }

    pub fn try_at(&self, index: usize) -> Result<u32, MatchError> {
        let unit = match *self {
            Null => return Err(MatchError::NullView { op: "at" }),
            Bytes(b) => b.get(index).map(|&c| bytes::byte_to_code(c)),
            Utf8(s) => utf8::code_point_at(s, index),
            Utf32(c) => c.get(index).copied(),
        };
        unit.ok_or_else(|| MatchError::IndexOutOfRange {
            index,
            length: self.length(),
        })
    }

    // === Comparison ===

    /// Logical equality across kinds.
    ///
    /// Same-kind pairs and ByteView/Utf8View compare stored units directly.
    /// Any pairing of Utf32View with another kind materializes the Utf32
    /// side as text first. A null view equals any empty view.
    pub fn equals(&self, other: &EncodedView<'_>) -> bool {
        match (*self, *other) {
            (Null, _) | (_, Null) => self.is_empty() && other.is_empty(),
            (Bytes(a), Bytes(b)) => a == b,
            (Utf8(a), Utf8(b)) => a == b,
            (Utf32(a), Utf32(b)) => a == b,
            (Bytes(a), Utf8(b)) => a == b.as_bytes(),
            (Utf8(a), Bytes(b)) => a.as_bytes() == b,
            (Utf32(a), _) => other.equals_text(&utf32::decode(a)),
            (_, Utf32(b)) => self.equals_text(&utf32::decode(b)),
        }
    }

    fn equals_text(&self, text: &str) -> bool {
        match *self {
            Null => text.is_empty(),
            Bytes(b) => b == text.as_bytes(),
            Utf8(s) => s == text,
            Utf32(c) => utf32::decode(c) == text,
        }
    }

    /// Case-insensitive equality.
    ///
    /// ByteView pairs fold ASCII only; pairs drawn from Utf8View and
    /// Utf32View fold with Unicode simple lowercase mapping.
    ///
    /// # Panics
    ///
    /// Panics on a null operand and when a ByteView is paired with a decoded kind.
    #[track_caller]
    pub fn equals_ignoring_case(&self, other: &EncodedView<'_>) -> bool {
        self.try_equals_ignoring_case(other)
            .unwrap_or_else(|e| trap(e))
    }

    pub fn try_equals_ignoring_case(&self, other: &EncodedView<'_>) -> Result<bool, MatchError> {
        const OP: &str = "equals_ignoring_case";
        Ok(match (*self, *other) {
            (Null, _) | (_, Null) => return Err(MatchError::NullView { op: OP }),
            (Bytes(a), Bytes(b)) => a.eq_ignore_ascii_case(b),
            (Bytes(_), _) | (_, Bytes(_)) => return Err(self.unsupported(OP, other)),
            (Utf8(a), Utf8(b)) => chars_eq_ignore_case(a.chars(), b.chars()),
            (Utf8(a), Utf32(b)) => chars_eq_ignore_case(a.chars(), utf32::chars(b)),
            (Utf32(a), Utf8(b)) => chars_eq_ignore_case(utf32::chars(a), b.chars()),
            (Utf32(a), Utf32(b)) => chars_eq_ignore_case(utf32::chars(a), utf32::chars(b)),
        })
    }

    /// Prefix test.
    ///
    /// Supported pairings: each kind against itself, and Utf8View against a
    /// Utf32View needle. Both sides are compared in the receiver's units.
    ///
    /// # Panics
    ///
    /// Panics on a null operand and on every other pairing.
    #[track_caller]
    pub fn starts_with(&self, needle: &EncodedView<'_>) -> bool {
        self.try_starts_with(needle).unwrap_or_else(|e| trap(e))
    }

    pub fn try_starts_with(&self, needle: &EncodedView<'_>) -> Result<bool, MatchError> {
        const OP: &str = "starts_with";
        Ok(match (*self, *needle) {
            (Null, _) | (_, Null) => return Err(MatchError::NullView { op: OP }),
            (Bytes(h), Bytes(n)) => h.starts_with(n),
            (Utf8(h), Utf8(n)) => h.starts_with(n),
            (Utf8(h), Utf32(n)) => utf8::starts_with_code_points(h, n),
            (Utf32(h), Utf32(n)) => h.starts_with(n),
            (Bytes(_), Utf8(_) | Utf32(_))
            | (Utf8(_), Bytes(_))
            | (Utf32(_), Bytes(_) | Utf8(_)) => return Err(self.unsupported(OP, needle)),
        })
    }

    fn unsupported(&self, op: &'static str, other: &EncodedView<'_>) -> MatchError {
        match (self.kind(), other.kind()) {
            (Some(receiver), Some(argument)) => MatchError::UnsupportedPairing {
                op,
                receiver,
                argument,
            },
            _ => MatchError::NullView { op },
        }
    }

    // === Slicing ===

    /// A view of `length` units starting at unit `offset`, sharing storage.
    ///
    /// # Panics
    ///
    /// Panics on a null view or when the range reaches past the end.
    #[track_caller]
    pub fn substring_view(&self, offset: usize, length: usize) -> EncodedView<'a> {
        self.try_substring_view(offset, length)
            .unwrap_or_else(|e| trap(e))
    }

    pub fn try_substring_view(
        &self,
        offset: usize,
        length: usize,
    ) -> Result<EncodedView<'a>, MatchError> {
        let out_of_range = || MatchError::IndexOutOfRange {
            index: offset.saturating_add(length),
            length: self.length(),
        };
        let end = offset.checked_add(length).ok_or_else(out_of_range)?;
        match *self {
            Null => Err(MatchError::NullView { op: "substring_view" }),
            Bytes(b) => b.get(offset..end).map(Bytes).ok_or_else(out_of_range),
            Utf8(s) => utf8::substring_range(s, offset, length)
                .map(|r| Utf8(&s[r]))
                .ok_or_else(out_of_range),
            Utf32(c) => c.get(offset..end).map(Utf32).ok_or_else(out_of_range),
        }
    }

    /// Split on U+000A. Lines share the receiver's storage; a trailing line
    /// without a separator is included, an empty view yields no lines.
    ///
    /// # Panics
    ///
    /// Panics on a null view.
    #[track_caller]
    pub fn lines(&self) -> Vec<EncodedView<'a>> {
        match *self {
            Null => trap(MatchError::NullView { op: "lines" }),
            Bytes(b) => bytes::line_ranges(b).into_iter().map(|r| Bytes(&b[r])).collect(),
            Utf8(s) => utf8::line_ranges(s).into_iter().map(|r| Utf8(&s[r])).collect(),
            Utf32(c) => utf32::line_ranges(c).into_iter().map(|r| Utf32(&c[r])).collect(),
        }
    }

    // === Construction ===

    /// Build a view of the same kind as `self` from raw code points.
    ///
    /// Utf32View borrows `code_points` directly. The other kinds need an
    /// owned string, which the returned [`ViewBuf`] holds; borrow the view
    /// from it with [`ViewBuf::view`]. The buffer is trusted: ByteView keeps
    /// the low 8 bits of each value, Utf8View substitutes U+FFFD for values
    /// that are not Unicode scalars.
    ///
    /// # Panics
    ///
    /// Panics on a null view.
    #[track_caller]
    pub fn construct_as_same<'b>(&self, code_points: &'b [u32]) -> ViewBuf<'b> {
        match self.kind() {
            None => trap(MatchError::NullView {
                op: "construct_as_same",
            }),
            Some(ViewKind::Utf32) => ViewBuf::Borrowed(Utf32(code_points)),
            Some(kind) => ViewBuf::Owned(OwnedView::from_code_points(kind, code_points)),
        }
    }

    // === Projection ===

    /// Canonical decoded text. Borrows when the storage already is valid UTF-8.
    pub fn to_text(&self) -> Cow<'a, str> {
        match *self {
            Null => Cow::Borrowed(""),
            Bytes(b) => String::from_utf8_lossy(b),
            Utf8(s) => Cow::Borrowed(s),
            Utf32(c) => Cow::Owned(utf32::decode(c)),
        }
    }
}

impl fmt::Display for EncodedView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_text())
    }
}

impl fmt::Debug for EncodedView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            None => f.write_str("NullView"),
            Some(kind) => write!(f, "{}({:?})", kind, self.to_text()),
        }
    }
}

impl<'b> PartialEq<EncodedView<'b>> for EncodedView<'_> {
    fn eq(&self, other: &EncodedView<'b>) -> bool {
        self.equals(other)
    }
}

impl PartialEq<str> for EncodedView<'_> {
    fn eq(&self, other: &str) -> bool {
        self.equals(&Utf8(other))
    }
}

impl PartialEq<&str> for EncodedView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.equals(&Utf8(other))
    }
}

impl PartialEq<String> for EncodedView<'_> {
    fn eq(&self, other: &String) -> bool {
        self.equals(&Utf8(other))
    }
}

impl<'a> From<&'a str> for EncodedView<'a> {
    fn from(s: &'a str) -> Self {
        Utf8(s)
    }
}

impl<'a> From<&'a String> for EncodedView<'a> {
    fn from(s: &'a String) -> Self {
        Utf8(s)
    }
}

impl<'a> From<&'a [u8]> for EncodedView<'a> {
    fn from(b: &'a [u8]) -> Self {
        Bytes(b)
    }
}

impl<'a> From<&'a [u32]> for EncodedView<'a> {
    fn from(c: &'a [u32]) -> Self {
        Utf32(c)
    }
}

impl<'a> From<&'a OwnedView> for EncodedView<'a> {
    fn from(owned: &'a OwnedView) -> Self {
        owned.view()
    }
}

// ============================================================================
// Owned storage
// ============================================================================

/// Shared owned storage for text synthesized from raw code points.
/// Cloning shares the allocation.
#[derive(Clone, PartialEq, Eq)]
pub enum OwnedView {
    Bytes(Arc<[u8]>),
    Utf8(Arc<str>),
    Utf32(Arc<[u32]>),
}

impl OwnedView {
    pub fn from_code_points(kind: ViewKind, code_points: &[u32]) -> Self {
        match kind {
            ViewKind::Bytes => OwnedView::Bytes(bytes::from_code_points(code_points).into()),
            ViewKind::Utf8 => OwnedView::Utf8(utf8::from_code_points(code_points).into()),
            ViewKind::Utf32 => OwnedView::Utf32(code_points.into()),
        }
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            OwnedView::Bytes(_) => ViewKind::Bytes,
            OwnedView::Utf8(_) => ViewKind::Utf8,
            OwnedView::Utf32(_) => ViewKind::Utf32,
        }
    }

    pub fn view(&self) -> EncodedView<'_> {
        match self {
            OwnedView::Bytes(b) => Bytes(b),
            OwnedView::Utf8(s) => Utf8(s),
            OwnedView::Utf32(c) => Utf32(c),
        }
    }
}

impl From<String> for OwnedView {
    fn from(s: String) -> Self {
        OwnedView::Utf8(s.into())
    }
}

impl From<Vec<u8>> for OwnedView {
    fn from(b: Vec<u8>) -> Self {
        OwnedView::Bytes(b.into())
    }
}

impl From<Vec<u32>> for OwnedView {
    fn from(c: Vec<u32>) -> Self {
        OwnedView::Utf32(c.into())
    }
}

impl fmt::Debug for OwnedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owned{:?}", self.view())
    }
}

/// A view that either borrows caller storage or owns its own.
///
/// This is the owner handle returned by [`EncodedView::construct_as_same`]:
/// the view it hands out cannot outlive it.
#[derive(Clone)]
pub enum ViewBuf<'a> {
    Borrowed(EncodedView<'a>),
    Owned(OwnedView),
}

impl<'a> ViewBuf<'a> {
    pub fn view(&self) -> EncodedView<'_> {
        match self {
            ViewBuf::Borrowed(view) => *view,
            ViewBuf::Owned(owned) => owned.view(),
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, ViewBuf::Owned(_))
    }
}

impl Default for ViewBuf<'_> {
    fn default() -> Self {
        ViewBuf::Borrowed(Null)
    }
}

impl fmt::Debug for ViewBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewBuf::Borrowed(view) => fmt::Debug::fmt(view, f),
            ViewBuf::Owned(owned) => fmt::Debug::fmt(owned, f),
        }
    }
}

impl<'a> From<EncodedView<'a>> for ViewBuf<'a> {
    fn from(view: EncodedView<'a>) -> Self {
        ViewBuf::Borrowed(view)
    }
}

impl From<OwnedView> for ViewBuf<'_> {
    fn from(owned: OwnedView) -> Self {
        ViewBuf::Owned(owned)
    }
}

// ============================================================================
// Tests
// ============================================================================
