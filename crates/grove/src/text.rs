//! Byte offsets, row/column points and lossy text decoding.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Zero-based row/column position. Columns count bytes, as tree-sitter does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

impl From<arborium_tree_sitter::Point> for Point {
    fn from(p: arborium_tree_sitter::Point) -> Self {
        Self::new(p.row, p.column)
    }
}

impl From<Point> for arborium_tree_sitter::Point {
    fn from(p: Point) -> Self {
        arborium_tree_sitter::Point {
            row: p.row,
            column: p.column,
        }
    }
}

/// Point of `offset` in `text`: the row is the number of newlines before it,
/// the column the number of bytes since the last one.
///
/// `offset` past the end is clamped to `text.len()`.
pub fn point_at(text: &[u8], offset: usize) -> Point {
    let prefix = &text[..offset.min(text.len())];
    let row = prefix.iter().filter(|&&b| b == b'\n').count();
    let column = match prefix.iter().rposition(|&b| b == b'\n') {
        Some(nl) => prefix.len() - nl - 1,
        None => prefix.len(),
    };
    Point::new(row, column)
}

/// Decode `bytes` as UTF-8, dropping invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    Cow::Owned(out)
}
