//! Shared position conversion helpers.
//!
//! Tree-sitter positions are zero-based. For user-facing values, we prefer
//! one-based line and column numbers.

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

/// Returns the byte offset at which the line containing `byte` starts.
pub(crate) fn line_start(source: &str, byte: usize) -> usize {
    source
        .get(..byte)
        .and_then(|before| before.rfind('\n'))
        .map_or(0, |newline| newline + 1)
}

/// Returns the byte offset just past the line ending that follows `byte`.
///
/// Only trailing whitespace may sit between `byte` and the newline; any
/// other text leaves the offset at `byte`.
pub(crate) fn line_end(source: &str, byte: usize) -> usize {
    let Some(rest) = source.get(byte..) else {
        return byte;
    };
    let trailing = rest.len() - rest.trim_start_matches([' ', '\t', '\r']).len();
    match rest.get(trailing..) {
        Some(tail) if tail.starts_with('\n') => byte + trailing + 1,
        Some("") => byte + trailing,
        _ => byte,
    }
}
