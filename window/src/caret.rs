//! Caret lookup used to disambiguate boundary offsets.
//!
//! An offset sitting exactly between two fragments maps to two host offsets: the end of the
//! left fragment and the start of the right one. Which one the user means depends on where
//! they are typing, so the window asks an installed [`CaretProvider`] rather than reaching for
//! editor state itself.

/// Supplies the current caret offset in host coordinates.
pub trait CaretProvider {
    fn caret_offset(&self) -> Option<usize>;
}

impl<F> CaretProvider for F
where
    F: Fn() -> Option<usize>,
{
    fn caret_offset(&self) -> Option<usize> {
        self()
    }
}

/// Pick between the `left` and `right` host candidates for a boundary offset.
///
/// Without a caret the left candidate wins. Otherwise the candidate strictly closer to the
/// caret wins, ties going right.
pub fn resolve_boundary(left: usize, right: usize, caret: Option<usize>) -> usize {
    if left == right {
        return left;
    }
    match caret {
        Some(caret) if caret.abs_diff(left) < caret.abs_diff(right) => left,
        Some(_) => right,
        None => left,
    }
}
