//! Minimal per-segment edit sequence for replacing a window's whole text.
//!
//! Given every segment's current rendering (`prefix + host slice + suffix`) and a target text,
//! [`min_edit_sequence`] decides which segments keep their text and what the others become, so
//! that concatenating the results reproduces the target. Segments are anchored greedily from
//! the outside in:
//!
//! 1. A single segment either matches the target or takes all of it.
//! 2. If the target starts with the first segment's text, that segment is unchanged.
//! 3. Likewise for the last segment at the end of the target.
//! 4. Two segments are split at their separator (`suffix + prefix`), or at the longest common
//!    prefix with the left segment when the separator is empty.
//! 5. Otherwise the second (or second to last) segment is searched for as an interior anchor.
//! 6. Failing that, both outer segments are emptied and the inner ones take the target.
//!
//! Edits confined to one segment therefore touch only that segment. Duplicate segment texts
//! can make the result suboptimal but it always reassembles to the target.

use snafu::{OptionExt, Snafu};

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum DiffError {
    /// The text between two adjacent segments is missing from the target.
    #[snafu(display("Separator between segments {left} and {right} not found in target text"))]
    SeparatorNotFound { left: usize, right: usize },

    /// A segment's replacement lost its fixed prefix or suffix.
    #[snafu(display("Replacement for segment {index} does not keep its prefix and suffix"))]
    Unanchored { index: usize },
}

/// One segment as currently rendered into the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSegment<'a> {
    pub prefix: &'a str,
    pub suffix: &'a str,
    /// Full `prefix + host slice + suffix`.
    pub text: String,
}

impl<'a> RenderedSegment<'a> {
    pub fn new(prefix: &'a str, body: &str, suffix: &'a str) -> Self {
        Self {
            prefix,
            suffix,
            text: format!("{prefix}{body}{suffix}"),
        }
    }
}

/// Compute the replacement for each segment.
///
/// `None` means the segment is unchanged, `Some(text)` replaces its host slice with `text`
/// (prefix and suffix already stripped, possibly empty).
pub fn min_edit_sequence(
    segments: &[RenderedSegment<'_>],
    target: &str,
) -> Result<Vec<Option<String>>, DiffError> {
    let mut result = vec![None; segments.len()];
    if let Some(last) = segments.len().checked_sub(1) {
        split(segments, target, &mut result, 0, last)?;
    }

    result
        .into_iter()
        .enumerate()
        .map(|(index, change)| match change {
            None => Ok(None),
            Some(text) => strip(&segments[index], &text, index).map(Some),
        })
        .collect()
}

fn split(
    segments: &[RenderedSegment<'_>],
    target: &str,
    result: &mut [Option<String>],
    i: usize,
    j: usize,
) -> Result<(), DiffError> {
    let first = segments[i].text.as_str();
    if i == j {
        result[i] = (first != target).then(|| target.to_string());
        return Ok(());
    }
    if let Some(rest) = target.strip_prefix(first) {
        result[i] = None;
        return split(segments, rest, result, i + 1, j);
    }

    let last = segments[j].text.as_str();
    if let Some(rest) = target.strip_suffix(last) {
        result[j] = None;
        return split(segments, rest, result, i, j - 1);
    }

    if i + 1 == j {
        let left_suffix = segments[i].suffix;
        let right_prefix = segments[j].prefix;
        let cut = if left_suffix.is_empty() && right_prefix.is_empty() {
            common_prefix_len(first, target)
        } else {
            let separator = format!("{left_suffix}{right_prefix}");
            let at = target
                .find(&separator)
                .context(SeparatorNotFoundSnafu { left: i, right: j })?;
            at + left_suffix.len()
        };
        result[i] = Some(target[..cut].to_string());
        result[j] = Some(target[cut..].to_string());
        return Ok(());
    }

    let middle = segments[i + 1].text.as_str();
    if let Some(at) = target.find(middle) {
        result[i] = Some(target[..at].to_string());
        result[i + 1] = None;
        return split(segments, &target[at + middle.len()..], result, i + 2, j);
    }

    let middle = segments[j - 1].text.as_str();
    if let Some(at) = target.rfind(middle) {
        result[j] = Some(target[at + middle.len()..].to_string());
        result[j - 1] = None;
        return split(segments, &target[..at], result, i, j - 2);
    }

    result[i] = Some(String::new());
    result[j] = Some(String::new());
    split(segments, target, result, i + 1, j - 1)
}

fn strip(segment: &RenderedSegment<'_>, text: &str, index: usize) -> Result<String, DiffError> {
    text.strip_prefix(segment.prefix)
        .and_then(|rest| rest.strip_suffix(segment.suffix))
        .map(str::to_string)
        .context(UnanchoredSnafu { index })
}

/// Byte length of the longest common prefix, on a char boundary.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((at, _), _)| at)
        .unwrap_or_else(|| a.len().min(b.len()))
}

#[cfg(test)]
mod tests {
    use super::{common_prefix_len, min_edit_sequence, DiffError, RenderedSegment};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn plain(bodies: &[&str]) -> Vec<RenderedSegment<'static>> {
        bodies
            .iter()
            .map(|body| RenderedSegment::new("", body, ""))
            .collect()
    }

    fn reassemble(segments: &[RenderedSegment<'_>], changes: &[Option<String>]) -> String {
        segments
            .iter()
            .zip(changes)
            .map(|(segment, change)| match change {
                Some(inner) => format!("{}{inner}{}", segment.prefix, segment.suffix),
                None => segment.text.clone(),
            })
            .collect()
    }

    fn some(text: &str) -> Option<String> {
        Some(text.to_string())
    }

    #[test]
    fn unchanged_text_yields_no_edits() {
        let segments = vec![
            RenderedSegment::new("SELECT ", "*", ""),
            RenderedSegment::new(" FROM ", "t", ";"),
        ];
        let changes = min_edit_sequence(&segments, "SELECT * FROM t;").unwrap();
        assert_eq!(changes, vec![None, None]);
    }

    #[test]
    fn edit_in_first_of_two() {
        let segments = plain(&["AB", "CD"]);
        let changes = min_edit_sequence(&segments, "AXCD").unwrap();
        assert_eq!(changes, vec![some("AX"), None]);
    }

    #[test]
    fn edit_confined_to_middle() {
        let segments = plain(&["one ", "two ", "three"]);
        let changes = min_edit_sequence(&segments, "one 2 three").unwrap();
        assert_eq!(changes, vec![None, some("2 "), None]);
    }

    #[test]
    fn split_at_separator() {
        let segments = vec![
            RenderedSegment::new("<", "ab", ">"),
            RenderedSegment::new("<", "cd", ">"),
        ];
        let changes = min_edit_sequence(&segments, "<aXb><cYd>").unwrap();
        assert_eq!(changes, vec![some("aXb"), some("cYd")]);
    }

    #[test]
    fn split_at_common_prefix_without_separator() {
        let segments = plain(&["ab", "cd"]);
        let changes = min_edit_sequence(&segments, "aXcY").unwrap();
        assert_eq!(changes, vec![some("a"), some("XcY")]);
    }

    #[test]
    fn interior_anchor_from_left() {
        let segments = plain(&["A", "B", "C", "D"]);
        let changes = min_edit_sequence(&segments, "xBCy").unwrap();
        assert_eq!(changes, vec![some("x"), None, None, some("y")]);
    }

    #[test]
    fn interior_anchor_from_right() {
        let segments = plain(&["A", "B", "C", "D"]);
        let changes = min_edit_sequence(&segments, "zzC!").unwrap();
        assert_eq!(changes, vec![some(""), some("zz"), None, some("!")]);
    }

    #[test]
    fn no_anchor_empties_outer_segments() {
        let segments = plain(&["A", "B", "C", "D"]);
        let changes = min_edit_sequence(&segments, "zz").unwrap();
        assert_eq!(changes, vec![some(""), some(""), some("zz"), some("")]);
        assert_eq!(reassemble(&segments, &changes), "zz");
    }

    #[test]
    fn missing_separator() {
        let segments = vec![
            RenderedSegment::new("<", "a", ">"),
            RenderedSegment::new("<", "b", ">"),
        ];
        assert_eq!(
            min_edit_sequence(&segments, "xy"),
            Err(DiffError::SeparatorNotFound { left: 0, right: 1 })
        );
    }

    #[test]
    fn replacement_without_prefix_is_rejected() {
        let segments = vec![
            RenderedSegment::new("<", "a", ">"),
            RenderedSegment::new("<", "b", ">"),
            RenderedSegment::new("<", "c", ">"),
        ];
        assert_eq!(
            min_edit_sequence(&segments, "<b>"),
            Err(DiffError::Unanchored { index: 0 })
        );
    }

    #[test]
    fn empty_window() {
        assert_eq!(min_edit_sequence(&[], ""), Ok(Vec::new()));
    }

    #[test]
    fn common_prefix_respects_char_boundaries() {
        assert_eq!(common_prefix_len("héllo", "hélp"), "hél".len());
        assert_eq!(common_prefix_len("ab", "abc"), 2);
        assert_eq!(common_prefix_len("é", "è"), 0);
    }

    #[test]
    fn random_single_segment_edits_touch_one_segment() {
        let mut rng = StdRng::seed_from_u64(42);
        let bodies = ["alpha ", "beta ", "gamma ", "delta ", "epsilon"];
        let segments = plain(&bodies);

        for _ in 0..200 {
            let index = rng.random_range(0..bodies.len());
            let body = bodies[index];
            let at = rng.random_range(0..=body.len());
            let mut edited = body.to_string();
            edited.insert_str(at, "#");

            let target: String = bodies
                .iter()
                .enumerate()
                .map(|(k, b)| if k == index { edited.as_str() } else { *b })
                .collect();
            let changes = min_edit_sequence(&segments, &target).unwrap();

            assert_eq!(reassemble(&segments, &changes), target);
            let changed: Vec<usize> = changes
                .iter()
                .enumerate()
                .filter_map(|(k, change)| change.as_ref().map(|_| k))
                .collect();
            assert_eq!(changed.len(), 1, "{target:?} -> {changes:?}");
        }
    }
}
