//! A virtual document stitched together from fragments of a host buffer.
//!
//! A [`WindowedDocument`] presents an ordered list of host ranges, each wrapped in a fixed
//! prefix and suffix, as one independent text:
//!
//! ```text
//! Host:     let q = "SELECT *" + " FROM t";
//!                    ^^^^^^^^     ^^^^^^^
//! Virtual:  SELECT * FROM t
//! ```
//!
//! Reads are always re-derived from the current host state, so edits made to the host by
//! anyone else show up immediately. Writes are translated into host coordinates and applied to
//! the host, and the window's ranges follow through the host's live markers.
//!
//! # Invalid segments
//!
//! A segment whose host text was deleted out from under it is skipped by every operation,
//! including [`WindowedDocument::len`]. "First" and "last" segment always mean the first and
//! last segment that is still valid. Mapping operations return `None` only once every segment
//! is invalid.

use crate::{
    caret::{resolve_boundary, CaretProvider},
    differ::{self, RenderedSegment},
    error::{Result, WindowError},
};
use docwin_text::{HostBuffer, MarkerId, MarkerOptions, SharedBuffer, TextBuffer};
use ropey::Rope;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, ops::Range, sync::Arc};

/// Descriptor for one fragment of a window, as produced by an injection host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Shred {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    pub host_range: Range<usize>,
}

impl Shred {
    pub fn new(
        prefix: impl Into<String>,
        host_range: Range<usize>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            host_range,
        }
    }
}

/// Which fragment an ambiguous boundary offset should resolve into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bias {
    /// End of the fragment before the boundary.
    Left,
    /// Start of the fragment after the boundary.
    Right,
}

#[derive(Debug, Clone)]
struct Segment {
    prefix: String,
    suffix: String,
    prefix_len: usize,
    suffix_len: usize,
    marker: MarkerId,
}

/// A valid segment resolved against the current host state.
#[derive(Debug, Clone)]
struct Piece<'a> {
    prefix: &'a str,
    suffix: &'a str,
    prefix_len: usize,
    suffix_len: usize,
    range: Range<usize>,
    marker: MarkerId,
}

impl Piece<'_> {
    fn len(&self) -> usize {
        self.range.len()
    }

    fn span(&self) -> usize {
        self.prefix_len + self.len() + self.suffix_len
    }
}

pub struct WindowedDocument<B: HostBuffer = TextBuffer> {
    host: SharedBuffer<B>,
    segments: Vec<Segment>,
    one_line: bool,
    prefix_line_count: usize,
    suffix_line_count: usize,
    caret: Option<Box<dyn CaretProvider>>,
}

impl<B: HostBuffer> WindowedDocument<B> {
    /// Create a window over `host` from `shreds`, which must be sorted and non-overlapping.
    ///
    /// One greedy marker is created per shred, so typing at a fragment edge extends it. A
    /// marker whose end touches the next shred does not grow to the right, so host edits at
    /// the shared offset extend only one of the two.
    pub fn new(host: SharedBuffer<B>, one_line: bool, shreds: Vec<Shred>) -> Result<Self> {
        if shreds.is_empty() {
            return Err(WindowError::NoShreds);
        }
        for (index, pair) in shreds.windows(2).enumerate() {
            if pair[1].host_range.start < pair[0].host_range.end {
                return Err(WindowError::UnorderedShreds { index: index + 1 });
            }
        }

        let greedy_right: Vec<bool> = shreds
            .windows(2)
            .map(|pair| pair[0].host_range.end < pair[1].host_range.start)
            .chain(std::iter::once(true))
            .collect();

        let mut segments: Vec<Segment> = Vec::with_capacity(shreds.len());
        {
            let mut buffer = host.write();
            for (shred, greedy_right) in shreds.into_iter().zip(greedy_right) {
                let options = MarkerOptions {
                    greedy_right,
                    ..MarkerOptions::GREEDY
                };
                let marker = match buffer.create_marker(shred.host_range, options) {
                    Ok(marker) => marker,
                    Err(err) => {
                        for segment in &segments {
                            buffer.release_marker(segment.marker);
                        }
                        return Err(err.into());
                    },
                };
                segments.push(Segment {
                    prefix_len: shred.prefix.chars().count(),
                    suffix_len: shred.suffix.chars().count(),
                    prefix: shred.prefix,
                    suffix: shred.suffix,
                    marker,
                });
            }
        }

        let prefix_line_count = segments.first().map_or(1, |s| 1 + count_newlines(&s.prefix));
        let suffix_line_count = segments.last().map_or(1, |s| 1 + count_newlines(&s.suffix));

        tracing::debug!(segments = segments.len(), one_line, "created document window");
        Ok(Self {
            host,
            segments,
            one_line,
            prefix_line_count,
            suffix_line_count,
            caret: None,
        })
    }

    pub fn host(&self) -> &SharedBuffer<B> {
        &self.host
    }

    pub fn is_one_line(&self) -> bool {
        self.one_line
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn prefix(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(|s| s.prefix.as_str())
    }

    pub fn suffix(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(|s| s.suffix.as_str())
    }

    /// Install the caret lookup used for boundary disambiguation.
    pub fn set_caret_provider(&mut self, provider: impl CaretProvider + 'static) {
        self.caret = Some(Box::new(provider));
    }

    pub fn clear_caret_provider(&mut self) {
        self.caret = None;
    }

    /// Host modification stamp.
    pub fn version(&self) -> u64 {
        self.host.read().version()
    }

    /// The virtual text: every valid segment's prefix, host slice and suffix in order.
    pub fn text(&self) -> String {
        let host = self.host.read();
        self.render(&*host)
    }

    /// Length of [`WindowedDocument::text`] in chars.
    pub fn len(&self) -> usize {
        let host = self.host.read();
        self.pieces(&*host).iter().map(Piece::span).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn line_count(&self) -> usize {
        1 + count_newlines(&self.text())
    }

    /// Zero based virtual line containing `offset`. Offsets at or past the end report the last
    /// line.
    pub fn line_number(&self, offset: usize) -> usize {
        let host = self.host.read();
        let mut line = 0;
        let mut rem = offset;
        for piece in self.pieces(&*host) {
            line += count_newlines_in(piece.prefix, rem.min(piece.prefix_len));
            if rem < piece.prefix_len {
                return line;
            }
            rem -= piece.prefix_len;

            let body = host.slice(piece.range.clone());
            line += count_newlines_in(&body, rem.min(piece.len()));
            if rem < piece.len() {
                return line;
            }
            rem -= piece.len();

            line += count_newlines_in(piece.suffix, rem.min(piece.suffix_len));
            if rem < piece.suffix_len {
                return line;
            }
            rem -= piece.suffix_len;
        }
        count_newlines(&self.render(&*host))
    }

    /// Offset of the first char of `line`, `None` past the last line.
    pub fn line_start_offset(&self, line: usize) -> Option<usize> {
        let rope = Rope::from_str(&self.text());
        (line < rope.len_lines()).then(|| rope.line_to_char(line))
    }

    /// Offset just before the line break ending `line`, `None` past the last line.
    pub fn line_end_offset(&self, line: usize) -> Option<usize> {
        let rope = Rope::from_str(&self.text());
        if line >= rope.len_lines() {
            return None;
        }
        if line + 1 == rope.len_lines() {
            return Some(rope.len_chars());
        }
        let mut end = rope.line_to_char(line + 1) - 1;
        if end > 0 && rope.char(end - 1) == '\r' {
            end -= 1;
        }
        Some(end)
    }

    /// Host offset for a virtual offset.
    ///
    /// Offsets inside a prefix or suffix clamp to the adjacent host range edge. Boundary
    /// offsets that could belong to either neighbouring fragment are resolved with the
    /// installed [`CaretProvider`], defaulting to the left fragment.
    pub fn virtual_to_host(&self, offset: usize) -> Option<usize> {
        let host = self.host.read();
        let pieces = self.pieces(&*host);
        self.resolve(&pieces, offset).map(|(_, host_offset)| host_offset)
    }

    /// Host offset for a virtual offset, resolving boundaries towards `bias`.
    pub fn virtual_to_host_biased(&self, offset: usize, bias: Bias) -> Option<usize> {
        let host = self.host.read();
        to_host(&self.pieces(&*host), offset, bias)
    }

    /// Map a virtual range to an ordered host range.
    ///
    /// The start resolves right and the end left so the result hugs the enclosed text; if that
    /// would invert the range the end resolves right as well.
    pub fn virtual_range_to_host(&self, range: Range<usize>) -> Option<Range<usize>> {
        let host = self.host.read();
        to_host_range(&self.pieces(&*host), range)
    }

    /// Virtual offset for a host offset.
    ///
    /// Host offsets before the first range map to the end of the first prefix, offsets between
    /// ranges clamp to the end of the preceding range.
    pub fn host_to_virtual(&self, host_offset: usize) -> Option<usize> {
        let host = self.host.read();
        let pieces = self.pieces(&*host);
        let first = pieces.first()?;
        if host_offset < first.range.start {
            return Some(first.prefix_len);
        }

        let mut offset = 0;
        for (index, piece) in pieces.iter().enumerate() {
            offset += piece.prefix_len;
            let next_start = pieces.get(index + 1).map(|next| next.range.start);
            if next_start.map_or(true, |start| host_offset < start) {
                let clamped = host_offset.min(piece.range.end);
                return Some(offset + clamped - piece.range.start);
            }
            offset += piece.len() + piece.suffix_len;
        }
        None
    }

    /// Host line for a virtual line.
    ///
    /// Lines inside the first prefix map to the line of the first host range, lines inside
    /// the last suffix to the line where the last host range ends. Other lines map through
    /// their first char.
    pub fn virtual_to_host_line(&self, line: usize) -> Option<usize> {
        let host = self.host.read();
        let pieces = self.pieces(&*host);
        let (first, last) = (pieces.first()?, pieces.last()?);
        if line < self.prefix_line_count {
            return Some(host.line_number(first.range.start));
        }

        let text = self.render(&*host);
        let line_count = 1 + count_newlines(&text);
        if line + self.suffix_line_count > line_count {
            return Some(host.line_number(last.range.end));
        }

        // A line start belongs to the text after it, so boundaries resolve right.
        let rope = Rope::from_str(&text);
        let offset = rope.line_to_char(line);
        let host_offset = to_host(&pieces, offset, Bias::Right)?;
        Some(host.line_number(host_offset))
    }

    /// Host range of the segment that contains or touches `host_offset`.
    pub fn host_range_containing(&self, host_offset: usize) -> Option<Range<usize>> {
        let host = self.host.read();
        self.pieces(&*host)
            .into_iter()
            .map(|piece| piece.range)
            .find(|range| range.start <= host_offset && host_offset <= range.end)
    }

    /// Whether `range` lies inside a single host range of this window.
    pub fn contains_host_range(&self, range: Range<usize>) -> bool {
        let host = self.host.read();
        self.pieces(&*host)
            .iter()
            .any(|piece| piece.range.start <= range.start && range.end <= piece.range.end)
    }

    /// Hull of the parts of `range` that fall in editable (host-backed) regions.
    ///
    /// Touching counts as intersecting, so an empty range at the edge of a fragment is
    /// editable.
    pub fn intersect_with_editable(&self, range: Range<usize>) -> Option<Range<usize>> {
        let host = self.host.read();
        intersect_editable(&self.pieces(&*host), range)
    }

    /// Whether any host range of this window overlaps a host range of `other`.
    pub fn intersects<C: HostBuffer>(&self, other: &WindowedDocument<C>) -> bool {
        let ours = self.valid_ranges();
        let theirs = other.valid_ranges();
        let (mut i, mut j) = (0, 0);
        while i < ours.len() && j < theirs.len() {
            let (a, b) = (&ours[i], &theirs[j]);
            if a.start < b.end && b.start < a.end {
                return true;
            }
            if a.end <= b.end {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }

    /// Same prefixes, suffixes and current host ranges.
    pub fn ranges_equal<C: HostBuffer>(&self, other: &WindowedDocument<C>) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.prefix == b.prefix && a.suffix == b.suffix)
            && self.host_ranges() == other.host_ranges()
    }

    /// [`WindowedDocument::ranges_equal`] over the very same host buffer.
    pub fn is_same_window(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.host, &other.host) && self.ranges_equal(other)
    }

    /// Whether every segment still has its host text.
    pub fn is_valid(&self) -> bool {
        let host = self.host.read();
        self.segments
            .iter()
            .all(|segment| host.is_marker_valid(segment.marker))
    }

    /// Current host range of every segment, `None` for invalidated ones.
    pub fn host_ranges(&self) -> Vec<Option<Range<usize>>> {
        let host = self.host.read();
        self.segments
            .iter()
            .map(|segment| host.marker_range(segment.marker))
            .collect()
    }

    /// Create a host marker over the host text a virtual range maps to.
    pub fn create_range_marker(&self, range: Range<usize>) -> Result<MarkerId> {
        check_range(&range)?;
        let mut host = self.host.write();
        let host_range =
            to_host_range(&self.pieces(&*host), range).ok_or(WindowError::Invalidated)?;
        Ok(host.create_marker(host_range, MarkerOptions::FIXED)?)
    }

    /// Insert `text` at a virtual offset.
    ///
    /// Fails with [`WindowError::OutOfBounds`] inside the first prefix or the last suffix. In
    /// one line windows line breaks are stripped first.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        let text = self.sanitize(text);
        let mut host = self.host.write();
        let pieces = self.pieces(&*host);
        let (first, last) = match (pieces.first(), pieces.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(WindowError::Invalidated),
        };
        let len: usize = pieces.iter().map(Piece::span).sum();
        if offset < first.prefix_len || offset > len - last.suffix_len {
            return Err(WindowError::OutOfBounds { offset });
        }
        if text.is_empty() {
            return Ok(());
        }

        let (index, host_offset) =
            self.resolve(&pieces, offset).ok_or(WindowError::Invalidated)?;
        host.insert_into_marker(pieces[index].marker, host_offset, &text)?;
        tracing::debug!(offset, host_offset, len = text.chars().count(), "window insert");
        Ok(())
    }

    /// Delete a virtual range.
    ///
    /// Both endpoints must touch an editable region. Only the parts of the range backed by host
    /// text are removed; prefixes and suffixes in between are skipped.
    pub fn delete(&mut self, range: Range<usize>) -> Result<()> {
        check_range(&range)?;
        let mut host = self.host.write();
        let pieces = self.pieces(&*host);
        if pieces.is_empty() {
            return Err(WindowError::Invalidated);
        }
        for offset in [range.start, range.end] {
            if intersect_editable(&pieces, offset..offset).is_none() {
                return Err(WindowError::OutOfBounds { offset });
            }
        }

        let mut to_delete = Vec::with_capacity(pieces.len());
        let mut offset = range.start;
        let mut cursor = 0;
        for piece in &pieces {
            cursor += piece.prefix_len;
            offset = offset.max(cursor);
            if offset >= range.end {
                break;
            }
            let body_end = cursor + piece.len();
            if offset < body_end {
                let stop = body_end.min(range.end);
                let shift = piece.range.start;
                to_delete.push(shift + offset - cursor..shift + stop - cursor);
                offset = stop;
            }
            cursor = body_end + piece.suffix_len;
        }

        let mut removed = 0;
        for host_range in to_delete {
            let len = host_range.len();
            host.delete(host_range.start - removed..host_range.end - removed)?;
            tracing::debug!(?host_range, removed, "window delete");
            removed += len;
        }
        Ok(())
    }

    /// Replace a virtual range, touching only the part of the host that actually changes.
    ///
    /// The common prefix and suffix of the old and new text are trimmed off, then the
    /// remaining middle is deleted and reinserted.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        check_range(&range)?;
        let text = self.sanitize(text);
        let current: Vec<char> = self.text().chars().collect();
        if range.end > current.len() {
            return Err(WindowError::OutOfBounds { offset: range.end });
        }
        let old = &current[range.clone()];
        let new: Vec<char> = text.chars().collect();

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let start = range.start + prefix;
        let end = range.end - suffix;
        let middle: String = new[prefix..new.len() - suffix].iter().collect();
        if start == end && middle.is_empty() {
            return Ok(());
        }

        self.delete(start..end)?;
        self.insert(start, &middle)
    }

    /// Replace the whole virtual text with `text`.
    ///
    /// `text` must keep the first prefix and the last suffix; anything else is a caller bug
    /// reported as [`WindowError::MalformedText`] without touching the host. The host is
    /// updated with the minimal per-segment edit sequence, so segments whose text did not
    /// change are left alone.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        let mut host = self.host.write();
        let pieces = self.pieces(&*host);
        let (first, last) = match (pieces.first(), pieces.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(WindowError::Invalidated),
        };
        if !text.starts_with(first.prefix) {
            tracing::error!(prefix = first.prefix, "window text lost its prefix");
            return Err(WindowError::MalformedText {
                reason: format!("text does not start with prefix {:?}", first.prefix),
            });
        }
        if !text.ends_with(last.suffix) {
            tracing::error!(suffix = last.suffix, "window text lost its suffix");
            return Err(WindowError::MalformedText {
                reason: format!("text does not end with suffix {:?}", last.suffix),
            });
        }

        let text = self.sanitize(text);
        let rendered: Vec<RenderedSegment<'_>> = pieces
            .iter()
            .map(|piece| {
                RenderedSegment::new(piece.prefix, &host.slice(piece.range.clone()), piece.suffix)
            })
            .collect();
        let changes = differ::min_edit_sequence(&rendered, &text).inspect_err(|err| {
            tracing::error!(%err, "could not project window text onto host");
        })?;
        if changes.len() != pieces.len() {
            return Err(WindowError::MalformedText {
                reason: format!(
                    "edit sequence has {} entries for {} segments",
                    changes.len(),
                    pieces.len()
                ),
            });
        }

        let markers: Vec<MarkerId> = pieces.iter().map(|piece| piece.marker).collect();
        for (marker, change) in markers.into_iter().zip(changes) {
            let Some(change) = change else {
                continue;
            };
            let range = host.marker_range(marker).ok_or(WindowError::Invalidated)?;
            tracing::debug!(?range, len = change.chars().count(), "window segment replaced");
            // An empty segment touching its neighbours must be the only one to grow.
            if range.is_empty() {
                host.insert_into_marker(marker, range.start, &change)?;
            } else {
                host.replace(range, &change)?;
            }
        }
        Ok(())
    }

    fn pieces<'a>(&'a self, host: &B) -> Vec<Piece<'a>> {
        self.segments
            .iter()
            .filter_map(|segment| {
                let range = host.marker_range(segment.marker)?;
                Some(Piece {
                    prefix: &segment.prefix,
                    suffix: &segment.suffix,
                    prefix_len: segment.prefix_len,
                    suffix_len: segment.suffix_len,
                    range,
                    marker: segment.marker,
                })
            })
            .collect()
    }

    fn valid_ranges(&self) -> Vec<Range<usize>> {
        self.host_ranges().into_iter().flatten().collect()
    }

    fn render(&self, host: &B) -> String {
        let mut text = String::new();
        for piece in self.pieces(host) {
            text.push_str(piece.prefix);
            text.push_str(&host.slice(piece.range));
            text.push_str(piece.suffix);
        }
        text
    }

    /// Piece index and host offset for a virtual offset, asking the caret at boundaries.
    ///
    /// Fragments that touch in the host share the boundary offset; the left one owns it.
    fn resolve(&self, pieces: &[Piece<'_>], offset: usize) -> Option<(usize, usize)> {
        let left = locate(pieces, offset, Bias::Left)?;
        let right = locate(pieces, offset, Bias::Right)?;
        if left.1 == right.1 {
            return Some(left);
        }
        let caret = self.caret.as_ref().and_then(|provider| provider.caret_offset());
        let resolved = resolve_boundary(left.1, right.1, caret);
        tracing::trace!(
            offset,
            left = left.1,
            right = right.1,
            ?caret,
            resolved,
            "boundary offset resolved"
        );
        Some(if resolved == left.1 { left } else { right })
    }

    fn sanitize<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.one_line && text.contains(|c| matches!(c, '\n' | '\r')) {
            Cow::Owned(text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect())
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl<B: HostBuffer> Drop for WindowedDocument<B> {
    fn drop(&mut self) {
        // A caller still holding the host lock keeps the markers; they are harmless.
        if let Some(mut host) = self.host.try_write() {
            for segment in &self.segments {
                host.release_marker(segment.marker);
            }
        }
    }
}

impl<B: HostBuffer> fmt::Debug for WindowedDocument<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowedDocument")
            .field("segments", &self.segments)
            .field("one_line", &self.one_line)
            .field("host", &Arc::as_ptr(&self.host))
            .finish_non_exhaustive()
    }
}

fn to_host(pieces: &[Piece<'_>], offset: usize, bias: Bias) -> Option<usize> {
    locate(pieces, offset, bias).map(|(_, host_offset)| host_offset)
}

/// Index of the piece a virtual offset falls into, with its host offset.
fn locate(pieces: &[Piece<'_>], offset: usize, bias: Bias) -> Option<(usize, usize)> {
    let mut rem = offset;
    for (index, piece) in pieces.iter().enumerate() {
        if rem <= piece.prefix_len {
            // Only the very start of a segment sits between two fragments.
            return Some(match index.checked_sub(1) {
                Some(prev) if rem == 0 && bias == Bias::Left => (prev, pieces[prev].range.end),
                _ => (index, piece.range.start),
            });
        }
        rem -= piece.prefix_len;
        if rem < piece.len() || (rem == piece.len() && bias == Bias::Left) {
            return Some((index, piece.range.start + rem));
        }
        rem -= piece.len();
        if rem < piece.suffix_len {
            return Some((index, piece.range.end));
        }
        rem -= piece.suffix_len;
    }
    let index = pieces.len().checked_sub(1)?;
    Some((index, pieces[index].range.end))
}

fn to_host_range(pieces: &[Piece<'_>], range: Range<usize>) -> Option<Range<usize>> {
    let start = to_host(pieces, range.start, Bias::Right)?;
    let mut end = to_host(pieces, range.end, Bias::Left)?;
    if end < start {
        end = to_host(pieces, range.end, Bias::Right)?;
    }
    Some(start..end.max(start))
}

fn intersect_editable(pieces: &[Piece<'_>], range: Range<usize>) -> Option<Range<usize>> {
    let mut offset = 0;
    let mut hull: Option<Range<usize>> = None;
    for piece in pieces {
        offset += piece.prefix_len;
        let body = offset..offset + piece.len();
        if body.start <= range.end && range.start <= body.end {
            let start = body.start.max(range.start);
            let end = body.end.min(range.end);
            hull = Some(match hull {
                Some(hull) => hull.start..end,
                None => start..end,
            });
        }
        offset = body.end + piece.suffix_len;
    }
    hull
}

fn check_range(range: &Range<usize>) -> Result<()> {
    if range.start > range.end {
        return Err(WindowError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    Ok(())
}

fn count_newlines(text: &str) -> usize {
    text.chars().filter(|c| *c == '\n').count()
}

fn count_newlines_in(text: &str, chars: usize) -> usize {
    text.chars().take(chars).filter(|c| *c == '\n').count()
}
