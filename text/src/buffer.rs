//! Host buffer capability and its rope-backed implementation.
//!
//! [`HostBuffer`] is everything a document window needs from the text it projects onto: read
//! access, the three mutations, line lookup and live range markers. [`TextBuffer`] implements
//! it over a [`ropey::Rope`] with an owned [`MarkerTable`].
//!
//! All offsets are char offsets.

use crate::marker::{BufferEdit, MarkerId, MarkerOptions, MarkerTable};
use parking_lot::RwLock;
use ropey::Rope;
use snafu::{ensure, Snafu};
use std::{ops::Range, sync::Arc};

/// Errors that can occur during buffer operations
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum EditError {
    /// Offset lies past the end of the buffer
    #[snafu(display("Offset {offset} is beyond buffer length {len}"))]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// Range start is after its end
    #[snafu(display("Invalid range: start {start} > end {end}"))]
    InvalidRange { start: usize, end: usize },
}

/// Text storage that a document window can project onto.
///
/// Mutations reject out of range offsets instead of clamping. Reads through
/// [`HostBuffer::slice`] clamp, since marker ranges are always in bounds.
pub trait HostBuffer {
    fn text(&self) -> String;

    /// Length in chars.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of `range`, clamped to the buffer.
    fn slice(&self, range: Range<usize>) -> String;

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditError> {
        self.replace(offset..offset, text)
    }

    fn delete(&mut self, range: Range<usize>) -> Result<(), EditError> {
        self.replace(range, "")
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), EditError>;

    /// Insert `text` on behalf of the marker `owner`.
    ///
    /// Only `owner` grows over the new text when other markers touch `offset`. The default
    /// falls back to a plain [`HostBuffer::insert`].
    fn insert_into_marker(
        &mut self,
        owner: MarkerId,
        offset: usize,
        text: &str,
    ) -> Result<(), EditError> {
        let _ = owner;
        self.insert(offset, text)
    }

    /// Zero based line containing `offset`. Offsets past the end report the last line.
    fn line_number(&self, offset: usize) -> usize;

    fn create_marker(
        &mut self,
        range: Range<usize>,
        options: MarkerOptions,
    ) -> Result<MarkerId, EditError>;

    /// Current range of a marker, `None` once its text was deleted or it was released.
    fn marker_range(&self, id: MarkerId) -> Option<Range<usize>>;

    fn is_marker_valid(&self, id: MarkerId) -> bool {
        self.marker_range(id).is_some()
    }

    fn release_marker(&mut self, id: MarkerId);

    /// Modification stamp, bumped by every applied mutation.
    fn version(&self) -> u64;
}

/// Shared, non-exclusive handle to a host buffer.
pub type SharedBuffer<B = TextBuffer> = Arc<RwLock<B>>;

/// Wrap a buffer for sharing between windows and other editors.
pub fn shared<B: HostBuffer>(buffer: B) -> SharedBuffer<B> {
    Arc::new(RwLock::new(buffer))
}

/// Rope-backed [`HostBuffer`].
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    markers: MarkerTable,
    version: u64,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            markers: MarkerTable::new(),
            version: 0,
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Markers that have not been released, including invalidated ones.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), EditError> {
        ensure!(
            range.start <= range.end,
            InvalidRangeSnafu {
                start: range.start,
                end: range.end,
            }
        );
        let len = self.rope.len_chars();
        ensure!(
            range.end <= len,
            OffsetOutOfBoundsSnafu {
                offset: range.end,
                len,
            }
        );
        Ok(())
    }

    fn edit(
        &mut self,
        range: Range<usize>,
        text: &str,
        owner: Option<MarkerId>,
    ) -> Result<(), EditError> {
        self.check_range(&range)?;
        let new_len = text.chars().count();
        if range.is_empty() && new_len == 0 {
            return Ok(());
        }

        if !range.is_empty() {
            self.rope.remove(range.clone());
        }
        if new_len > 0 {
            self.rope.insert(range.start, text);
        }
        let edit = BufferEdit {
            old_range: range.clone(),
            new_len,
        };
        match owner {
            Some(owner) => self.markers.apply_owned(&edit, owner),
            None => self.markers.apply(&edit),
        }
        self.version += 1;

        tracing::trace!(?range, new_len, version = self.version, "buffer edited");
        Ok(())
    }
}

impl HostBuffer for TextBuffer {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn len(&self) -> usize {
        self.rope.len_chars()
    }

    fn slice(&self, range: Range<usize>) -> String {
        let len = self.rope.len_chars();
        let end = range.end.min(len);
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), EditError> {
        self.edit(range, text, None)
    }

    fn insert_into_marker(
        &mut self,
        owner: MarkerId,
        offset: usize,
        text: &str,
    ) -> Result<(), EditError> {
        self.edit(offset..offset, text, Some(owner))
    }

    fn line_number(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    fn create_marker(
        &mut self,
        range: Range<usize>,
        options: MarkerOptions,
    ) -> Result<MarkerId, EditError> {
        self.check_range(&range)?;
        Ok(self.markers.create(range, options))
    }

    fn marker_range(&self, id: MarkerId) -> Option<Range<usize>> {
        self.markers.range(id)
    }

    fn release_marker(&mut self, id: MarkerId) {
        self.markers.release(id);
    }

    fn version(&self) -> u64 {
        self.version
    }
}
