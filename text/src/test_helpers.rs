//! Test helpers for observing exactly what a window does to its host.

use crate::{
    buffer::{EditError, HostBuffer, TextBuffer},
    marker::{MarkerId, MarkerOptions},
};
use std::ops::Range;

/// A mutation that reached the host buffer, in host coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEdit {
    Insert { offset: usize, text: String },
    Delete { range: Range<usize> },
    Replace { range: Range<usize>, text: String },
}

/// [`HostBuffer`] decorator that records every successful mutation call.
#[derive(Debug, Default)]
pub struct RecordingBuffer<B = TextBuffer> {
    inner: B,
    edits: Vec<HostEdit>,
}

impl RecordingBuffer<TextBuffer> {
    pub fn from_text(text: &str) -> Self {
        Self::new(TextBuffer::from_text(text))
    }
}

impl<B: HostBuffer> RecordingBuffer<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            edits: Vec::new(),
        }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn edits(&self) -> &[HostEdit] {
        &self.edits
    }

    pub fn take_edits(&mut self) -> Vec<HostEdit> {
        std::mem::take(&mut self.edits)
    }
}

impl<B: HostBuffer> HostBuffer for RecordingBuffer<B> {
    fn text(&self) -> String {
        self.inner.text()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn slice(&self, range: Range<usize>) -> String {
        self.inner.slice(range)
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditError> {
        self.inner.insert(offset, text)?;
        self.edits.push(HostEdit::Insert {
            offset,
            text: text.to_string(),
        });
        Ok(())
    }

    fn delete(&mut self, range: Range<usize>) -> Result<(), EditError> {
        self.inner.delete(range.clone())?;
        self.edits.push(HostEdit::Delete { range });
        Ok(())
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), EditError> {
        self.inner.replace(range.clone(), text)?;
        self.edits.push(HostEdit::Replace {
            range,
            text: text.to_string(),
        });
        Ok(())
    }

    fn insert_into_marker(
        &mut self,
        owner: MarkerId,
        offset: usize,
        text: &str,
    ) -> Result<(), EditError> {
        self.inner.insert_into_marker(owner, offset, text)?;
        self.edits.push(HostEdit::Insert {
            offset,
            text: text.to_string(),
        });
        Ok(())
    }

    fn line_number(&self, offset: usize) -> usize {
        self.inner.line_number(offset)
    }

    fn create_marker(
        &mut self,
        range: Range<usize>,
        options: MarkerOptions,
    ) -> Result<MarkerId, EditError> {
        self.inner.create_marker(range, options)
    }

    fn marker_range(&self, id: MarkerId) -> Option<Range<usize>> {
        self.inner.marker_range(id)
    }

    fn release_marker(&mut self, id: MarkerId) {
        self.inner.release_marker(id);
    }

    fn version(&self) -> u64 {
        self.inner.version()
    }
}
