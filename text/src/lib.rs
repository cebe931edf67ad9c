//! Host text buffers for document windows.
//!
//! The key components are:
//! - [`buffer::HostBuffer`] - The capability a window needs from the text it projects onto
//! - [`buffer::TextBuffer`] - Rope-backed implementation
//! - [`marker::MarkerTable`] - Live range markers updated on every structural edit

pub mod buffer;
pub mod marker;
#[cfg(any(test, feature = "test-support"))]
pub mod test_helpers;

pub use buffer::{shared, EditError, HostBuffer, SharedBuffer, TextBuffer};
pub use marker::{BufferEdit, MarkerId, MarkerOptions, MarkerTable};
