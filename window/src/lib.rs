//! Document windows: edit fragments of a host buffer as one independent text.
//!
//! An injected language (SQL in a string literal, a regex in an annotation) is often split
//! across several host ranges and surrounded by text that is implied rather than written. A
//! [`WindowedDocument`] stitches those ranges together with their fixed prefixes and suffixes
//! and translates offsets, lines and edits between the two coordinate spaces.
//!
//! # Architecture
//!
//! ```text
//! HostBuffer (docwin_text)  <-- markers track each fragment's host range
//!   | WindowedDocument       <-- virtual text, offset/line mapping, edit routing
//!   | differ                 <-- minimal per-fragment edits for whole-text replacement
//! ```
//!
//! The window never caches host text. Every read recomputes from the current host state so
//! edits made by other holders of the [`docwin_text::SharedBuffer`] are always visible.
//!
//! # Related
//!
//! - [`caret::CaretProvider`]: picks between the two host offsets a fragment boundary maps to
//! - [`config::WindowConfig`]: TOML descriptors for windows

pub mod caret;
pub mod config;
pub mod differ;
pub mod document;
mod error;

pub use caret::{resolve_boundary, CaretProvider};
pub use config::WindowConfig;
pub use differ::{min_edit_sequence, DiffError, RenderedSegment};
pub use document::{Bias, Shred, WindowedDocument};
pub use error::{Result, WindowError};
