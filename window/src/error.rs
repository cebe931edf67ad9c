use crate::differ::DiffError;
use docwin_text::EditError;

pub type Result<T, E = WindowError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// Edit targets a fixed prefix or suffix instead of host-backed text.
    #[error("Offset {offset} is not inside an editable region of the window")]
    OutOfBounds { offset: usize },

    #[error("Invalid range: start {start} > end {end}")]
    InvalidRange { start: usize, end: usize },

    #[error("A document window needs at least one shred")]
    NoShreds,

    #[error("Shred {index} starts before the previous shred ends")]
    UnorderedShreds { index: usize },

    /// Caller passed text that cannot be projected onto the window.
    #[error("Malformed window text: {reason}")]
    MalformedText { reason: String },

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Every host range of the window has been invalidated")]
    Invalidated,
}
