//! Source locations of declarations.

use std::fmt;

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

use super::FileId;

/// Where a declaration lives in source text.
///
/// Symbols that come from metadata have no `Location`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Location {
    /// The file containing the declaration
    pub file: FileId,
    /// Byte range of the declaration within the file
    pub range: TextRange,
}

impl Location {
    /// Create a new location.
    #[inline]
    pub const fn new(file: FileId, range: TextRange) -> Self {
        Self { file, range }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.file, self.range)
    }
}
