//! Error types for TOC extraction and tree (de)serialization.

/// Result type for TOC operations
pub type TocResult<T> = Result<T, TocError>;

/// Errors that can occur while extracting, freezing or loading a TOC tree
#[derive(Debug)]
pub enum TocError {
    /// Level window outside `1 <= min_level <= max_level <= 6`
    InvalidLevelRange { min: usize, max: usize },
    /// A heading reached the freeze step without a computed end line
    UnresolvedEndLine { title: String, start_line: usize },
    /// Conversation key that is not a dot-joined list of integers
    InvalidKey(String),
    /// Stored tree blob could not be decoded (missing field, wrong type, bad syntax)
    Json(serde_json::Error),
    /// Reading a source file failed
    Io(std::io::Error),
}

impl std::fmt::Display for TocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TocError::InvalidLevelRange { min, max } => write!(
                f,
                "Invalid heading level range {}..={}: must satisfy 1 <= min_level <= max_level <= 6",
                min, max
            ),
            TocError::UnresolvedEndLine { title, start_line } => write!(
                f,
                "Heading '{}' at line {} has no end line; end lines must be resolved before freezing",
                title, start_line
            ),
            TocError::InvalidKey(key) => write!(f, "Invalid conversation key: '{}'", key),
            TocError::Json(e) => write!(f, "Invalid TOC tree JSON: {}", e),
            TocError::Io(e) => write!(f, "Failed to read markdown: {}", e),
        }
    }
}

impl std::error::Error for TocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TocError::Json(e) => Some(e),
            TocError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TocError {
    fn from(e: serde_json::Error) -> Self {
        TocError::Json(e)
    }
}

impl From<std::io::Error> for TocError {
    fn from(e: std::io::Error) -> Self {
        TocError::Io(e)
    }
}
