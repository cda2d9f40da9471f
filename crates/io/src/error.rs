use std::fmt;
use std::io;
use std::path::PathBuf;

/// Malformed table text. Line numbers are 1-based, columns 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A row produced a different number of columns than the first row.
    ColumnCountMismatch { line: usize, expected: usize, found: usize },
    /// A cell token contains more than one inner delimiter.
    TooManyDelimiters { line: usize, column: usize, token: String },
    /// A non-empty cell token has no inner delimiter.
    MissingDelimiter { line: usize, column: usize, token: String },
}

impl FormatError {
    pub fn line(&self) -> usize {
        match self {
            Self::ColumnCountMismatch { line, .. }
            | Self::TooManyDelimiters { line, .. }
            | Self::MissingDelimiter { line, .. } => *line,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnCountMismatch { line, expected, found } => write!(
                f,
                "line {line}: expected {expected} column(s), found {found}; all rows must have the same number of columns"
            ),
            Self::TooManyDelimiters { line, column, token } => write!(
                f,
                "line {line}, column {column}: cell '{token}' has more than one ','"
            ),
            Self::MissingDelimiter { line, column, token } => write!(
                f,
                "line {line}, column {column}: non-empty cell '{token}' is missing its ','"
            ),
        }
    }
}

impl std::error::Error for FormatError {}

/// Failure loading or saving a table file.
#[derive(Debug)]
pub enum StoreError {
    /// The backing file could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The backing file could not be overwritten.
    Write { path: PathBuf, source: io::Error },
    /// `create` refused to replace an existing file.
    AlreadyExists(PathBuf),
    /// The backing file is not valid table text.
    Format { path: PathBuf, source: FormatError },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Write { path, source } => write!(f, "cannot write {}: {source}", path.display()),
            Self::AlreadyExists(path) => write!(f, "{} already exists", path.display()),
            Self::Format { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Format { source, .. } => Some(source),
            Self::AlreadyExists(_) => None,
        }
    }
}
