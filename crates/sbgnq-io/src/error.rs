use sbgnq_core::Error as CoreError;
use std::fmt;

/// I/O-boundary errors: malformed input XML/CSV and writer failures.
/// Wraps [`sbgnq_core::Error`] so a reader/writer failure can be
/// surfaced through the same `MalformedInput`/`Writer` variants the
/// core itself uses.
#[derive(Debug)]
pub enum IoError {
    Xml(quick_xml::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Core(CoreError),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::Xml(e) => write!(f, "xml error: {e}"),
            IoError::Csv(e) => write!(f, "csv error: {e}"),
            IoError::Json(e) => write!(f, "json error: {e}"),
            IoError::Core(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<quick_xml::Error> for IoError {
    fn from(e: quick_xml::Error) -> Self {
        IoError::Xml(e)
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv(e)
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json(e)
    }
}

impl From<CoreError> for IoError {
    fn from(e: CoreError) -> Self {
        IoError::Core(e)
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Core(CoreError::Io(e))
    }
}

pub type Result<T> = std::result::Result<T, IoError>;
