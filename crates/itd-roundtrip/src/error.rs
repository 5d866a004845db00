//! Error types for file management and XML round-tripping

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RoundTripError {
    /// Reading, writing or deleting a file failed
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted document could not be read as XML
    #[error("malformed XML in {path}: {message}")]
    Xml { path: PathBuf, message: String },

    /// The document has no root element
    #[error("no root element in {0}")]
    MissingRoot(PathBuf),

    /// A path handed to the disk store escapes its root
    #[error("path escapes the store root: {0}")]
    OutsideRoot(PathBuf),
}

impl RoundTripError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create XML error for path
    pub fn xml(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Xml {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RoundTripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = RoundTripError::io_error(
            "views/list.jspx",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "io error on views/list.jspx: gone");

        let err = RoundTripError::xml("menu.jspx", "unexpected end");
        assert!(matches!(err, RoundTripError::Xml { ref message, .. } if message == "unexpected end"));
    }
}
