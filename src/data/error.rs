use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a file on disk into a [`Table`](super::model::Table).
///
/// Every variant is fatal to the load; there is no partial result.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is missing required columns: {}", path.display(), columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("{} line {line}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

impl DataSourceError {
    /// Classify a `csv` error raised while reading `path`.
    pub(crate) fn from_csv(path: PathBuf, err: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = err.kind() {
            return match io.kind() {
                std::io::ErrorKind::NotFound => DataSourceError::NotFound { path },
                kind => DataSourceError::Io {
                    path,
                    source: std::io::Error::new(kind, io.to_string()),
                },
            };
        }
        DataSourceError::Malformed {
            path,
            line: err.position().map_or(0, |p| p.line()),
            source: err,
        }
    }
}

/// A quadrant filter was requested for a label the loaded table does not contain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no rows carry risk quadrant '{label}'")]
pub struct InvalidQuadrantError {
    pub label: String,
}
