use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which side of a car's file pair an input belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Expected,
    Actual,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Expected => write!(f, "expected"),
            Role::Actual => write!(f, "actual"),
        }
    }
}

/// Failure to turn one file into a [`Table`](super::model::Table).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected 3 fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("line {line}: {column} value '{value}' is neither a number nor NA")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Failure to combine one car's expected and actual tables.
#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("expected file has {expected_rows} rows but actual file has {actual_rows}")]
    Alignment {
        expected_rows: usize,
        actual_rows: usize,
    },

    #[error("expected row {row} is kept by the actual file but contains NA")]
    MissingExpected { row: usize },
}

/// Anything that aborts a whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("`{role}` file list rejected: {reason}")]
    InputShape { role: Role, reason: String },

    #[error("file specified in `{role}` position [{index}] ({}) is not accessible: {source}", .path.display())]
    FileAccess {
        role: Role,
        index: usize,
        path: PathBuf,
        source: io::Error,
    },

    #[error("file specified in `{role}` position [{index}] ({}) is malformed: {source}", .path.display())]
    Parse {
        role: Role,
        index: usize,
        path: PathBuf,
        source: LoadError,
    },

    #[error("car [{index}]: {source}")]
    Aggregate {
        index: usize,
        source: AggregateError,
    },
}

impl BatchError {
    /// Attach role and car index to a loader failure.
    pub(crate) fn from_load(role: Role, index: usize, path: PathBuf, err: LoadError) -> Self {
        match err {
            LoadError::Io(source) => BatchError::FileAccess {
                role,
                index,
                path,
                source,
            },
            source => BatchError::Parse {
                role,
                index,
                path,
                source,
            },
        }
    }

    /// The role that caused the failure, if it can be pinned to one side.
    pub fn role(&self) -> Option<Role> {
        match self {
            BatchError::InputShape { role, .. }
            | BatchError::FileAccess { role, .. }
            | BatchError::Parse { role, .. } => Some(*role),
            BatchError::Aggregate { .. } => None,
        }
    }

    /// The car index that caused the failure, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            BatchError::InputShape { .. } => None,
            BatchError::FileAccess { index, .. }
            | BatchError::Parse { index, .. }
            | BatchError::Aggregate { index, .. } => Some(*index),
        }
    }
}
