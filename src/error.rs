use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

use crate::db::Table;

pub type Result<T> = std::result::Result<T, SeedError>;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot open database {}: {reason}", .path.display())]
    Connection { path: PathBuf, reason: String },

    #[error("failed to create table {table}: {source}")]
    Schema {
        table: Table,
        #[source]
        source: rusqlite::Error,
    },

    #[error("constraint violation on {table}: {detail}")]
    ConstraintViolation { table: Table, detail: String },

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password is {len} bytes, bcrypt accepts at most {max}")]
    PasswordTooLong { len: usize, max: usize },

    #[error("storage error on {table}: {source}")]
    Storage {
        table: Table,
        #[source]
        source: rusqlite::Error,
    },
}

impl SeedError {
    /// Classify a driver error raised while writing to or reading from `table`.
    pub fn from_write(table: Table, err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, msg)
                if code.code == ErrorCode::ConstraintViolation =>
            {
                SeedError::ConstraintViolation {
                    table,
                    detail: msg.unwrap_or_else(|| code.to_string()),
                }
            }
            other => SeedError::Storage { table, source: other },
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, SeedError::ConstraintViolation { .. })
    }

    pub fn is_hash_failure(&self) -> bool {
        matches!(self, SeedError::Hash(_) | SeedError::PasswordTooLong { .. })
    }

    pub fn is_connection_failure(&self) -> bool {
        matches!(self, SeedError::Connection { .. })
    }
}
