mod customers;
mod schema;
mod users;
mod vehicles;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use crate::error::{Result, SeedError};

pub use customers::{insert_customer, NewCustomer};
pub use schema::{ensure_schema, ensure_table, Table};
pub use users::{check_password, insert_user, NewUser, UserType};
pub use vehicles::{insert_vehicle, Category, NewVehicle, Transmission, VehicleType};

enum Handle {
    Open(Connection),
    Unavailable(String),
}

/// The single connection a run holds. Every schema and insert call goes
/// through [`Store::connection`], so an unavailable store answers each of them
/// with [`SeedError::Connection`] instead of faulting.
pub struct Store {
    path: PathBuf,
    handle: Handle,
}

impl Store {
    /// Open or create the database file at `path`. One attempt, no retries.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "sqlite: opening file");
        match Connection::open(&path) {
            Ok(conn) => {
                info!(path = %path.display(), "connection established to the database");
                Ok(Self { path, handle: Handle::Open(conn) })
            }
            Err(err) => Err(SeedError::Connection { path, reason: err.to_string() }),
        }
    }

    /// Open a database that must already exist, read-only. A missing file is a
    /// `Connection` failure and is never created.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "sqlite: opening existing file read-only");
        match Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY) {
            Ok(conn) => Ok(Self { path, handle: Handle::Open(conn) }),
            Err(err) => Err(SeedError::Connection { path, reason: err.to_string() }),
        }
    }

    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        match Connection::open_in_memory() {
            Ok(conn) => Ok(Self { path, handle: Handle::Open(conn) }),
            Err(err) => Err(SeedError::Connection { path, reason: err.to_string() }),
        }
    }

    /// A store whose open failed. Kept around so callers that carry on anyway
    /// get a `Connection` error from every operation.
    pub fn unavailable(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            handle: Handle::Unavailable(reason.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        matches!(self.handle, Handle::Open(_))
    }

    pub fn connection(&self) -> Result<&Connection> {
        match &self.handle {
            Handle::Open(conn) => Ok(conn),
            Handle::Unavailable(reason) => Err(SeedError::Connection {
                path: self.path.clone(),
                reason: reason.clone(),
            }),
        }
    }

    pub fn row_count(&self, table: Table) -> Result<i64> {
        let conn = self.connection()?;
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table.name()), [], |row| row.get(0))
            .map_err(|e| SeedError::from_write(table, e))
    }

    pub fn close(self) -> Result<()> {
        match self.handle {
            Handle::Open(conn) => conn.close().map_err(|(_, err)| SeedError::Connection {
                path: self.path,
                reason: err.to_string(),
            }),
            Handle::Unavailable(_) => Ok(()),
        }
    }
}
