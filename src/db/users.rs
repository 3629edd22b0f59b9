use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{Store, Table};
use crate::credentials::PasswordHasher;
use crate::error::{Result, SeedError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Admin,
    Customer,
}

impl UserType {
    pub const ALL: [UserType; 2] = [UserType::Admin, UserType::Customer];

    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Customer => "customer",
        }
    }
}

/// A user row as handed to [`insert_user`]. The password is plaintext here and
/// is hashed before it reaches the store.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("user_type", &self.user_type)
            .finish()
    }
}

pub fn insert_user(store: &Store, hasher: &PasswordHasher, user: &NewUser) -> Result<i64> {
    let conn = store.connection()?;
    let hashed = hasher.hash(&user.password)?;
    conn.execute(
        "INSERT INTO Users(name, email, password, user_type) VALUES(?1, ?2, ?3, ?4)",
        params![user.name, user.email, hashed, user.user_type],
    )
    .map_err(|e| SeedError::from_write(Table::Users, e))?;
    let id = conn.last_insert_rowid();
    debug!(user_id = id, email = %user.email, "user inserted");
    Ok(id)
}

/// Check `plaintext` against the stored hash for `email`. An unknown email is
/// simply `false`.
pub fn check_password(
    store: &Store,
    hasher: &PasswordHasher,
    email: &str,
    plaintext: &str,
) -> Result<bool> {
    let conn = store.connection()?;
    let stored: Option<String> = conn
        .query_row("SELECT password FROM Users WHERE email = ?1", [email], |row| row.get(0))
        .optional()
        .map_err(|e| SeedError::from_write(Table::Users, e))?;
    Ok(stored.is_some_and(|digest| hasher.verify(plaintext, &digest)))
}
