use std::fmt;

use tracing::{error, info};

use super::Store;
use crate::error::{Result, SeedError};

const USERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS Users (
        user_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        user_type TEXT NOT NULL
    );
"#;

const VEHICLES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS Vehicles (
        vehicle_id INTEGER PRIMARY KEY,
        make TEXT NOT NULL,
        model TEXT NOT NULL,
        category TEXT NOT NULL,
        transmission TEXT NOT NULL,
        vehicle_type TEXT NOT NULL,
        daily_rate REAL NOT NULL,
        last_revision_date TEXT NOT NULL,
        next_revision_date TEXT NOT NULL,
        last_inspection_date TEXT NOT NULL,
        passenger_capacity INTEGER NOT NULL
    );
"#;

const CUSTOMERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS Customers (
        customer_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        identification TEXT NOT NULL,
        phone TEXT NOT NULL,
        address TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE
    );
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Vehicles,
    Customers,
}

impl Table {
    /// Creation order used by [`ensure_schema`].
    pub const ALL: [Table; 3] = [Table::Users, Table::Vehicles, Table::Customers];

    pub fn name(self) -> &'static str {
        match self {
            Table::Users => "Users",
            Table::Vehicles => "Vehicles",
            Table::Customers => "Customers",
        }
    }

    pub fn ddl(self) -> &'static str {
        match self {
            Table::Users => USERS_DDL,
            Table::Vehicles => VEHICLES_DDL,
            Table::Customers => CUSTOMERS_DDL,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Create `table` if it is absent. Existing tables and rows are untouched.
pub fn ensure_table(store: &Store, table: Table) -> Result<()> {
    let conn = store.connection()?;
    conn.execute_batch(table.ddl())
        .map_err(|source| SeedError::Schema { table, source })
}

/// Attempt every table, then report the first failure if any.
pub fn ensure_schema(store: &Store) -> Result<()> {
    let mut first_failure = None;
    for table in Table::ALL {
        match ensure_table(store, table) {
            Ok(()) => info!(%table, "table created successfully"),
            Err(err) => {
                error!(%table, error = %err, "failed to create table");
                first_failure.get_or_insert(err);
            }
        }
    }
    match first_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(store: &Store, table: Table) -> Vec<(String, String, bool)> {
        let conn = store.connection().unwrap();
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({});", table.name()))
            .unwrap();
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?, row.get::<_, bool>(3)?))
            })
            .unwrap();
        let cols = rows.map(|r| r.unwrap()).collect();
        cols
    }

    #[test]
    fn creates_all_three_tables_with_not_null_columns() {
        let store = Store::open_in_memory().unwrap();
        ensure_schema(&store).unwrap();

        let users = columns(&store, Table::Users);
        let names: Vec<&str> = users.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, ["user_id", "name", "email", "password", "user_type"]);

        let vehicles = columns(&store, Table::Vehicles);
        assert_eq!(vehicles.len(), 11);
        assert!(vehicles
            .iter()
            .any(|(n, t, _)| n == "daily_rate" && t == "REAL"));

        let customers = columns(&store, Table::Customers);
        assert_eq!(customers.len(), 6);

        // The INTEGER PRIMARY KEY column is the rowid alias; every other column is NOT NULL.
        for table in Table::ALL {
            for (name, _, notnull) in columns(&store, table).into_iter().skip(1) {
                assert!(notnull, "{table}.{name} should be NOT NULL");
            }
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        ensure_schema(&store).unwrap();
        store
            .connection()
            .unwrap()
            .execute(
                "INSERT INTO Customers(name, identification, phone, address, email) VALUES ('a','b','c','d','e@x.com')",
                [],
            )
            .unwrap();
        let before = columns(&store, Table::Customers);

        ensure_schema(&store).unwrap();

        assert_eq!(columns(&store, Table::Customers), before);
        assert_eq!(store.row_count(Table::Customers).unwrap(), 1);
    }

    #[test]
    fn every_table_is_attempted_on_unavailable_store() {
        let store = Store::unavailable("gone.db", "no such device");
        let err = ensure_schema(&store).unwrap_err();
        assert!(err.is_connection_failure());
        for table in Table::ALL {
            assert!(ensure_table(&store, table).unwrap_err().is_connection_failure());
        }
    }
}
