use rusqlite::params;
use tracing::debug;

use super::{Store, Table};
use crate::error::{Result, SeedError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub identification: String,
    pub phone: String,
    pub address: String,
    pub email: String,
}

pub fn insert_customer(store: &Store, customer: &NewCustomer) -> Result<i64> {
    let conn = store.connection()?;
    conn.execute(
        "INSERT INTO Customers(name, identification, phone, address, email) VALUES(?1, ?2, ?3, ?4, ?5)",
        params![
            customer.name,
            customer.identification,
            customer.phone,
            customer.address,
            customer.email,
        ],
    )
    .map_err(|e| SeedError::from_write(Table::Customers, e))?;
    let id = conn.last_insert_rowid();
    debug!(customer_id = id, email = %customer.email, "customer inserted");
    Ok(id)
}
