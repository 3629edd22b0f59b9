use rusqlite::params;
use tracing::debug;

use super::{Store, Table};
use crate::error::{Result, SeedError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sedan,
    Suv,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Sedan, Category::Suv];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sedan => "Sedan",
            Category::Suv => "SUV",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Manual, Transmission::Automatic];

    pub fn as_str(self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Car,
    Truck,
}

impl VehicleType {
    pub const ALL: [VehicleType; 2] = [VehicleType::Car, VehicleType::Truck];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::Truck => "Truck",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub category: String,
    pub transmission: String,
    pub vehicle_type: String,
    pub daily_rate: f64,
    pub last_revision_date: String,
    pub next_revision_date: String,
    pub last_inspection_date: String,
    pub passenger_capacity: i64,
}

pub fn insert_vehicle(store: &Store, vehicle: &NewVehicle) -> Result<i64> {
    let conn = store.connection()?;
    conn.execute(
        "INSERT INTO Vehicles(make, model, category, transmission, vehicle_type, daily_rate, \
         last_revision_date, next_revision_date, last_inspection_date, passenger_capacity) \
         VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            vehicle.make,
            vehicle.model,
            vehicle.category,
            vehicle.transmission,
            vehicle.vehicle_type,
            vehicle.daily_rate,
            vehicle.last_revision_date,
            vehicle.next_revision_date,
            vehicle.last_inspection_date,
            vehicle.passenger_capacity,
        ],
    )
    .map_err(|e| SeedError::from_write(Table::Vehicles, e))?;
    let id = conn.last_insert_rowid();
    debug!(vehicle_id = id, make = %vehicle.make, "vehicle inserted");
    Ok(id)
}
