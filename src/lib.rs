pub mod config;
pub mod credentials;
pub mod db;
pub mod error;
pub mod fake;
pub mod logger;
pub mod seed;

pub use error::{Result, SeedError};
