//! Seed driver: connection, schema, then `count` rounds of one user, one
//! vehicle and one customer drawn from a [`FakeData`] provider.

use tracing::{error, info, warn};

use crate::config::SeedConfig;
use crate::credentials::PasswordHasher;
use crate::db::{
    ensure_schema, insert_customer, insert_user, insert_vehicle, Category, NewCustomer, NewUser,
    NewVehicle, Store, Table, Transmission, UserType, VehicleType,
};
use crate::error::Result;
use crate::fake::{FakeData, RandomFaker};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub vehicles: usize,
    pub customers: usize,
    /// Rows given up on, after any retries.
    pub failures: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Seeder {
    count: usize,
    max_attempts: u32,
}

fn labels<T: Copy, const N: usize>(all: [T; N], as_str: fn(T) -> &'static str) -> [&'static str; N] {
    all.map(as_str)
}

pub fn fake_user(faker: &mut impl FakeData) -> NewUser {
    NewUser {
        name: faker.name(),
        email: faker.email(),
        password: faker.password(),
        user_type: faker.choose(&labels(UserType::ALL, UserType::as_str)).to_string(),
    }
}

pub fn fake_vehicle(faker: &mut impl FakeData) -> NewVehicle {
    NewVehicle {
        make: faker.company(),
        model: faker.word(),
        category: faker.choose(&labels(Category::ALL, Category::as_str)).to_string(),
        transmission: faker
            .choose(&labels(Transmission::ALL, Transmission::as_str))
            .to_string(),
        vehicle_type: faker
            .choose(&labels(VehicleType::ALL, VehicleType::as_str))
            .to_string(),
        daily_rate: faker.daily_rate(),
        last_revision_date: faker.date(),
        next_revision_date: faker.date(),
        last_inspection_date: faker.date(),
        passenger_capacity: faker.passenger_capacity(),
    }
}

pub fn fake_customer(faker: &mut impl FakeData) -> NewCustomer {
    NewCustomer {
        name: faker.name(),
        identification: faker.ssn(),
        phone: faker.phone_number(),
        address: faker.address(),
        email: faker.email(),
    }
}

impl Seeder {
    pub fn new(count: usize, max_attempts: u32) -> Self {
        Self { count, max_attempts: max_attempts.max(1) }
    }

    /// Insert one row, drawing a fresh one after each uniqueness collision.
    /// Other failures are not retried. Connection failures propagate.
    fn insert_with_retry<F: FakeData, R>(
        &self,
        table: Table,
        faker: &mut F,
        draw: impl Fn(&mut F) -> R,
        mut insert: impl FnMut(&R) -> Result<i64>,
    ) -> Result<Option<i64>> {
        for attempt in 1..=self.max_attempts {
            let row = draw(faker);
            match insert(&row) {
                Ok(id) => return Ok(Some(id)),
                Err(err) if err.is_connection_failure() => return Err(err),
                Err(err) if err.is_constraint_violation() && attempt < self.max_attempts => {
                    warn!(%table, attempt, error = %err, "duplicate row, drawing another");
                }
                Err(err) => {
                    error!(%table, attempt, error = %err, "failed to insert row");
                    return Ok(None);
                }
            }
        }
        Ok(None)
    }

    pub fn run<F: FakeData>(
        &self,
        store: &Store,
        faker: &mut F,
        hasher: &PasswordHasher,
    ) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();
        for round in 0..self.count {
            match self.insert_with_retry(Table::Users, faker, fake_user, |u| {
                insert_user(store, hasher, u)
            })? {
                Some(_) => summary.users += 1,
                None => summary.failures += 1,
            }
            match self.insert_with_retry(Table::Vehicles, faker, fake_vehicle, |v| {
                insert_vehicle(store, v)
            })? {
                Some(_) => summary.vehicles += 1,
                None => summary.failures += 1,
            }
            match self.insert_with_retry(Table::Customers, faker, fake_customer, |c| {
                insert_customer(store, c)
            })? {
                Some(_) => summary.customers += 1,
                None => summary.failures += 1,
            }
            tracing::debug!(round = round + 1, of = self.count, "seed round complete");
        }
        Ok(summary)
    }
}

/// The whole run: open, schema, seed, report counts, close.
pub fn run_seed(config: &SeedConfig) -> Result<SeedSummary> {
    let store = match Store::open(&config.database) {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, "cannot create the database connection");
            return Err(err);
        }
    };
    ensure_schema(&store)?;

    let hasher = PasswordHasher::new(config.hash_cost);
    let seeder = Seeder::new(config.count, config.max_attempts);
    let summary = match config.rng_seed {
        Some(seed) => seeder.run(&store, &mut RandomFaker::seeded(seed), &hasher)?,
        None => seeder.run(&store, &mut RandomFaker::from_os_rng(), &hasher)?,
    };

    if summary.failures == 0 {
        info!("random data inserted successfully");
    } else {
        warn!(failures = summary.failures, "random data inserted with failures");
    }
    for table in Table::ALL {
        info!(%table, rows = store.row_count(table)?, "table size");
    }
    store.close()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MIN_HASH_COST;

    /// Hands out the same email until `repeats` draws have happened.
    struct StuckEmails {
        inner: RandomFaker,
        repeats: usize,
        drawn: usize,
    }

    impl FakeData for StuckEmails {
        fn name(&mut self) -> String {
            self.inner.name()
        }
        fn email(&mut self) -> String {
            self.drawn += 1;
            if self.drawn <= self.repeats {
                "stuck@example.com".to_string()
            } else {
                self.inner.email()
            }
        }
        fn word(&mut self) -> String {
            self.inner.word()
        }
        fn company(&mut self) -> String {
            self.inner.company()
        }
        fn date(&mut self) -> String {
            self.inner.date()
        }
        fn phone_number(&mut self) -> String {
            self.inner.phone_number()
        }
        fn address(&mut self) -> String {
            self.inner.address()
        }
        fn ssn(&mut self) -> String {
            self.inner.ssn()
        }
        fn password(&mut self) -> String {
            self.inner.password()
        }
        fn daily_rate(&mut self) -> f64 {
            self.inner.daily_rate()
        }
        fn passenger_capacity(&mut self) -> i64 {
            self.inner.passenger_capacity()
        }
        fn choose<'a>(&mut self, labels: &[&'a str]) -> &'a str {
            self.inner.choose(labels)
        }
    }

    fn store() -> Store {
        let store = Store::open_in_memory().unwrap();
        ensure_schema(&store).unwrap();
        store
    }

    #[test]
    fn email_collisions_are_retried_with_fresh_rows() {
        let store = store();
        // Emails are unique per table, so only the second user collides.
        let mut faker = StuckEmails { inner: RandomFaker::seeded(1), repeats: 3, drawn: 0 };
        let hasher = PasswordHasher::new(MIN_HASH_COST);
        let summary = Seeder::new(2, 5).run(&store, &mut faker, &hasher).unwrap();

        assert_eq!(summary, SeedSummary { users: 2, vehicles: 2, customers: 2, failures: 0 });
        assert_eq!(store.row_count(Table::Users).unwrap(), 2);
    }

    #[test]
    fn exhausted_retries_count_as_failures() {
        let store = store();
        let mut faker = StuckEmails { inner: RandomFaker::seeded(2), repeats: usize::MAX, drawn: 0 };
        let hasher = PasswordHasher::new(MIN_HASH_COST);
        let summary = Seeder::new(2, 3).run(&store, &mut faker, &hasher).unwrap();

        assert_eq!(summary.users, 1);
        assert_eq!(summary.customers, 1);
        assert_eq!(summary.vehicles, 2);
        assert_eq!(summary.failures, 2);
    }

    #[test]
    fn unavailable_store_stops_the_run() {
        let store = Store::unavailable("gone.db", "unplugged");
        let hasher = PasswordHasher::new(MIN_HASH_COST);
        let err = Seeder::new(3, 5)
            .run(&store, &mut RandomFaker::seeded(4), &hasher)
            .unwrap_err();
        assert!(err.is_connection_failure());
    }

    #[test]
    fn generated_rows_use_the_known_labels() {
        let mut faker = RandomFaker::seeded(9);
        for _ in 0..20 {
            let user = fake_user(&mut faker);
            assert!(["admin", "customer"].contains(&user.user_type.as_str()));
            let vehicle = fake_vehicle(&mut faker);
            assert!(["Sedan", "SUV"].contains(&vehicle.category.as_str()));
            assert!(["Manual", "Automatic"].contains(&vehicle.transmission.as_str()));
            assert!(["Car", "Truck"].contains(&vehicle.vehicle_type.as_str()));
        }
    }
}
