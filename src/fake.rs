//! Synthetic values for seeding.
//!
//! [`FakeData`] is the provider the seed driver draws from. The driver only
//! ever sees finished values, so tests can swap in a seeded [`RandomFaker`] or
//! their own implementation.

use chrono::{Days, Local, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;

pub trait FakeData {
    fn name(&mut self) -> String;
    fn email(&mut self) -> String;
    fn word(&mut self) -> String;
    fn company(&mut self) -> String;
    /// A calendar date rendered as `YYYY-MM-DD`.
    fn date(&mut self) -> String;
    fn phone_number(&mut self) -> String;
    fn address(&mut self) -> String;
    fn ssn(&mut self) -> String;
    fn password(&mut self) -> String;
    /// Uniform in `[50, 500]`, rounded to cents.
    fn daily_rate(&mut self) -> f64;
    /// Uniform in `1..=8`.
    fn passenger_capacity(&mut self) -> i64;
    /// Pick one label, independently on every call.
    fn choose<'a>(&mut self, labels: &[&'a str]) -> &'a str;
}

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas",
    "Sarah", "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Taylor", "Moore",
    "Jackson", "Martin", "Lee", "Thompson", "White", "Harris", "Clark", "Lewis", "Walker",
];

const EMAIL_DOMAINS: &[&str] = &[
    "example.com", "example.org", "example.net", "mail.test", "inbox.test",
];

const WORDS: &[&str] = &[
    "aurora", "summit", "vector", "harbor", "falcon", "meridian", "cascade", "zephyr", "atlas",
    "orbit", "voyager", "comet", "ember", "granite", "horizon", "nomad", "pioneer", "quartz",
    "ranger", "sierra", "tempest", "vista", "willow", "zenith",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "and Sons", "Ltd", "PLC", "Motors"];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Way", "Boulevard",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Fairview", "Franklin", "Greenville", "Clinton", "Madison",
    "Georgetown", "Salem", "Arlington",
];

const STATES: &[&str] = &["AL", "CA", "CO", "FL", "GA", "IL", "NY", "OH", "TX", "WA"];

const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+";

pub struct RandomFaker {
    rng: StdRng,
}

impl RandomFaker {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_os_rng() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    fn pick(&mut self, list: &[&'static str]) -> &'static str {
        list[self.rng.random_range(0..list.len())]
    }
}

impl FakeData for RandomFaker {
    fn name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    fn email(&mut self) -> String {
        let first = self.pick(FIRST_NAMES).to_lowercase();
        let last = self.pick(LAST_NAMES).to_lowercase();
        let n: u32 = self.rng.random_range(0..10_000);
        format!("{first}.{last}{n}@{}", self.pick(EMAIL_DOMAINS))
    }

    fn word(&mut self) -> String {
        self.pick(WORDS).to_string()
    }

    fn company(&mut self) -> String {
        match self.rng.random_range(0..3u8) {
            0 => format!("{} {}", self.pick(LAST_NAMES), self.pick(COMPANY_SUFFIXES)),
            1 => format!("{}-{}", self.pick(LAST_NAMES), self.pick(LAST_NAMES)),
            _ => format!(
                "{}, {} and {}",
                self.pick(LAST_NAMES),
                self.pick(LAST_NAMES),
                self.pick(LAST_NAMES)
            ),
        }
    }

    fn date(&mut self) -> String {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
        let span = (Local::now().date_naive() - epoch).num_days().max(1) as u64;
        let offset = self.rng.random_range(0..=span);
        epoch
            .checked_add_days(Days::new(offset))
            .unwrap_or(epoch)
            .format("%Y-%m-%d")
            .to_string()
    }

    fn phone_number(&mut self) -> String {
        format!(
            "({:03}) {:03}-{:04}",
            self.rng.random_range(200..1000),
            self.rng.random_range(200..1000),
            self.rng.random_range(0..10_000)
        )
    }

    fn address(&mut self) -> String {
        let number: u32 = self.rng.random_range(1..10_000);
        let street = format!("{} {}", self.pick(LAST_NAMES), self.pick(STREET_SUFFIXES));
        let zip: u32 = self.rng.random_range(10_000..100_000);
        format!("{number} {street}\n{}, {} {zip}", self.pick(CITIES), self.pick(STATES))
    }

    fn ssn(&mut self) -> String {
        // Area 000, 666 and 900+ are never issued.
        let mut area: u32 = self.rng.random_range(1..900);
        if area == 666 {
            area = 665;
        }
        format!(
            "{area:03}-{:02}-{:04}",
            self.rng.random_range(1..100),
            self.rng.random_range(1..10_000)
        )
    }

    fn password(&mut self) -> String {
        (0..10)
            .map(|_| PASSWORD_CHARSET[self.rng.random_range(0..PASSWORD_CHARSET.len())] as char)
            .collect()
    }

    fn daily_rate(&mut self) -> f64 {
        let raw: f64 = self.rng.random_range(50.0..=500.0);
        (raw * 100.0).round() / 100.0
    }

    fn passenger_capacity(&mut self) -> i64 {
        self.rng.random_range(1..=8)
    }

    fn choose<'a>(&mut self, labels: &[&'a str]) -> &'a str {
        labels[self.rng.random_range(0..labels.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_fakers_are_reproducible() {
        let mut a = RandomFaker::seeded(7);
        let mut b = RandomFaker::seeded(7);
        for _ in 0..5 {
            assert_eq!(a.email(), b.email());
            assert_eq!(a.address(), b.address());
        }
    }

    #[test]
    fn numeric_fields_stay_in_range() {
        let mut f = RandomFaker::seeded(42);
        for _ in 0..500 {
            let rate = f.daily_rate();
            assert!((50.0..=500.0).contains(&rate), "rate {rate}");
            assert_eq!((rate * 100.0).round() / 100.0, rate);
            assert!((1..=8).contains(&f.passenger_capacity()));
        }
    }

    #[test]
    fn dates_are_iso_formatted() {
        let mut f = RandomFaker::seeded(3);
        for _ in 0..50 {
            let d = f.date();
            assert!(NaiveDate::parse_from_str(&d, "%Y-%m-%d").is_ok(), "{d}");
        }
    }

    #[test]
    fn text_fields_are_not_empty() {
        let mut f = RandomFaker::seeded(11);
        for value in [
            f.name(),
            f.email(),
            f.word(),
            f.company(),
            f.phone_number(),
            f.address(),
            f.ssn(),
            f.password(),
        ] {
            assert!(!value.is_empty());
        }
        assert!(f.email().contains('@'));
    }

    #[test]
    fn choose_returns_one_of_the_labels() {
        let mut f = RandomFaker::seeded(5);
        let labels = ["admin", "customer"];
        for _ in 0..50 {
            assert!(labels.contains(&f.choose(&labels)));
        }
    }
}
