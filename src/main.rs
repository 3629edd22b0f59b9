use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use luxurywheels::config::{load_config, SeedConfig};
use luxurywheels::credentials::PasswordHasher;
use luxurywheels::db::{check_password, Store};
use luxurywheels::{logger, seed};

#[derive(Parser)]
#[command(version, about = "Create and seed the LuxuryWheels database")]
struct Cli {
    /// YAML settings file (defaults to <config dir>/luxurywheels/seed.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Database file to open or create
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    /// Rows to insert per table
    #[arg(long, global = true)]
    count: Option<usize>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create the tables and insert synthetic rows (the default)
    Seed,
    /// Check a password against the hash stored for a user
    CheckPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

fn settings(cli: &Cli) -> Result<SeedConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    if let Some(count) = cli.count {
        config.count = count;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = settings(&cli)?;
    logger::init(config.log_file.as_deref())?;

    match cli.command.unwrap_or(Command::Seed) {
        Command::Seed => {
            let summary = seed::run_seed(&config).context("seeding aborted")?;
            info!(
                users = summary.users,
                vehicles = summary.vehicles,
                customers = summary.customers,
                failures = summary.failures,
                "done"
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckPassword { email, password } => {
            let store = Store::open_existing(&config.database)?;
            let hasher = PasswordHasher::new(config.hash_cost);
            let matched = check_password(&store, &hasher, &email, &password).map_err(|e| {
                error!(error = %e, "password check failed");
                e
            })?;
            store.close()?;
            if matched {
                println!("password matches for {email}");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("password does not match for {email}");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
