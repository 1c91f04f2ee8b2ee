use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

use ship_fee::config::Config;
use ship_fee::shipping::RateConfiguration;
use ship_fee::users::{UserRepository, UserStore};

const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_FEE: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_USERS: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Quote a fee using the configured rates, insurance and discounts
    Quote {
        /// Package weight in kilograms (0 < weight <= 50)
        #[arg(allow_negative_numbers = true)]
        weight: f64,
        /// Destination zone: Domestic, Express or International
        zone: String,
        /// Discount code (e.g. SUMMER10)
        #[arg(short, long, default_value = "")]
        discount: String,
        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fixed-rate fee without insurance or discounts (Domestic and Express only)
    Legacy {
        #[arg(allow_negative_numbers = true)]
        weight: f64,
        zone: String,
    },
    /// Show the effective rate configuration
    Rates {
        #[arg(long)]
        json: bool,
    },
    /// Write a config file with the default rates
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Manage stored users
    User {
        #[command(subcommand)]
        action: UserCommand,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register a new user
    Add { email: String, name: String },
    /// Show a user by id
    Show { id: i64 },
    /// Look up a user by email
    Find { email: String },
    /// Change a user's email and name
    Update { id: i64, email: String, name: String },
    /// Delete a user by id
    Remove { id: i64 },
    /// List all users in id order
    List,
}

#[derive(Parser, Debug)]
#[command(name = "ship-fee")]
#[command(about = "Shipping fee calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ship-fee/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    ship_fee::logging::init(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);
    let use_colors = ship_fee::output::should_use_colors();

    match cli.command {
        Commands::Init { force } => {
            // init must not require a readable config
            match ship_fee::config::write_default_config(config_path, force) {
                Ok(path) => println!("Wrote default config to {}", path.display()),
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Quote {
            weight,
            zone,
            discount,
            json,
        } => {
            let rates = effective_rates(&load_config_or_exit(config_path));
            match ship_fee::shipping::quote(&rates, weight, &zone, &discount) {
                Ok(q) => {
                    if json {
                        print_json(&q);
                    } else if cli.verbose {
                        println!("{}", ship_fee::output::format_quote_detail(&q, use_colors));
                    } else {
                        println!("{}", ship_fee::output::format_quote_line(&q, use_colors));
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(EXIT_FEE);
                }
            }
        }
        Commands::Legacy { weight, zone } => match ship_fee::shipping::compute_fee(weight, &zone) {
            Ok(fee) => println!("{}", fee),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(EXIT_FEE);
            }
        },
        Commands::Rates { json } => {
            let rates = effective_rates(&load_config_or_exit(config_path));
            if json {
                print_json(&rates);
            } else {
                println!("{}", ship_fee::output::format_rates(&rates));
            }
        }
        Commands::User { action } => {
            let config = load_config_or_exit(config_path);
            if let Err(e) = run_user_command(&config, action, use_colors) {
                eprintln!("Error: {:#}", e);
                std::process::exit(EXIT_USERS);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn load_config_or_exit(path: Option<PathBuf>) -> Config {
    match ship_fee::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

/// Validate the configured rates, exiting with every error listed on failure
fn effective_rates(config: &Config) -> RateConfiguration {
    match config.rate_configuration() {
        Ok(rates) => rates,
        Err(errors) => {
            eprintln!("Rate config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run_user_command(config: &Config, action: UserCommand, use_colors: bool) -> anyhow::Result<()> {
    let path = config.users_path()?;
    let mut store: UserStore = ship_fee::users::load_user_store(&path)?;
    debug!("{} users loaded from {}", store.len(), path.display());

    let changed = match action {
        UserCommand::Add { email, name } => {
            let user = store.create(&email, &name)?;
            println!("{}", ship_fee::output::format_user_line(&user, use_colors));
            true
        }
        UserCommand::Show { id } => {
            let user = store.get_by_id(id)?;
            println!("{}", ship_fee::output::format_user_line(&user, use_colors));
            false
        }
        UserCommand::Find { email } => {
            let user = store.get_by_email(&email)?;
            println!("{}", ship_fee::output::format_user_line(&user, use_colors));
            false
        }
        UserCommand::Update { id, email, name } => {
            store.update(id, &email, &name)?;
            println!("Updated user {}", id);
            true
        }
        UserCommand::Remove { id } => {
            store.delete(id)?;
            println!("Removed user {}", id);
            true
        }
        UserCommand::List => {
            let users = store.list();
            println!("{}", ship_fee::output::format_user_list(&users, use_colors));
            false
        }
    };

    if changed {
        ship_fee::users::save_user_store(&path, &store)?;
    } else if store.is_empty() {
        warn!("user store at {} is empty", path.display());
    }

    Ok(())
}
