//! Customer Registry CLI - Console demo of the customer service.
//!
//! Each invocation works on a fresh in-memory store seeded with the five
//! sample customers.
//!
//! # Usage
//!
//! ```bash
//! # Show the sample data and the available operations
//! customer-cli demo
//!
//! # Also run the operations against the sample data
//! customer-cli demo --exercise
//!
//! # List customers, optionally filtered
//! customer-cli list --city "New York"
//! customer-cli list --search john
//!
//! # Send one RPC envelope and print the response
//! customer-cli rpc '{"operation": "getCustomer", "params": {"customerId": 1}}'
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use customer_registry_server::{CustomerService, CustomerStore};

mod commands;

#[derive(Parser)]
#[command(name = "customer-cli")]
#[command(author, version, about = "Customer registry console demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sample data and the available operations
    Demo {
        /// Run each operation against the sample data
        #[arg(short, long)]
        exercise: bool,
    },
    /// List customers
    List {
        /// Only customers in this city (case-insensitive)
        #[arg(short, long, conflicts_with = "search")]
        city: Option<String>,

        /// Only customers whose name, email, city, or state contains this term
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Execute one RPC envelope (JSON) and print the response
    Rpc {
        /// Request body, e.g. '{"operation": "getCustomerCount"}'
        request: String,
    },
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let service = CustomerService::new(Arc::new(CustomerStore::with_sample_data()));

    match cli.command {
        Commands::Demo { exercise } => {
            commands::demo::show_sample_data(&service)?;
            commands::demo::show_operations();
            if exercise {
                commands::demo::exercise(&service)?;
            }
        }
        Commands::List { city, search } => {
            commands::list::run(&service, city.as_deref(), search.as_deref())?;
        }
        Commands::Rpc { request } => commands::rpc::run(&service, &request)?,
    }
    Ok(())
}
