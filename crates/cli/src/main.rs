//! Condo Market CLI - Catalog seeding and role management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the catalog with demo products
//! cm-cli seed products
//!
//! # Promote a user to admin
//! cm-cli role grant -u <uid>
//!
//! # Demote an admin back to resident
//! cm-cli role revoke -u <uid>
//! ```
//!
//! # Commands
//!
//! - `seed products` - Write demo products to the catalog
//! - `role grant` - Set a user's role to admin
//! - `role revoke` - Set a user's role back to resident

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cm-cli")]
#[command(author, version, about = "Condo Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the backend with demo data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage user roles
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Write demo products to the catalog
    Products,
}

#[derive(Subcommand)]
enum RoleAction {
    /// Set a user's role to admin
    Grant {
        /// Provider-assigned user id
        #[arg(short, long)]
        uid: String,
    },
    /// Set a user's role back to resident
    Revoke {
        /// Provider-assigned user id
        #[arg(short, long)]
        uid: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { target } => match target {
            SeedTarget::Products => commands::seed::products().await?,
        },
        Commands::Role { action } => match action {
            RoleAction::Grant { uid } => {
                commands::role::set_role(&uid, condo_market_core::Role::Admin).await?;
            }
            RoleAction::Revoke { uid } => {
                commands::role::set_role(&uid, condo_market_core::Role::Resident).await?;
            }
        },
    }
    Ok(())
}
