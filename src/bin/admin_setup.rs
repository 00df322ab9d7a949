// ABOUTME: Administrator provisioning utility for the Gympoint API
// ABOUTME: Creates admin accounts with bcrypt-hashed passwords directly in the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! There is no HTTP endpoint for creating administrators; accounts are
//! provisioned from the command line.
//!
//! Usage:
//! ```bash
//! cargo run --bin gympoint-admin -- create-admin --email admin@gym.com --password secret
//!
//! # Point at a specific database
//! cargo run --bin gympoint-admin -- --database-url sqlite:./data/gympoint.db \
//!     create-admin --email admin@gym.com --password secret --name "Front Desk"
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use gympoint_server::config::DatabaseUrl;
use gympoint_server::constants::{defaults, env_config};
use gympoint_server::database::Database;
use gympoint_server::services::provision_admin;
use std::env;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "gympoint-admin",
    about = "Gympoint administrator management",
    long_about = "Provision administrator accounts that can sign in to the Gympoint API."
)]
struct AdminSetupArgs {
    #[command(subcommand)]
    command: AdminCommand,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Create an admin user
    CreateAdmin {
        /// Admin email
        #[arg(long)]
        email: String,

        /// Admin password
        #[arg(long)]
        password: String,

        /// Admin display name
        #[arg(long, default_value = "Gympoint Admin")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = AdminSetupArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let database_url = args
        .database_url
        .or_else(|| env::var(env_config::DATABASE_URL).ok())
        .unwrap_or_else(|| defaults::DATABASE_URL.to_owned());
    let url = DatabaseUrl::parse_url(&database_url);

    info!("Connecting to database: {}", url);
    let database = Database::new(&url, 1).await?;

    match args.command {
        AdminCommand::CreateAdmin {
            email,
            password,
            name,
        } => match provision_admin(&database, &name, &email, &password).await {
            Ok(admin) => {
                info!(admin_id = admin.id, "Admin user {} created", admin.email);
                Ok(())
            }
            Err(e) => {
                error!("Failed to create admin user: {e}");
                Err(e.into())
            }
        },
    }
}
