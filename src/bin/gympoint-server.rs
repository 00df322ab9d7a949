// ABOUTME: Server binary for the Gympoint enrollment API
// ABOUTME: Loads configuration from the environment, initializes logging, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! # Gympoint Server Binary
//!
//! Starts the HTTP API for students, plans, and enrollments.

use anyhow::Result;
use clap::Parser;
use gympoint_server::{config::environment::ServerConfig, logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "gympoint-server")]
#[command(about = "Gympoint API - student, plan, and enrollment management for gyms")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Gympoint API");
    info!("{}", config.summary());

    if let Err(e) = server::run(config).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
