// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! modmove - move a CommonJS module and keep its requires valid
//!
//! This is the main entry point for the modmove CLI.

mod cli;
mod commands;

use clap::Parser;
use modmove_core::Config;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use commands::CommandContext;

/// Main entry point - uses tokio runtime for async operations.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&cli, &config);

    let ctx = CommandContext::new(&cli, config);
    let result = match &cli.command {
        Commands::Mv(args) => commands::mv::run(args, &ctx).await,
        Commands::Refs(args) => commands::refs::run(args, &ctx).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing. `RUST_LOG` wins over `--verbose` and the configured level.
fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.verbose { "debug" } else { config.loglevel.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("modmove={level},modmove_core={level}"))
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
