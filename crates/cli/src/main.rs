// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! powny - check Powny rules against events locally

mod commands;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, config};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::error::CliError;
use powny_checker::CheckConfig;

#[derive(Parser)]
#[command(
    name = "powny",
    version,
    about = "Powny rules checker - run rule handlers against events locally"
)]
struct Cli {
    /// Config file [default: ~/.config/powny-cli/config.toml]
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rule handlers against an event description
    Check(check::CheckArgs),
    /// Write a default config file
    CreateConfig(config::CreateConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<CliError>() {
                Some(cli_error) => eprint!("{}", cli_error),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Check(args) => {
            let config =
                CheckConfig::resolve(cli.config.as_deref()).map_err(CliError::from_config)?;
            logging::setup(&config.logging, cli.debug);
            check::check(args, config)
        }

        Commands::CreateConfig(args) => {
            logging::setup(&Default::default(), cli.debug);
            config::create_config(args, cli.config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
