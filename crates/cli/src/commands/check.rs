// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `powny check` - run rules against an event description

use crate::error::CliError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use powny_checker::{read_event_description, CheckConfig, Checker, RunOutcome};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args)]
pub struct CheckArgs {
    /// Event description file (JSON or YAML), or `-` for stdin
    #[arg(short, long = "event-desc", value_name = "PATH")]
    pub event_desc: PathBuf,

    /// Rules repository, overriding `rules-path` from the config
    #[arg(short, long, value_name = "DIR")]
    pub rules_path: Option<PathBuf>,

    /// Handler name to collect from rule modules (repeatable)
    #[arg(long = "entry-point", value_name = "NAME")]
    pub entry_points: Vec<String>,

    /// Only load modules at the top of the rules repository
    #[arg(long)]
    pub no_recursive: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Exit non-zero when any handler failed
    #[arg(long)]
    pub strict: bool,
}

pub fn check(args: CheckArgs, mut config: CheckConfig) -> Result<ExitCode> {
    if let Some(path) = args.rules_path {
        config.rules_path = Some(path);
    }
    if !args.entry_points.is_empty() {
        config.entry_points = args.entry_points;
    }
    if args.no_recursive {
        config.recursive = false;
    }

    let checker = Checker::from_config(&config).map_err(CliError::from_check)?;
    let description = read_event_description(&args.event_desc).map_err(CliError::from_check)?;
    let report = checker.run(description).map_err(CliError::from_check)?;

    output::print(&report, args.output);

    match report.outcome() {
        RunOutcome::Failed { .. } if args.strict => Ok(ExitCode::FAILURE),
        _ => Ok(ExitCode::SUCCESS),
    }
}
