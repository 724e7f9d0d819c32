// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `powny create-config` - write a starter config file

use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use powny_checker::{write_default_config, CheckConfig, ConfigError};
use std::path::PathBuf;

#[derive(Args)]
pub struct CreateConfigArgs {
    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

pub fn create_config(args: CreateConfigArgs, path: Option<PathBuf>) -> Result<()> {
    let path = match path.or_else(CheckConfig::default_path) {
        Some(path) => path,
        None => return Err(CliError::from_config(ConfigError::NoConfigDir).into()),
    };

    write_default_config(&path, args.force).map_err(CliError::from_config)?;
    println!("Created {}", path.display());
    Ok(())
}
