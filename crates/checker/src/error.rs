// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that make a check run meaningless

use crate::config::ConfigError;
use powny_core::EventError;
use powny_rules::SourceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no rules path given")]
    MissingRulesPath,
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Events(#[from] EventError),
    #[error("IO error reading event description {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("can't parse event description {origin}: {reason}")]
    UnparsableEvents { origin: String, reason: String },
}
