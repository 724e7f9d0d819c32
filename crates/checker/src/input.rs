// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reading event descriptions from files or stdin

use crate::error::CheckError;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Parse an event description, trying JSON first and YAML second
pub fn parse_event_description(content: &str, origin: &str) -> Result<Value, CheckError> {
    let json_err = match serde_json::from_str(content) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    tracing::debug!(origin, error = %json_err, "not JSON, trying YAML");

    serde_yaml_ng::from_str(content).map_err(|yaml_err| CheckError::UnparsableEvents {
        origin: origin.to_string(),
        reason: format!("not JSON ({}) nor YAML ({})", json_err, yaml_err),
    })
}

/// Read an event description from `path`, or from stdin when it is `-`
pub fn read_event_description(path: &Path) -> Result<Value, CheckError> {
    let io_err = |source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(io_err)?;
        content
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    parse_event_description(&content, &path.display().to_string())
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
