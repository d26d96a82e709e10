// Copyright 2024 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::{io, path::Path};

use anyhow::Context;
use tokio::fs;

use crate::config::Config;

/// Reads the config file at `path`. Returns `None` when there is no such file.
pub async fn read_config_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Option<Config>> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read config file at {}", path.display())),
    };

    let config = toml::from_str(&content).with_context(|| format!("Invalid config file at {}", path.display()))?;
    Ok(Some(config))
}
