// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::Config;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "HYRA_LOG";

/// Installs the global subscriber when `[log].file` is set. The returned guard
/// flushes buffered lines on drop and must outlive the TUI.
pub fn init(config: &Config) -> Result<Option<WorkerGuard>> {
    let Some(path) = config.log_file() else {
        return Ok(None);
    };

    let directive = filter_directive(config.log_level(), env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter {directive:?}; check {LOG_ENV}"))?;

    let (dir, file_name) = split_log_path(&path)?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()
        .context("install tracing subscriber")?;

    Ok(Some(guard))
}

fn filter_directive(configured: &str, env_override: Option<String>) -> String {
    env_override
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_owned())
}

fn split_log_path(path: &Path) -> Result<(PathBuf, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log file {} has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
