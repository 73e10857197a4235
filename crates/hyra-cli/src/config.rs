// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use hyra_app::{EntityKind, IdStrategy};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "hyra";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub ids: Ids,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            ids: Ids::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub start_tab: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ids {
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("HYRA_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set HYRA_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` at the top",
                    path.display()
                )
            })?;
        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected {CONFIG_VERSION}",
                path.display(),
                self.version
            );
        }

        if let Some(tab) = &self.ui.start_tab
            && EntityKind::parse(tab).is_none()
        {
            bail!(
                "ui.start_tab in {} must be one of tenants, apartments, keys; got {tab:?}",
                path.display()
            );
        }

        if let Some(strategy) = &self.ids.strategy
            && IdStrategy::parse(strategy).is_none()
        {
            bail!(
                "ids.strategy in {} must be uuid or sequential; got {strategy:?}",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!("log.level in {} is not a valid filter", path.display())
            })?;
        }

        if let Some(file) = &self.log.file
            && file.trim().is_empty()
        {
            bail!(
                "log.file in {} is empty; remove it to disable logging",
                path.display()
            );
        }

        Ok(())
    }

    pub fn start_tab(&self) -> EntityKind {
        self.ui
            .start_tab
            .as_deref()
            .and_then(EntityKind::parse)
            .unwrap_or(EntityKind::Tenants)
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.ids
            .strategy
            .as_deref()
            .and_then(IdStrategy::parse)
            .unwrap_or(IdStrategy::Uuid)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log.file.as_deref().map(PathBuf::from)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# hyra config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# tenants | apartments | keys\nstart_tab = \"tenants\"\n\n[ids]\n# uuid | sequential\nstrategy = \"uuid\"\n\n[log]\n# tracing filter directive; HYRA_LOG overrides it\nlevel = \"{}\"\n# Optional. Logging stays off without a file.\n# file = \"/absolute/path/to/hyra.log\"\n",
            path.display(),
            DEFAULT_LOG_LEVEL,
        )
    }
}
