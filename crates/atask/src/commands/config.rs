//! `atask config`: inspect and edit the TOML settings file.
//!
//! The file lives at `~/.config/atask/config.toml` unless `ATASK_CONFIG` or
//! `XDG_CONFIG_HOME` says otherwise. A missing file means defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Schema version written to new files.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ATASK_CONFIG";

/// Keys accepted by `config set`.
const VALID_KEYS: &str = "soon_horizon, tasks_file, output.color";

/// Contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version; files without one are treated as current.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Days ahead (inclusive) matched by `due:soon`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soon_horizon: Option<i64>,

    /// Task file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_file: Option<PathBuf>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            soon_horizon: None,
            tasks_file: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Settings passed to query evaluation.
    pub fn evaluation(&self) -> atask_core_rs::Config {
        self.soon_horizon
            .map(atask_core_rs::Config::with_soon_horizon)
            .unwrap_or_default()
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Resolves the config file location.
///
/// `ATASK_CONFIG` wins, then `$XDG_CONFIG_HOME/atask/config.toml`, then
/// `~/.config/atask/config.toml` on all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("atask")
    } else {
        BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config").join("atask"))
            .ok_or_else(|| {
                CommandError::Config("no home directory to place config.toml in".to_string())
            })?
    };

    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk, or defaults if the file is missing.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| config_error("read", &path, e))?;
    let config: Config = toml::from_str(&content).map_err(|e| config_error("parse", &path, e))?;

    let config = migrate_config(config)?;
    if let Some(days) = config.soon_horizon {
        check_soon_horizon(days)
            .map_err(|e| CommandError::Config(format!("{} in {}", e, path.display())))?;
    }

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Rejects a negative due-soon horizon.
fn check_soon_horizon(days: i64) -> std::result::Result<i64, String> {
    if days < 0 {
        return Err(format!(
            "Invalid soon_horizon value '{}'. Must not be negative",
            days
        ));
    }
    Ok(days)
}

/// Brings an older schema up to `CONFIG_VERSION`.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the initial schema.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Writes `config` to the resolved path, creating parent directories.
fn save_config(config: &Config) -> Result<PathBuf> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| config_error("create directory for", &path, e))?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| config_error("encode", &path, e))?;
    fs::write(&path, content).map_err(|e| config_error("write", &path, e))?;

    Ok(path)
}

fn config_error(action: &str, path: &Path, err: impl std::fmt::Display) -> CommandError {
    CommandError::Config(format!("cannot {action} {}: {err}", path.display()))
}

/// Prints the file location and the effective settings.
pub fn execute_show(ctx: &CommandContext, config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
            "effective": {
                "soon_horizon": config.evaluation().soon_horizon,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let status = if path.exists() { "" } else { " (not created yet)" };
        if ctx.use_colors {
            println!("{}{}\n", path.display().bold(), status.dimmed());
        } else {
            println!("{}{}\n", path.display(), status);
        }

        println!("Settings:");
        println!("  soon_horizon: {}", config.evaluation().soon_horizon);
        if let Some(ref tasks_file) = config.tasks_file {
            println!("  tasks_file: {}", tasks_file.display());
        }

        println!("\n[output]");
        if let Some(color) = config.output.color {
            println!("  color: {}", color);
        }
    }

    Ok(())
}

/// Arguments of `config set`.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Validates one setting, then rewrites the file with it.
pub fn execute_set(ctx: &CommandContext, mut config: Config, opts: &ConfigSetOptions) -> Result<()> {
    apply_setting(&mut config, &opts.key, &opts.value)?;
    let path = save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Validates `value` for `key` and stores it in `config`.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "soon_horizon" => {
            let days: i64 = value.parse().map_err(|_| {
                CommandError::Config(format!(
                    "Invalid soon_horizon value '{}'. Expected a number of days",
                    value
                ))
            })?;
            config.soon_horizon = Some(check_soon_horizon(days).map_err(CommandError::Config)?);
        }
        "tasks_file" => {
            if value.trim().is_empty() {
                return Err(CommandError::Config(
                    "Invalid tasks_file value: path is empty".to_string(),
                ));
            }
            config.tasks_file = Some(PathBuf::from(value));
        }
        "output.color" => {
            config.output.color = Some(parse_bool(value)?);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: {}",
                key, VALID_KEYS
            )));
        }
    }
    Ok(())
}

/// Prints the config file location.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Accepts the usual spellings of on and off.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "'{}' is not a boolean (true/false, yes/no, on/off, 1/0)",
            s
        ))),
    }
}
