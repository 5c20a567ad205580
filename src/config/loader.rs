use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result, bail};
use bon::Builder;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Margin, Rotate, Style},
};

use crate::{
    common::{print_header, project_config_dir},
    tui::engine::{EngineConfig, HistoryLimit},
};

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(clap::Args)]
pub struct ConfigureArgs {
    /// Style prompts with ANSI colours
    #[arg(long)]
    pub(crate) color: Option<bool>,

    /// Line history: "disabled", "unbounded" or a maximum entry count
    #[arg(long, value_parser = parse_history)]
    pub(crate) history: Option<HistoryLimit>,

    /// Draw typed text as '*'
    #[arg(long)]
    pub(crate) mask: Option<bool>,
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Config {
    /// ANSI styling on/off (default: true)
    #[serde(default = "default_true")]
    #[builder(default = true)]
    pub color: bool,
    #[serde(default)]
    #[builder(default)]
    pub history: HistoryLimit,
    #[serde(default)]
    #[builder(default)]
    pub mask: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Tabled)]
struct ConfigDisplay {
    color: bool,
    history: HistoryLimit,
    mask: bool,
}

impl From<&Config> for ConfigDisplay {
    fn from(config: &Config) -> Self {
        Self {
            color: config.color,
            history: config.history,
            mask: config.mask,
        }
    }
}

impl Config {
    pub(crate) fn load_existing(config_file: &Path) -> Result<Self> {
        let config_string = fs::read_to_string(config_file)
            .with_context(|| format!("Unable to read {}", config_file.display()))?;

        let config: Config = serde_json::from_str(&config_string)
            .context("Unable to deserialize configuration data")?;

        Ok(config)
    }

    pub(crate) fn load_from(config_dir: &Path) -> Result<Self> {
        let config_file = config_dir.join(CONFIG_FILE_NAME);

        if config_file.exists() {
            Config::load_existing(&config_file)
        } else {
            debug!("no config at {}, using defaults", config_file.display());
            Ok(Config::default())
        }
    }

    pub(crate) fn save_to(&self, config_dir: &Path) -> Result<()> {
        let config_string =
            serde_json::to_string_pretty(self).context("Unable to serialize configuration data")?;

        let config_file = config_dir.join(CONFIG_FILE_NAME);

        let mut options = fs::OpenOptions::new();
        options.write(true).truncate(true).create(true);
        #[cfg(unix)]
        std::os::unix::fs::OpenOptionsExt::mode(&mut options, 0o600);

        let mut fd = options
            .open(&config_file)
            .with_context(|| format!("Unable to write {}", config_file.display()))?;

        fd.write_all(config_string.as_bytes()).with_context(|| {
            format!("Failed to write configuration to {}", config_file.display())
        })?;

        info!("configuration saved to {}", config_file.display());
        Ok(())
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&project_config_dir()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&project_config_dir()?)
    }

    /// Engine settings matching these preferences.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::builder()
            .mask(self.mask)
            .history(self.history)
            .build()
    }

    pub(crate) fn apply(&mut self, args: &ConfigureArgs) {
        // Only the fields that were explicitly provided
        if let Some(color) = args.color {
            self.color = color;
        }
        if let Some(history) = args.history {
            self.history = history;
        }
        if let Some(mask) = args.mask {
            self.mask = mask;
        }
    }
}

/// Parses a history limit as written on the command line.
pub(crate) fn parse_history(value: &str) -> Result<HistoryLimit> {
    match value.trim().to_ascii_lowercase().as_str() {
        "disabled" | "off" => Ok(HistoryLimit::Disabled),
        "unbounded" => Ok(HistoryLimit::Unbounded),
        other => match other.parse::<usize>() {
            Ok(max) => Ok(HistoryLimit::Max(max)),
            Err(_) => bail!("expected 'disabled', 'unbounded' or a number, got '{value}'"),
        },
    }
}

fn display_configuration(config: &Config) {
    let display = ConfigDisplay::from(config);
    let mut table = Table::new([display]);
    table
        .with(Rotate::Left)
        .with(Style::modern())
        .with(Margin::new(4, 0, 0, 0));

    print_header();
    println!("{table}");
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC
////////////////////////////////////////////////////////////////////////////////

pub fn show_configuration() -> Result<()> {
    let config = Config::load()?;

    display_configuration(&config);

    Ok(())
}

pub fn configure(args: &ConfigureArgs) -> Result<()> {
    let mut config = Config::load()?;

    config.apply(args);
    config.save()?;

    display_configuration(&config);

    Ok(())
}
