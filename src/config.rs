use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};
use thiserror::Error;

use crate::constants::DEFAULT_CHANNEL;
use crate::deutils::is_usable_interval;
use crate::source::Timeouts;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// How screens are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Coloured terminal output
    Ansi,
    /// HTML-safe markup with colour spans
    Html,
    /// Text only, colour tags dropped
    Plain,
}

/// Top-level app configuration. Every field is optional so files and CLI
/// flags can be layered; accessors supply the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,             // e.g., "info" | "debug"
    pub channel: Option<String>,               // URL or path of channel.json
    pub output: Option<OutputFormat>,
    pub html_out: Option<PathBuf>,             // also write an HTML document per tick
    pub request_timeout_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
    pub seconds_per_page_override: Option<f64>,
    pub clear_screen: Option<bool>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn channel(&self) -> &str {
        self.channel.as_deref().unwrap_or(DEFAULT_CHANNEL)
    }

    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Ansi)
    }

    pub fn clear_screen(&self) -> bool {
        self.clear_screen.unwrap_or(self.output() == OutputFormat::Ansi)
    }

    pub fn timeouts(&self) -> Timeouts {
        let defaults = Timeouts::default();
        Timeouts {
            connect: self.connect_timeout_ms.map(Duration::from_millis).unwrap_or(defaults.connect),
            request: self.request_timeout_ms.map(Duration::from_millis).unwrap_or(defaults.request),
        }
    }

    pub fn interval_override(&self) -> Option<Duration> {
        self.seconds_per_page_override.and_then(|s| Duration::try_from_secs_f64(s).ok())
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "teleplay", version, about = "Teletext-style page player")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
    /// Path to a YAML config file (overrides search)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Channel descriptor URL or file path
    #[arg(long, short = 'c', global = true)]
    pub channel: Option<String>,
    #[arg(long, short = 'o', global = true, value_enum)]
    pub output: Option<OutputFormat>,
    /// Also write each screen as an HTML document to this file
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub html_out: Option<PathBuf>,
    #[arg(long, global = true)]
    pub request_timeout_ms: Option<u64>,
    #[arg(long, global = true)]
    pub connect_timeout_ms: Option<u64>,
    /// Ignore the channel's secondsPerPage
    #[arg(long, global = true)]
    pub seconds_per_page: Option<f64>,
    #[arg(long, global = true, action = ArgAction::Set)]
    pub clear_screen: Option<bool>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load the channel and cycle its pages until interrupted (default)
    Play,
    /// Compose a single page resource and print it once
    Render {
        /// Page URL or file path
        page: String,
    },
    /// Re-emit a page resource as pretty JSON
    Normalize {
        /// Page URL or file path
        page: String,
    },
}

/// Public entry point: read YAML, merge CLI, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Pretty YAML of effective config (nice for debugging)
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/teleplay/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/teleplay/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/teleplay.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["teleplay.yaml", "config/teleplay.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()                 { dst.log_level = src.log_level; }
    if src.channel.is_some()                   { dst.channel = src.channel; }
    if src.output.is_some()                    { dst.output = src.output; }
    if src.html_out.is_some()                  { dst.html_out = src.html_out; }
    if src.request_timeout_ms.is_some()        { dst.request_timeout_ms = src.request_timeout_ms; }
    if src.connect_timeout_ms.is_some()        { dst.connect_timeout_ms = src.connect_timeout_ms; }
    if src.seconds_per_page_override.is_some() { dst.seconds_per_page_override = src.seconds_per_page_override; }
    if src.clear_screen.is_some()              { dst.clear_screen = src.clear_screen; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()          { cfg.log_level = cli.log_level.clone(); }
    if cli.channel.is_some()            { cfg.channel = cli.channel.clone(); }
    if cli.output.is_some()             { cfg.output = cli.output; }
    if cli.html_out.is_some()           { cfg.html_out = cli.html_out.clone(); }
    if cli.request_timeout_ms.is_some() { cfg.request_timeout_ms = cli.request_timeout_ms; }
    if cli.connect_timeout_ms.is_some() { cfg.connect_timeout_ms = cli.connect_timeout_ms; }
    if cli.seconds_per_page.is_some()   { cfg.seconds_per_page_override = cli.seconds_per_page; }
    if cli.clear_screen.is_some()       { cfg.clear_screen = cli.clear_screen; }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.request_timeout_ms == Some(0) || cfg.connect_timeout_ms == Some(0) {
        return Err(ConfigError::Validation("timeouts must be > 0 ms".into()));
    }
    if let Some(secs) = cfg.seconds_per_page_override {
        if !is_usable_interval(secs) {
            return Err(ConfigError::Validation("seconds_per_page_override must be > 0".into()));
        }
    }
    if cfg.channel.as_deref().is_some_and(|c| c.trim().is_empty()) {
        return Err(ConfigError::Validation("channel must not be empty".into()));
    }
    Ok(())
}
