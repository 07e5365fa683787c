//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.question/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::key_combo::{ComboError, KeyCombo};
use crate::core::viewport::Glyphs;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuestionConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub glyphs: GlyphConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListConfig {
    pub window_size: Option<usize>,
    pub offset_window_scroll: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GlyphConfig {
    pub more_above: Option<String>,
    pub more_below: Option<String>,
    pub no_more: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeysConfig {
    pub cancel: Option<String>,
    pub force_exit: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_WINDOW_SIZE: usize = 7;
pub const DEFAULT_CANCEL_KEY: &str = "Ctrl+c";
pub const DEFAULT_FORCE_EXIT_KEY: &str = "Ctrl+d";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub window_size: usize,
    pub offset_window_scroll: bool,
    pub glyphs: Glyphs,
    pub cancel: KeyCombo,
    pub force_exit: KeyCombo,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            offset_window_scroll: true,
            glyphs: Glyphs::default(),
            cancel: KeyCombo::new(true, false, false, "c"),
            force_exit: KeyCombo::new(true, false, false, "d"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

/// CLI-level overrides (None = not specified on the command line).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub window_size: Option<usize>,
    pub offset_window_scroll: Option<bool>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Combo { setting: &'static str, source: ComboError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Combo { setting, source } => {
                write!(f, "invalid key combination for keys.{setting}: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.question/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".question").join("config.toml"))
}

/// Load config from `~/.question/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `QuestionConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<QuestionConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(QuestionConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(QuestionConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a specific config file.
pub fn load_config_from(path: &Path) -> Result<QuestionConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: QuestionConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# question configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"
# log_file = "/tmp/question.log"     # No log is written unless set

# [list]
# window_size = 7                    # Or set QUESTION_WINDOW_SIZE
# offset_window_scroll = true        # Or set QUESTION_OFFSET_SCROLL

# [glyphs]
# more_above = "▲ "
# more_below = "▼ "
# no_more = "─"

# [keys]
# cancel = "Ctrl+c"
# force_exit = "Ctrl+d"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &QuestionConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

fn resolve_with_env(
    config: &QuestionConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    // Window size: CLI → env → config → default
    let window_size = cli
        .window_size
        .or_else(|| parse_env(&env, "QUESTION_WINDOW_SIZE"))
        .or(config.list.window_size)
        .unwrap_or(defaults.window_size);

    // Offset scroll: CLI → env → config → default
    let offset_window_scroll = cli
        .offset_window_scroll
        .or_else(|| parse_env(&env, "QUESTION_OFFSET_SCROLL"))
        .or(config.list.offset_window_scroll)
        .unwrap_or(defaults.offset_window_scroll);

    let glyphs = Glyphs {
        more_above: config
            .glyphs
            .more_above
            .clone()
            .unwrap_or(defaults.glyphs.more_above),
        more_below: config
            .glyphs
            .more_below
            .clone()
            .unwrap_or(defaults.glyphs.more_below),
        no_more: config.glyphs.no_more.clone().unwrap_or(defaults.glyphs.no_more),
    };

    let cancel = parse_key("cancel", config.keys.cancel.as_deref(), DEFAULT_CANCEL_KEY)?;
    let force_exit = parse_key(
        "force_exit",
        config.keys.force_exit.as_deref(),
        DEFAULT_FORCE_EXIT_KEY,
    )?;

    Ok(ResolvedConfig {
        window_size,
        offset_window_scroll,
        glyphs,
        cancel,
        force_exit,
        log_level: config
            .general
            .log_level
            .clone()
            .unwrap_or(defaults.log_level),
        log_file: cli
            .log_file
            .clone()
            .or_else(|| config.general.log_file.as_ref().map(PathBuf::from)),
    })
}

fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = env(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}={:?}", name, raw);
            None
        }
    }
}

fn parse_key(
    setting: &'static str,
    configured: Option<&str>,
    default: &str,
) -> Result<KeyCombo, ConfigError> {
    KeyCombo::parse(configured.unwrap_or(default))
        .map_err(|source| ConfigError::Combo { setting, source })
}
