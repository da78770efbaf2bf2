use std::{fmt, fs, io, path::Path, str::FromStr};

use ini::Ini;
use thiserror::Error;

const COUNTER_SECTION: &str = "JudgementCounter";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("parsing .ini file: `{0}`")]
    Parse(#[from] ini::Error),
    #[error("reading config: `{0}`")]
    Io(#[from] io::Error),
    #[error("unsupported display mode `{0}`")]
    UnsupportedMode(String),
    #[error("unsupported counter direction `{0}`")]
    UnsupportedDirection(String),
    #[error("field `{field}` expects a boolean, got `{value}`")]
    InvalidBool { field: String, value: String },
}

/// Axis judgement counters are laid out on
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlowDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl FromStr for FlowDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(ConfigError::UnsupportedDirection(s.to_owned())),
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("Horizontal"),
            Self::Vertical => f.write_str("Vertical"),
        }
    }
}

/// Which judgement counters are shown
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Main judgements only
    #[default]
    Simple,
    /// Everything except bonus judgements
    Normal,
    /// Reveals counters that have not been hit yet
    All,
}

impl FromStr for DisplayMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "normal" => Ok(Self::Normal),
            "all" => Ok(Self::All),
            _ => Err(ConfigError::UnsupportedMode(s.to_owned())),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.write_str("Simple"),
            Self::Normal => f.write_str("Normal"),
            Self::All => f.write_str("All"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterConfig {
    pub flow_direction: FlowDirection,
    pub show_name: bool,
    pub show_max: bool,
    pub display_mode: DisplayMode,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            flow_direction: FlowDirection::Horizontal,
            show_name: true,
            show_max: true,
            display_mode: DisplayMode::Simple,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Config {
    pub counter: CounterConfig,
}

impl Config {
    pub fn parse(bytes: &[u8]) -> Result<Self, ConfigError> {
        let ini = Ini::read_from(&mut io::Cursor::new(bytes))?;
        let get = |key: &str| ini.get_from(Some(COUNTER_SECTION), key);

        let defaults = CounterConfig::default();

        let counter = CounterConfig {
            flow_direction: get("FlowDirection")
                .map(str::parse::<FlowDirection>)
                .transpose()?
                .unwrap_or(defaults.flow_direction),
            show_name: get("ShowName")
                .map(|v| parse_bool("ShowName", v))
                .transpose()?
                .unwrap_or(defaults.show_name),
            show_max: get("ShowMax")
                .map(|v| parse_bool("ShowMax", v))
                .transpose()?
                .unwrap_or(defaults.show_max),
            display_mode: get("DisplayMode")
                .map(str::parse::<DisplayMode>)
                .transpose()?
                .unwrap_or(defaults.display_mode),
        };

        Ok(Self { counter })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let bytes = fs::read(path.as_ref())?;
        let config = Self::parse(&bytes)?;

        tracing::info!("Loaded config from {}", path.as_ref().display());

        Ok(config)
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            field: field.to_owned(),
            value: value.to_owned(),
        }),
    }
}
