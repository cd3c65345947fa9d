use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::encoding::Charset;
use crate::errors::ConfigError;
use crate::formatter::FormatOptions;

/// Application configuration module
/// This module handles loading and validating the optional JSON
/// configuration file. Every field has a default, so an empty object is a
/// valid file and no file at all is the common case.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Merge contiguous cues with identical text
    #[serde(default = "default_coalesce")]
    pub coalesce: bool,

    /// Charset to decode with instead of detecting one
    #[serde(default)]
    pub encoding: Option<Charset>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_coalesce() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(charset) = &self.encoding {
            if !charset.is_supported() {
                return Err(ConfigError::Invalid(format!(
                    "unsupported encoding override: {}",
                    charset
                )));
            }
        }

        Ok(())
    }

    /// Options for the formatting pipeline
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            coalesce: self.coalesce,
            encoding: self.encoding.clone(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            coalesce: default_coalesce(),
            encoding: None,
        }
    }
}
