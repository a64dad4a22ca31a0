//! Server configuration
//!
//! Defaults, then an optional YAML file, then command-line flags. For
//! example:
//!
//! ```yaml
//! listen_addr: "0.0.0.0:4221"
//! directory: /srv/files
//! max_header_bytes: 16384
//! max_body_bytes: 1048576
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::http::parser::{DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_HEADER_BYTES, Limits};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4221";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("max_header_bytes must be greater than zero")]
    ZeroHeaderLimit,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "rawhttp")]
#[command(about = "Minimal HTTP/1.1 server on raw TCP sockets")]
pub struct Cli {
    /// Directory served by the /files/ routes
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to listen on (host:port)
    #[arg(long, env = "LISTEN")]
    pub listen: Option<String>,

    /// Optional YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Shape of the YAML configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub listen_addr: Option<String>,
    pub directory: Option<PathBuf>,
    pub max_header_bytes: Option<usize>,
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub directory: PathBuf,
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: PathBuf::from("."),
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let mut cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(dir) = cli.directory {
            cfg.directory = dir;
        }
        if let Some(addr) = cli.listen {
            cfg.listen_addr = addr;
        }

        Ok(cfg)
    }

    /// Reads a YAML file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        let file: FileConfig = serde_yaml::from_str(raw)?;
        let defaults = Self::default();

        Ok(Self {
            listen_addr: file.listen_addr.unwrap_or(defaults.listen_addr),
            directory: file.directory.unwrap_or(defaults.directory),
            max_header_bytes: file.max_header_bytes.unwrap_or(defaults.max_header_bytes),
            max_body_bytes: file.max_body_bytes.unwrap_or(defaults.max_body_bytes),
        })
    }

    /// Size caps handed to every connection.
    pub fn limits(&self) -> Limits {
        Limits {
            max_header_bytes: self.max_header_bytes,
            max_body_bytes: self.max_body_bytes,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.directory.exists() {
            return Err(ConfigError::MissingDirectory(self.directory.clone()));
        }
        if !self.directory.is_dir() {
            return Err(ConfigError::NotADirectory(self.directory.clone()));
        }
        if self.max_header_bytes == 0 {
            return Err(ConfigError::ZeroHeaderLimit);
        }
        Ok(())
    }
}
