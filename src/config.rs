use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;

/// Command-line surface.
#[derive(Debug, Clone, Parser)]
#[command(name = "wafer")]
#[command(about = "Minimal HTTP/1.1 static file server")]
#[command(version)]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080, env = "WAFER_PORT")]
    pub port: u16,

    /// Document root directory
    #[arg(short, long, default_value = "./www", env = "WAFER_ROOT")]
    pub root: PathBuf,
}

impl Config {
    /// Check the document root and freeze the configuration.
    ///
    /// The root is canonicalized once here so the containment check in
    /// the resolver compares against a stable absolute path even when
    /// the configured root is relative or a symlink. A missing or
    /// non-directory root is fatal before the listener is created.
    pub fn validate(self) -> Result<ServerConfig, ConfigError> {
        let root = fs::canonicalize(&self.root).map_err(|_| ConfigError::RootMissing(self.root.clone()))?;

        if !root.is_dir() {
            return Err(ConfigError::RootNotADirectory(self.root));
        }

        Ok(ServerConfig {
            port: self.port,
            root,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            root: PathBuf::from("./www"),
        }
    }
}

/// Immutable process-wide configuration, owned by the listener and shared
/// read-only with every connection task.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub root: PathBuf,
}
