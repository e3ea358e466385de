use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub boarding: BoardingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone)]
pub struct BoardingConfig {
    /// Directory holding the template images
    pub assets_dir: PathBuf,
    /// Font used for every text line, relative to `assets_dir` unless absolute
    pub font_path: PathBuf,
    /// Extra style names mapped onto registered styles
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl BoardingConfig {
    pub fn font_file(&self) -> PathBuf {
        self.assets_dir.join(&self.font_path)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name(&dir.join("default").to_string_lossy()))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&dir.join(&run_mode).to_string_lossy()).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name(&dir.join("local").to_string_lossy()).required(false))
            // Add in settings from the environment (with a prefix of RUNWAY)
            // Eg.. `RUNWAY_SERVER__PORT=9000` would set `server.port`
            .add_source(config::Environment::with_prefix("RUNWAY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
