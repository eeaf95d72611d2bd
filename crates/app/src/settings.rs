//! Application settings, read from `settings.toml` and `SINUELO__*`
//! environment variables (`SINUELO__SERVER__PORT=8080`).

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use engine::{PartnerAccounts, PartnerCategories};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Capital categorias of one partner, by categoria name.
#[derive(Debug, Deserialize)]
pub struct Partner {
    pub id: i32,
    pub contribution: String,
    pub withdrawal: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    #[serde(default)]
    pub partners: Vec<Partner>,
}

#[derive(Debug, Parser)]
#[command(name = "sinuelo", disable_version_flag = true)]
struct Args {
    /// Config file path without extension (default: `settings`).
    #[arg(long)]
    config: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("SINUELO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn partner_accounts(&self) -> PartnerAccounts {
        self.partners
            .iter()
            .map(|p| {
                (
                    p.id,
                    PartnerCategories {
                        contribution: p.contribution.clone(),
                        withdrawal: p.withdrawal.clone(),
                    },
                )
            })
            .collect()
    }
}
