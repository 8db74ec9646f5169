//! Handles settings for the application.
//!
//! Sources, from weakest to strongest: built-in defaults, `settings.toml`
//! (or `--config`), `COST_MANAGER__SECTION__KEY` environment variables,
//! `DATABASE_URL` / `PORT`, and finally the `--port` flag.
use std::path::PathBuf;

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";
const DEFAULT_DATABASE: &str = "sqlite:./cost_manager.db?mode=rwc";
const DEFAULT_ABOUT: &str = "public/data/team.json";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    /// Connection string handed to sea-orm.
    pub database: String,
    /// IANA zone used to cut months in reports.
    pub timezone: String,
    pub about: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Default, Parser)]
#[command(name = "cost_manager", about = "Personal cost tracking REST server")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Database connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    /// Listening port.
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .set_default("server.database", DEFAULT_DATABASE)?
            .set_default("server.timezone", "UTC")?
            .set_default("server.about", DEFAULT_ABOUT)?
            .add_source(File::with_name(config_path).required(args.config.is_some()))
            .add_source(Environment::with_prefix("COST_MANAGER").separator("__"))
            .set_override_option("server.database", args.database_url)?
            .set_override_option("server.port", args.port.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }
}
