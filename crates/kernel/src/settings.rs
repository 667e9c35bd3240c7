use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BOOKSTAND_ENV";
const CONFIG_DIR_ENV: &str = "BOOKSTAND_CONFIG_DIR";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Backend service configuration loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub views: ViewSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        let (environment, cfg) = build_layered()?;
        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;
        settings.environment = parse_environment(&environment)?;
        Ok(settings)
    }
}

/// Frontend service configuration. Shares the loader with [`Settings`] but
/// carries the backend base URL instead of a database section and defaults
/// to its own listening port.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FrontSettings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub server: FrontServerSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub views: ViewSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl FrontSettings {
    pub fn load() -> anyhow::Result<Self> {
        let (environment, cfg) = build_layered()?;
        let mut settings: FrontSettings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;
        settings.environment = parse_environment(&environment)?;
        Ok(settings)
    }
}

fn build_layered() -> anyhow::Result<(String, config::Config)> {
    // Allow missing `.env` files without failing.
    let _ = dotenvy::dotenv();

    let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
    let config_dir = std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            // Default to repo root `config` directory.
            std::env::current_dir()
                .map(|cwd| cwd.join("config"))
                .expect("unable to resolve current directory")
        });

    let base_path = config_dir.join("base.toml");
    let environment_filename = format!("{}.toml", environment);
    let environment_path = config_dir.join(environment_filename);

    let cfg = config::Config::builder()
        .add_source(config::File::from(base_path).required(false))
        .add_source(config::File::from(environment_path).required(false))
        .add_source(config::Environment::with_prefix("BOOKSTAND").separator("_"))
        .build()
        .with_context(|| "failed to build configuration")?;

    Ok((environment, cfg))
}

fn parse_environment(environment: &str) -> anyhow::Result<Environment> {
    match environment {
        "local" => Ok(Environment::Local),
        "staging" => Ok(Environment::Staging),
        "production" => Ok(Environment::Production),
        other => Err(anyhow!(
            "unsupported environment '{}'; expected local/staging/production",
            other
        )),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontServerSettings {
    #[serde(default = "FrontServerSettings::default_host")]
    pub host: String,
    #[serde(default = "FrontServerSettings::default_port")]
    pub port: u16,
}

impl FrontServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3030
    }
}

impl Default for FrontServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "DatabaseSettings::default_uri")]
    pub uri: String,
    #[serde(default = "DatabaseSettings::default_name")]
    pub name: String,
    #[serde(default = "DatabaseSettings::default_collection")]
    pub collection: String,
}

impl DatabaseSettings {
    fn default_uri() -> String {
        "mongodb://localhost:27017".to_string()
    }

    fn default_name() -> String {
        "bookstand".to_string()
    }

    fn default_collection() -> String {
        "information".to_string()
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: Self::default_uri(),
            name: Self::default_name(),
            collection: Self::default_collection(),
        }
    }
}

/// Base URL of the backend REST API, used by the frontend proxy handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "ApiSettings::default_url")]
    pub url: String,
}

impl ApiSettings {
    fn default_url() -> String {
        "http://server:8080".to_string()
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewSettings {
    #[serde(default = "ViewSettings::default_glob")]
    pub glob: String,
    #[serde(default = "ViewSettings::default_assets")]
    pub assets: String,
}

impl ViewSettings {
    fn default_glob() -> String {
        "views/*.html".to_string()
    }

    fn default_assets() -> String {
        "css".to_string()
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            glob: Self::default_glob(),
            assets: Self::default_assets(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
