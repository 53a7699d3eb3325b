use std::convert::TryFrom;
use std::env;
use std::str::FromStr;

use config::{
    Config,
    ConfigError,
    Environment,
    File,
};
use actix_web::http::Uri;
use custom_error::custom_error;
use derivative::Derivative;
use sqlx::postgres::PgConnectOptions;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub max_pending_connections: u32,
    pub port: u16,
    pub service_name: String,
    /// Comma-separated list of allowed origins, or `*`.
    pub cors_origins: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Clone, Derivative, serde::Deserialize)]
#[derivative(Debug)]
pub struct DatabaseSettings {
    pub backend: StoreBackend,
    pub connect_timeout_seconds: u64,
    pub max_db_connections: u32,
    pub name: String,
    #[derivative(Debug = "ignore")]
    pub url: String,
}

/// Origins accepted by the CORS layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl ApplicationSettings {
    pub fn binding_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse `cors_origins`. Every listed origin must be `scheme://host[:port]`.
    pub fn allowed_origins(&self) -> Result<AllowedOrigins, ConfigurationError> {
        let origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            return Ok(AllowedOrigins::Any);
        }
        for origin in &origins {
            if !is_valid_origin(origin) {
                return Err(ConfigurationError::InvalidCorsOrigin {
                    origin: origin.clone(),
                });
            }
        }
        Ok(AllowedOrigins::List(origins))
    }
}

fn is_valid_origin(origin: &str) -> bool {
    match origin.parse::<Uri>() {
        Ok(uri) => {
            matches!(uri.scheme_str(), Some("http") | Some("https"))
                && uri.host().map_or(false, |host| !host.is_empty())
                && uri.query().is_none()
                && matches!(uri.path(), "" | "/")
                && !origin.ends_with('/')
        }
        Err(_) => false,
    }
}

impl DatabaseSettings {
    pub fn connection_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        Ok(PgConnectOptions::from_str(&self.url)?.database(&self.name))
    }
}

/// Deployment environment, selected by `APP_ENVIRONMENT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnvironment {
    Local,
    Production,
}

impl AppEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnvironment::Local => "local",
            AppEnvironment::Production => "production",
        }
    }
}

impl TryFrom<String> for AppEnvironment {
    type Error = ConfigurationError;

    fn try_from(environment: String) -> Result<Self, Self::Error> {
        match environment.to_lowercase().as_str() {
            "local" => Ok(AppEnvironment::Local),
            "production" => Ok(AppEnvironment::Production),
            _ => Err(ConfigurationError::InvalidAppEnv { environment }),
        }
    }
}

custom_error! {
///! Custom error for an unknown environment or invalid configuration files.
pub ConfigurationError
    InvalidAppEnv{environment: String} = "`APP_ENVIRONMENT` is `{environment}` \
    (possible values: [`local`|`production`]).",
    InvalidConfig{source:ConfigError} = "{source}",
    InvalidCorsOrigin{origin: String} = "invalid CORS origin `{origin}` \
    (expected `scheme://host[:port]` or `*`).",
}

/// Load the configuration from the directory: `configuration`.
///
/// It fails if:
/// - the `APP_ENVIRONMENT` env variable is set to an unknown environment
///   (it defaults to `local`)
/// - the `configuration/base` file is missing
/// - the `configuration/${APP_ENVIRONMENT}` file is missing
/// - the `configuration/*` files have missing or unexpected fields
/// - `application.cors_origins` lists a malformed origin
///
/// # Examples
///
/// ```rust
/// use dekaplet::app::load_configuration;
///
/// assert!(load_configuration().is_ok());
/// ```
pub fn load_configuration() -> Result<Settings, ConfigurationError> {
    let app_environment: AppEnvironment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| AppEnvironment::Local.as_str().to_string())
        .try_into()?;

    let config = Config::builder()
        .add_source(File::with_name("configuration/base").required(true))
        .add_source(File::with_name(&format!("configuration/{}", app_environment.as_str())).required(true))
        // Add in settings from environment variables (with a prefix of APP and '__' as
        // separator) E.g. `APP_APPLICATION__PORT=5001 would set
        // `Settings.application.port`
        .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__"))
        // the conventional unprefixed variables win over everything else
        .set_override_option("database.url", env::var("DATABASE_URL").ok())?
        .set_override_option("database.name", env::var("DB_NAME").ok())?
        .set_override_option("application.cors_origins", env::var("CORS_ORIGINS").ok())?
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.application.allowed_origins()?;
    Ok(settings)
}
