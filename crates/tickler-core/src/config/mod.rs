use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Prefix for structured environment overrides, e.g. `TICKLER_SERVER__PORT`.
pub const ENV_PREFIX: &str = "TICKLER";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub web: WebConfig,
    pub tasks: TasksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file.
    pub url: String,
    pub max_connections: u8,
}

/// The single user's credential. Leaving both fields unset disables authentication.
#[derive(Clone, Default, Deserialize)]
pub struct AuthConfig {
    pub password: Option<String>,
    /// Argon2 PHC string, takes precedence over `password`.
    pub password_hash: Option<String>,
}

/// Borrowed view of whichever credential is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential<'a> {
    Plain(&'a str),
    Hash(&'a str),
}

impl Credential<'_> {
    /// The raw configured string, used as key material for session tokens.
    #[must_use]
    pub const fn secret(&self) -> &str {
        match self {
            Self::Plain(secret) | Self::Hash(secret) => secret,
        }
    }
}

impl AuthConfig {
    /// ## Summary
    /// Returns the configured credential, ignoring empty values.
    #[must_use]
    pub fn credential(&self) -> Option<Credential<'_>> {
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        non_empty(&self.password_hash)
            .map(Credential::Hash)
            .or_else(|| non_empty(&self.password).map(Credential::Plain))
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.credential().is_some()
    }
}

// Hand-written so the password never reaches the logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.credential() {
            Some(Credential::Plain(_)) => "password",
            Some(Credential::Hash(_)) => "password_hash",
            None => "disabled",
        };
        f.debug_struct("AuthConfig")
            .field("mode", &mode)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Directory served at `/`.
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TasksConfig {
    /// Maximum number of rows returned by a task listing.
    pub list_limit: u32,
}

/// `TODO_*` variables kept for existing deployment scripts.
#[derive(Debug, Clone, Default)]
pub struct LegacyEnv {
    pub port: Option<String>,
    pub db_file: Option<String>,
    pub password: Option<String>,
}

impl LegacyEnv {
    /// ## Summary
    /// Reads `TODO_PORT`, `TODO_DBFILE` and `TODO_PASSWORD` from the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            port: read("TODO_PORT"),
            db_file: read("TODO_DBFILE"),
            password: read("TODO_PASSWORD"),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `config.toml`, `TICKLER_*` variables and
    /// the legacy `TODO_*` variables, in increasing order of precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::from_sources(Some("config.toml"), None, &LegacyEnv::from_process())
    }

    /// ## Summary
    /// Builds settings from an optional TOML file, an environment map (the process
    /// environment when `None`) and legacy overrides.
    ///
    /// ## Errors
    /// Returns an error if a source is malformed, a value has the wrong type, or the
    /// resulting settings fail validation.
    pub fn from_sources(
        file: Option<&str>,
        env: Option<config::Map<String, String>>,
        legacy: &LegacyEnv,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 7540)?
            .set_default("database.url", "scheduler.db")?
            .set_default("database.max_connections", 1)?
            .set_default("logging.level", "info")?
            .set_default("web.dir", "./web")?
            .set_default("tasks.list_limit", 50)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("server.port", legacy.port.clone())?
            .set_override_option("database.url", legacy.db_file.clone())?
            .set_override_option("auth.password", legacy.password.clone())?
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Rejects settings that deserialize but cannot run.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` naming the offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.database.max_connections == 0 {
            return Err(CoreError::InvalidConfiguration(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.tasks.list_limit == 0 {
            return Err(CoreError::InvalidConfiguration(
                "tasks.list_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
