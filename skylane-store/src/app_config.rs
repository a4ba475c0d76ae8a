use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub admin: AdminConfig,
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
pub struct AuthConfig {
    pub session_secret: String,
    pub session_expiration_seconds: u64,
}

/// The single administrator account. It is not stored in the users table.
#[derive(Deserialize, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from(Path::new("config"), &run_mode, environment())
    }

    /// Layers `{dir}/default`, `{dir}/{run_mode}` and `{dir}/local`, then `env` on top.
    pub fn load_from(
        dir: &Path,
        run_mode: &str,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let layer = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            .add_source(config::File::with_name(&layer("default")))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&layer(run_mode)).required(false))
            // Local overrides, never checked in
            .add_source(config::File::with_name(&layer("local")).required(false))
            .add_source(env)
            .build()?;

        s.try_deserialize()
    }
}

/// Eg. `SKYLANE__SERVER__PORT=9000` sets `server.port`
pub fn environment() -> config::Environment {
    config::Environment::with_prefix("SKYLANE")
        .separator("__")
        .try_parsing(true)
}
