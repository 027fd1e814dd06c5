use figment::{Figment, providers::Env};
use serde::Deserialize;
use std::sync::LazyLock;

/// Runtime configuration, sourced from `MINDWELL_`-prefixed environment
/// variables (a `.env` file is loaded by `main` before extraction).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            listen: default_listen(),
            loglevel: default_loglevel(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite:mindwell.sqlite".to_string()
}

fn default_listen() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::new()
        .merge(Env::prefixed("MINDWELL_"))
        .extract()
        .expect("FATAL: invalid environment configuration")
});
