//! Configuration loading from environment.

use std::env;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// `DATABASE_URL` wins when set; otherwise the connection string is
    /// assembled from the `DB_*` variables, each of which is required.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8081".to_string())
            .parse()?;

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => assemble_database_url()?,
        };

        Ok(Self { port, database_url })
    }
}

fn assemble_database_url() -> anyhow::Result<String> {
    let require = |name: &str| {
        env::var(name).map_err(|_| anyhow::anyhow!("Missing required env variable: {}", name))
    };

    let user = require("DB_USER")?;
    let password = require("DB_PASSWORD")?;
    let host = require("DB_HOST")?;
    let db_port = require("DB_PORT")?;
    let name = require("DB_NAME")?;

    Ok(format!(
        "postgresql://{}:{}@{}:{}/{}",
        user, password, host, db_port, name
    ))
}
