use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_secret: String,
    pub token_ttl_minutes: i64,
}

/// Read the service configuration from the environment. `DATABASE_URL` and
/// `TOKEN_SECRET` are required; everything else has a default.
pub fn load() -> Result<Config> {
    Ok(Config {
        database: DatabaseConfig {
            url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
        },
        server: ServerConfig {
            port: std::env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
        },
        auth: AuthConfig {
            token_secret: std::env::var("TOKEN_SECRET").context("TOKEN_SECRET must be set")?,
            token_ttl_minutes: std::env::var("TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|minutes| minutes.parse().ok())
                .unwrap_or(1440),
        },
    })
}
