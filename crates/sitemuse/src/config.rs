//! Server configuration

use std::path::PathBuf;

use crate::constants::defaults;

/// Bind address and static asset location, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `STATIC_DIR` from the environment,
    /// falling back to the built-in defaults. An unparsable `PORT` falls
    /// back rather than failing startup.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults::PORT);
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| defaults::HOST.to_string()),
            port,
            static_dir: std::env::var_os("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(defaults::STATIC_DIR)),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            static_dir: PathBuf::from(defaults::STATIC_DIR),
        }
    }
}
