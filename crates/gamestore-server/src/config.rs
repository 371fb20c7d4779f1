use std::path::PathBuf;

use crate::error::Result;
pub use clap::Parser;
use url::Url;

#[derive(Debug, Clone, clap::Parser)]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "GAMESTORE_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "GAMESTORE_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "GAMESTORE_BASE_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of server as visible to clients, used in Location headers"
    )]
    pub base_url: Url,

    #[arg(
        long,
        env = "GAMESTORE_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/gamestore.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "GAMESTORE_DATA_DIR",
        help = "Data directory for the database, default is system default like ~/.local/share/gamestore"
    )]
    data_dir: Option<PathBuf>,

    #[arg(long, env = "GAMESTORE_CORS", help = "Enable permissive CORS")]
    pub cors: bool,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("gamestore"))
        .unwrap_or_else(|| PathBuf::from("gamestore"))
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/gamestore.db", self.data_dir().display()))
    }

    /// Data directory has to exist only when the database lives in it.
    pub fn uses_default_database(&self) -> bool {
        self.database_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["gamestore-server", "--data-dir", "/tmp/gs"])
            .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.listen_address, "127.0.0.1");
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.database_url(), "sqlite:///tmp/gs/gamestore.db");
        assert!(config.uses_default_database());
        assert!(!config.cors);
    }

    #[test]
    fn test_explicit_database() {
        let config = ServerConfig::try_parse_from([
            "gamestore-server",
            "--database-url",
            "sqlite::memory:",
            "--port",
            "8080",
            "--cors",
        ])
        .unwrap();
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert!(!config.uses_default_database());
        assert_eq!(config.port, 8080);
        assert!(config.cors);
    }
}
