use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseConfig {
    /// Unset means local mode: submissions are accepted but not persisted.
    pub uri: Option<String>,
    pub db_name: String,
    pub coll_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("experiment-service/public"));

        // An empty MONGODB_URI counts as unset.
        let uri = env::var("MONGODB_URI").ok().filter(|uri| !uri.is_empty());
        let db_name = env::var("DB_NAME").unwrap_or_else(|_| "climate_experiment".to_string());
        let coll_name = env::var("COLL_NAME").unwrap_or_else(|_| "runs".to_string());

        Ok(Self {
            server: ServerConfig { port, static_dir },
            database: DatabaseConfig {
                uri,
                db_name,
                coll_name,
            },
        })
    }
}
