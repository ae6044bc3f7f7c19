// Not every test binary uses every helper.
#![allow(dead_code)]

use experiment_service::config::{Config, DatabaseConfig, ServerConfig};
use experiment_service::services::MongoDb;
use experiment_service::startup::Application;
use std::path::PathBuf;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub db: Option<MongoDb>,
    pub db_name: String,
}

impl TestApp {
    /// Spawns the service in local mode, serving the crate's own public/.
    pub async fn spawn_local() -> Self {
        Self::spawn(None, default_static_dir()).await
    }

    /// Spawns the service in local mode with a custom static directory.
    pub async fn spawn_local_with_static_dir(static_dir: PathBuf) -> Self {
        Self::spawn(None, static_dir).await
    }

    /// Spawns a Mongo-backed service against a throwaway database, or
    /// `None` when `MONGODB_URI` is not set in the environment.
    pub async fn try_spawn_with_mongo() -> Option<Self> {
        Self::try_spawn_with_mongo_collection("runs").await
    }

    /// Same as [`try_spawn_with_mongo`](Self::try_spawn_with_mongo), writing
    /// to the given collection instead of the default.
    pub async fn try_spawn_with_mongo_collection(coll_name: &str) -> Option<Self> {
        let uri = std::env::var("MONGODB_URI")
            .ok()
            .filter(|uri| !uri.is_empty())?;
        Some(Self::spawn_inner(Some(uri), default_static_dir(), coll_name).await)
    }

    async fn spawn(uri: Option<String>, static_dir: PathBuf) -> Self {
        Self::spawn_inner(uri, static_dir, "runs").await
    }

    async fn spawn_inner(uri: Option<String>, static_dir: PathBuf, coll_name: &str) -> Self {
        let db_name = format!("experiment_test_{}", Uuid::new_v4());
        let config = Config {
            server: ServerConfig {
                port: 0, // Random port for testing
                static_dir,
            },
            database: DatabaseConfig {
                uri,
                db_name: db_name.clone(),
                coll_name: coll_name.to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let db = app.db().cloned();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            db,
            db_name,
        }
    }

    /// Drops the throwaway test database.
    pub async fn cleanup(&self) {
        if let Some(db) = &self.db {
            let _ = db.client().database(&self.db_name).drop(None).await;
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}
