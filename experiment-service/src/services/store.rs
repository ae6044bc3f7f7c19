use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use mongodb::Collection;
use service_core::error::AppError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Sentinel id returned for runs accepted in local mode.
pub const LOCAL_RUN_ID: &str = "local";

/// Where submitted runs end up. One insert per submission; runs are never
/// read back, updated, or deleted by this service.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Stores one run and returns its identifier.
    async fn insert_run(&self, run: Document) -> Result<String, AppError>;
}

pub struct MongoStore {
    runs: Collection<Document>,
}

impl MongoStore {
    pub fn new(runs: Collection<Document>) -> Self {
        Self { runs }
    }
}

#[async_trait]
impl RunStore for MongoStore {
    async fn insert_run(&self, run: Document) -> Result<String, AppError> {
        let result = self
            .runs
            .insert_one(run, None)
            .await
            .map_err(AppError::from)?;
        Ok(id_string(result.inserted_id))
    }
}

// The driver hands back whatever `_id` was written: freshly generated ids are
// ObjectIds, a caller-supplied `_id` survives as-is.
fn id_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

/// Local mode: submissions are accepted and logged, nothing is persisted.
#[derive(Default)]
pub struct LocalStore {
    accepted: AtomicU64,
}

impl LocalStore {
    pub fn accepted_count(&self) -> u64 {
        self.accepted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RunStore for LocalStore {
    async fn insert_run(&self, run: Document) -> Result<String, AppError> {
        let accepted = self.accepted.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::warn!(
            accepted = accepted,
            fields = run.len(),
            "Local mode: run accepted without persistence"
        );
        Ok(LOCAL_RUN_ID.to_string())
    }
}
