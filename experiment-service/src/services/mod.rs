pub mod database;
pub mod store;

pub use database::MongoDb;
pub use store::{LocalStore, MongoStore, RunStore, LOCAL_RUN_ID};
