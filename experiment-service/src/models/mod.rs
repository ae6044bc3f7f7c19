pub mod run;

pub use run::{normalize_payload, run_document};
