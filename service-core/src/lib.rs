//! service-core: Shared infrastructure for the experiment backend.
pub mod error;
pub mod observability;
