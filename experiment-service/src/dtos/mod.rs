pub mod runs;

pub use runs::SubmitRunResponse;
