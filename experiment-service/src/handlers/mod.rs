pub mod health;
pub mod pages;
pub mod runs;

pub use health::health_check;
pub use pages::finish_page;
pub use runs::submit_run;
