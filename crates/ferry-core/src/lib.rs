pub mod config;
pub mod logging;

pub mod engine;
pub mod error;
pub mod paths;
pub mod queue;
pub mod scheduler;
pub mod worker;

pub use error::FerryError;
