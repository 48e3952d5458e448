pub mod config;
pub mod error;

pub use config::TellerConfig;
pub use error::{Result, TellerError};
