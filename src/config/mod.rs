pub mod error;
pub mod types;

pub use error::ConfigError;
pub use types::{StartPosition, TailConfig, DEFAULT_LINE_COUNT, DEFAULT_POLL_INTERVAL};
