//! Core utilities shared by the recycling tracker crates
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Retry**: Exponential backoff policy for calls to the backend
//!
//! # Example
//!
//! ```rust,no_run
//! use recycling_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("Backend: {}", config.schema.api.base_url);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::RetryConfig;
}
