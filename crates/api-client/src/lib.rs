//! HTTP client for the recycling tracker backend
//!
//! Wraps the backend's user and discard endpoints with typed requests,
//! retry with exponential backoff and request correlation ids, and derives
//! community statistics from the discard log.
//!
//! # Example
//!
//! ```rust,no_run
//! use recycling_api_client::{ClientConfig, RecyclingClient};
//! use recycling_api_client::endpoints::NewUser;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RecyclingClient::with_config(
//!         ClientConfig::default().with_base_url("http://localhost:5000"),
//!     )?;
//!
//!     let created = client.users().create(&NewUser::new("Ana")).await?;
//!     let user = client.users().get(created.user_id).await?;
//!     println!("{} has {} points", user.name, user.points);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod stats;

pub use client::RecyclingClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::RecyclingClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{
        DiscardRecord, DiscardsApi, NewDiscard, NewUser, User, UsersApi, POINTS_PER_DISCARD,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::stats::{CommunityStats, MaterialBreakdown};
}
