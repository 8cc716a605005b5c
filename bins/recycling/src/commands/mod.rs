//! CLI command implementations

pub mod discard;
pub mod link;
pub mod materials;
pub mod nearby;
pub mod stats;
pub mod user;
