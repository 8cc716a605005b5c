//! CLI utilities for the recycling tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Spinners for backend calls

#![warn(missing_docs)]

pub mod output;
pub mod progress;
