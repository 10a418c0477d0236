//! # Bondcalc Traits
//!
//! Collaborator traits for the bond calculator.
//!
//! This crate contains ONLY trait definitions and their shared data types.
//! All implementations are in separate extension crates.
//!
//! ## Module Structure
//!
//! - [`market_data`]: Treasury yield sources
//! - [`storage`]: String key-value persistence

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;
pub mod storage;

// Re-export commonly used types
pub use error::TraitError;
pub use market_data::{SourceType, YieldQuote, YieldSource};
pub use storage::KeyValueStore;
