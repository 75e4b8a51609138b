//! # LINEBUZZ Shared
//!
//! Cross-layer building blocks for the LINEBUZZ backend: configuration
//! structs, API response wrappers, and phone-number utilities. This crate
//! has no knowledge of the domain services or the storage layer.

pub mod config;
pub mod types;
pub mod utils;
