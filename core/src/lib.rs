//! # LINEBUZZ Core
//!
//! Core business logic and domain layer for the LINEBUZZ backend.
//! This crate contains the domain entities, the verification-code and
//! account services, repository interfaces, and error types. It depends on
//! nothing below the trait seams: storage and SMS implementations live in
//! the infrastructure crate and are injected at process start.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
