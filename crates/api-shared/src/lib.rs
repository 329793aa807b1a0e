//! # API Shared
//!
//! Shared wire types for the rxsum API surface.
//!
//! Contains:
//! - Request/response types for the REST endpoints (`wire` module)
//! - The `HealthService` used by both server binaries
//!
//! Field names on response types are part of the storage collaborator's
//! document shape and must stay stable.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
