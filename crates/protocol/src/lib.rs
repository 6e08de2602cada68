//! # tk-protocol
//!
//! Core protocol definitions and data models for typeahead-kit.
//!
//! This crate defines all shared data structures used for:
//! - The lookup service's JSON wire format (candidates, result pages)
//! - Inter-task communication between the UI loop and the search worker
//!
//! ## Modules
//!
//! - [`search_models`]: Candidate and result-page structures
//! - [`ipc`]: Operations and Events for UI-worker communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, and chrono
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other typeahead-kit crates

pub mod ipc;
pub mod search_models;

// Re-export all public types for convenience
pub use ipc::*;
pub use search_models::*;
