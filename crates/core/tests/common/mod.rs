//! Common test utilities and helpers for search-flow tests.
//!
//! This module provides shared functionality across integration tests:
//! - Mock search clients with scripted replies and delays
//! - Candidate fixtures

pub mod mock_client;

#[allow(unused_imports)]
pub use mock_client::*;
