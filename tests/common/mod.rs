//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Database test fixtures
//! - Test users and tokens
//! - In-process and live server harnesses
//! - Custom assertion macros

pub mod builders;
#[cfg(feature = "ssr")]
pub mod server;
