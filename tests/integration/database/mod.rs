//! Schema tests

pub mod concurrency_test;
pub mod migrations_test;
