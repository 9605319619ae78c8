//! Integration tests against the assembled server

pub mod database;
pub mod realtime;
