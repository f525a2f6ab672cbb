//! Shared library surface for survey server handlers and tests.

pub mod api;
pub mod config;
pub mod persistence;
pub mod state;
