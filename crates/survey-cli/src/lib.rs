//! Survey CLI - command line tools for estate survey planning.
//!
//! This crate provides the CLI binaries:
//! - plan_survey: offline plan from an estate JSON file
//! - seed_estate: upload an estate JSON file to a running server

pub mod client;
pub mod estate_file;

pub use client::SurveyClient;
pub use estate_file::EstateFile;
