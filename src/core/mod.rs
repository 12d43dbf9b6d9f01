//! Shared plumbing for the camp store: storage access, config, errors and
//! the schema with its naming convention.

pub mod broker;
pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod naming;
pub mod schemas;
pub mod store;
