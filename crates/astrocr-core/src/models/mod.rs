//! Data models: configuration, table records, domain documents, jobs.

pub mod config;
pub mod domain;
pub mod job;
pub mod tables;
