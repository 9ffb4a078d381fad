//! itemstat-core: Response parsing, scoring engine, and analysis reports.
//!
//! This crate defines the response matrix model, the CSV ingestion that
//! builds it, and the classical test theory statistics computed over it.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
