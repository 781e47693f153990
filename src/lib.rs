//! Core library for the `apiping` CLI.
//!
//! Loads a Swagger 2.0 / OpenAPI 3.x description, synthesizes a callable URL
//! for every operation it can, pings them across a bounded worker pool for a
//! number of rounds, and reports the average latency per route. The primary
//! interface is the `apiping` binary; library APIs may evolve with it.
pub mod aggregate;
pub mod app;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
mod logger;
pub mod openapi;
pub mod report;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
