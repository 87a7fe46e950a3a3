//! Core library for the `metar` CLI.
//!
//! This crate defines:
//! - Parsing of provider responses into per-airport findings
//! - ICAO code normalization and plain-text rendering
//! - Abstraction over the upstream report providers
//! - Configuration handling
//!
//! It is used by `metar-cli`, but can also be reused by other binaries or services.

pub mod codes;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod provider;
pub mod render;

pub use codes::normalize_codes;
pub use config::Config;
pub use error::MetarError;
pub use model::{Finding, Report, ReportRequest};
pub use parser::{ResponseFormat, parse_response};
pub use provider::{ProviderId, ReportProvider, default_provider_from_config, provider_from_config};
pub use render::render_findings;
