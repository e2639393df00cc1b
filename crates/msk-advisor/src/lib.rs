//! Core library for the workplace musculoskeletal (MSK) health suggestion
//! dashboard: domain model, filtering and sorting, the mock session and
//! permission service, and the document-store abstraction the HTTP layer
//! builds on.

pub mod auth;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod telemetry;
