//! OAuth consumer wiring library.
//!
//! Turns a named third-party service into a fully constructed OAuth consumer:
//! credentials come from a configuration source, token storage and HTTP
//! transport are selected by name through registries, and the consumer itself
//! is built by a registered service constructor.

pub mod config;
pub mod context;
pub mod errors;
pub mod factory;
pub mod http;
pub mod oauth;
pub mod storage;
