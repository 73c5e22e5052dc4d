//! Consumer construction: value types, registry dispatch, and the built-in
//! provider set.

pub mod consumer;
pub mod providers;
pub mod registry;
pub mod types;

pub use consumer::{Consumer, StandardConsumer};
pub use registry::{ServiceConstructor, ServiceContext, ServiceRegistry};
pub use types::{AccessToken, Credentials, ProviderEndpoints};
