//! HTTP server for the invoice actions
//!
//! `ServerBuilder` assembles a [`ServerHost`] from configuration and a store,
//! and [`RestExposure`] turns the host into an Axum router.

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
