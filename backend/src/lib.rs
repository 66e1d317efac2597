//! Backend library modules.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
