//! Client for the external remote-sensing platform.
//!
//! The platform owns imagery storage, catalog indexing, cloud filtering,
//! compositing, and tile rendering; this module only queries it.

pub mod client;
pub mod credentials;

use thiserror::Error;

pub use client::{ImageryClient, Visualization};
pub use credentials::ServiceAccountKey;

#[derive(Debug, Error)]
pub enum PlatformError {
    /// The filtered collection contained no scene for the requested point.
    #[error("no imagery found for the requested location")]
    NoImageryFound,

    #[error("platform request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("platform returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed platform response: {0}")]
    Malformed(&'static str),
}
