//! Terrascope - a thin HTTP facade over a remote-sensing imagery platform.
//!
//! This library provides the geospatial math, platform client, and shared
//! types for the server binary.

pub mod config;
pub mod geo;
pub mod models;
pub mod platform;

pub use geo::{BoundingBox, GeoPoint, TileIndex};
pub use models::{Scene, SceneMetadata};
