//! Core data models for the imagery service.

pub mod scene;

pub use scene::{Scene, SceneMetadata};
