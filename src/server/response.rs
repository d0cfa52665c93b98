//! Wire types for the imagery endpoints.

use serde::{Deserialize, Serialize};

use terrascope::geo::BoundingBox;
use terrascope::models::SceneMetadata;

/// Body accepted by both imagery endpoints.
///
/// Coordinates are optional so that their absence can be reported as a
/// client error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Only meaningful for the tile-URL endpoint
    pub zoom: Option<u32>,
}

/// Response for the clipped-composite endpoint.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub tile_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub bounds: BoundingBox,
    /// Acquisition date of the newest matching scene, YYYY-MM-DD
    pub acquisition_time: String,
    /// Estimated next overpass (16-day Landsat revisit), YYYY-MM-DD
    pub next_acquisition_time: String,
    pub satellite: &'static str,
    pub metadata: SceneMetadata,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
