//! Web Mercator slippy-map tile indexing.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Address of a single slippy-map tile: `2^zoom x 2^zoom` tiles per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileIndex {
    pub zoom: u32,
    pub x: u32,
    pub y: u32,
}

/// Deepest supported tile level. Beyond this the `f64` index arithmetic
/// loses integer precision and the `u32` casts would saturate.
pub const MAX_ZOOM: u32 = 24;

/// Compute the slippy-map tile containing `point` at `zoom`.
///
/// Standard Web Mercator scheme: x from the linear longitude scale, y from
/// the Mercator latitude projection. At exact boundary coordinates the raw
/// formula can land on `2^zoom`; indices are clamped to `2^zoom - 1` so the
/// result is always addressable. Zoom levels above [`MAX_ZOOM`] are clamped
/// to it; callers taking zoom from untrusted input should reject such values
/// before calling.
pub fn lat_lon_to_tile(point: GeoPoint, zoom: u32) -> TileIndex {
    let zoom = zoom.min(MAX_ZOOM);
    let n = 2f64.powi(zoom as i32);
    let max_index = (n - 1.0).max(0.0);

    let x = ((point.lon + 180.0) / 360.0 * n).floor().clamp(0.0, max_index);

    let lat_rad = point.lat.to_radians();
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n)
        .floor()
        .clamp(0.0, max_index);

    TileIndex {
        zoom,
        x: x as u32,
        y: y as u32,
    }
}
