//! Geospatial tiling and bounding-box computation.
//!
//! Everything here is pure arithmetic: no I/O, no state, safe to call from
//! any number of request handlers concurrently.

pub mod bbox;
pub mod tile;

pub use bbox::{compute_bbox, BoundingBox, GeoError, GeoPoint};
pub use tile::{lat_lon_to_tile, TileIndex, MAX_ZOOM};
