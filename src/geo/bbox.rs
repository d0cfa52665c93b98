//! Footprint bounding-box calculation around a center coordinate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Meters per degree of latitude (spherical approximation).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeoError {
    /// Both the Mercator projection and the longitude compensation divide by
    /// cos(lat), so the poles are rejected up front instead of producing an
    /// unbounded result.
    #[error("latitude {0} must lie strictly between -90 and 90 degrees")]
    InvalidLatitude(f64),

    #[error("longitude {0} must be finite")]
    InvalidLongitude(f64),

    #[error("footprint side must be positive, got {0}")]
    InvalidFootprint(f64),
}

/// A validated geographic coordinate.
///
/// Latitude is strictly inside (-90, 90); longitude is normalized into the
/// canonical [-180, 180) range at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || lat <= -90.0 || lat >= 90.0 {
            return Err(GeoError::InvalidLatitude(lat));
        }
        if !lon.is_finite() {
            return Err(GeoError::InvalidLongitude(lon));
        }
        Ok(Self {
            lat,
            lon: normalize_lon(lon),
        })
    }
}

// Deserialization routes through the constructor so validation and longitude
// normalization cannot be bypassed.
impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            lat: f64,
            lon: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        GeoPoint::new(raw.lat, raw.lon).map_err(serde::de::Error::custom)
    }
}

/// Geographic rectangle in degrees, with north > south and east > west.
///
/// Footprints whose center sits close enough to the antimeridian that the box
/// would cross it are not wrapped: east/west may extend past ±180. Callers
/// needing wraparound must split the box themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Compute the bounding box of a square footprint of `side_meters` centered
/// on `point`.
///
/// This is a planar small-footprint approximation: 1 degree of latitude is
/// taken as 111,320 m, and the east-west extent is stretched by 1/cos(lat)
/// to compensate meridian convergence. Valid for footprints of tens to low
/// hundreds of meters; no geodesic correction is applied.
pub fn compute_bbox(point: GeoPoint, side_meters: f64) -> Result<BoundingBox, GeoError> {
    if !side_meters.is_finite() || side_meters <= 0.0 {
        return Err(GeoError::InvalidFootprint(side_meters));
    }

    let half_lat_deg = side_meters / (2.0 * METERS_PER_DEGREE_LAT);
    let half_lon_deg =
        side_meters / (2.0 * METERS_PER_DEGREE_LAT * point.lat.to_radians().cos());

    Ok(BoundingBox {
        north: point.lat + half_lat_deg,
        south: point.lat - half_lat_deg,
        east: point.lon + half_lon_deg,
        west: point.lon - half_lon_deg,
    })
}

/// Normalize a longitude into [-180, 180).
pub fn normalize_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can return 360.0 - epsilon; the subtraction keeps the
    // result inside the half-open range.
    if wrapped >= 180.0 {
        -180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_bbox_centered_on_point() {
        let coords = [
            (0.0, 0.0),
            (40.0, -105.0),
            (-40.0, 105.0),
            (-78.5, 12.25),
            (89.9, -0.5),
            (-89.9, 179.5),
        ];
        for &(lat, lon) in &coords {
            let bbox = compute_bbox(point(lat, lon), 90.0).unwrap();

            assert!(
                (bbox.north - lat - (lat - bbox.south)).abs() < 1e-12,
                "not latitude-symmetric at ({}, {})",
                lat,
                lon
            );
            assert!(
                (bbox.east - lon - (lon - bbox.west)).abs() < 1e-12,
                "not longitude-symmetric at ({}, {})",
                lat,
                lon
            );
        }
    }

    #[test]
    fn test_bbox_concrete_boulder() {
        // 90 m footprint at 40N: half extents 0.000404 / 0.000528 degrees
        let bbox = compute_bbox(point(40.0, -105.0), 90.0).unwrap();

        assert!((bbox.north - 40.000404).abs() < 1e-6);
        assert!((bbox.south - 39.999596).abs() < 1e-6);
        assert!((bbox.east - -104.999472).abs() < 1e-6);
        assert!((bbox.west - -105.000528).abs() < 1e-6);
    }

    #[test]
    fn test_bbox_width_grows_toward_poles() {
        let mut last_width = 0.0;
        for lat in [0.0, 20.0, 40.0, 60.0, 80.0, 89.0] {
            let bbox = compute_bbox(point(lat, 0.0), 90.0).unwrap();
            let width = bbox.east - bbox.west;
            assert!(width > last_width, "width not increasing at lat {}", lat);
            last_width = width;
        }
    }

    #[test]
    fn test_bbox_height_latitude_invariant() {
        let at_equator = compute_bbox(point(0.0, 0.0), 90.0).unwrap();
        let at_60 = compute_bbox(point(60.0, 0.0), 90.0).unwrap();

        let h1 = at_equator.north - at_equator.south;
        let h2 = at_60.north - at_60.south;
        assert!((h1 - h2).abs() < 1e-12);
    }

    #[test]
    fn test_poles_rejected() {
        assert_eq!(
            GeoPoint::new(90.0, 0.0),
            Err(GeoError::InvalidLatitude(90.0))
        );
        assert_eq!(
            GeoPoint::new(-90.0, 0.0),
            Err(GeoError::InvalidLatitude(-90.0))
        );
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(89.999, 0.0).is_ok());
    }

    #[test]
    fn test_nonfinite_longitude_rejected() {
        assert!(matches!(
            GeoPoint::new(40.0, f64::NAN),
            Err(GeoError::InvalidLongitude(_))
        ));
        assert!(matches!(
            GeoPoint::new(40.0, f64::INFINITY),
            Err(GeoError::InvalidLongitude(_))
        ));
        assert!(matches!(
            GeoPoint::new(40.0, f64::NEG_INFINITY),
            Err(GeoError::InvalidLongitude(_))
        ));

        // finite coordinates still pass and keep the box ordered
        let bbox = compute_bbox(point(40.0, 179.0), 90.0).unwrap();
        assert!(bbox.east > bbox.west);
    }

    #[test]
    fn test_deserialize_routes_through_validation() {
        let err = serde_json::from_str::<GeoPoint>(r#"{"lat": 90.0, "lon": 0.0}"#).unwrap_err();
        assert!(err.to_string().contains("latitude"));

        assert!(serde_json::from_str::<GeoPoint>(r#"{"lat": 0.0, "lon": "east"}"#).is_err());

        // longitude is normalized on the deserialization path too
        let p: GeoPoint = serde_json::from_str(r#"{"lat": 10.0, "lon": 190.0}"#).unwrap();
        assert!((p.lon - -170.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_footprint() {
        assert_eq!(
            compute_bbox(point(0.0, 0.0), 0.0),
            Err(GeoError::InvalidFootprint(0.0))
        );
        assert!(compute_bbox(point(0.0, 0.0), -5.0).is_err());
    }

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(0.0), 0.0);
        assert_eq!(normalize_lon(-105.0), -105.0);
        assert_eq!(normalize_lon(180.0), -180.0);
        assert_eq!(normalize_lon(-180.0), -180.0);
        assert!((normalize_lon(190.0) - -170.0).abs() < 1e-12);
        assert_eq!(normalize_lon(540.0), -180.0);
        assert!((normalize_lon(-190.0) - 170.0).abs() < 1e-12);
    }
}
