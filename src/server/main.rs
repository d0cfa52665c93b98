//! HTTP server for satellite imagery lookups.
//!
//! Accepts a latitude/longitude pair and returns tile URLs plus scene
//! metadata, delegating catalog search, compositing, and tile rendering to
//! the remote imagery platform.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Json as JsonBody, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use terrascope::config::Config;
use terrascope::geo::{compute_bbox, lat_lon_to_tile, GeoPoint, MAX_ZOOM};
use terrascope::models::SceneMetadata;
use terrascope::platform::{
    client::fill_template, ImageryClient, PlatformError, ServiceAccountKey, Visualization,
};

mod response;
use response::{ErrorBody, ImageRequest, ImageResponse};

/// Landsat 8/9 ground-track repeat period.
const REVISIT_DAYS: i64 = 16;

const SATELLITE_NAME: &str = "Landsat 9";

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Satellite imagery lookup server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Path to the service configuration
    #[arg(short, long, default_value = "terrascope.toml")]
    config: String,
}

/// Application state shared across handlers
struct AppState {
    imagery: ImageryClient,
    footprint_meters: f64,
    default_zoom: u32,
}

type Rejection = (StatusCode, Json<ErrorBody>);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Terrascope Imagery Server");
    let config = Config::load_from_file(&args.config)?;

    info!(
        "Loading service account key from {}",
        config.platform.service_account_file.display()
    );
    let key = ServiceAccountKey::load_from_file(&config.platform.service_account_file)?;

    info!("Connecting to imagery platform at {}", config.platform.base_url);
    let imagery = ImageryClient::new(&config.platform, config.filters.clone(), &key)?;

    if !imagery.health_check().await.unwrap_or(false) {
        anyhow::bail!("Imagery platform is not reachable");
    }

    let state = Arc::new(AppState {
        imagery,
        footprint_meters: config.imagery.footprint_meters,
        default_zoom: config.imagery.default_zoom,
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/get_image", post(image_handler))
        .route("/get_image_url", post(image_url_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let healthy = state.imagery.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        platform: healthy,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    platform: bool,
}

/// Clipped-composite imagery lookup: tile URL template, footprint bounds,
/// and scene metadata for the newest matching capture.
async fn image_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<ImageRequest>,
) -> Result<Json<ImageResponse>, Rejection> {
    let point = validate_point(&request)?;

    let bounds = compute_bbox(point, state.footprint_meters)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.to_string()))))?;

    let scene = state
        .imagery
        .latest_scene(point)
        .await
        .map_err(platform_rejection)?;

    let tile_url = state
        .imagery
        .map_template(Some(&bounds), &Visualization::default())
        .await
        .map_err(platform_rejection)?;

    let metadata = SceneMetadata::from_properties(&scene.properties);

    Ok(Json(ImageResponse {
        tile_url,
        latitude: point.lat,
        longitude: point.lon,
        bounds,
        acquisition_time: format_date(scene.acquired),
        next_acquisition_time: format_date(scene.acquired + Duration::days(REVISIT_DAYS)),
        satellite: SATELLITE_NAME,
        metadata,
    }))
}

/// Single-tile URL lookup: the composite's tile template with the slippy-map
/// address of the requested point substituted in.
async fn image_url_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<ImageRequest>,
) -> Result<String, Rejection> {
    let point = validate_point(&request)?;
    let zoom = validate_zoom(request.zoom, state.default_zoom)?;

    let tile = lat_lon_to_tile(point, zoom);

    let template = state
        .imagery
        .map_template(None, &Visualization::default())
        .await
        .map_err(platform_rejection)?;

    Ok(fill_template(&template, &tile))
}

/// Validate request coordinates into a `GeoPoint`.
fn validate_point(request: &ImageRequest) -> Result<GeoPoint, Rejection> {
    let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Latitude and longitude required")),
        ));
    };

    GeoPoint::new(latitude, longitude)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.to_string()))))
}

/// Resolve the requested zoom level, rejecting values past the supported
/// tile depth.
fn validate_zoom(requested: Option<u32>, default_zoom: u32) -> Result<u32, Rejection> {
    let zoom = requested.unwrap_or(default_zoom);
    if zoom > MAX_ZOOM {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(format!(
                "zoom must be at most {}",
                MAX_ZOOM
            ))),
        ));
    }
    Ok(zoom)
}

/// Map platform failures onto HTTP rejections.
fn platform_rejection(err: PlatformError) -> Rejection {
    match err {
        PlatformError::NoImageryFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new(err.to_string())),
        ),
        other => {
            tracing::error!("Platform request failed: {}", other);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody::new(other.to_string())),
            )
        }
    }
}

fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_coordinates_rejected() {
        let request = ImageRequest {
            latitude: Some(40.0),
            longitude: None,
            zoom: None,
        };
        let (status, body) = validate_point(&request).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.error, "Latitude and longitude required");
    }

    #[test]
    fn test_polar_latitude_rejected() {
        let request = ImageRequest {
            latitude: Some(90.0),
            longitude: Some(0.0),
            zoom: None,
        };
        let (status, _) = validate_point(&request).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_valid_point_accepted() {
        let request = ImageRequest {
            latitude: Some(40.0),
            longitude: Some(-105.0),
            zoom: Some(12),
        };
        let point = validate_point(&request).unwrap();
        assert_eq!(point.lat, 40.0);
        assert_eq!(point.lon, -105.0);
    }

    #[test]
    fn test_zoom_bounds() {
        assert_eq!(validate_zoom(None, 12).unwrap(), 12);
        assert_eq!(validate_zoom(Some(18), 12).unwrap(), 18);
        assert_eq!(validate_zoom(Some(MAX_ZOOM), 12).unwrap(), MAX_ZOOM);

        let (status, body) = validate_zoom(Some(MAX_ZOOM + 1), 12).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.0.error.contains("zoom"));
    }

    #[test]
    fn test_revisit_date_arithmetic() {
        let acquired: DateTime<Utc> = "2024-10-04T17:45:12Z".parse().unwrap();
        assert_eq!(format_date(acquired), "2024-10-04");
        assert_eq!(
            format_date(acquired + Duration::days(REVISIT_DAYS)),
            "2024-10-20"
        );
    }
}
