//! Imagery platform client wrapper.

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::{FilterConfig, PlatformConfig};
use crate::geo::{BoundingBox, GeoPoint, TileIndex};
use crate::models::Scene;

use super::{PlatformError, ServiceAccountKey};

/// Rendering parameters for composite visualization.
#[derive(Debug, Clone, Serialize)]
pub struct Visualization {
    pub bands: [&'static str; 3],
    pub min: f64,
    pub max: f64,
}

impl Default for Visualization {
    /// True-color Landsat rendering: red, green, blue surface reflectance.
    fn default() -> Self {
        Self {
            bands: ["SR_B4", "SR_B3", "SR_B2"],
            min: 0.0,
            max: 0.3,
        }
    }
}

/// HTTP client for the imagery platform's catalog and map endpoints.
#[derive(Clone)]
pub struct ImageryClient {
    client: reqwest::Client,
    base_url: Url,
    collection: String,
    filters: FilterConfig,
}

#[derive(Debug, Deserialize)]
struct SceneQueryResponse {
    scenes: Vec<Scene>,
}

#[derive(Debug, Deserialize)]
struct MapResponse {
    /// Tile URL template with `{z}`, `{x}`, `{y}` placeholders
    url_format: String,
}

#[derive(Serialize)]
struct MapRequest<'a> {
    collection: &'a str,
    start_date: &'a str,
    end_date: &'a str,
    max_cloud_cover: f64,
    composite: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<&'a BoundingBox>,
    visualization: &'a Visualization,
}

impl ImageryClient {
    /// Create a new platform client from configuration and a loaded key.
    pub fn new(
        config: &PlatformConfig,
        filters: FilterConfig,
        key: &ServiceAccountKey,
    ) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", key.api_token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .user_agent("terrascope/0.1")
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url,
            collection: config.collection.clone(),
            filters,
        })
    }

    /// Append an endpoint segment to the base URL.
    fn endpoint(&self, segment: &str) -> Result<Url, PlatformError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PlatformError::Malformed("base URL cannot carry a path"))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Check whether the platform is reachable and accepting our key.
    pub async fn health_check(&self) -> Result<bool, PlatformError> {
        let response = self.client.get(self.endpoint("status")?).send().await?;
        Ok(response.status().is_success())
    }

    /// Fetch the most recent scene covering `point` that passes the
    /// configured date and cloud-cover filters.
    pub async fn latest_scene(&self, point: GeoPoint) -> Result<Scene, PlatformError> {
        let response = self
            .client
            .get(self.endpoint("scenes")?)
            .query(&[
                ("collection", self.collection.clone()),
                ("lat", point.lat.to_string()),
                ("lon", point.lon.to_string()),
                ("start_date", self.filters.start_date.clone()),
                ("end_date", self.filters.end_date.clone()),
                ("max_cloud_cover", self.filters.max_cloud_cover.to_string()),
                ("sort", "-acquired".to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;

        let response = check_status(response).await?;
        let data: SceneQueryResponse = response.json().await?;

        debug!(
            "Scene query at ({}, {}) returned {} scenes",
            point.lat,
            point.lon,
            data.scenes.len()
        );

        data.scenes
            .into_iter()
            .next()
            .ok_or(PlatformError::NoImageryFound)
    }

    /// Request a tile URL template for the median composite of the filtered
    /// collection, optionally clipped to `region`.
    pub async fn map_template(
        &self,
        region: Option<&BoundingBox>,
        vis: &Visualization,
    ) -> Result<String, PlatformError> {
        let body = MapRequest {
            collection: &self.collection,
            start_date: &self.filters.start_date,
            end_date: &self.filters.end_date,
            max_cloud_cover: self.filters.max_cloud_cover,
            composite: "median",
            region,
            visualization: vis,
        };

        let response = self
            .client
            .post(self.endpoint("map")?)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let data: MapResponse = response.json().await?;

        if !data.url_format.contains("{z}") {
            return Err(PlatformError::Malformed(
                "tile template is missing the {z} placeholder",
            ));
        }

        Ok(data.url_format)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PlatformError::Status {
        code: status.as_u16(),
        body,
    })
}

/// Substitute a tile address into a `{z}/{x}/{y}` URL template.
pub fn fill_template(template: &str, tile: &TileIndex) -> String {
    template
        .replace("{z}", &tile.zoom.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
}
