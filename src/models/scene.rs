//! Scene documents returned by the imagery platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder for scene attributes the platform did not report.
const MISSING: &str = "N/A";

/// A single satellite capture as reported by the imagery platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    /// Acquisition timestamp of the capture.
    pub acquired: DateTime<Utc>,

    /// Raw property bag from the platform's catalog entry.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Named scene attributes surfaced to API clients.
///
/// Field names follow the Landsat Level-2 product vocabulary; every attribute
/// falls back to the literal string `"N/A"` when the platform omits it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneMetadata {
    #[serde(rename = "Landsat_Product_Identifier_L2")]
    pub product_id_l2: String,
    #[serde(rename = "Landsat_Product_Identifier_L1")]
    pub product_id_l1: String,
    #[serde(rename = "Landsat_Scene_Identifier")]
    pub scene_id: String,
    #[serde(rename = "Date_Acquired")]
    pub date_acquired: String,
    #[serde(rename = "Collection_Category")]
    pub collection_category: String,
    #[serde(rename = "Collection_Number")]
    pub collection_number: String,
    #[serde(rename = "WRS_Path")]
    pub wrs_path: String,
    #[serde(rename = "WRS_Row")]
    pub wrs_row: String,
    #[serde(rename = "Nadir_Off_Nadir")]
    pub nadir_off_nadir: String,
    #[serde(rename = "Roll_Angle")]
    pub roll_angle: String,
    #[serde(rename = "Date_Product_Generated_L2")]
    pub date_generated_l2: String,
    #[serde(rename = "Date_Product_Generated_L1")]
    pub date_generated_l1: String,
    #[serde(rename = "Start_Time")]
    pub start_time: String,
    #[serde(rename = "Stop_Time")]
    pub stop_time: String,
    #[serde(rename = "Station_Identifier")]
    pub station_id: String,
    #[serde(rename = "Day_Night_Indicator")]
    pub day_night: String,
    #[serde(rename = "Land_Cloud_Cover")]
    pub land_cloud_cover: String,
    #[serde(rename = "Scene_Cloud_Cover_L1")]
    pub scene_cloud_cover_l1: String,
    #[serde(rename = "Ground_Control_Points_Model")]
    pub gcp_model: String,
    #[serde(rename = "Ground_Control_Points_Version")]
    pub gcp_version: String,
    #[serde(rename = "Geometric_RMSE_Model")]
    pub geometric_rmse: String,
    #[serde(rename = "Geometric_RMSE_Model_X")]
    pub geometric_rmse_x: String,
    #[serde(rename = "Geometric_RMSE_Model_Y")]
    pub geometric_rmse_y: String,
    #[serde(rename = "Processing_Software_Version")]
    pub processing_software: String,
    #[serde(rename = "Sun_Elevation_L0RA")]
    pub sun_elevation: String,
    #[serde(rename = "Sun_Azimuth_L0RA")]
    pub sun_azimuth: String,
    #[serde(rename = "Data_Type_L2")]
    pub data_type_l2: String,
    #[serde(rename = "Sensor_Identifier")]
    pub sensor_id: String,
    #[serde(rename = "Satellite")]
    pub satellite: String,
}

impl SceneMetadata {
    /// Extract the metadata mapping from a platform property bag.
    pub fn from_properties(properties: &Map<String, Value>) -> Self {
        let get = |key: &str| property_string(properties, key);

        Self {
            product_id_l2: get("LANDSAT_PRODUCT_ID"),
            product_id_l1: get("LANDSAT_SCENE_ID"),
            scene_id: get("LANDSAT_SCENE_ID"),
            date_acquired: get("DATE_ACQUIRED"),
            collection_category: get("COLLECTION_CATEGORY"),
            collection_number: get("COLLECTION_NUMBER"),
            wrs_path: get("WRS_PATH"),
            wrs_row: get("WRS_ROW"),
            nadir_off_nadir: get("NADIR_OFF_NADIR"),
            roll_angle: get("ROLL_ANGLE"),
            date_generated_l2: get("DATE_PRODUCT_GENERATED_L2"),
            date_generated_l1: get("DATE_PRODUCT_GENERATED_L1"),
            start_time: get("SCENE_CENTER_TIME"),
            stop_time: get("SCENE_CENTER_TIME"),
            station_id: get("STATION_ID"),
            day_night: get("DAY_NIGHT_INDICATOR"),
            land_cloud_cover: get("LAND_CLOUD_COVER"),
            scene_cloud_cover_l1: get("CLOUD_COVER"),
            gcp_model: get("GROUND_CONTROL_POINTS_MODEL"),
            gcp_version: get("GROUND_CONTROL_POINTS_VERSION"),
            geometric_rmse: get("GEOMETRIC_RMSE_MODEL"),
            geometric_rmse_x: get("GEOMETRIC_RMSE_MODEL_X"),
            geometric_rmse_y: get("GEOMETRIC_RMSE_MODEL_Y"),
            processing_software: get("PROCESSING_SOFTWARE_VERSION"),
            sun_elevation: get("SUN_ELEVATION"),
            sun_azimuth: get("SUN_AZIMUTH"),
            data_type_l2: get("DATA_TYPE_L2"),
            sensor_id: get("SENSOR_ID"),
            satellite: get("SPACECRAFT_ID"),
        }
    }
}

/// Render a catalog property as a display string, `"N/A"` when absent.
///
/// The platform reports cloud cover and geometry figures as JSON numbers and
/// identifiers as strings; both are surfaced as strings to the client.
fn property_string(properties: &Map<String, Value>, key: &str) -> String {
    match properties.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => MISSING.to_string(),
        Some(other) => other.to_string(),
    }
}
