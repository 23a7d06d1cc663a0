//! Server configuration from environment.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub safe_zones_path: PathBuf,
    pub ocean_polygons_path: PathBuf,
    pub classifier_model_path: PathBuf,
    pub vertex_project_id: String,
    pub vertex_location: String,
    pub vertex_model: String,
    /// OAuth bearer token for Vertex AI; chat replies with the fallback when unset
    pub vertex_access_token: Option<String>,
    /// Overrides the regional Vertex AI endpoint (used for local stubs)
    pub vertex_endpoint: Option<String>,
    pub chat_timeout_s: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("CLIMATE_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            safe_zones_path: env::var("SAFE_ZONES_PATH")
                .unwrap_or_else(|_| "data/safe_zones.csv".to_string())
                .into(),
            ocean_polygons_path: env::var("OCEAN_POLYGONS_PATH")
                .unwrap_or_else(|_| "data/ocean.geojson".to_string())
                .into(),
            classifier_model_path: env::var("CLASSIFIER_MODEL_PATH")
                .unwrap_or_else(|_| "data/classifier.json".to_string())
                .into(),
            vertex_project_id: env::var("VERTEX_PROJECT_ID")
                .unwrap_or_else(|_| "your-gcp-project-id".to_string()),
            vertex_location: env::var("VERTEX_LOCATION")
                .unwrap_or_else(|_| "us-central1".to_string()),
            vertex_model: env::var("VERTEX_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-pro".to_string()),
            vertex_access_token: env::var("VERTEX_ACCESS_TOKEN")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            vertex_endpoint: env::var("VERTEX_ENDPOINT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            chat_timeout_s: env::var("CHAT_TIMEOUT_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}
