//! Shared, read-only application state.

use anyhow::{Context, Result};
use climate_core::datasets::{load_classifier, ReferenceData};
use climate_core::ScoringPipeline;
use std::sync::Arc;

use crate::chat::{ChatAssistant, VertexChatClient};
use crate::config::Config;

/// Application state - frozen after startup, shared by every request.
pub struct AppState {
    pipeline: ScoringPipeline,
    chat: Arc<dyn ChatAssistant>,
}

impl AppState {
    pub fn new(pipeline: ScoringPipeline, chat: Arc<dyn ChatAssistant>) -> Self {
        Self { pipeline, chat }
    }

    /// Load every dataset named in the config. Any failure is fatal.
    pub fn from_config(config: &Config) -> Result<Self> {
        let reference = ReferenceData::load(&config.safe_zones_path, &config.ocean_polygons_path)
            .context("Failed to load reference datasets")?;
        let classifier = load_classifier(&config.classifier_model_path)
            .context("Failed to load classifier model")?;
        let chat = VertexChatClient::new(config).context("Failed to create chat client")?;

        if config.vertex_access_token.is_none() {
            tracing::warn!("VERTEX_ACCESS_TOKEN not set; /chat will return the fallback reply");
        }

        tracing::info!(
            safe_zones = reference.safe_zones.len(),
            ocean_polygons = reference.landmass.len(),
            "Reference data loaded"
        );

        Ok(Self::new(
            ScoringPipeline::new(Arc::new(reference), Arc::new(classifier)),
            Arc::new(chat),
        ))
    }

    pub fn pipeline(&self) -> &ScoringPipeline {
        &self.pipeline
    }

    pub fn chat(&self) -> &dyn ChatAssistant {
        self.chat.as_ref()
    }
}
