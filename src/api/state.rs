use std::sync::Arc;

use super::metrics::DocumentMetrics;
use crate::core::GeneratorConfig;
use crate::generators::PdfGenerator;

#[derive(Clone)]
pub struct ApiState {
    pub generator: Arc<PdfGenerator>,
    pub metrics: Arc<DocumentMetrics>,
}

impl ApiState {
    pub fn new(generator: PdfGenerator) -> anyhow::Result<Self> {
        Ok(ApiState {
            generator: Arc::new(generator),
            metrics: Arc::new(DocumentMetrics::new()?),
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> anyhow::Result<Self> {
        let generator = PdfGenerator::from_config(config)?;

        tracing::info!(
            templates = %config.templates_dir.display(),
            assets = %config.assets_dir.display(),
            renderer = %config.renderer_binary,
            "Generator configured"
        );

        Self::new(generator)
    }
}
