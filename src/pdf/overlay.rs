use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::compositor::PageMergeEngine;
use super::metrics::ImageMetrics;
use crate::core::{DocumentError, DocumentResult};
use crate::layout::{page_layout, place_asset, placement_for, AssetRole, Placement};
use crate::models::DocumentType;

/// Un recurso gráfico ya posicionado
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayDraw {
    pub role: AssetRole,
    pub path: PathBuf,
    pub placement: Placement,
}

/// Capa a superponer sobre una página del PDF base
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPage {
    pub draws: Vec<OverlayDraw>,
}

/// Resultado de la superposición. Un fallo nunca aborta la generación: el
/// PDF rasterizado se entrega sin marcas y se informa del motivo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverlayOutcome {
    Applied { assets: usize },
    Degraded { reason: String },
}

impl OverlayOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, OverlayOutcome::Applied { .. })
    }

    /// Etiqueta para cabeceras y métricas
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayOutcome::Applied { .. } => "applied",
            OverlayOutcome::Degraded { .. } => "degraded",
        }
    }
}

pub struct OverlayComposer {
    assets_dir: PathBuf,
    metrics: Arc<dyn ImageMetrics>,
    engine: Arc<dyn PageMergeEngine>,
}

impl OverlayComposer {
    pub fn new(
        assets_dir: impl Into<PathBuf>,
        metrics: Arc<dyn ImageMetrics>,
        engine: Arc<dyn PageMergeEngine>,
    ) -> Self {
        OverlayComposer {
            assets_dir: assets_dir.into(),
            metrics,
            engine,
        }
    }

    /// Una capa por página que lleva recursos, en orden de página
    pub fn build_overlay_pages(&self, document_type: DocumentType) -> DocumentResult<Vec<OverlayPage>> {
        page_layout(document_type)
            .iter()
            .map(|roles| -> DocumentResult<OverlayPage> {
                let draws = roles
                    .iter()
                    .map(|role| self.draw(document_type, *role))
                    .collect::<DocumentResult<Vec<_>>>()?;
                Ok(OverlayPage { draws })
            })
            .collect()
    }

    fn draw(&self, document_type: DocumentType, role: AssetRole) -> DocumentResult<OverlayDraw> {
        let spec = placement_for(document_type, role).ok_or_else(|| {
            DocumentError::OverlayAsset(format!("{} no tiene posición para {}", document_type, role.as_str()))
        })?;

        let path = self.assets_dir.join(role.file_name());
        let size = self.metrics.dimensions(&path)?;
        let placement = place_asset(&spec, size)?;

        tracing::debug!(
            document_type = %document_type,
            role = role.as_str(),
            x = placement.x,
            y = placement.y,
            width = placement.width,
            height = placement.height,
            "asset placed"
        );

        Ok(OverlayDraw { role, path, placement })
    }

    /// Superpone cada capa sobre su página; las páginas sin capa pasan sin
    /// cambios. Los documentos de una sola página se recortan a la primera.
    pub fn compose(
        &self,
        base_pdf: &[u8],
        overlay_pages: &[OverlayPage],
        document_type: DocumentType,
    ) -> DocumentResult<Vec<u8>> {
        let mut document = self.engine.open(base_pdf)?;
        let page_count = document.page_count();

        for (index, overlay) in overlay_pages.iter().enumerate().take(page_count) {
            document.merge_page(index, overlay)?;
        }

        if document_type.is_single_page() && page_count > 1 {
            tracing::info!(
                document_type = %document_type,
                "Rendered {} pages, keeping the first one",
                page_count
            );
            document.truncate(1)?;
        }

        document.to_bytes()
    }

    /// Construye las capas y las compone. Ante cualquier fallo devuelve el PDF
    /// rasterizado sin marcas, junto con el motivo; los documentos de una
    /// sola página se recortan igualmente si el PDF se puede abrir.
    pub fn apply(&self, base_pdf: Vec<u8>, document_type: DocumentType) -> (Vec<u8>, OverlayOutcome) {
        let result = self.build_overlay_pages(document_type).and_then(|pages| {
            let assets: usize = pages.iter().map(|page| page.draws.len()).sum();
            self.compose(&base_pdf, &pages, document_type)
                .map(|merged| (merged, assets))
        });

        match result {
            Ok((merged, assets)) => (merged, OverlayOutcome::Applied { assets }),
            Err(e) => {
                tracing::warn!(
                    document_type = %document_type,
                    error = %e,
                    "Overlay failed, returning the rasterized PDF unchanged"
                );
                let pdf = self.first_page_only(base_pdf, document_type);
                (pdf, OverlayOutcome::Degraded { reason: e.to_string() })
            }
        }
    }

    fn first_page_only(&self, base_pdf: Vec<u8>, document_type: DocumentType) -> Vec<u8> {
        if !document_type.is_single_page() {
            return base_pdf;
        }

        let trimmed = self.engine.open(&base_pdf).and_then(|mut document| {
            if document.page_count() <= 1 {
                return Ok(None);
            }
            document.truncate(1)?;
            document.to_bytes().map(Some)
        });

        match trimmed {
            Ok(Some(pdf)) => pdf,
            Ok(None) => base_pdf,
            Err(e) => {
                tracing::warn!(document_type = %document_type, error = %e, "Could not trim the rasterized PDF");
                base_pdf
            }
        }
    }
}
