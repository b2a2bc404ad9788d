use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::models::DocumentType;
use crate::pdf::OverlayOutcome;

/// Contadores del servicio, en un registro propio para que cada instancia
/// del estado pueda crearse sin colisiones
pub struct DocumentMetrics {
    registry: Registry,
    generated: IntCounterVec,
    failed: IntCounterVec,
}

impl DocumentMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let generated = IntCounterVec::new(
            Opts::new("loan_documents_generated_total", "Documentos generados"),
            &["document_type", "overlay"],
        )?;
        let failed = IntCounterVec::new(
            Opts::new("loan_documents_failed_total", "Generaciones fallidas"),
            &["document_type", "kind"],
        )?;

        registry.register(Box::new(generated.clone()))?;
        registry.register(Box::new(failed.clone()))?;

        Ok(DocumentMetrics {
            registry,
            generated,
            failed,
        })
    }

    pub fn record_generated(&self, document_type: DocumentType, overlay: &OverlayOutcome) {
        self.generated
            .with_label_values(&[document_type.as_str(), overlay.as_str()])
            .inc();
    }

    /// `document_type` es `unknown` cuando el tipo no se pudo interpretar
    pub fn record_failed(&self, document_type: &str, kind: &str) {
        self.failed.with_label_values(&[document_type, kind]).inc();
    }

    /// Texto de exposición con estos contadores y los del registro global
    pub fn encode(&self) -> prometheus::Result<Vec<u8>> {
        let mut families = self.registry.gather();
        families.extend(prometheus::gather());

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        Ok(buffer)
    }
}
