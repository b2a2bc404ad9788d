use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Condiciones del préstamo no válidas: {0}")]
    InvalidTerms(String),

    #[error("No se pudo cargar la plantilla '{template}': {reason}")]
    TemplateLoad { template: String, reason: String },

    #[error("Error de enlace de plantilla: {0}")]
    TemplateBinding(String),

    #[error("Error de renderizado: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Recurso gráfico no disponible: {0}")]
    OverlayAsset(String),

    #[error("Celda de cuadrícula no válida: {0}")]
    InvalidCell(i64),

    #[error("Tipo de documento no soportado: {0}")]
    UnsupportedDocumentType(String),

    #[error("Error de configuración: {0}")]
    Config(String),
}

impl DocumentError {
    pub fn render(message: impl Into<String>) -> Self {
        DocumentError::Render {
            message: message.into(),
            source: None,
        }
    }

    pub fn render_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DocumentError::Render {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Etiqueta estable del tipo de error, usada en métricas y respuestas HTTP
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentError::InvalidTerms(_) => "invalid_terms",
            DocumentError::TemplateLoad { .. } => "template_load",
            DocumentError::TemplateBinding(_) => "template_binding",
            DocumentError::Render { .. } => "render",
            DocumentError::OverlayAsset(_) => "overlay_asset",
            DocumentError::InvalidCell(_) => "invalid_cell",
            DocumentError::UnsupportedDocumentType(_) => "unsupported_document_type",
            DocumentError::Config(_) => "config",
        }
    }

    /// Errores causados por los datos de entrada (no por el entorno)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DocumentError::InvalidTerms(_)
                | DocumentError::TemplateBinding(_)
                | DocumentError::UnsupportedDocumentType(_)
        )
    }
}

impl From<config::ConfigError> for DocumentError {
    fn from(error: config::ConfigError) -> Self {
        DocumentError::Config(error.to_string())
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_keeps_underlying_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "weasyprint");
        let err = DocumentError::render_with("renderer failed to start", io);

        let source = std::error::Error::source(&err).expect("source preserved");
        assert_eq!(source.to_string(), "weasyprint");
        assert_eq!(err.kind(), "render");
        assert!(!err.is_input_error());
    }

    #[test]
    fn binding_errors_are_input_errors() {
        let err = DocumentError::TemplateBinding("missing field 'nominal_rate'".into());
        assert!(err.is_input_error());
        assert_eq!(err.kind(), "template_binding");
    }
}
