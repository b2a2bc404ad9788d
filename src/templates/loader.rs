use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::{DocumentError, DocumentResult};
use crate::models::DocumentType;

/// Origen del texto bruto de las plantillas HTML
pub trait TemplateLoader: Send + Sync {
    fn load(&self, document_type: DocumentType) -> DocumentResult<String>;
}

/// Lee `<dir>/<tipo>.html` en cada petición; no hay caché
pub struct FileTemplateLoader {
    local_path: PathBuf,
}

impl FileTemplateLoader {
    pub fn new(local_path: impl Into<PathBuf>) -> Self {
        FileTemplateLoader {
            local_path: local_path.into(),
        }
    }

    pub fn path_for(&self, document_type: DocumentType) -> PathBuf {
        self.local_path
            .join(format!("{}.html", document_type.template_name()))
    }
}

impl TemplateLoader for FileTemplateLoader {
    fn load(&self, document_type: DocumentType) -> DocumentResult<String> {
        let path = self.path_for(document_type);

        let content = std::fs::read_to_string(&path).map_err(|e| DocumentError::TemplateLoad {
            template: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Loaded template: {:?} ({} bytes)", path, content.len());
        Ok(content)
    }
}

/// Plantillas en memoria, útil para incrustarlas con `include_str!`
#[derive(Default)]
pub struct StaticTemplateLoader {
    templates: HashMap<DocumentType, String>,
}

impl StaticTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, document_type: DocumentType, content: impl Into<String>) -> Self {
        self.templates.insert(document_type, content.into());
        self
    }
}

impl TemplateLoader for StaticTemplateLoader {
    fn load(&self, document_type: DocumentType) -> DocumentResult<String> {
        self.templates
            .get(&document_type)
            .cloned()
            .ok_or_else(|| DocumentError::TemplateLoad {
                template: document_type.template_name().to_string(),
                reason: "plantilla no registrada".into(),
            })
    }
}
