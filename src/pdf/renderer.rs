use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::{DocumentError, DocumentResult, GeneratorConfig};

/// Convierte HTML en bytes PDF
pub trait HtmlRenderer: Send + Sync {
    /// `base_path` resuelve las rutas relativas del HTML (imágenes, fuentes)
    fn render(&self, html: &str, base_path: &Path) -> DocumentResult<Vec<u8>>;
}

/// Rasterizador externo `weasyprint` invocado como proceso
pub struct WeasyPrintRenderer {
    binary: String,
    temp_dir: PathBuf,
}

impl WeasyPrintRenderer {
    pub fn new(binary: impl Into<String>, temp_dir: impl Into<PathBuf>) -> Self {
        WeasyPrintRenderer {
            binary: binary.into(),
            temp_dir: temp_dir.into(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.renderer_binary.clone(), config.temp_dir.clone())
    }
}

impl HtmlRenderer for WeasyPrintRenderer {
    fn render(&self, html: &str, base_path: &Path) -> DocumentResult<Vec<u8>> {
        fs::create_dir_all(&self.temp_dir)
            .map_err(|e| DocumentError::render_with("no se pudo crear el directorio temporal", e))?;

        let stem = format!("loan_{}", uuid::Uuid::new_v4());
        let html_path = self.temp_dir.join(format!("{}.html", stem));
        let pdf_path = self.temp_dir.join(format!("{}.pdf", stem));

        fs::write(&html_path, html)
            .map_err(|e| DocumentError::render_with("no se pudo escribir el HTML temporal", e))?;

        tracing::debug!("Running {} on {:?}", self.binary, html_path);

        let output = Command::new(&self.binary)
            .arg("--base-url")
            .arg(base_path)
            .arg(&html_path)
            .arg(&pdf_path)
            .output();

        let _ = fs::remove_file(&html_path);

        let output = output.map_err(|e| {
            DocumentError::render_with(format!("Error ejecutando {}", self.binary), e)
        })?;

        if !output.status.success() {
            let _ = fs::remove_file(&pdf_path);
            return Err(DocumentError::render(format!(
                "{} terminó con {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let bytes = fs::read(&pdf_path)
            .map_err(|e| DocumentError::render_with("no se pudo leer el PDF generado", e));
        let _ = fs::remove_file(&pdf_path);
        let bytes = bytes?;

        if bytes.is_empty() {
            return Err(DocumentError::render("el rasterizador produjo un PDF vacío"));
        }

        tracing::debug!("Rasterized {} bytes of HTML into {} bytes of PDF", html.len(), bytes.len());
        Ok(bytes)
    }
}
