use std::path::Path;

use crate::core::{DocumentError, DocumentResult};

/// Tamaño nativo en píxeles de un recurso gráfico
pub trait ImageMetrics: Send + Sync {
    fn dimensions(&self, path: &Path) -> DocumentResult<(u32, u32)>;
}

/// Lee solo la cabecera de la imagen
pub struct ImageDimensions;

impl ImageMetrics for ImageDimensions {
    fn dimensions(&self, path: &Path) -> DocumentResult<(u32, u32)> {
        image::image_dimensions(path)
            .map_err(|e| DocumentError::OverlayAsset(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_png_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seal.png");
        image::RgbaImage::new(40, 20).save(&path).unwrap();

        assert_eq!(ImageDimensions.dimensions(&path).unwrap(), (40, 20));
    }

    #[test]
    fn missing_image_is_an_asset_error() {
        let err = ImageDimensions
            .dimensions(Path::new("/nonexistent/logo.png"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::OverlayAsset(ref m) if m.contains("logo.png")));
    }
}
