use config::{Config, Environment};
use serde::Deserialize;
use std::path::PathBuf;

use super::error::DocumentResult;

const ENV_PREFIX: &str = "LOANDOCS";

/// Rutas y binarios que necesita el pipeline de generación
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Directorio con `contract.html`, `card.html`, ...
    pub templates_dir: PathBuf,
    /// Directorio con `company.png`, `logo.png`, `seal.png`, `signature.png`
    pub assets_dir: PathBuf,
    /// Directorio para los ficheros intermedios del rasterizador
    pub temp_dir: PathBuf,
    pub renderer_binary: String,
    /// Ruta base para recursos relativos del HTML
    pub base_url: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            templates_dir: PathBuf::from("templates"),
            assets_dir: PathBuf::from("assets"),
            temp_dir: std::env::temp_dir(),
            renderer_binary: "weasyprint".to_string(),
            base_url: PathBuf::from("."),
        }
    }
}

impl GeneratorConfig {
    /// Valores por defecto sobrescritos con `LOANDOCS_*`
    pub fn from_env() -> DocumentResult<Self> {
        let defaults = GeneratorConfig::default();

        let config = Config::builder()
            .set_default("templates_dir", defaults.templates_dir.to_string_lossy().to_string())?
            .set_default("assets_dir", defaults.assets_dir.to_string_lossy().to_string())?
            .set_default("temp_dir", defaults.temp_dir.to_string_lossy().to_string())?
            .set_default("renderer_binary", defaults.renderer_binary)?
            .set_default("base_url", defaults.base_url.to_string_lossy().to_string())?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> DocumentResult<Self> {
        let defaults = ServerConfig::default();

        let config = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port as i64)?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_directories() {
        let config = GeneratorConfig::default();
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.renderer_binary, "weasyprint");

        let server = ServerConfig::default();
        assert_eq!(server.port, 8080);
    }
}
