//! JSON configuration for the embedding demo scene.
//!
//! Hosts that want more than the built-in defaults (surface size, colors,
//! initial cube spin) can load an `EmbedConfig` from a JSON file and pass it
//! to the bridge at initialization. All fields are optional in the file;
//! unknown fields are rejected so typos fail loudly at load time.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration for the embedded demo scene and its render surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EmbedConfig {
    /// Initial surface width in pixels.
    pub width: i32,
    /// Initial surface height in pixels.
    pub height: i32,
    /// Clear color, linear RGB.
    pub background: [f32; 3],
    /// Diffuse color of the demo cube, linear RGB.
    pub cube_color: [f32; 3],
    /// Initial rotation of the demo cube in degrees about the world X and Y axes.
    pub spin_degrees: [f32; 2],
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            background: [0.0, 0.0, 0.0],
            cube_color: [0.8, 0.2, 0.2],
            spin_degrees: [45.0, 45.0],
        }
    }
}

impl EmbedConfig {
    /// Validates invariants that the type system cannot express.
    pub fn validate(&self, path: &Path) -> Result<(), EngineError> {
        if self.width < 1 || self.height < 1 {
            return Err(EngineError::InvalidConfig {
                path: path.to_path_buf(),
                msg: format!(
                    "surface size must be positive, got {}x{}",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }
}

/// Loads any `Deserialize` type from a JSON file.
pub fn load_typed_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, EngineError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| EngineError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| EngineError::Json {
        path: PathBuf::from(path),
        source,
    })
}

/// Loads and validates an [`EmbedConfig`] from a JSON file.
pub fn load_embed_config_from(path: impl AsRef<Path>) -> Result<EmbedConfig, EngineError> {
    let path = path.as_ref();
    let config: EmbedConfig = load_typed_json(path)?;
    config.validate(path)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_demo_scene() {
        let c = EmbedConfig::default();
        assert_eq!((c.width, c.height), (300, 300));
        assert_eq!(c.cube_color, [0.8, 0.2, 0.2]);
        assert_eq!(c.spin_degrees, [45.0, 45.0]);
    }

    #[test]
    fn default_config_validates() {
        let c = EmbedConfig::default();
        assert!(c.validate(Path::new("embed.json")).is_ok());
    }

    #[test]
    fn non_positive_size_is_rejected() {
        let c = EmbedConfig {
            width: 0,
            ..EmbedConfig::default()
        };
        let err = c.validate(Path::new("embed.json")).unwrap_err();
        assert!(err.to_string().contains("must be positive"), "got: {err}");
    }
}
