use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid render options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renderer implementation selected with `-renderer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    Debug,
    #[default]
    Pathtracer,
}

impl RendererKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RendererKind::Debug => "debug",
            RendererKind::Pathtracer => "pathtracer",
        }
    }
}

/// Invocation parameters appended to the command script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub renderer: RendererKind,
    pub gamma: f64,
    /// Maximum path depth.
    pub depth: u32,
    /// Samples per pixel.
    pub spp: u32,
    /// Renderer progress output; written as `--no-logging` when off.
    pub logging: bool,
    /// Acceleration structure passed with `-accel`.
    pub spatial_index_structure: String,
    pub render_to_image: bool,
    /// Image path; a timestamped `.tga` next to the markup when unset.
    pub render_to_image_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fullscreen: false,
            renderer: RendererKind::Pathtracer,
            gamma: 1.0,
            depth: 16,
            spp: 1,
            logging: false,
            spatial_index_structure: "triangle4".to_string(),
            render_to_image: false,
            render_to_image_path: None,
        }
    }
}

impl RenderOptions {
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, OptionsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!((options.width, options.height), (800, 600));
        assert_eq!(options.renderer, RendererKind::Pathtracer);
        assert_eq!(options.depth, 16);
        assert_eq!(options.spp, 1);
        assert_eq!(options.spatial_index_structure, "triangle4");
        assert!(!options.logging);
        assert!(options.render_to_image_path.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options =
            RenderOptions::from_json(r#"{ "width": 1024, "renderer": "debug", "spp": 4 }"#)
                .unwrap();
        assert_eq!(options.width, 1024);
        assert_eq!(options.height, 600);
        assert_eq!(options.renderer, RendererKind::Debug);
        assert_eq!(options.spp, 4);
    }

    #[test]
    fn test_invalid_json() {
        let err = RenderOptions::from_json(r#"{ "renderer": "raster" }"#).unwrap_err();
        assert!(matches!(err, OptionsError::Json(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let options = RenderOptions {
            render_to_image: true,
            render_to_image_path: Some(PathBuf::from("out/frame.tga")),
            ..Default::default()
        };
        let json = options.to_json().unwrap();
        assert_eq!(RenderOptions::from_json(&json).unwrap(), options);
    }
}
