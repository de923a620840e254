use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::Rect;

pub const LEFT_NAMES: &[&str] = &["image_left.png", "image_left.jpg", "image_left.jpeg"];
pub const RIGHT_NAMES: &[&str] = &["image_right.png", "image_right.jpg", "image_right.jpeg"];
pub const TITLE_NAME: &str = "제목.txt";
pub const EXPLAIN_NAME: &str = "해설.txt";

/// Ground truth of the bundled lesion image.
pub const DEFAULT_RECTS: &[Rect] = &[Rect::new(300, 140, 360, 200)];
pub const DEFAULT_RADIUS: u32 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid rectangle #{index} {rect:?}: expected x1<=x2 and y1<=y2")]
    InvalidRect { index: usize, rect: Rect },
    #[error("box_size must be positive")]
    ZeroBoxSize,
    #[error("button_max must be positive")]
    ZeroButtonMax,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub box_size: u32,
    pub background: [u8; 3],
    pub button_max: usize,
    pub rects: Vec<Rect>,
    pub radius: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            box_size: 420,
            background: [0, 0, 0],
            button_max: 16,
            rects: DEFAULT_RECTS.to_vec(),
            radius: DEFAULT_RADIUS,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let cfg = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), rects = cfg.rects.len(), "loaded config");
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.box_size == 0 {
            return Err(ConfigError::ZeroBoxSize);
        }
        if self.button_max == 0 {
            return Err(ConfigError::ZeroButtonMax);
        }
        for (index, rect) in self.rects.iter().enumerate() {
            if !rect.is_well_formed() {
                return Err(ConfigError::InvalidRect { index, rect: *rect });
            }
        }
        Ok(())
    }
}
