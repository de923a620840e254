use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod canvas;
pub mod demo;
pub mod overlay;

pub use canvas::{Letterbox, fit_square, fit_square_image};
pub use demo::make_demo_images;
pub use overlay::render_overlay;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to open image {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to write image {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn open_image(path: &Path) -> Result<image::DynamicImage, RenderError> {
    image::open(path).map_err(|source| RenderError::Open {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_image<I>(img: &I, path: &Path) -> Result<(), RenderError>
where
    I: SaveAs,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    img.save_as(path).map_err(|source| RenderError::Save {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote image");
    Ok(())
}

/// Image buffers that can be written to disk by file extension.
pub trait SaveAs {
    fn save_as(&self, path: &Path) -> image::ImageResult<()>;
}

impl SaveAs for image::RgbImage {
    fn save_as(&self, path: &Path) -> image::ImageResult<()> {
        self.save(path)
    }
}

impl SaveAs for image::RgbaImage {
    fn save_as(&self, path: &Path) -> image::ImageResult<()> {
        self.save(path)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/tests.rs"]
mod tests;
