//! Rule illustration lookup.

use std::path::Path;

use crate::config::HighwayCodeConfig;
use crate::error::{HighwayCodeError, Result};
use crate::models::ImageMetadata;

/// Filesystem access needed to describe an image.
pub trait ImageProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Width and height in pixels, read from the file header.
    fn dimensions(&self, path: &Path) -> Result<(u32, u32)>;
}

/// [`ImageProbe`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageProbe;

impl ImageProbe for FsImageProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        image::image_dimensions(path).map_err(|source| HighwayCodeError::Image {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Describe the image `filename` under the configured root and image path.
///
/// An empty name or a missing file is `Ok(None)`.
pub fn resolve_image(
    probe: &dyn ImageProbe,
    config: &HighwayCodeConfig,
    filename: &str,
) -> Result<Option<ImageMetadata>> {
    if filename.is_empty() {
        return Ok(None);
    }

    let file = config.image_file(filename);
    if !probe.exists(&file) {
        tracing::debug!(path = %file.display(), "image not found");
        return Ok(None);
    }

    let (width, height) = probe.dimensions(&file)?;
    Ok(Some(ImageMetadata {
        path: format!("{}{}", config.image_path(), filename),
        width,
        height,
    }))
}
