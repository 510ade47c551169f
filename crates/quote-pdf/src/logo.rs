//! Company logo loading
//!
//! The logo is optional decoration, decoded once when the server starts.
//! [`LogoImage::load_or_skip`] cannot fail: an unreadable or undecodable
//! file is logged and documents are drawn without a logo.

use std::path::Path;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use crate::canvas::{ImageHandle, PdfCanvas};
use crate::error::RenderError;

/// Decoded logo pixels ready for embedding
#[derive(Debug, Clone)]
pub struct LogoImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl LogoImage {
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let image = image::open(path)
            .map_err(|e| RenderError::ImageError(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_image(image))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let mut rgb = Vec::with_capacity((width * height * 3) as usize);
            let mut alpha = Vec::with_capacity((width * height) as usize);
            for px in rgba.pixels() {
                rgb.extend_from_slice(&px.0[..3]);
                alpha.push(px.0[3]);
            }
            Self {
                width,
                height,
                rgb,
                alpha: Some(alpha),
            }
        } else {
            Self {
                width,
                height,
                rgb: image.to_rgb8().into_raw(),
                alpha: None,
            }
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Decode `path`, or log why not and return `None`
    pub fn load_or_skip(path: &Path) -> Option<Self> {
        match Self::load(path) {
            Ok(logo) => {
                debug!("Loaded logo {:?} from {}", logo.dimensions(), path.display());
                Some(logo)
            }
            Err(e) => {
                warn!("Logo unavailable, rendering without it: {}", e);
                None
            }
        }
    }

    pub(crate) fn embed(&self, canvas: &mut PdfCanvas) -> ImageHandle {
        canvas.embed_image(self.width, self.height, self.rgb.clone(), self.alpha.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_load_png_with_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 128]))
            .save(&path)
            .unwrap();

        let logo = LogoImage::load(&path).unwrap();
        assert_eq!(logo.dimensions(), (4, 2));
        assert!(logo.has_alpha());
        assert_eq!(&logo.rgb[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_opaque_image_has_no_mask() {
        let logo = LogoImage::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            3,
            3,
            Rgb([1, 2, 3]),
        )));
        assert!(!logo.has_alpha());
        assert_eq!(logo.rgb.len(), 27);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = LogoImage::load(Path::new("/nonexistent/logo.jpg"));
        assert!(matches!(result, Err(RenderError::ImageError(_))));
    }

    #[test]
    fn test_load_or_skip_swallows_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();

        assert!(LogoImage::load_or_skip(&path).is_none());
        assert!(LogoImage::load_or_skip(&dir.path().join("missing.png")).is_none());
    }

    #[test]
    fn test_embed_reuses_decoded_pixels() {
        let logo = LogoImage::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            2,
            2,
            Rgb([9, 9, 9]),
        )));
        let mut canvas = PdfCanvas::new();
        assert_eq!(logo.embed(&mut canvas).name(), "Im1");
        assert_eq!(logo.embed(&mut canvas).name(), "Im2");
        assert_eq!(logo.rgb.len(), 12);
    }
}
