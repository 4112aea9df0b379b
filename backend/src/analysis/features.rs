use log::warn;

use super::intake::ValidatedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// Reported when a validated image still fails to decode.
    pub const FALLBACK: Self = Self {
        width: 0,
        height: 0,
    };

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Fully decodes the image and normalizes it to RGB before reading its size.
///
/// Intake has already decoded these bytes once, so failure here is not
/// expected. If it happens anyway it is not surfaced to the client: the
/// result degrades to [`ImageDimensions::FALLBACK`].
pub fn extract_dimensions(image: &ValidatedImage) -> ImageDimensions {
    match image::load_from_memory(image.bytes()) {
        Ok(decoded) => {
            let rgb = decoded.into_rgb8();
            let (width, height) = rgb.dimensions();
            ImageDimensions { width, height }
        }
        Err(e) => {
            warn!("Decode failed after intake, using fallback dimensions: {}", e);
            ImageDimensions::FALLBACK
        }
    }
}
