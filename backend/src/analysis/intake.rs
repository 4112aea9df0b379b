use std::io::Cursor;

use image::ImageReader;

use super::AnalysisError;

const IMAGE_MEDIA_PREFIX: &str = "image/";

/// One uploaded file as received from the client. Lives for a single request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    /// Client-declared media type, empty when none was sent.
    pub content_type: String,
    pub file_name: Option<String>,
}

impl UploadedImage {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>, file_name: Option<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
            file_name,
        }
    }
}

/// Bytes that passed intake: declared as an image and structurally readable.
#[derive(Debug)]
pub struct ValidatedImage {
    bytes: Vec<u8>,
}

impl ValidatedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Skips intake; lets tests reach the extractor's fallback path.
    #[cfg(test)]
    pub(crate) fn unchecked(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

/// Checks presence, then declared type, then structure. The first failing
/// check decides the rejection.
pub fn validate(upload: Option<UploadedImage>) -> Result<ValidatedImage, AnalysisError> {
    let upload = upload.ok_or(AnalysisError::MissingFile)?;

    if !upload.content_type.starts_with(IMAGE_MEDIA_PREFIX) {
        return Err(AnalysisError::UnsupportedMediaType {
            content_type: upload.content_type,
        });
    }

    verify_structure(&upload.bytes).map_err(AnalysisError::InvalidImageContent)?;

    Ok(ValidatedImage {
        bytes: upload.bytes,
    })
}

/// Decodes the whole payload so that truncated data and chunk checksum
/// failures are caught here, not only a bad signature or header.
fn verify_structure(bytes: &[u8]) -> image::ImageResult<()> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()
        .map(|_| ())
}
