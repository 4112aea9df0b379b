pub mod features;
pub mod intake;
pub mod scoring;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::debug;
use shared::{AnalysisResult, ErrorDetail, MOCK_SOURCE};

use features::{extract_dimensions, ImageDimensions};
use intake::UploadedImage;
use scoring::Score;

/// Rejections raised at intake. The display text is the client-facing detail.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("file required")]
    MissingFile,
    #[error("Only image files allowed")]
    UnsupportedMediaType { content_type: String },
    #[error("Invalid image file")]
    InvalidImageContent(#[source] image::ImageError),
}

impl ResponseError for AnalysisError {
    fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::MissingFile | AnalysisError::InvalidImageContent(_) => {
                StatusCode::BAD_REQUEST
            }
            AnalysisError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

/// Runs intake, feature extraction and scoring for one upload.
pub fn analyze(upload: Option<UploadedImage>) -> Result<AnalysisResult, AnalysisError> {
    let image = intake::validate(upload)?;
    let dimensions = extract_dimensions(&image);
    let score = Score::from_dimensions(dimensions);
    debug!(
        "Raw score {} for {}x{}",
        score.raw(),
        dimensions.width,
        dimensions.height
    );
    Ok(assemble(score, dimensions))
}

fn assemble(score: Score, dimensions: ImageDimensions) -> AnalysisResult {
    AnalysisResult {
        label: score.label(),
        severity: score.severity(),
        confidence: score.confidence(),
        width: dimensions.width,
        height: dimensions.height,
        source: MOCK_SOURCE.to_string(),
    }
}
