use actix_multipart::Multipart;
use actix_web::{http::header, web, HttpResponse};
use chrono::Utc;
use futures::{StreamExt, TryStreamExt};
use log::{debug, info, warn};
use shared::HealthStatus;
use uuid::Uuid;

use crate::analysis::{self, intake::UploadedImage, AnalysisError};

const FILE_FIELD: &str = "file";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/analyze").route(web::post().to(handle_analyze)));
}

async fn health() -> HttpResponse {
    let time = Utc::now().timestamp_micros() as f64 / 1_000_000.0;
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        time,
    })
}

async fn handle_analyze(payload: Multipart) -> Result<HttpResponse, AnalysisError> {
    let request_id = Uuid::new_v4();
    let upload = read_upload(payload).await;
    let file_name = upload
        .as_ref()
        .and_then(|u| u.file_name.clone())
        .unwrap_or_else(|| "<unnamed>".to_string());

    match analysis::analyze(upload) {
        Ok(result) => {
            info!(
                "[{}] Analyzed {}: {}x{} -> {} (severity {}, confidence {})",
                request_id,
                file_name,
                result.width,
                result.height,
                result.label,
                result.severity,
                result.confidence
            );
            Ok(HttpResponse::Ok().json(result))
        }
        Err(e) => {
            warn!("[{}] Rejected upload {}: {:?}", request_id, file_name, e);
            Err(e)
        }
    }
}

/// Drains every part of the form and keeps the first complete `file` field.
///
/// A broken or non-multipart body ends the read early; whatever was fully
/// received by then is what intake sees.
async fn read_upload(mut payload: Multipart) -> Option<UploadedImage> {
    let mut upload = None;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                debug!("Stopped reading multipart payload: {}", e);
                break;
            }
        };

        let is_file = upload.is_none() && field.name() == Some(FILE_FIELD);
        let content_type = field
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);
        debug!(
            "Reading multipart field {:?} (content type {:?}, keep: {})",
            field.name(),
            content_type,
            is_file
        );

        let mut bytes = Vec::new();
        let mut complete = true;
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) if is_file => bytes.extend_from_slice(&data),
                Ok(_) => {}
                Err(e) => {
                    debug!("Multipart field ended early: {}", e);
                    complete = false;
                    break;
                }
            }
        }
        if !complete {
            break;
        }

        if is_file {
            upload = Some(UploadedImage::new(bytes, content_type, file_name));
        }
    }

    upload
}
