use crate::error::OcrError;
use crate::models::{ExtractionResponse, ImageUpload, EXTRACTION_PROMPT, FILE_FIELD};
use crate::services::metrics::{outcome, record_provider_call, record_request};
use crate::services::{self, DecodedImage};
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use service_core::error::AppError;
use std::time::Instant;

/// `POST /ocr`: decode the uploaded image and return the text the model
/// reads from it.
pub async fn extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResponse>, AppError> {
    let upload = read_upload(&mut multipart).await.inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected OCR upload");
        record_request(outcome::REJECTED);
    })?;

    tracing::info!(
        file_name = upload.file_name.as_deref().unwrap_or("-"),
        content_type = upload.content_type.as_deref().unwrap_or("-"),
        size = upload.data.len(),
        "OCR upload received"
    );

    let image = decode_upload(upload).await.inspect_err(|e| {
        tracing::warn!(error = %e, "Upload is not a decodable image");
        record_request(outcome::REJECTED);
    })?;

    tracing::debug!(
        format = ?image.format(),
        width = image.width(),
        height = image.height(),
        "Image decoded"
    );

    let started = Instant::now();
    let result = state.vision_provider.generate(EXTRACTION_PROMPT, &image).await;
    let elapsed = started.elapsed();

    match result {
        Ok(extracted_text) => {
            record_provider_call(elapsed, "ok");
            record_request(outcome::SUCCESS);
            tracing::info!(
                model = state.vision_provider.model(),
                chars = extracted_text.chars().count(),
                ?elapsed,
                "Text extracted"
            );
            Ok(Json(ExtractionResponse { extracted_text }))
        }
        Err(e) => {
            record_provider_call(elapsed, e.kind());
            record_request(outcome::PROVIDER_ERROR);
            tracing::error!(
                model = state.vision_provider.model(),
                kind = e.kind(),
                error = %e,
                "Vision provider call failed"
            );
            Err(OcrError::Inference(e).into())
        }
    }
}

/// Pull the single `file` part out of the multipart body. Other fields are
/// skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<ImageUpload, OcrError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(OcrError::DuplicateFilePart);
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await?;

        upload = Some(ImageUpload {
            file_name,
            content_type,
            data,
        });
    }

    upload.ok_or(OcrError::MissingFilePart)
}

/// Decode on the blocking pool; large images take real CPU time.
async fn decode_upload(upload: ImageUpload) -> Result<DecodedImage, OcrError> {
    let decoded = tokio::task::spawn_blocking(move || services::decode(upload.data))
        .await
        .map_err(|e| OcrError::Internal(anyhow::anyhow!("Image decode task failed: {}", e)))??;
    Ok(decoded)
}
