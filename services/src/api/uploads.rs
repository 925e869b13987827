//! POST /api/upload

use super::AppState;
use super::types::ApiError;
use crate::database::CatalogStore;
use crate::uploads::{allowed_extension, generate_filename, public_url};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use serde::{Deserialize, Serialize};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

const MISSING_IMAGE: &str = "failed to read the image field";
const UNSUPPORTED_FORMAT: &str = "unsupported image format";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub image_url: String,
}

/// Stores the `image` field under a generated name and returns its URL.
///
/// Only the original extension survives; it must be on the allow-list.
pub async fn upload_image<S: CatalogStore>(
    State(state): State<AppState<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::BadRequest(MISSING_IMAGE.to_owned()))?;

    let mut field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(IMAGE_FIELD) => break field,
            Ok(Some(_)) => continue,
            Ok(None) => return Err(ApiError::BadRequest(MISSING_IMAGE.to_owned())),
            Err(e) => {
                tracing::debug!(error = %e, "Multipart body unreadable");
                return Err(ApiError::BadRequest(MISSING_IMAGE.to_owned()));
            }
        }
    };

    let Some(original) = field.file_name().map(str::to_owned) else {
        return Err(ApiError::BadRequest(MISSING_IMAGE.to_owned()));
    };
    let Some(ext) = allowed_extension(&original) else {
        return Err(ApiError::BadRequest(UNSUPPORTED_FORMAT.to_owned()));
    };

    let filename = generate_filename(ext);
    let written = state.uploads.write_stream(&filename, &mut field).await?;
    tracing::info!(%filename, original = %original, bytes = written, "Image stored");

    Ok(Json(UploadResponse {
        image_url: public_url(&filename),
    }))
}
