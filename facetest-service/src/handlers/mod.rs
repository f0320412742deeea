//! HTTP handlers for the FaceTest API.

pub mod age;
pub mod animal;
pub mod catalog;
pub mod health;

use crate::intake::{ImageDataUrl, IntakeError};
use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, Json};
use serde::Deserialize;
use service_core::error::AppError;

/// Body of both analysis endpoints.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image: Option<String>,
}

/// Validate the upload before anything else happens. A body that is not
/// JSON at all is treated like a missing image.
pub(crate) fn accept_image(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<ImageDataUrl, AppError> {
    let image = match payload {
        Ok(Json(AnalyzeRequest { image: Some(image) })) => image,
        Ok(_) => return Err(reject(IntakeError::Missing)),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::info!(error = %rejection, "Upload body over limit");
            return Err(AppError::PayloadTooLarge(
                IntakeError::TooLarge { bytes: 0 }.to_string(),
            ));
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable analysis request body");
            return Err(reject(IntakeError::Missing));
        }
    };

    ImageDataUrl::parse(&image).map_err(reject)
}

fn reject(err: IntakeError) -> AppError {
    tracing::info!(reason = ?err, "Upload rejected");
    AppError::bad_request(err.to_string())
}
