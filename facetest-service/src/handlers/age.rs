use super::{accept_image, AnalyzeRequest};
use crate::analysis::age::AgeAnalysis;
use crate::startup::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// `POST /api/age`: how old does the person in the photo look.
#[tracing::instrument(name = "analyze_age", skip_all)]
pub async fn analyze_age(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AgeAnalysis>, AppError> {
    let image = accept_image(payload)?;
    let result = state.analyzer.age(&image).await?;

    tracing::info!(
        estimated_age = result.estimated_age,
        confidence = ?result.confidence_level,
        "Age analysis served"
    );

    Ok(Json(result))
}
