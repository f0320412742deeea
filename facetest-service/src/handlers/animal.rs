use super::{accept_image, AnalyzeRequest};
use crate::analysis::animal::AnimalAnalysis;
use crate::startup::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// `POST /api/animal`: which animal does the person in the photo look like.
#[tracing::instrument(name = "analyze_animal", skip_all)]
pub async fn analyze_animal(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnimalAnalysis>, AppError> {
    let image = accept_image(payload)?;
    let result = state.analyzer.animal(&image).await?;

    tracing::info!(
        animal = result.main_match.animal.id,
        similarity = ?result.main_match.similarity,
        "Animal analysis served"
    );

    Ok(Json(result))
}
