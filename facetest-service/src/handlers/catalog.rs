use crate::catalog::{self, AnimalFace};
use axum::{http::header, response::IntoResponse, Json};

/// `GET /api/animals`: the full animal catalog. Static, so cacheable.
pub async fn list_animals() -> impl IntoResponse {
    let animals: &'static [AnimalFace] = catalog::all();
    (
        [(header::CACHE_CONTROL, "public, max-age=3600")],
        Json(animals),
    )
}
