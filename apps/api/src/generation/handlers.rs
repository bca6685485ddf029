//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::form::{build_prompt, GenerateRequest};
use crate::generation::pipeline::generate_document;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// The repaired document as a JSON string; the form client parses it.
    pub result: String,
}

/// POST /api/generate
///
/// Renders the form record into the generation prompt and runs the
/// two-attempt pipeline. Malformed bodies are rejected by the extractor
/// before this runs; exhausted attempts surface as a 500 with details.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let prompt = build_prompt(&request);
    let result = generate_document(state.llm.as_ref(), &prompt).await?;

    Ok(Json(GenerateResponse { result }))
}
