use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::SharedState;

#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub skill1: String,
    pub skill2: String,
}

fn interpretation(score: f64) -> &'static str {
    if score > 0.7 {
        "Highly Similar"
    } else if score > 0.4 {
        "Moderately Similar"
    } else {
        "Different"
    }
}

/// Local neural similarity between two skill names.
pub async fn score(
    State(state): State<SharedState>,
    Json(request): Json<SimilarityRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.skill1.trim().is_empty() || request.skill2.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "both skill names are required".into(),
        ));
    }

    let similarity = state.neural.score_sync(&request.skill1, &request.skill2);

    Ok(Json(json!({
        "skill1": request.skill1,
        "skill2": request.skill2,
        "similarity_score": similarity,
        "interpretation": interpretation(similarity),
    })))
}
