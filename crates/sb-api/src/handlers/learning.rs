use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use sb_common::learning::{build_learning_path, find_mentors};
use sb_common::matching::ranking::candidate_pool_cap;
use sb_common::recommend::{category_gap_suggestions, estimate_proficiency};
use sb_common::ProficiencyLevel;

use crate::error::ApiError;
use crate::SharedState;

const MENTOR_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct LearningPathRequest {
    pub target_skill: String,
}

#[derive(Debug, Deserialize)]
pub struct ProficiencyRequest {
    pub skill_name: String,
}

/// Phased learning plan toward a target skill, with potential mentors and
/// the widest category gaps.
pub async fn learning_path(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Json(request): Json<LearningPathRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let target = request.target_skill.trim().to_string();
    if target.is_empty() {
        return Err(ApiError::BadRequest("target skill is required".into()));
    }

    let requester = state.store.get(user_id)?;
    let current_skills = &requester.profile.offered_skills;

    let path = build_learning_path(&target, current_skills, &state.neural);

    let pool = state.store.candidates(user_id, candidate_pool_cap());
    let mentors = find_mentors(&target, &pool, MENTOR_LIMIT);
    let category_gaps = category_gap_suggestions(&target, current_skills);

    Ok(Json(json!({
        "user_id": user_id,
        "path": path,
        "mentors_available": mentors,
        "category_gaps": category_gaps,
    })))
}

fn numeric_rating(level: Option<ProficiencyLevel>) -> f64 {
    match level {
        Some(ProficiencyLevel::Expert) => 5.0,
        Some(ProficiencyLevel::Intermediate) => 3.0,
        Some(ProficiencyLevel::Beginner) => 1.0,
        None => 3.0,
    }
}

fn proficiency_label(estimate: f64) -> &'static str {
    if estimate >= 4.0 {
        "Advanced"
    } else if estimate >= 3.0 {
        "Intermediate"
    } else {
        "Beginner"
    }
}

/// Estimate how proficient a user would be at a skill they do not list,
/// weighted by how close it sits to the skills they do.
pub async fn proficiency(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Json(request): Json<ProficiencyRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let skill_name = request.skill_name.trim().to_string();
    if skill_name.is_empty() {
        return Err(ApiError::BadRequest("skill name is required".into()));
    }

    let requester = state.store.get(user_id)?;
    let related: Vec<(String, f64)> = requester
        .profile
        .offered_skills
        .iter()
        .map(|s| (s.name.clone(), numeric_rating(s.proficiency_level)))
        .collect();

    let estimate = estimate_proficiency(&skill_name, &related);
    let rounded = (estimate * 10.0).round() / 10.0;

    Ok(Json(json!({
        "skill_name": skill_name,
        "estimated_proficiency": rounded,
        "proficiency_level": proficiency_label(estimate),
        "based_on_skills": related.len(),
    })))
}

/// Five complementary skills to learn next, oracle-suggested with a static
/// per-profession fallback.
pub async fn skill_recommendations(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let requester = state.store.get(user_id)?;

    let recommendations = sb_common::recommend::skill_recommendations(
        requester.user.profession.as_deref(),
        &requester.profile.offered_skills,
        &requester.profile.required_skills,
        state.oracle.as_ref(),
    )
    .await;

    Ok(Json(json!({
        "user_id": user_id,
        "count": recommendations.len(),
        "recommendations": recommendations,
    })))
}
