use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::json;

use sb_common::matching::rank_teachers;
use sb_common::matching::ranking::candidate_pool_cap;

use super::matches::LimitQuery;
use crate::error::ApiError;
use crate::SharedState;

/// Best teachers for a skill, by proficiency then reputation.
pub async fn find_teachers(
    State(state): State<SharedState>,
    Path(skill_name): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let skill_name = skill_name.trim().to_string();
    if skill_name.is_empty() {
        return Err(ApiError::BadRequest("skill name is required".into()));
    }

    // Exclude nothing: the requester is unknown on this route.
    let pool = state.store.candidates(i64::MIN, candidate_pool_cap());
    let teachers = rank_teachers(&skill_name, &pool, query.limit.clamp(1, 50));

    Ok(Json(json!({
        "skill": skill_name,
        "count": teachers.len(),
        "teachers": teachers,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_state;
    use sb_common::{Candidate, ProficiencyLevel, Skill, SkillProfile, UserSummary};

    #[tokio::test]
    async fn finds_offering_users_ranked_by_score() {
        let state = test_state();
        for (id, level) in [(1, ProficiencyLevel::Beginner), (2, ProficiencyLevel::Expert)] {
            state.store.upsert(Candidate {
                user: UserSummary {
                    id,
                    name: format!("user-{id}"),
                    ..UserSummary::default()
                },
                profile: SkillProfile {
                    user_id: id,
                    offered_skills: vec![Skill::offered("Guitar Lessons", level)],
                    ..SkillProfile::default()
                },
            });
        }

        let response = find_teachers(
            State(state),
            Path("guitar".into()),
            Query(LimitQuery::default()),
        )
        .await
        .unwrap();

        assert_eq!(response.0["count"], 2);
        assert_eq!(response.0["teachers"][0]["user"]["id"], 2);
    }

    #[tokio::test]
    async fn blank_skill_name_is_rejected() {
        let state = test_state();
        let result = find_teachers(
            State(state),
            Path("   ".into()),
            Query(LimitQuery::default()),
        )
        .await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
