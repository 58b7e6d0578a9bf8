use axum::{extract::State, Json};
use serde_json::json;
use tracing::info;

use sb_common::Candidate;

use crate::error::ApiError;
use crate::SharedState;

/// Register or replace a user's profile snapshot. The matching engine never
/// mutates profiles; this is the only write path.
pub async fn upsert_profile(
    State(state): State<SharedState>,
    Json(candidate): Json<Candidate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if candidate.user.id != candidate.profile.user_id {
        return Err(ApiError::BadRequest(
            "user id and profile user_id must agree".into(),
        ));
    }
    if candidate.user.name.trim().is_empty() {
        return Err(ApiError::BadRequest("user name is required".into()));
    }

    let user_id = candidate.user.id;
    state.store.upsert(candidate);
    info!(user_id, profiles = state.store.len(), "profile upserted");

    Ok(Json(json!({ "status": "ok", "user_id": user_id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_state;
    use sb_common::{SkillProfile, UserSummary};

    #[tokio::test]
    async fn mismatched_ids_are_rejected() {
        let state = test_state();
        let candidate = Candidate {
            user: UserSummary {
                id: 1,
                name: "Asha".into(),
                ..UserSummary::default()
            },
            profile: SkillProfile {
                user_id: 2,
                ..SkillProfile::default()
            },
        };

        let result = upsert_profile(State(state), Json(candidate)).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn valid_profile_is_stored() {
        let state = test_state();
        let candidate = Candidate {
            user: UserSummary {
                id: 1,
                name: "Asha".into(),
                ..UserSummary::default()
            },
            profile: SkillProfile {
                user_id: 1,
                ..SkillProfile::default()
            },
        };

        upsert_profile(State(state.clone()), Json(candidate))
            .await
            .unwrap();
        assert_eq!(state.store.len(), 1);
    }
}
