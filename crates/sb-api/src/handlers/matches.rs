use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use sb_common::matching::ranking::candidate_pool_cap;
use sb_common::matching::{advanced_matches, bidirectional_match, mutual_matches, rank_candidates};

use crate::error::ApiError;
use crate::SharedState;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for LimitQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

const fn default_limit() -> usize {
    10
}

fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, 50)
}

/// Bidirectional match between two stored profiles.
pub async fn match_score(
    State(state): State<SharedState>,
    Path((user_id, other_id)): Path<(i64, i64)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let requester = state.store.get(user_id)?;
    let other = state.store.get(other_id)?;

    let result = bidirectional_match(&requester.profile, &other.profile, &state.matcher).await;

    Ok(Json(json!({
        "user_id": user_id,
        "other_id": other_id,
        "match": result,
    })))
}

/// Ranked candidate list for a requester, best first.
pub async fn recommended(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let requester = state.store.get(user_id)?;
    let pool = state.store.candidates(user_id, candidate_pool_cap());

    let mut ranked = rank_candidates(
        &requester.profile,
        requester.user.address.as_ref(),
        &pool,
        &state.matcher,
    )
    .await;
    ranked.truncate(clamp_limit(query.limit));

    Ok(Json(json!({
        "user_id": user_id,
        "count": ranked.len(),
        "recommendations": ranked,
    })))
}

/// Candidates whose match with the requester is mutual and strong.
pub async fn mutual(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let requester = state.store.get(user_id)?;
    let pool = state.store.candidates(user_id, candidate_pool_cap());

    let mut results = mutual_matches(&requester.profile, &pool, &state.matcher).await;
    results.truncate(clamp_limit(query.limit));

    Ok(Json(json!({
        "user_id": user_id,
        "count": results.len(),
        "mutual_matches": results,
    })))
}

/// Whole-skill-set matching on the local neural path.
pub async fn advanced(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let requester = state.store.get(user_id)?;
    let pool = state.store.candidates(user_id, candidate_pool_cap());

    let matches = advanced_matches(
        &requester.profile,
        &pool,
        &state.neural,
        clamp_limit(query.limit),
    );

    Ok(Json(json!({
        "user_id": user_id,
        "count": matches.len(),
        "matches": matches,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_state;
    use sb_common::{Candidate, Skill, SkillProfile, UserSummary};

    fn seed(state: &crate::SharedState, id: i64, offered: &[&str], required: &[&str]) {
        state.store.upsert(Candidate {
            user: UserSummary {
                id,
                name: format!("user-{id}"),
                ..UserSummary::default()
            },
            profile: SkillProfile {
                user_id: id,
                offered_skills: offered.iter().map(|n| Skill::named(*n)).collect(),
                required_skills: required.iter().map(|n| Skill::named(*n)).collect(),
                ..SkillProfile::default()
            },
        });
    }

    #[tokio::test]
    async fn match_score_requires_both_profiles() {
        let state = test_state();
        seed(&state, 1, &["React"], &["Node.js"]);

        let result = match_score(State(state), Path((1, 2))).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn reciprocal_profiles_are_a_mutual_match() {
        let state = test_state();
        seed(&state, 1, &["React"], &["Node.js"]);
        seed(&state, 2, &["Node.js"], &["React"]);

        let response = match_score(State(state), Path((1, 2))).await.unwrap();
        assert_eq!(response.0["match"]["is_mutual_match"], true);
    }

    #[tokio::test]
    async fn recommended_excludes_the_requester() {
        let state = test_state();
        seed(&state, 1, &["React"], &["Node.js"]);
        seed(&state, 2, &["Node.js"], &["React"]);

        let response = recommended(
            State(state),
            Path(1),
            Query(LimitQuery::default()),
        )
        .await
        .unwrap();

        assert_eq!(response.0["count"], 1);
        assert_eq!(response.0["recommendations"][0]["user"]["id"], 2);
    }

    #[tokio::test]
    async fn mutual_filters_one_sided_candidates() {
        let state = test_state();
        seed(&state, 1, &["React"], &["Node.js"]);
        seed(&state, 2, &["Node.js"], &["React"]);
        seed(&state, 3, &["Node.js"], &["Carpentry"]);

        let response = mutual(State(state), Path(1), Query(LimitQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.0["count"], 1);
        assert_eq!(response.0["mutual_matches"][0]["user"]["id"], 2);
    }

    #[tokio::test]
    async fn advanced_uses_the_neural_path() {
        let state = test_state();
        seed(&state, 1, &["javascript react"], &["python machine learning"]);
        seed(&state, 2, &["python machine learning"], &["javascript react"]);

        let response = advanced(State(state), Path(1), Query(LimitQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.0["count"], 1);
        assert_eq!(response.0["matches"][0]["user"]["id"], 2);
    }
}
