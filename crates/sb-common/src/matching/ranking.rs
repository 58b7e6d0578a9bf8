use serde::Serialize;
use tracing::debug;

use super::aggregator::{bidirectional_match, BidirectionalMatch, MatchResult};
use crate::similarity::SimilarityStrategy;
use crate::{Address, Candidate, SkillProfile, UserSummary};

/// Candidates fetched for one ranking pass are capped before scoring. The cap
/// is a performance bound, not a correctness property: when more candidates
/// exist than the cap, the pool the storage collaborator hands over decides
/// who can appear in the results at all.
pub const DEFAULT_CANDIDATE_POOL_CAP: usize = 50;

pub fn candidate_pool_cap() -> usize {
    std::env::var("SB_CANDIDATE_POOL_CAP")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|cap| *cap > 0)
        .unwrap_or(DEFAULT_CANDIDATE_POOL_CAP)
}

/// One scored candidate, built per ranking request and never persisted.
/// Ordering by `ai_score` descending is the only guaranteed property.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub user: UserSummary,
    pub profile: SkillProfile,
    /// Composite score in [0, 100].
    pub ai_score: f64,
    pub match_percentage: i32,
    pub can_teach: Vec<MatchResult>,
    pub can_learn: Vec<MatchResult>,
    pub is_mutual_match: bool,
    pub recommendation: String,
}

/// Additive composition, each term capped:
/// skill match ×40, rating ×20, exchange volume ×20, geography +10/+5,
/// activity ×10; total clamped to 100.
fn score_candidate(
    skill_match: &BidirectionalMatch,
    candidate: &Candidate,
    requester_address: Option<&Address>,
) -> f64 {
    let profile = &candidate.profile;
    let mut score = skill_match.overall_score * 40.0;

    score += (profile.rating / 5.0) * 20.0;
    score += (profile.total_exchanges as f64 / 20.0).min(1.0) * 20.0;

    // City takes priority over country; the bonuses are mutually exclusive.
    if let (Some(requester), Some(candidate)) = (requester_address, candidate.user.address.as_ref())
    {
        if requester.city.is_some() && requester.city == candidate.city {
            score += 10.0;
        } else if requester.country.is_some() && requester.country == candidate.country {
            score += 5.0;
        }
    }

    let activity = (2 * profile.metrics.completed_requests + profile.metrics.accepted_requests)
        as f64
        / 50.0;
    score += activity.min(1.0) * 10.0;

    score.min(100.0)
}

/// Fixed threshold ladder for the human-readable verdict.
pub fn recommendation_text(score: f64) -> &'static str {
    if score >= 80.0 {
        "Excellent match! Highly recommended."
    } else if score >= 60.0 {
        "Great match! Good skill alignment."
    } else if score >= 40.0 {
        "Good match! Some overlap in skills."
    } else if score >= 20.0 {
        "Potential match. Limited overlap."
    } else {
        "Low match. Consider other users."
    }
}

/// Score and order a candidate pool for one requester.
///
/// Candidates are evaluated in the order given; the sort is stable, so ties
/// keep their enumeration order and re-running with the oracle disabled is
/// fully deterministic.
pub async fn rank_candidates(
    requester: &SkillProfile,
    requester_address: Option<&Address>,
    candidates: &[Candidate],
    strategy: &dyn SimilarityStrategy,
) -> Vec<RankedCandidate> {
    let mut ranked = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let skill_match = bidirectional_match(requester, &candidate.profile, strategy).await;
        let ai_score = score_candidate(&skill_match, candidate, requester_address);

        ranked.push(RankedCandidate {
            user: candidate.user.clone(),
            profile: candidate.profile.clone(),
            ai_score,
            match_percentage: skill_match.match_percentage,
            is_mutual_match: skill_match.is_mutual_match,
            recommendation: recommendation_text(ai_score).to_string(),
            can_teach: skill_match.can_teach,
            can_learn: skill_match.can_learn,
        });
    }

    ranked.sort_by(|a, b| {
        b.ai_score
            .partial_cmp(&a.ai_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        requester = requester.user_id,
        candidates = candidates.len(),
        strategy = strategy.name(),
        "ranked candidate pool"
    );
    ranked
}
