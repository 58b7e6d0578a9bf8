use serde::Serialize;

use crate::similarity::NeuralSimilarity;
use crate::{Candidate, SkillProfile, UserSummary};

/// Candidates whose mean set similarity stays at or below this are dropped.
const OVERALL_THRESHOLD: f64 = 0.3;

/// Up to this many skill names are echoed back per list.
const SKILL_PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct AdvancedScore {
    pub overall: f64,
    /// Requester's required skills against the candidate's offered ones.
    pub can_teach_you: f64,
    /// Candidate's required skills against the requester's offered ones.
    pub can_learn_from: f64,
}

/// One candidate scored by the local neural path over whole skill sets.
#[derive(Debug, Clone, Serialize)]
pub struct AdvancedMatch {
    pub user: UserSummary,
    pub match_score: AdvancedScore,
    pub offered_skills: Vec<String>,
    pub required_skills: Vec<String>,
}

fn skill_names(profile: &SkillProfile, offered: bool) -> Vec<String> {
    let list = if offered {
        &profile.offered_skills
    } else {
        &profile.required_skills
    };
    list.iter().map(|s| s.name.clone()).collect()
}

/// Score every candidate with the local neural path, entirely in-process.
/// Forward direction is what the candidate could teach the requester,
/// backward is the reverse; overall is their mean. Candidates below 0.3
/// are dropped, the rest come back sorted descending and truncated.
pub fn advanced_matches(
    requester: &SkillProfile,
    candidates: &[Candidate],
    neural: &NeuralSimilarity,
    limit: usize,
) -> Vec<AdvancedMatch> {
    let my_offered = skill_names(requester, true);
    let my_required = skill_names(requester, false);

    let mut matches: Vec<AdvancedMatch> = candidates
        .iter()
        .filter_map(|candidate| {
            let their_offered = skill_names(&candidate.profile, true);
            let their_required = skill_names(&candidate.profile, false);

            let forward = neural.user_similarity(&my_required, &their_offered);
            let backward = neural.user_similarity(&their_required, &my_offered);
            let overall = (forward + backward) / 2.0;

            if overall <= OVERALL_THRESHOLD {
                return None;
            }

            Some(AdvancedMatch {
                user: candidate.user.clone(),
                match_score: AdvancedScore {
                    overall,
                    can_teach_you: forward,
                    can_learn_from: backward,
                },
                offered_skills: their_offered.into_iter().take(SKILL_PREVIEW_LIMIT).collect(),
                required_skills: their_required
                    .into_iter()
                    .take(SKILL_PREVIEW_LIMIT)
                    .collect(),
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.match_score
            .overall
            .partial_cmp(&a.match_score.overall)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(limit);
    matches
}
