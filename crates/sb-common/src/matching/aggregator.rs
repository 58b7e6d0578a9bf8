use serde::{Deserialize, Serialize};

use crate::similarity::SimilarityStrategy;
use crate::{Candidate, LearningPriority, ProficiencyLevel, Skill, SkillProfile, UserSummary};

/// A cross-pair qualifies only above this score.
const SKILL_MATCH_THRESHOLD: f64 = 0.5;

/// Each direction of a bidirectional match is truncated to its best 5 pairs.
const DIRECTION_LIMIT: usize = 5;

/// Mutual-match listings keep only pairings whose overall score clears this.
const MUTUAL_MATCH_THRESHOLD: f64 = 0.5;

/// The slice of a [`Skill`] echoed back in match results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRef {
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proficiency_level: Option<ProficiencyLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_priority: Option<LearningPriority>,
}

impl From<&Skill> for SkillRef {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name.clone(),
            proficiency_level: skill.proficiency_level,
            learning_priority: skill.learning_priority,
        }
    }
}

/// One qualifying (offered, required) cross-pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub offered_skill: SkillRef,
    pub required_skill: SkillRef,
    pub match_score: f64,
    pub match_percentage: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidirectionalMatch {
    /// What the first user can teach the second, best first.
    pub can_teach: Vec<MatchResult>,
    /// What the first user can learn from the second, best first.
    pub can_learn: Vec<MatchResult>,
    pub overall_score: f64,
    pub match_percentage: i32,
    pub is_mutual_match: bool,
}

/// Composite text representation of a skill for similarity scoring:
/// name, proficiency/priority, description, and categories.
pub fn composite_text(skill: &Skill) -> String {
    let mut parts = vec![skill.name.clone()];

    if let Some(level) = skill.proficiency_level {
        parts.push(level.to_string());
    }
    if let Some(priority) = skill.learning_priority {
        parts.push(priority.to_string());
    }
    if let Some(description) = &skill.description {
        parts.push(description.clone());
    }
    if !skill.categories.is_empty() {
        parts.push(skill.categories.join(" "));
    }

    parts.join(" ")
}

/// Score every (offered, required) cross-pair and keep those above 0.5,
/// sorted descending by score.
pub async fn find_skill_matches(
    offered: &[Skill],
    required: &[Skill],
    strategy: &dyn SimilarityStrategy,
) -> Vec<MatchResult> {
    let mut matches = Vec::new();

    for offered_skill in offered {
        let offered_text = composite_text(offered_skill);
        for required_skill in required {
            let required_text = composite_text(required_skill);

            let score = strategy.score(&offered_text, &required_text).await;
            if score > SKILL_MATCH_THRESHOLD {
                matches.push(MatchResult {
                    offered_skill: SkillRef::from(offered_skill),
                    required_skill: SkillRef::from(required_skill),
                    match_score: score,
                    match_percentage: (score * 100.0).round() as i32,
                });
            }
        }
    }

    matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}

/// Evaluate both directions between two profiles. The overall score is the
/// mean over every qualifying pair in either direction (0 when there are
/// none); the match is mutual only when both directions are non-empty.
pub async fn bidirectional_match(
    profile1: &SkillProfile,
    profile2: &SkillProfile,
    strategy: &dyn SimilarityStrategy,
) -> BidirectionalMatch {
    let matches_1_to_2 =
        find_skill_matches(&profile1.offered_skills, &profile2.required_skills, strategy).await;
    let matches_2_to_1 =
        find_skill_matches(&profile2.offered_skills, &profile1.required_skills, strategy).await;

    let total_matches = matches_1_to_2.len() + matches_2_to_1.len();
    let overall_score = if total_matches == 0 {
        0.0
    } else {
        let sum: f64 = matches_1_to_2
            .iter()
            .chain(matches_2_to_1.iter())
            .map(|m| m.match_score)
            .sum();
        sum / total_matches as f64
    };

    let is_mutual_match = !matches_1_to_2.is_empty() && !matches_2_to_1.is_empty();

    BidirectionalMatch {
        can_teach: matches_1_to_2.into_iter().take(DIRECTION_LIMIT).collect(),
        can_learn: matches_2_to_1.into_iter().take(DIRECTION_LIMIT).collect(),
        overall_score,
        match_percentage: (overall_score * 100.0).round() as i32,
        is_mutual_match,
    }
}

/// A candidate whose pairing with the requester is mutual and strong.
#[derive(Debug, Clone, Serialize)]
pub struct MutualMatch {
    pub user: UserSummary,
    pub rating: f64,
    pub total_exchanges: u32,
    #[serde(rename = "match")]
    pub result: BidirectionalMatch,
}

/// Keep candidates where both directions matched and the overall score
/// clears 0.5, sorted by overall score descending.
pub async fn mutual_matches(
    requester: &SkillProfile,
    candidates: &[Candidate],
    strategy: &dyn SimilarityStrategy,
) -> Vec<MutualMatch> {
    let mut results = Vec::new();

    for candidate in candidates {
        let result = bidirectional_match(requester, &candidate.profile, strategy).await;
        if result.is_mutual_match && result.overall_score > MUTUAL_MATCH_THRESHOLD {
            results.push(MutualMatch {
                user: candidate.user.clone(),
                rating: candidate.profile.rating,
                total_exchanges: candidate.profile.total_exchanges,
                result,
            });
        }
    }

    results.sort_by(|a, b| {
        b.result
            .overall_score
            .partial_cmp(&a.result.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::OracleSimilarity;
    use crate::oracle::NullOracle;
    use crate::{LearningPriority, ProficiencyLevel};
    use std::sync::Arc;

    fn lexical_strategy() -> OracleSimilarity {
        // No oracle configured, so every comparison takes the lexical path.
        OracleSimilarity::new(Arc::new(NullOracle))
    }

    fn profile(user_id: i64, offered: &[&str], required: &[&str]) -> SkillProfile {
        SkillProfile {
            user_id,
            offered_skills: offered.iter().map(|n| Skill::named(*n)).collect(),
            required_skills: required.iter().map(|n| Skill::named(*n)).collect(),
            ..SkillProfile::default()
        }
    }

    #[test]
    fn composite_text_includes_all_present_fields() {
        let skill = Skill {
            id: Some(1),
            name: "React".into(),
            proficiency_level: Some(ProficiencyLevel::Expert),
            learning_priority: None,
            description: Some("component UIs".into()),
            categories: vec!["programming".into(), "frontend".into()],
        };

        assert_eq!(
            composite_text(&skill),
            "React expert component UIs programming frontend"
        );
        assert_eq!(composite_text(&Skill::named("Vue")), "Vue");
    }

    #[tokio::test]
    async fn exact_skill_names_match_both_directions() {
        let strategy = lexical_strategy();
        let requester = profile(1, &["React"], &["Node.js"]);
        let candidate = profile(2, &["Node.js"], &["React"]);

        let result = bidirectional_match(&requester, &candidate, &strategy).await;

        assert!(!result.can_teach.is_empty());
        assert!(!result.can_learn.is_empty());
        assert!(result.is_mutual_match);
        assert!(result.overall_score > 0.5, "got {}", result.overall_score);
        assert_eq!(result.match_percentage, 100);
    }

    #[tokio::test]
    async fn unrelated_profiles_do_not_match() {
        let strategy = lexical_strategy();
        let requester = profile(1, &["Photography"], &["Accounting"]);
        let candidate = profile(2, &["Gardening"], &["Carpentry"]);

        let result = bidirectional_match(&requester, &candidate, &strategy).await;

        assert!(result.can_teach.is_empty());
        assert!(result.can_learn.is_empty());
        assert!(!result.is_mutual_match);
        assert_eq!(result.overall_score, 0.0);
    }

    #[tokio::test]
    async fn one_sided_match_is_not_mutual() {
        let strategy = lexical_strategy();
        let requester = profile(1, &["React"], &["Accounting"]);
        let candidate = profile(2, &["Gardening"], &["React"]);

        let result = bidirectional_match(&requester, &candidate, &strategy).await;

        assert!(!result.can_teach.is_empty());
        assert!(result.can_learn.is_empty());
        assert!(!result.is_mutual_match);
    }

    #[tokio::test]
    async fn self_match_with_reciprocal_lists_is_mutual() {
        let strategy = lexical_strategy();
        let me = profile(1, &["Spanish"], &["Spanish"]);

        let result = bidirectional_match(&me, &me, &strategy).await;
        assert!(result.is_mutual_match);
    }

    #[tokio::test]
    async fn matches_are_sorted_descending_and_truncated() {
        let strategy = lexical_strategy();
        let offered: Vec<Skill> = ["guitar lessons"; 7].iter().map(|n| Skill::named(*n)).collect();
        let required = vec![Skill::named("guitar lessons")];

        let matches = find_skill_matches(&offered, &required, &strategy).await;
        assert_eq!(matches.len(), 7);
        assert!(matches.windows(2).all(|w| w[0].match_score >= w[1].match_score));

        let teacher = SkillProfile {
            user_id: 1,
            offered_skills: offered,
            ..SkillProfile::default()
        };
        let learner = SkillProfile {
            user_id: 2,
            required_skills: required,
            ..SkillProfile::default()
        };
        let result = bidirectional_match(&teacher, &learner, &strategy).await;
        assert_eq!(result.can_teach.len(), 5);
    }

    #[tokio::test]
    async fn mutual_matches_filters_and_sorts() {
        let strategy = lexical_strategy();
        let requester = profile(1, &["React"], &["Node.js"]);

        let strong = Candidate {
            user: UserSummary {
                id: 2,
                name: "Asha".into(),
                ..UserSummary::default()
            },
            profile: profile(2, &["Node.js"], &["React"]),
        };
        let one_sided = Candidate {
            user: UserSummary {
                id: 3,
                name: "Noor".into(),
                ..UserSummary::default()
            },
            profile: profile(3, &["Node.js"], &["Carpentry"]),
        };

        let results = mutual_matches(&requester, &[one_sided, strong], &strategy).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].user.id, 2);
    }

    #[tokio::test]
    async fn priority_annotations_do_not_break_exact_matches() {
        let strategy = lexical_strategy();
        let mut requester = profile(1, &[], &[]);
        requester.offered_skills =
            vec![Skill::offered("guitar lessons", ProficiencyLevel::Expert)];
        let mut candidate = profile(2, &[], &[]);
        candidate.required_skills =
            vec![Skill::required("guitar lessons expert", LearningPriority::High)];

        // "guitar lessons expert" contains the offered composite text, so the
        // lexical path scores it 0.9 via substring containment.
        let matches = find_skill_matches(
            &requester.offered_skills,
            &candidate.required_skills,
            &strategy,
        )
        .await;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_percentage, 90);
    }
}
