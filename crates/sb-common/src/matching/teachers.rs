use serde::Serialize;

use crate::{Candidate, ProficiencyLevel, Skill, UserSummary};

/// Exchange volume stops contributing beyond this many trades.
const EXCHANGE_SCORE_CAP: u32 = 10;

/// One user who offers a skill matching the query, with the matching skill
/// echoed back and a flat teaching score.
#[derive(Debug, Clone, Serialize)]
pub struct TeacherMatch {
    pub user: UserSummary,
    pub skill: Skill,
    pub rating: f64,
    pub total_exchanges: u32,
    pub teacher_score: f64,
}

fn proficiency_score(level: Option<ProficiencyLevel>) -> f64 {
    match level {
        Some(ProficiencyLevel::Expert) => 3.0,
        Some(ProficiencyLevel::Intermediate) => 2.0,
        Some(ProficiencyLevel::Beginner) => 1.0,
        None => 0.0,
    }
}

fn matches_query(skill: &Skill, query: &str) -> bool {
    skill.name.to_lowercase().contains(query)
}

/// Rank users who offer a skill whose name contains `skill_name`
/// (case-insensitive). Proficiency dominates, then rating, then a capped
/// exchange-volume bonus; descending, truncated to `limit`.
pub fn rank_teachers(skill_name: &str, candidates: &[Candidate], limit: usize) -> Vec<TeacherMatch> {
    let query = skill_name.to_lowercase();

    let mut teachers: Vec<TeacherMatch> = candidates
        .iter()
        .filter_map(|candidate| {
            let skill = candidate
                .profile
                .offered_skills
                .iter()
                .find(|s| matches_query(s, &query))?;

            let profile = &candidate.profile;
            let score = proficiency_score(skill.proficiency_level) * 30.0
                + profile.rating * 14.0
                + profile.total_exchanges.min(EXCHANGE_SCORE_CAP) as f64 * 2.0;

            Some(TeacherMatch {
                user: candidate.user.clone(),
                skill: skill.clone(),
                rating: profile.rating,
                total_exchanges: profile.total_exchanges,
                teacher_score: score,
            })
        })
        .collect();

    teachers.sort_by(|a, b| {
        b.teacher_score
            .partial_cmp(&a.teacher_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    teachers.truncate(limit);
    teachers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkillProfile;

    fn teacher(id: i64, skill: Skill, rating: f64, exchanges: u32) -> Candidate {
        Candidate {
            user: UserSummary {
                id,
                name: format!("user-{id}"),
                ..UserSummary::default()
            },
            profile: SkillProfile {
                user_id: id,
                offered_skills: vec![skill],
                rating,
                total_exchanges: exchanges,
                ..SkillProfile::default()
            },
        }
    }

    #[test]
    fn skill_name_match_is_case_insensitive_substring() {
        let pool = vec![
            teacher(1, Skill::named("Guitar Lessons"), 0.0, 0),
            teacher(2, Skill::named("Piano"), 0.0, 0),
        ];

        let found = rank_teachers("guitar", &pool, 10);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].user.id, 1);
        assert_eq!(found[0].skill.name, "Guitar Lessons");
    }

    #[test]
    fn proficiency_outweighs_rating_and_volume() {
        let pool = vec![
            teacher(
                1,
                Skill::offered("Spanish", ProficiencyLevel::Beginner),
                5.0,
                10,
            ),
            teacher(
                2,
                Skill::offered("Spanish", ProficiencyLevel::Expert),
                0.0,
                0,
            ),
        ];

        let found = rank_teachers("spanish", &pool, 10);
        // 1*30 + 5*14 + 10*2 = 120 beats 3*30 = 90.
        assert_eq!(found[0].user.id, 1);
        assert_eq!(found[0].teacher_score, 120.0);
        assert_eq!(found[1].teacher_score, 90.0);
    }

    #[test]
    fn exchange_bonus_is_capped() {
        let few = teacher(1, Skill::named("Chess"), 0.0, 10);
        let many = teacher(2, Skill::named("Chess"), 0.0, 500);

        let found = rank_teachers("chess", &[few, many], 10);
        assert_eq!(found[0].teacher_score, found[1].teacher_score);
        assert_eq!(found[0].teacher_score, 20.0);
    }

    #[test]
    fn results_respect_limit() {
        let pool: Vec<Candidate> = (0..8)
            .map(|i| teacher(i, Skill::named("Yoga"), i as f64 / 2.0, 0))
            .collect();

        let found = rank_teachers("yoga", &pool, 3);
        assert_eq!(found.len(), 3);
        assert!(found.windows(2).all(|w| w[0].teacher_score >= w[1].teacher_score));
    }

    #[test]
    fn no_offering_users_gives_empty_result() {
        let pool = vec![teacher(1, Skill::named("Painting"), 5.0, 10)];
        assert!(rank_teachers("welding", &pool, 10).is_empty());
    }
}
