use serde::Serialize;
use tracing::debug;

use super::prerequisites::{analyze_prerequisites, Phase, Prerequisite};
use crate::similarity::NeuralSimilarity;
use crate::{Candidate, ProficiencyLevel, Skill};

/// A prerequisite counts as already covered above this similarity.
const GAP_THRESHOLD: f64 = 0.4;

/// Existing skills this close to the target are worth leaning on.
const LEVERAGE_THRESHOLD: f64 = 0.25;

#[derive(Debug, Clone, Serialize)]
pub struct PhaseSkill {
    pub skill: String,
    pub reason: String,
    pub priority: &'static str,
    pub estimated_time: String,
    pub similarity_to_target: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningPhase {
    pub phase: usize,
    pub title: String,
    pub description: String,
    pub duration: &'static str,
    pub skills: Vec<PhaseSkill>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub start_with: String,
    pub focus_areas: Vec<String>,
    pub leverage_existing: Vec<String>,
    pub study_approach: &'static str,
    pub estimated_time_to_target: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapAnalysis {
    pub total_prerequisites: usize,
    pub skills_you_have: usize,
    pub skills_to_learn: usize,
    pub estimated_total_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningPath {
    pub target_skill: String,
    pub readiness_score: i32,
    pub readiness_level: &'static str,
    pub current_skills_count: usize,
    pub learning_path: Vec<LearningPhase>,
    pub recommendations: Recommendations,
    pub gap_analysis: GapAnalysis,
}

struct CoveredPrerequisite {
    prerequisite: Prerequisite,
    matched_with: Option<String>,
}

/// Broad skill names imply a family of specifics the similarity score alone
/// would miss ("Web Development" covers HTML even though the strings barely
/// overlap).
fn broad_skill_covers(user_skill: &str, prereq: &str) -> bool {
    let implies = |names: &[&str], covered: &[&str]| {
        names.iter().any(|n| user_skill.contains(n))
            && covered.iter().any(|c| prereq.contains(c))
    };

    implies(
        &["web development", "full stack"],
        &["html", "css", "javascript", "frontend"],
    ) || implies(
        &["frontend", "front-end"],
        &["html", "css", "javascript", "react", "vue", "ui"],
    ) || implies(
        &["backend", "back-end"],
        &["node", "database", "api", "server"],
    )
}

fn split_gap(
    prerequisites: Vec<Prerequisite>,
    current_skills: &[String],
    neural: &NeuralSimilarity,
) -> (Vec<CoveredPrerequisite>, Vec<Prerequisite>) {
    let mut covered = Vec::new();
    let mut missing = Vec::new();

    for prereq in prerequisites {
        let prereq_lower = prereq.skill.to_lowercase();
        let mut is_covered = false;
        let mut max_similarity = 0.0f64;
        let mut matched_with = None;

        for user_skill in current_skills {
            let user_lower = user_skill.to_lowercase();
            let similarity = neural.score_sync(&user_lower, &prereq_lower);

            if similarity > max_similarity {
                max_similarity = similarity;
                matched_with = Some(user_skill.clone());
            }

            if similarity > GAP_THRESHOLD || broad_skill_covers(&user_lower, &prereq_lower) {
                is_covered = true;
                break;
            }
        }

        if is_covered {
            covered.push(CoveredPrerequisite {
                prerequisite: prereq,
                matched_with,
            });
        } else {
            missing.push(prereq);
        }
    }

    (covered, missing)
}

fn phase_skills(
    missing: &[Prerequisite],
    phase: Phase,
    priority: &'static str,
    target: &str,
    neural: &NeuralSimilarity,
) -> Vec<PhaseSkill> {
    let mut skills: Vec<PhaseSkill> = missing
        .iter()
        .filter(|p| p.phase == phase)
        .map(|p| PhaseSkill {
            skill: p.skill.clone(),
            reason: p.reason.clone(),
            priority,
            estimated_time: p.estimated_time.to_string(),
            similarity_to_target: neural.score_sync(&p.skill, target),
        })
        .collect();

    skills.sort_by(|a, b| {
        b.similarity_to_target
            .partial_cmp(&a.similarity_to_target)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    skills
}

fn study_approach(readiness: f64) -> &'static str {
    if readiness > 70.0 {
        "You have a strong foundation! Focus on specialized aspects and practical projects."
    } else if readiness > 40.0 {
        "Build core prerequisites first, then move to hands-on practice."
    } else if readiness > 20.0 {
        "You have some foundational knowledge. Focus on filling gaps and building core skills."
    } else {
        "Start with fundamentals and gradually progress to more advanced topics."
    }
}

/// Leading integer of a duration string like "2-4 weeks".
fn leading_weeks(duration: &str) -> u32 {
    duration
        .split('-')
        .next()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

/// Build a phased learning plan toward a target skill from the user's
/// current skill set. Entirely local: prerequisite tables plus the neural
/// similarity path, no oracle involved.
pub fn build_learning_path(
    target_skill: &str,
    current_skills: &[Skill],
    neural: &NeuralSimilarity,
) -> LearningPath {
    let skill_names: Vec<String> = current_skills.iter().map(|s| s.name.clone()).collect();

    let prerequisites = analyze_prerequisites(target_skill);
    let total_prerequisites = prerequisites.len();
    let (covered, missing) = split_gap(prerequisites, &skill_names, neural);

    let readiness =
        (covered.len() as f64 / total_prerequisites.max(1) as f64 * 100.0).min(100.0);

    let mut phases = Vec::new();
    let foundation = phase_skills(&missing, Phase::Foundation, "HIGH", target_skill, neural);
    if !foundation.is_empty() {
        phases.push(LearningPhase {
            phase: 1,
            title: "Foundation Skills".to_string(),
            description: format!("Build fundamental knowledge required for {target_skill}"),
            duration: "2-4 weeks",
            skills: foundation,
        });
    }
    let core = phase_skills(&missing, Phase::Core, "CRITICAL", target_skill, neural);
    if !core.is_empty() {
        phases.push(LearningPhase {
            phase: 2,
            title: "Core Prerequisites".to_string(),
            description: format!("Essential skills directly related to {target_skill}"),
            duration: "4-6 weeks",
            skills: core,
        });
    }
    let advanced = phase_skills(&missing, Phase::Advanced, "MEDIUM", target_skill, neural);
    if !advanced.is_empty() {
        phases.push(LearningPhase {
            phase: 3,
            title: "Advanced Concepts".to_string(),
            description: format!("Specialized knowledge for mastering {target_skill}"),
            duration: "3-5 weeks",
            skills: advanced,
        });
    }
    phases.push(LearningPhase {
        phase: phases.len() + 1,
        title: format!("Master {target_skill}"),
        description: "Hands-on practice and real-world application".to_string(),
        duration: "6-8 weeks",
        skills: vec![PhaseSkill {
            skill: target_skill.to_string(),
            reason: "Your target skill - focus on practical projects and real-world scenarios"
                .to_string(),
            priority: "TARGET",
            estimated_time: "Ongoing".to_string(),
            similarity_to_target: 1.0,
        }],
    });

    let total_weeks: u32 = phases.iter().map(|p| leading_weeks(p.duration)).sum();
    let estimated_time = format!(
        "{total_weeks}-{} weeks with consistent practice",
        total_weeks + 4
    );

    let mut leverage: Vec<String> = skill_names
        .iter()
        .filter(|name| neural.score_sync(name, target_skill) > LEVERAGE_THRESHOLD)
        .cloned()
        .take(5)
        .collect();
    for matched in covered.iter().filter_map(|c| c.matched_with.clone()) {
        if !leverage.contains(&matched) {
            leverage.push(matched);
        }
    }
    leverage.truncate(5);

    let recommendations = Recommendations {
        start_with: phases
            .first()
            .and_then(|p| p.skills.first())
            .map(|s| s.skill.clone())
            .unwrap_or_else(|| target_skill.to_string()),
        focus_areas: missing
            .iter()
            .filter(|p| p.phase == Phase::Core)
            .map(|p| p.skill.clone())
            .take(3)
            .collect(),
        leverage_existing: leverage,
        study_approach: study_approach(readiness),
        estimated_time_to_target: estimated_time.clone(),
    };

    debug!(
        target = target_skill,
        readiness = readiness.round(),
        missing = missing.len(),
        "built learning path"
    );

    LearningPath {
        target_skill: target_skill.to_string(),
        readiness_score: readiness.round() as i32,
        readiness_level: if readiness > 70.0 {
            "Ready"
        } else if readiness > 40.0 {
            "Moderate"
        } else {
            "Beginner"
        },
        current_skills_count: current_skills.len(),
        learning_path: phases,
        recommendations,
        gap_analysis: GapAnalysis {
            total_prerequisites,
            skills_you_have: covered.len(),
            skills_to_learn: missing.len(),
            estimated_total_time: estimated_time,
        },
    }
}

/// Users who offer the target skill (substring, case-insensitive) at
/// intermediate level or better, with the matching proficiency echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct Mentor {
    pub id: i64,
    pub name: String,
    pub profession: Option<String>,
    pub profile_image: Option<String>,
    pub skill_level: ProficiencyLevel,
    pub rating: f64,
}

pub fn find_mentors(target_skill: &str, candidates: &[Candidate], limit: usize) -> Vec<Mentor> {
    let target_lower = target_skill.to_lowercase();

    candidates
        .iter()
        .filter_map(|candidate| {
            let skill = candidate.profile.offered_skills.iter().find(|s| {
                s.name.to_lowercase().contains(&target_lower)
                    && matches!(
                        s.proficiency_level,
                        Some(ProficiencyLevel::Intermediate) | Some(ProficiencyLevel::Expert)
                    )
            })?;

            Some(Mentor {
                id: candidate.user.id,
                name: candidate.user.name.clone(),
                profession: candidate.user.profession.clone(),
                profile_image: candidate.user.profile_image.clone(),
                skill_level: skill
                    .proficiency_level
                    .unwrap_or(ProficiencyLevel::Intermediate),
                rating: candidate.profile.rating,
            })
        })
        .take(limit)
        .collect()
}
