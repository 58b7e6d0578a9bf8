//! Complementary-skill suggestions and proficiency estimation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::embedding::{cosine_similarity, mean_embedding, EmbeddingGenerator, CATEGORY_COUNT};
use crate::oracle::{GenerationOptions, TextOracle};
use crate::Skill;

const RECOMMENDATION_LIMIT: usize = 5;

/// Matches "1. Skill - Reason" (or "1. Skill: Reason") list lines.
static LIST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s*([^-:]+)[-:]?\s*(.+)?").expect("static pattern compiles"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRecommendation {
    pub skill: String,
    pub reason: String,
}

fn parse_recommendations(text: &str) -> Vec<SkillRecommendation> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .take(RECOMMENDATION_LIMIT)
        .filter_map(|line| {
            let caps = LIST_LINE.captures(line)?;
            Some(SkillRecommendation {
                skill: caps.get(1)?.as_str().trim().to_string(),
                reason: caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "AI-recommended".to_string()),
            })
        })
        .collect()
}

/// Static per-profession suggestions used whenever the oracle is out.
fn fallback_recommendations(profession: Option<&str>) -> Vec<SkillRecommendation> {
    let skills: &[&str] = match profession {
        Some("Frontend Developer") => &[
            "TypeScript",
            "Next.js",
            "Testing",
            "Web Performance",
            "GraphQL",
        ],
        Some("Backend Developer") => &[
            "Docker",
            "Kubernetes",
            "GraphQL",
            "Microservices",
            "Redis",
        ],
        Some("Full Stack Developer") => &[
            "DevOps",
            "Cloud Architecture",
            "System Design",
            "Security",
            "Testing",
        ],
        Some("Mobile Developer") => &["Swift", "Kotlin", "Flutter", "Mobile Testing", "CI/CD"],
        Some("Data Scientist") => &["TensorFlow", "PyTorch", "MLOps", "Big Data", "Cloud ML"],
        Some("DevOps Engineer") => &[
            "Terraform",
            "Ansible",
            "Monitoring",
            "Security",
            "Cloud Native",
        ],
        Some("UI/UX Designer") => &[
            "JavaScript",
            "React",
            "Animation",
            "Accessibility",
            "Design Systems",
        ],
        _ => &["Git", "Docker", "Testing", "Cloud Services", "API Design"],
    };

    let profession = profession.unwrap_or("professional");
    skills
        .iter()
        .map(|skill| SkillRecommendation {
            skill: (*skill).to_string(),
            reason: format!("Valuable for {profession}"),
        })
        .collect()
}

/// Ask the oracle for five complementary skills given the user's profession
/// and skill lists; fall back to the static profession map when the oracle
/// is unavailable or its reply parses to nothing.
pub async fn skill_recommendations(
    profession: Option<&str>,
    offered: &[Skill],
    required: &[Skill],
    oracle: &dyn TextOracle,
) -> Vec<SkillRecommendation> {
    if !oracle.available() {
        return fallback_recommendations(profession);
    }

    let offered_names: Vec<&str> = offered.iter().map(|s| s.name.as_str()).collect();
    let required_names: Vec<&str> = required.iter().map(|s| s.name.as_str()).collect();
    let prompt = format!(
        "You are a career advisor. Given a {} who knows: {} and wants to learn: {}, \
         suggest exactly 5 complementary skills to learn next. Format: 1. Skill - Reason",
        profession.unwrap_or("professional"),
        offered_names.join(", "),
        required_names.join(", "),
    );

    let options = GenerationOptions {
        temperature: 0.8,
        max_output_tokens: 500,
    };
    let Some(response) = oracle.generate(&prompt, &options).await else {
        return fallback_recommendations(profession);
    };

    let parsed = parse_recommendations(&response);
    if parsed.is_empty() {
        debug!("unparseable oracle recommendation reply; using profession fallback");
        return fallback_recommendations(profession);
    }
    parsed
}

/// Similarity-weighted mean of related-skill ratings; 3.0 (intermediate)
/// when no weight accumulates.
pub fn estimate_proficiency(skill_name: &str, related: &[(String, f64)]) -> f64 {
    let generator = EmbeddingGenerator::new();
    let target = generator.embed(skill_name);

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (name, rating) in related {
        let similarity = cosine_similarity(&target, &generator.embed(name)) as f64;
        weighted_sum += similarity * rating;
        total_weight += similarity;
    }

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        3.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySuggestion {
    pub category: &'static str,
    pub priority: &'static str,
    pub suggested_skills: Vec<String>,
}

/// Compare the target skill's embedding against the mean embedding of the
/// user's current skills and surface the three categories with the widest
/// gap, each seeded with its first three keywords.
pub fn category_gap_suggestions(
    target_skill: &str,
    current_skills: &[Skill],
) -> Vec<CategorySuggestion> {
    let generator = EmbeddingGenerator::new();
    let target = generator.embed(target_skill);

    let current: Vec<Vec<f32>> = current_skills
        .iter()
        .map(|s| generator.embed(&s.name))
        .collect();
    let average = mean_embedding(&current);

    let mut gaps: Vec<(usize, f32)> = (0..CATEGORY_COUNT)
        .map(|slot| (slot, (target[slot] - average[slot]).abs()))
        .collect();
    gaps.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    gaps.into_iter()
        .take(3)
        .filter_map(|(slot, gap)| {
            let category = generator.taxonomy().categories().get(slot)?;
            Some(CategorySuggestion {
                category: category.name,
                priority: if gap > 0.3 {
                    "high"
                } else if gap > 0.15 {
                    "medium"
                } else {
                    "low"
                },
                suggested_skills: category
                    .keywords
                    .iter()
                    .take(3)
                    .map(|k| (*k).to_string())
                    .collect(),
            })
        })
        .collect()
}
