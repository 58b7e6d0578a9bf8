pub mod embedding;
pub mod learning;
pub mod logging;
pub mod matching;
pub mod oracle;
pub mod recommend;
pub mod similarity;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Self-assessed level attached to an offered skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// How urgently a user wants to learn a required skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LearningPriority {
    High,
    Medium,
    Low,
}

/// A skill as advertised on a profile. Equal names on different profiles are
/// distinct records; matching reads a snapshot and never mutates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub proficiency_level: Option<ProficiencyLevel>,
    #[serde(default)]
    pub learning_priority: Option<LearningPriority>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn offered(name: impl Into<String>, level: ProficiencyLevel) -> Self {
        Self {
            name: name.into(),
            proficiency_level: Some(level),
            ..Self::default()
        }
    }

    pub fn required(name: impl Into<String>, priority: LearningPriority) -> Self {
        Self {
            name: name.into(),
            learning_priority: Some(priority),
            ..Self::default()
        }
    }
}

/// Trade-request counters maintained by the barter workflow (external).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeMetrics {
    pub pending_requests: u32,
    pub accepted_requests: u32,
    pub completed_requests: u32,
    pub rejected_requests: u32,
}

/// One per user; offered/required skill lists plus reputation counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub user_id: i64,
    #[serde(default)]
    pub offered_skills: Vec<Skill>,
    #[serde(default)]
    pub required_skills: Vec<Skill>,
    /// Average trade rating in [0, 5].
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_exchanges: u32,
    #[serde(default)]
    pub metrics: ExchangeMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// The slice of the user record the ranking engine and responses need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// A candidate as handed to the ranking engine: user plus a resolved
/// profile snapshot, already materialized by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub user: UserSummary,
    pub profile: SkillProfile,
}
