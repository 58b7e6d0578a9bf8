use serde::Serialize;
use strum::Display;

use crate::embedding::{EmbeddingGenerator, CATEGORY_COUNT};

/// Learning phase a prerequisite belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Foundation,
    Core,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Importance {
    High,
    Critical,
    Medium,
}

#[derive(Debug, Clone, Serialize)]
pub struct Prerequisite {
    pub skill: String,
    pub phase: Phase,
    pub reason: String,
    pub estimated_time: &'static str,
    pub importance: Importance,
}

struct PrereqEntry {
    key: &'static str,
    foundation: &'static [&'static str],
    core: &'static [&'static str],
    advanced: &'static [&'static str],
}

/// Curated prerequisite table. Entry order matters: the first key matching
/// the target wins, so broader keys ("react") must come before narrower
/// ones would be shadowed ("react native" matches "react").
const PREREQUISITE_TABLE: &[PrereqEntry] = &[
    PrereqEntry {
        key: "react",
        foundation: &["HTML", "CSS", "JavaScript"],
        core: &["ES6+", "Component Architecture", "State Management"],
        advanced: &[
            "Hooks",
            "Context API",
            "React Router",
            "Performance Optimization",
        ],
    },
    PrereqEntry {
        key: "vue",
        foundation: &["HTML", "CSS", "JavaScript"],
        core: &["ES6+", "Component-Based Design", "Vue Router"],
        advanced: &["Vuex", "Composition API", "SSR with Nuxt"],
    },
    PrereqEntry {
        key: "angular",
        foundation: &["HTML", "CSS", "JavaScript", "TypeScript"],
        core: &["TypeScript Advanced", "RxJS", "Dependency Injection"],
        advanced: &["NgRx", "Angular Universal", "Testing"],
    },
    PrereqEntry {
        key: "node",
        foundation: &["JavaScript", "Command Line Basics"],
        core: &["ES6+", "Async Programming", "Express.js", "RESTful APIs"],
        advanced: &[
            "Database Integration",
            "Authentication",
            "WebSockets",
            "Microservices",
        ],
    },
    PrereqEntry {
        key: "full stack",
        foundation: &["HTML", "CSS", "JavaScript"],
        core: &[
            "Frontend Framework (React/Vue)",
            "Node.js",
            "Database (SQL/NoSQL)",
            "REST APIs",
        ],
        advanced: &["Authentication", "Deployment", "DevOps Basics", "Testing"],
    },
    PrereqEntry {
        key: "machine learning",
        foundation: &[
            "Python",
            "Mathematics (Linear Algebra)",
            "Statistics",
            "Probability",
        ],
        core: &["NumPy", "Pandas", "Scikit-learn", "Data Preprocessing"],
        advanced: &[
            "Deep Learning",
            "Neural Networks",
            "Model Deployment",
            "TensorFlow/PyTorch",
        ],
    },
    PrereqEntry {
        key: "data science",
        foundation: &["Python", "Mathematics", "Statistics"],
        core: &["Pandas", "NumPy", "Data Visualization", "SQL"],
        advanced: &["Machine Learning", "Feature Engineering", "Big Data Tools"],
    },
    PrereqEntry {
        key: "deep learning",
        foundation: &["Python", "Linear Algebra", "Calculus", "Probability"],
        core: &["Machine Learning Basics", "Neural Networks", "Backpropagation"],
        advanced: &["CNN", "RNN", "Transformers", "TensorFlow/PyTorch"],
    },
    PrereqEntry {
        key: "artificial intelligence",
        foundation: &["Python", "Mathematics", "Algorithms", "Data Structures"],
        core: &["Machine Learning", "Neural Networks", "Search Algorithms"],
        advanced: &[
            "Deep Learning",
            "NLP",
            "Computer Vision",
            "Reinforcement Learning",
        ],
    },
    PrereqEntry {
        key: "react native",
        foundation: &["JavaScript", "React"],
        core: &["Mobile UI/UX", "Native Components", "Navigation"],
        advanced: &["Native Modules", "Performance", "App Deployment"],
    },
    PrereqEntry {
        key: "flutter",
        foundation: &["Dart", "OOP Concepts"],
        core: &["Widget System", "State Management", "Material Design"],
        advanced: &["Platform Integration", "Animations", "App Publishing"],
    },
    PrereqEntry {
        key: "ios development",
        foundation: &["Swift", "Xcode", "OOP"],
        core: &["UIKit", "SwiftUI", "App Architecture"],
        advanced: &["Core Data", "Networking", "App Store Deployment"],
    },
    PrereqEntry {
        key: "mongodb",
        foundation: &["Database Concepts", "JSON"],
        core: &["CRUD Operations", "Indexing", "Aggregation"],
        advanced: &["Replication", "Sharding", "Performance Tuning"],
    },
    PrereqEntry {
        key: "postgresql",
        foundation: &["SQL Basics", "Database Design"],
        core: &["Advanced SQL", "Indexing", "Transactions"],
        advanced: &["Query Optimization", "Replication", "Stored Procedures"],
    },
    PrereqEntry {
        key: "graphql",
        foundation: &["REST APIs", "JSON", "JavaScript"],
        core: &["Schema Definition", "Queries", "Mutations"],
        advanced: &["Subscriptions", "Resolvers", "Apollo Server"],
    },
    PrereqEntry {
        key: "docker",
        foundation: &["Command Line", "Networking Basics"],
        core: &["Containerization", "Dockerfile", "Docker Compose"],
        advanced: &["Multi-stage Builds", "Orchestration", "Security"],
    },
    PrereqEntry {
        key: "kubernetes",
        foundation: &["Docker", "Networking", "YAML"],
        core: &["Pods", "Services", "Deployments", "ConfigMaps"],
        advanced: &["Helm", "Service Mesh", "Monitoring", "Auto-scaling"],
    },
    PrereqEntry {
        key: "aws",
        foundation: &["Cloud Computing Basics", "Networking"],
        core: &["EC2", "S3", "IAM", "VPC"],
        advanced: &["Lambda", "ECS/EKS", "CloudFormation", "Cost Optimization"],
    },
    PrereqEntry {
        key: "ui design",
        foundation: &["Design Principles", "Color Theory", "Typography"],
        core: &["Figma/Sketch", "Wireframing", "Prototyping"],
        advanced: &["Design Systems", "Accessibility", "User Research"],
    },
    PrereqEntry {
        key: "ux design",
        foundation: &["User Psychology", "Design Thinking"],
        core: &["User Research", "Wireframing", "Usability Testing"],
        advanced: &["Information Architecture", "Interaction Design", "Analytics"],
    },
];

fn table_prerequisites(entry: &PrereqEntry, target: &str) -> Vec<Prerequisite> {
    let mut out = Vec::new();

    for skill in entry.foundation {
        out.push(Prerequisite {
            skill: (*skill).to_string(),
            phase: Phase::Foundation,
            reason: format!("Fundamental knowledge required for {target}"),
            estimated_time: "1-2 weeks",
            importance: Importance::High,
        });
    }
    for skill in entry.core {
        out.push(Prerequisite {
            skill: (*skill).to_string(),
            phase: Phase::Core,
            reason: format!("Essential skill directly related to {target}"),
            estimated_time: "2-3 weeks",
            importance: Importance::Critical,
        });
    }
    for skill in entry.advanced {
        out.push(Prerequisite {
            skill: (*skill).to_string(),
            phase: Phase::Advanced,
            reason: format!("Advanced concept to master {target}"),
            estimated_time: "1-2 weeks",
            importance: Importance::Medium,
        });
    }

    out
}

/// Generic fallbacks per detected category. Only the technical categories
/// carry defaults; marketing/business/creative targets get an empty list.
fn category_prerequisites(category: &str, target: &str) -> Vec<Prerequisite> {
    let defaults: &[(&str, Phase, &'static str)] = match category {
        "programming" => &[
            ("Programming Fundamentals", Phase::Foundation, "2-3 weeks"),
            ("Problem Solving", Phase::Foundation, "1-2 weeks"),
            ("Version Control (Git)", Phase::Core, "1 week"),
            ("Best Practices", Phase::Advanced, "1-2 weeks"),
        ],
        "design" => &[
            ("Design Principles", Phase::Foundation, "1-2 weeks"),
            ("Design Tools", Phase::Core, "2-3 weeks"),
            ("User Research", Phase::Advanced, "1-2 weeks"),
        ],
        "data" => &[
            ("Statistics", Phase::Foundation, "2-3 weeks"),
            ("Data Analysis Tools", Phase::Core, "2-3 weeks"),
            ("Advanced Analytics", Phase::Advanced, "2-3 weeks"),
        ],
        _ => &[],
    };

    defaults
        .iter()
        .map(|(skill, phase, estimated_time)| Prerequisite {
            skill: (*skill).to_string(),
            phase: *phase,
            reason: format!("Recommended for learning {target}"),
            estimated_time,
            importance: Importance::Medium,
        })
        .collect()
}

/// Prerequisites for a target skill: first key in the curated table that
/// matches by substring in either direction (case-insensitive) wins. With
/// no table match, the target's embedding picks the dominant category and
/// the generic per-category defaults apply.
pub fn analyze_prerequisites(target_skill: &str) -> Vec<Prerequisite> {
    let target_lower = target_skill.to_lowercase();

    for entry in PREREQUISITE_TABLE {
        if target_lower.contains(entry.key) || entry.key.contains(&target_lower) {
            return table_prerequisites(entry, target_skill);
        }
    }

    let generator = EmbeddingGenerator::new();
    let embedding = generator.embed(target_skill);
    // First slot wins ties, so signal-free targets default to programming.
    let mut dominant = 0;
    for (idx, value) in embedding[..CATEGORY_COUNT].iter().enumerate() {
        if *value > embedding[dominant] {
            dominant = idx;
        }
    }

    let category = generator
        .taxonomy()
        .category_name(dominant)
        .unwrap_or("programming");
    category_prerequisites(category, target_skill)
}
