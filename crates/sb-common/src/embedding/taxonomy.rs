use std::collections::HashSet;
use std::sync::LazyLock;

/// Number of semantic skill categories; also the number of leading
/// category slots in every embedding.
pub const CATEGORY_COUNT: usize = 6;

#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// Curated keyword lists per category, in fixed slot order.
const CATEGORY_DEFS: [Category; CATEGORY_COUNT] = [
    Category {
        name: "programming",
        keywords: &[
            "javascript",
            "python",
            "java",
            "react",
            "node",
            "angular",
            "vue",
            "typescript",
            "php",
            "ruby",
            "golang",
            "rust",
            "c++",
            "c#",
            "swift",
            "kotlin",
        ],
    },
    Category {
        name: "design",
        keywords: &[
            "ui",
            "ux",
            "figma",
            "photoshop",
            "illustrator",
            "sketch",
            "design",
            "graphic",
            "web design",
            "prototype",
        ],
    },
    Category {
        name: "data",
        keywords: &[
            "sql",
            "mongodb",
            "database",
            "data science",
            "machine learning",
            "ai",
            "analytics",
            "tableau",
            "power bi",
        ],
    },
    Category {
        name: "marketing",
        keywords: &[
            "seo",
            "marketing",
            "content",
            "social media",
            "advertising",
            "branding",
            "copywriting",
            "email marketing",
        ],
    },
    Category {
        name: "business",
        keywords: &[
            "management",
            "strategy",
            "finance",
            "accounting",
            "economics",
            "entrepreneurship",
            "consulting",
        ],
    },
    Category {
        name: "creative",
        keywords: &[
            "writing",
            "video editing",
            "photography",
            "animation",
            "music",
            "art",
            "illustration",
        ],
    },
];

/// Immutable category/vocabulary tables, built once per process and shared
/// by reference. The vocabulary is every distinct whitespace-split token
/// across all category keyword lists, in first-appearance order; slot
/// assignment in the embedding depends on that order staying stable.
#[derive(Debug)]
pub struct SkillTaxonomy {
    categories: [Category; CATEGORY_COUNT],
    vocabulary: Vec<String>,
}

static STANDARD: LazyLock<SkillTaxonomy> = LazyLock::new(|| SkillTaxonomy::build(CATEGORY_DEFS));

impl SkillTaxonomy {
    pub fn standard() -> &'static SkillTaxonomy {
        &STANDARD
    }

    fn build(categories: [Category; CATEGORY_COUNT]) -> Self {
        let mut seen = HashSet::new();
        let mut vocabulary = Vec::new();

        for category in &categories {
            for keyword in category.keywords {
                for token in keyword.split_whitespace() {
                    let token = token.to_lowercase();
                    if seen.insert(token.clone()) {
                        vocabulary.push(token);
                    }
                }
            }
        }

        Self {
            categories,
            vocabulary,
        }
    }

    pub fn categories(&self) -> &[Category; CATEGORY_COUNT] {
        &self.categories
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn category_name(&self, slot: usize) -> Option<&'static str> {
        self.categories.get(slot).map(|c| c.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_keeps_first_appearance_order() {
        let taxonomy = SkillTaxonomy::standard();
        let vocab = taxonomy.vocabulary();

        assert_eq!(vocab[0], "javascript");
        assert_eq!(vocab[1], "python");
        // Enough distinct terms to fill all 44 frequency slots.
        assert!(vocab.len() >= 44, "vocabulary too small: {}", vocab.len());
    }

    #[test]
    fn vocabulary_has_no_duplicates() {
        let taxonomy = SkillTaxonomy::standard();
        let mut seen = HashSet::new();
        for term in taxonomy.vocabulary() {
            assert!(seen.insert(term), "duplicate vocabulary term: {term}");
        }
    }

    #[test]
    fn category_slots_are_in_fixed_order() {
        let taxonomy = SkillTaxonomy::standard();
        let names: Vec<_> = taxonomy.categories().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["programming", "design", "data", "marketing", "business", "creative"]
        );
    }
}
