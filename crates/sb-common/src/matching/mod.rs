pub mod advanced;
pub mod aggregator;
pub mod ranking;
pub mod teachers;

pub use advanced::{advanced_matches, AdvancedMatch};
pub use aggregator::{
    bidirectional_match, find_skill_matches, mutual_matches, BidirectionalMatch, MatchResult,
    MutualMatch,
};
pub use ranking::{rank_candidates, recommendation_text, RankedCandidate};
pub use teachers::{rank_teachers, TeacherMatch};
