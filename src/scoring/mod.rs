//! Roster scoring: project matching, profile similarity and activity recommendations

pub mod activity;
pub mod match_scorer;
pub mod similarity;

pub use activity::{recommend_activities, ActivityRating, ActivityRatings, RecommendedActivity};
pub use match_scorer::{MatchScorer, RankedCandidate};
pub use similarity::{SimilarPerson, SimilarityScorer};
