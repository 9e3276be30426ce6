//! Text processing: normalization, CV segmentation and field extraction

pub mod field_extractor;
pub mod keyword_extractor;
pub mod profile_builder;
pub mod segmenter;
pub mod text_normalizer;

pub use keyword_extractor::{KeywordExtractor, KeywordInfo, ProjectField};
pub use profile_builder::{ParsedProfile, ProfileBuilder};
pub use segmenter::{Section, SectionSegmenter};
