//! Report structures handed to the output formatters

use crate::processing::keyword_extractor::KeywordInfo;
use crate::processing::profile_builder::ParsedProfile;
use crate::scoring::match_scorer::RankedCandidate;
use crate::session::Recommendation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report generation info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    /// Input the report was built from (file path or "inline text")
    pub source: String,
}

impl ReportMetadata {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledField {
    pub label: String,
    pub value: String,
}

/// Key fields of a project description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub metadata: ReportMetadata,
    pub fields: Vec<LabeledField>,
}

impl ProjectReport {
    pub fn new(metadata: ReportMetadata, info: &KeywordInfo) -> Self {
        let fields = info
            .labeled()
            .into_iter()
            .map(|(label, value)| LabeledField {
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect();
        Self { metadata, fields }
    }
}

/// People ranked against a project's keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingReport {
    pub metadata: ReportMetadata,
    pub keywords: String,
    pub roster_size: usize,
    pub candidates: Vec<RankedCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub metadata: ReportMetadata,
    pub profile: ParsedProfile,
}

/// Similar people and recommended activities for one person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub metadata: ReportMetadata,
    pub roster_size: usize,
    pub recommendation: Recommendation,
}

/// Any report the tool can print or save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Project(ProjectReport),
    Staffing(StaffingReport),
    Profile(ProfileReport),
    Activities(ActivityReport),
}

impl Report {
    pub fn metadata(&self) -> &ReportMetadata {
        match self {
            Report::Project(r) => &r.metadata,
            Report::Staffing(r) => &r.metadata,
            Report::Profile(r) => &r.metadata,
            Report::Activities(r) => &r.metadata,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Report::Project(_) => "Project Key Information",
            Report::Staffing(_) => "Staff Recommendations",
            Report::Profile(_) => "Person Profile",
            Report::Activities(_) => "Activity Recommendations",
        }
    }

    /// True when a ranking report ranked nobody. Not an error.
    pub fn has_no_results(&self) -> bool {
        match self {
            Report::Project(r) => r.fields.is_empty(),
            Report::Staffing(r) => r.candidates.is_empty(),
            Report::Profile(_) => false,
            Report::Activities(r) => r.recommendation.activities.is_empty(),
        }
    }
}
