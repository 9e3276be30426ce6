//! Key field extraction from free-form project descriptions

use crate::error::Result;
use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four labeled fields of a project description, in label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectField {
    ProjectName,
    Objectives,
    RequiredSkills,
    AdditionalDetails,
}

impl ProjectField {
    pub const ALL: [ProjectField; 4] = [
        ProjectField::ProjectName,
        ProjectField::Objectives,
        ProjectField::RequiredSkills,
        ProjectField::AdditionalDetails,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectField::ProjectName => "Nom du projet",
            ProjectField::Objectives => "Objectifs",
            ProjectField::RequiredSkills => "Compétences requises",
            ProjectField::AdditionalDetails => "Détails supplémentaires",
        }
    }

    fn label_pattern(&self) -> &'static str {
        match self {
            ProjectField::ProjectName => r"(?:nom du projet|project name)[:\s]*",
            ProjectField::Objectives => r"(?:objectifs|objectives)[:\s]*",
            ProjectField::RequiredSkills => r"(?:compétences requises|required skills)[:\s]*",
            ProjectField::AdditionalDetails => r"(?:détails supplémentaires|additional details)[:\s]*",
        }
    }

    /// Words that end this field's value. The last field runs to the end.
    fn stop_pattern(&self) -> Option<&'static str> {
        match self {
            ProjectField::ProjectName => Some(r"objectifs|objectives|compétences|required skills|détails|additional details"),
            ProjectField::Objectives => Some(r"compétences|required skills|détails|additional details"),
            ProjectField::RequiredSkills => Some(r"détails|additional details"),
            ProjectField::AdditionalDetails => None,
        }
    }
}

impl std::fmt::Display for ProjectField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Extracted project fields; absent fields are simply missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordInfo {
    pub fields: BTreeMap<ProjectField, String>,
}

impl KeywordInfo {
    pub fn get(&self, field: ProjectField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn required_skills(&self) -> Option<&str> {
        self.get(ProjectField::RequiredSkills)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// (label, value) pairs in field order.
    pub fn labeled(&self) -> Vec<(&'static str, &str)> {
        self.fields.iter().map(|(field, value)| (field.label(), value.as_str())).collect()
    }
}

struct FieldRule {
    field: ProjectField,
    label: Regex,
    stop: Option<Regex>,
}

pub struct KeywordExtractor {
    rules: Vec<FieldRule>,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self> {
        let build = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();

        let rules = ProjectField::ALL
            .iter()
            .map(|field| {
                Ok(FieldRule {
                    field: *field,
                    label: build(field.label_pattern())?,
                    stop: field.stop_pattern().map(build).transpose()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Each field's value runs from the first occurrence of its label to the
    /// earliest following stop word, across lines, and is trimmed.
    pub fn extract(&self, description: &str) -> KeywordInfo {
        let mut info = KeywordInfo::default();

        for rule in &self.rules {
            let Some(label) = rule.label.find(description) else {
                continue;
            };

            let rest = &description[label.end()..];
            let end = rule
                .stop
                .as_ref()
                .and_then(|stop| stop.find(rest))
                .map(|m| m.start())
                .unwrap_or(rest.len());

            info.fields.insert(rule.field, rest[..end].trim().to_string());
        }

        debug!("Extracted {} project fields", info.fields.len());
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_all_four_fields() {
        let extractor = KeywordExtractor::new().unwrap();
        let text = "Nom du projet: Alpha\nObjectifs: Build X\nCompétences requises: python, sql\nDétails supplémentaires: none";
        let info = extractor.extract(text);

        let expected: Vec<(&str, &str)> = vec![
            ("Nom du projet", "Alpha"),
            ("Objectifs", "Build X"),
            ("Compétences requises", "python, sql"),
            ("Détails supplémentaires", "none"),
        ];
        assert_eq!(info.labeled(), expected);
    }

    #[test]
    fn test_absent_field_is_omitted() {
        let extractor = KeywordExtractor::new().unwrap();
        let info = extractor.extract("Nom du projet: Beta\nCompétences requises: java");

        assert_eq!(info.get(ProjectField::ProjectName), Some("Beta"));
        assert_eq!(info.required_skills(), Some("java"));
        assert_eq!(info.get(ProjectField::Objectives), None);
        assert_eq!(info.fields.len(), 2);
    }

    #[test]
    fn test_values_span_lines_and_ignore_case() {
        let extractor = KeywordExtractor::new().unwrap();
        let text = "OBJECTIFS :\n  migrer le SI\n  vers le cloud\n\nCOMPÉTENCES REQUISES: kubernetes";
        let info = extractor.extract(text);

        assert_eq!(info.get(ProjectField::Objectives), Some("migrer le SI\n  vers le cloud"));
        assert_eq!(info.required_skills(), Some("kubernetes"));
    }

    #[test]
    fn test_english_labels() {
        let extractor = KeywordExtractor::new().unwrap();
        let info = extractor.extract("Project name: Gamma\nRequired skills: rust go\nAdditional details: remote");

        assert_eq!(info.get(ProjectField::ProjectName), Some("Gamma"));
        assert_eq!(info.required_skills(), Some("rust go"));
        assert_eq!(info.get(ProjectField::AdditionalDetails), Some("remote"));
    }

    #[test]
    fn test_no_labels() {
        let extractor = KeywordExtractor::new().unwrap();
        assert!(extractor.extract("just some text").is_empty());
    }
}
