//! Line-by-line CV segmentation into named sections

use crate::config::{SegmentationConfig, SegmentationPolicy};
use crate::error::Result;
use crate::processing::text_normalizer::TextNormalizer;
use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed section vocabulary. Declaration order is the rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Name,
    Surname,
    BirthDate,
    Experience,
    Education,
    Skills,
    Languages,
    Projects,
    Certifications,
    Publications,
    References,
    Objectives,
    Achievements,
    Degree,
}

impl Section {
    pub const ALL: [Section; 14] = [
        Section::Name,
        Section::Surname,
        Section::BirthDate,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Languages,
        Section::Projects,
        Section::Certifications,
        Section::Publications,
        Section::References,
        Section::Objectives,
        Section::Achievements,
        Section::Degree,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Name => "Nom",
            Section::Surname => "Prénom",
            Section::BirthDate => "Date de Naissance",
            Section::Experience => "Expérience Professionnelle",
            Section::Education => "Éducation",
            Section::Skills => "Compétences",
            Section::Languages => "Langues",
            Section::Projects => "Projets",
            Section::Certifications => "Certifications",
            Section::Publications => "Publications",
            Section::References => "Références",
            Section::Objectives => "Objectifs",
            Section::Achievements => "Réalisations",
            Section::Degree => "Diplôme",
        }
    }

    /// Header pattern, French and English variants.
    fn pattern(&self) -> &'static str {
        match self {
            Section::Name => r"(nom[s]?|name)",
            Section::Surname => r"(prénom[s]?|surname|first name)",
            Section::BirthDate => r"(date de naissance|birth date|dob)",
            Section::Experience => r"(expérience[s]? professionnelle[s]?|professional experience)",
            Section::Education => r"(éducation|education|formation[s]?|training|école|université|institut|centre de formation)",
            Section::Skills => r"(compétence[s]?|skills)",
            Section::Languages => r"(langue[s]?|languages)",
            Section::Projects => r"(projet[s]?|projects)",
            Section::Certifications => r"(certificat[s]?|certificates)",
            Section::Publications => r"(publication[s]?|publications?)",
            Section::References => r"(référence[s]?|references)",
            Section::Objectives => r"(objectifs|objectives)",
            Section::Achievements => r"(réalisations|achievements)",
            Section::Degree => r"(licence|master|diplôme|bachelor|degree)",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw text accumulated per section, each line followed by a space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentedText {
    pub sections: BTreeMap<Section, String>,
    pub unclassified: String,
}

/// Normalized fragments per section. Sections with no content are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionMap {
    pub sections: BTreeMap<Section, Vec<String>>,
    pub unclassified: String,
}

impl SegmentedText {
    pub fn raw(&self, section: Section) -> &str {
        self.sections.get(&section).map(String::as_str).unwrap_or("")
    }
}

impl SectionMap {
    pub fn fragments(&self, section: Section) -> &[String] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn joined(&self, section: Section, separator: &str) -> String {
        self.fragments(section).join(separator)
    }
}

pub struct SectionSegmenter {
    rules: Vec<(Regex, Section)>,
    policy: SegmentationPolicy,
    fragment_separator: String,
    normalizer: TextNormalizer,
}

impl SectionSegmenter {
    pub fn new(config: &SegmentationConfig) -> Result<Self> {
        let rules = Section::ALL
            .iter()
            .map(|section| {
                let regex = RegexBuilder::new(section.pattern()).case_insensitive(true).build()?;
                Ok((regex, *section))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            policy: config.policy,
            fragment_separator: config.fragment_separator.clone(),
            normalizer: TextNormalizer::new(),
        })
    }

    /// First rule matching the line, in table order.
    pub fn classify_line(&self, line: &str) -> Option<Section> {
        self.rules
            .iter()
            .find(|(regex, _)| regex.is_match(line))
            .map(|(_, section)| *section)
    }

    /// Route every non-blank line to a section or to the unclassified bucket.
    pub fn segment(&self, text: &str) -> SegmentedText {
        let mut segmented = SegmentedText::default();
        let mut current: Option<Section> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let target = match self.classify_line(line) {
                Some(section) => {
                    current = Some(section);
                    Some(section)
                }
                None => match self.policy {
                    SegmentationPolicy::Strict => None,
                    SegmentationPolicy::CarryForward => current,
                },
            };

            let bucket = match target {
                Some(section) => segmented.sections.entry(section).or_default(),
                None => &mut segmented.unclassified,
            };
            bucket.push_str(line);
            bucket.push(' ');
        }

        debug!(
            "Segmented {} sections, {} unclassified characters",
            segmented.sections.len(),
            segmented.unclassified.len()
        );
        segmented
    }

    /// Normalize each section's accumulated text into fragments.
    pub fn clean(&self, segmented: &SegmentedText) -> SectionMap {
        let sections = segmented
            .sections
            .iter()
            .filter(|(_, content)| !content.trim().is_empty())
            .map(|(section, content)| {
                (*section, self.normalizer.normalize_fragments(content, &self.fragment_separator))
            })
            .collect();

        SectionMap {
            sections,
            unclassified: segmented.unclassified.trim_end().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn segmenter(policy: SegmentationPolicy) -> SectionSegmenter {
        let mut config = Config::default().segmentation;
        config.policy = policy;
        SectionSegmenter::new(&config).unwrap()
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let s = segmenter(SegmentationPolicy::Strict);
        // "prénom" contains "nom", so the name rule shadows the surname rule.
        assert_eq!(s.classify_line("Prénom: Jean"), Some(Section::Name));
        assert_eq!(s.classify_line("First name: Jean"), Some(Section::Name));
        assert_eq!(s.classify_line("Date de naissance: 15/03/1990"), Some(Section::BirthDate));
        assert_eq!(s.classify_line("Formation: Master Informatique"), Some(Section::Education));
        assert_eq!(s.classify_line("MASTER 2"), Some(Section::Degree));
        assert_eq!(s.classify_line("Rust, Go"), None);
    }

    #[test]
    fn test_strict_policy_routes_unmatched_lines_to_unclassified() {
        let s = segmenter(SegmentationPolicy::Strict);
        let text = "Intro line\nCompétences: Rust\nGo, Kotlin\n\nLangues: anglais";
        let segmented = s.segment(text);

        assert_eq!(segmented.raw(Section::Skills), "Compétences: Rust ");
        assert_eq!(segmented.raw(Section::Languages), "Langues: anglais ");
        assert_eq!(segmented.unclassified, "Intro line Go, Kotlin ");
    }

    #[test]
    fn test_carry_forward_policy_keeps_active_section() {
        let s = segmenter(SegmentationPolicy::CarryForward);
        let text = "Intro line\nCompétences: Rust\nGo, Kotlin\nLangues: anglais";
        let segmented = s.segment(text);

        assert_eq!(segmented.raw(Section::Skills), "Compétences: Rust Go, Kotlin ");
        assert_eq!(segmented.unclassified, "Intro line ");
    }

    #[test]
    fn test_clean_produces_normalized_fragments() {
        let s = segmenter(SegmentationPolicy::Strict);
        let segmented = s.segment("Skills: Rust, SQL. Skills: Docker\nNom: Dupont");
        let map = s.clean(&segmented);

        assert_eq!(map.fragments(Section::Skills), &["Rust, SQL".to_string(), "Docker".to_string()]);
        assert_eq!(map.joined(Section::Name, " "), "Dupont");
        assert!(map.fragments(Section::Projects).is_empty());
    }

    #[test]
    fn test_empty_text() {
        let s = segmenter(SegmentationPolicy::Strict);
        let segmented = s.segment("\n  \n");
        assert!(segmented.sections.is_empty());
        assert!(segmented.unclassified.is_empty());
    }
}
