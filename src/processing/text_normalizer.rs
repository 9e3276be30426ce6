//! Text normalization for segmented CV fields

use regex::Regex;
use std::collections::HashSet;

/// Field-label tokens, French and English, that carry no information once a
/// line has been classified.
pub const FIELD_LABELS: &[&str] = &[
    "ID", "Nom", "Prénom", "Âge", "Sexe", "Nationalité", "Compétence", "Niveau de Maîtrise", "Diplôme",
    "Institution", "Année de Obtention", "Titre du Poste", "Entreprise", "Durée", "Projets Clés", "Activity",
    "Name", "Surname", "Age", "Gender", "Nationality", "Skills", "Mastery Level", "Degree", "Institution",
    "Year of Graduation", "Job Title", "Company", "Duration", "Key Projects", "Activity", "Education",
];

pub struct TextNormalizer {
    stop_words: HashSet<String>,
    whitespace_regex: Regex,
    bullet_regex: Regex,
    noise_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let stop_words = FIELD_LABELS.iter().map(|w| w.to_lowercase()).collect();

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        let bullet_regex = Regex::new(r"[\u{2022}\u{00b7}\u{25cf}]").expect("Invalid bullet regex");
        let noise_regex = Regex::new(r"[^\w\s,]").expect("Invalid noise regex");

        Self {
            stop_words,
            whitespace_regex,
            bullet_regex,
            noise_regex,
        }
    }

    /// Collapse whitespace, strip bullets and punctuation other than commas,
    /// then drop field-label tokens. Idempotent.
    pub fn normalize(&self, text: &str) -> String {
        let collapsed = self.whitespace_regex.replace_all(text, " ");
        let unbulleted = self.bullet_regex.replace_all(&collapsed, "");
        let cleaned = self.noise_regex.replace_all(&unbulleted, "");

        cleaned
            .split_whitespace()
            .filter(|word| !self.is_stop_word(word))
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Split accumulated section text on `separator` and normalize each
    /// fragment. Fragments left empty by normalization are dropped.
    pub fn normalize_fragments(&self, content: &str, separator: &str) -> Vec<String> {
        content
            .split(separator)
            .map(|fragment| self.normalize(fragment))
            .filter(|fragment| !fragment.is_empty())
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }
}
