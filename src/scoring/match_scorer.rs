//! Keyword match scoring of a roster against a project's required skills

use crate::config::{CategoryWeights, MatchingConfig};
use crate::error::{Result, TalentMatcherError};
use crate::roster::{PersonRecord, Roster};
use aho_corasick::AhoCorasick;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One ranked roster row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub id: u32,
    pub name: String,
    pub score: f64,
    /// Position of the row in the roster.
    pub row_index: usize,
    pub record: PersonRecord,
}

pub struct MatchScorer {
    weights: CategoryWeights,
    tech_matcher: AhoCorasick,
}

impl MatchScorer {
    pub fn new(config: &MatchingConfig) -> Result<Self> {
        let patterns: Vec<String> = config.tech_keywords.iter().map(|k| k.to_lowercase()).collect();
        let tech_matcher = AhoCorasick::new(&patterns)
            .map_err(|e| TalentMatcherError::Processing(format!("Failed to build technology matcher: {}", e)))?;

        Ok(Self {
            weights: config.weights,
            tech_matcher,
        })
    }

    /// Lower-cased whitespace tokens of a keyword string.
    pub fn tokenize(keywords: &str) -> Vec<String> {
        keywords.split_whitespace().map(|k| k.to_lowercase()).collect()
    }

    /// Raw (un-normalized) score of one row.
    pub fn score_record(&self, record: &PersonRecord, keywords: &[String]) -> f64 {
        let categories = [
            (record.skills.to_lowercase(), self.weights.skills),
            (record.activity.to_lowercase(), self.weights.activities),
            (record.institution.to_lowercase(), self.weights.education),
            (record.degree.to_lowercase(), self.weights.training),
        ];

        let mut score = 0.0;
        for keyword in keywords {
            for (text, weight) in &categories {
                if text.contains(keyword.as_str()) {
                    score += weight;
                }
            }
        }

        // Technology bonus, counted on top of any literal keyword match.
        score + self.tech_keywords_in(&categories[0].0) as f64 * self.weights.skills
    }

    /// Number of distinct technology keywords occurring in `skills`.
    fn tech_keywords_in(&self, skills: &str) -> usize {
        self.tech_matcher
            .find_overlapping_iter(skills)
            .map(|m| m.pattern())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Score every row, keep the best `top_n`. Equal scores keep roster order.
    pub fn rank(&self, roster: &Roster, keywords: &str, top_n: usize) -> Result<Vec<RankedCandidate>> {
        if top_n == 0 {
            return Err(TalentMatcherError::InvalidInput("Result count must be at least 1".to_string()));
        }

        let tokens = Self::tokenize(keywords);
        let divisor = tokens.len().max(1) as f64;

        let mut ranked: Vec<RankedCandidate> = roster
            .iter()
            .enumerate()
            .map(|(row_index, record)| RankedCandidate {
                id: record.id,
                name: record.name.clone(),
                score: (self.score_record(record, &tokens) / divisor).max(0.0),
                row_index,
                record: record.clone(),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(top_n);

        debug!("Ranked {} of {} roster rows for {} keywords", ranked.len(), roster.len(), tokens.len());
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn person(name: &str, skills: &str, activity: &str, institution: &str, degree: &str) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            skills: skills.to_string(),
            activity: activity.to_string(),
            institution: institution.to_string(),
            degree: degree.to_string(),
            ..Default::default()
        }
    }

    fn scorer() -> MatchScorer {
        MatchScorer::new(&Config::default().matching).unwrap()
    }

    #[test]
    fn test_keyword_and_tech_bonus_are_both_counted() {
        let scorer = scorer();
        let alice = person("Alice", "Python,SQL", "Audit", "ENSIMAG", "Master");

        // python and sql hit skills (3 each), then the tech bonus adds 3 each again.
        let tokens = MatchScorer::tokenize("python sql");
        assert_eq!(scorer.score_record(&alice, &tokens), 12.0);
    }

    #[test]
    fn test_category_weights() {
        let scorer = scorer();
        let bob = person("Bob", "excel", "audit interne", "Université Paris", "Licence audit");

        let tokens = MatchScorer::tokenize("AUDIT");
        // activity 2 + training 1, no skills hit, no tech bonus.
        assert_eq!(scorer.score_record(&bob, &tokens), 3.0);
    }

    #[test]
    fn test_tech_bonus_without_keywords() {
        let scorer = scorer();
        let carol = person("Carol", "machine learning, django, java", "R&D", "INSA", "Master");

        assert_eq!(scorer.score_record(&carol, &[]), 9.0);
    }

    #[test]
    fn test_end_to_end_ranking() {
        let scorer = scorer();
        let roster = Roster::new(vec![
            person("Bob", "excel", "Audit", "HEC", "Master"),
            person("Alice", "python,sql", "Data", "ENSIMAG", "Master"),
            person("Chloé", "java", "Dev", "INSA", "Licence"),
        ]);

        let ranked = scorer.rank(&roster, "python sql", 2).unwrap();
        assert!(ranked.len() <= 2);
        assert_eq!(ranked[0].name, "Alice");
        assert_eq!(ranked[0].row_index, 1);
        assert!(ranked[0].score > 0.0);
        assert_eq!(ranked[0].score, 6.0);
        assert_eq!(ranked[1].name, "Chloé");
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let scorer = scorer();
        let roster = Roster::new(vec![
            person("A", "excel", "x", "y", "z"),
            person("B", "excel", "x", "y", "z"),
            person("C", "excel", "x", "y", "z"),
        ]);

        let ranked = scorer.rank(&roster, "nothing", 3).unwrap();
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(ranked.iter().all(|c| c.score == 0.0));
    }

    #[test]
    fn test_empty_keywords_divide_by_one() {
        let scorer = scorer();
        let roster = Roster::new(vec![person("A", "sql", "x", "y", "z")]);
        let ranked = scorer.rank(&roster, "   ", 5).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 3.0);
    }

    #[test]
    fn test_top_n_larger_than_roster() {
        let scorer = scorer();
        let roster = Roster::new(vec![
            person("Bob", "excel", "Audit", "HEC", "Master"),
            person("Alice", "python,sql", "Data", "ENSIMAG", "Master"),
        ]);

        let ranked = scorer.rank(&roster, "python", 10).unwrap();
        assert_eq!(ranked.len(), roster.len());
        assert_eq!(ranked[0].name, "Alice");
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let scorer = scorer();
        assert!(scorer.rank(&Roster::default(), "python", 0).is_err());
    }
}
