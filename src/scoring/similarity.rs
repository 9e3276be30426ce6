//! Weighted profile similarity between one person and the rest of a roster

use crate::config::SimilarityConfig;
use crate::error::{Result, TalentMatcherError};
use crate::roster::{PersonRecord, Roster};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPerson {
    pub name: String,
    pub score: f64,
}

/// Per-category similarities of one pair, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimilarityBreakdown {
    pub skills: f64,
    pub education: f64,
    pub training: f64,
    pub activity: f64,
}

impl SimilarityBreakdown {
    pub fn weighted(&self, weights: &SimilarityConfig) -> f64 {
        self.skills * weights.skills
            + self.education * weights.education
            + self.training * weights.training
            + self.activity * weights.activity
    }
}

/// Raw comma-separated tokens. Surrounding spaces are kept, so
/// "python, sql" and "python,sql" share only "python". A blank cell has none.
pub fn token_set(field: &str) -> HashSet<&str> {
    if field.trim().is_empty() {
        HashSet::new()
    } else {
        field.split(',').collect()
    }
}

/// |A ∩ B| / |A ∪ B|, or 0 when both sets are empty.
pub fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

pub fn compare(target: &PersonRecord, other: &PersonRecord) -> SimilarityBreakdown {
    let same_institution = !target.institution.trim().is_empty()
        && target.institution.trim() == other.institution.trim();

    SimilarityBreakdown {
        skills: jaccard(&token_set(&target.skills), &token_set(&other.skills)),
        education: if same_institution { 1.0 } else { 0.0 },
        training: jaccard(&token_set(&target.degree), &token_set(&other.degree)),
        activity: jaccard(&token_set(&target.activity), &token_set(&other.activity)),
    }
}

pub struct SimilarityScorer {
    weights: SimilarityConfig,
}

impl SimilarityScorer {
    pub fn new(weights: SimilarityConfig) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// People most similar to `target_name`, best first, at most `top_k`.
    ///
    /// Rows sharing the target's name are skipped. A person spanning several
    /// rows keeps the score of their last positive row and the rank slot of
    /// their first one. Zero scores are left out entirely.
    pub fn most_similar(&self, roster: &Roster, target_name: &str, top_k: usize) -> Result<Vec<SimilarPerson>> {
        if top_k == 0 {
            return Err(TalentMatcherError::InvalidInput("Number of similar people must be at least 1".to_string()));
        }

        let target = roster.find_by_name(target_name).ok_or_else(|| {
            TalentMatcherError::InvalidInput(format!("'{}' is not in the roster", target_name))
        })?;

        let mut similar: Vec<SimilarPerson> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        for row in roster.iter().filter(|r| r.name != target.name) {
            let score = compare(target, row).weighted(&self.weights);
            if score <= 0.0 {
                continue;
            }

            match slots.get(row.name.as_str()) {
                Some(&slot) => similar[slot].score = score,
                None => {
                    slots.insert(row.name.as_str(), similar.len());
                    similar.push(SimilarPerson {
                        name: row.name.clone(),
                        score,
                    });
                }
            }
        }

        similar.sort_by(|a, b| b.score.total_cmp(&a.score));
        similar.truncate(top_k);

        debug!("Found {} people similar to '{}'", similar.len(), target_name);
        Ok(similar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, skills: &str, institution: &str, degree: &str, activity: &str) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            skills: skills.to_string(),
            institution: institution.to_string(),
            degree: degree.to_string(),
            activity: activity.to_string(),
            ..Default::default()
        }
    }

    fn scorer() -> SimilarityScorer {
        SimilarityScorer::new(SimilarityConfig::default()).unwrap()
    }

    #[test]
    fn test_jaccard() {
        let a = token_set("python,sql,rust");
        let b = token_set("sql,rust,go");
        assert_eq!(jaccard(&a, &b), 0.5);
        assert!(token_set("").is_empty());
        assert!(token_set("  ").is_empty());
        assert_eq!(jaccard(&token_set(""), &token_set("")), 0.0);
    }

    #[test]
    fn test_tokens_are_not_trimmed() {
        let spaced = token_set("python, sql");
        let packed = token_set("python,sql");
        assert!(spaced.contains(" sql"));
        assert_eq!(jaccard(&spaced, &packed), 1.0 / 3.0);

        let target = person("T", "python, sql", "INSA", "Master", "Audit");
        let other = person("O", "python,sql", "INSA", "Master", "Audit");
        assert_eq!(compare(&target, &other).skills, 1.0 / 3.0);
    }

    #[test]
    fn test_compare_breakdown() {
        let target = person("T", "python,sql", "INSA", "Master", "Audit");
        let other = person("O", "sql", "INSA", "Licence", "Audit,Conseil");

        let breakdown = compare(&target, &other);
        assert_eq!(breakdown.skills, 0.5);
        assert_eq!(breakdown.education, 1.0);
        assert_eq!(breakdown.training, 0.0);
        assert_eq!(breakdown.activity, 0.5);
        assert_eq!(breakdown.weighted(&SimilarityConfig::default()), 2.0);
    }

    #[test]
    fn test_institution_is_exact_equality() {
        let target = person("T", "", "INSA Lyon", "", "");
        let other = person("O", "", "INSA", "", "");
        assert_eq!(compare(&target, &other).education, 0.0);
        assert_eq!(compare(&person("T", "", "", "", ""), &person("O", "", "", "", "")).education, 0.0);
    }

    #[test]
    fn test_target_excluded_and_scores_positive() {
        let roster = Roster::new(vec![
            person("Target", "python,sql", "INSA", "Master", "Audit"),
            person("Twin", "python,sql", "INSA", "Master", "Audit"),
            person("Stranger", "cobol", "HEC", "MBA", "Vente"),
            person("Half", "python", "ENSIMAG", "Master", "Vente"),
            person("Target", "python,sql", "INSA", "Master", "Conseil"),
        ]);

        let similar = scorer().most_similar(&roster, "Target", 10).unwrap();
        let names: Vec<&str> = similar.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Twin", "Half"]);
        assert_eq!(similar[0].score, 4.0);
        assert_eq!(similar[1].score, 1.5);
        assert!(similar.iter().all(|s| s.score > 0.0));
    }

    #[test]
    fn test_repeated_person_keeps_last_score() {
        let roster = Roster::new(vec![
            person("Target", "python", "INSA", "Master", "Audit"),
            person("Multi", "python", "INSA", "Master", "Audit"),
            person("Other", "python", "HEC", "MBA", "Vente"),
            person("Multi", "python", "HEC", "MBA", "Vente"),
        ]);

        let similar = scorer().most_similar(&roster, "Target", 5).unwrap();
        assert_eq!(similar.len(), 2);
        // Equal scores of 1.0: Multi holds the earlier slot.
        assert_eq!(similar[0].name, "Multi");
        assert_eq!(similar[0].score, 1.0);
        assert_eq!(similar[1].name, "Other");
    }

    #[test]
    fn test_top_k_and_unknown_target() {
        let roster = Roster::new(vec![
            person("Target", "a,b", "X", "M", "P"),
            person("One", "a", "X", "M", "P"),
            person("Two", "a", "X", "M", "P"),
        ]);

        assert_eq!(scorer().most_similar(&roster, "Target", 1).unwrap().len(), 1);
        assert!(scorer().most_similar(&roster, "Nobody", 1).is_err());
    }

    #[test]
    fn test_weights_are_applied() {
        let weights = SimilarityConfig {
            skills: 5.0,
            ..SimilarityConfig::default()
        };
        let scorer = SimilarityScorer::new(weights).unwrap();
        let roster = Roster::new(vec![
            person("Target", "a,b", "X", "M", "P"),
            person("One", "a", "Y", "N", "Q"),
        ]);

        let similar = scorer.most_similar(&roster, "Target", 1).unwrap();
        assert_eq!(similar[0].score, 2.5);
    }
}
