//! Activity ratings and similarity-weighted activity recommendations

use crate::error::{Result, TalentMatcherError};
use crate::roster::Roster;
use crate::scoring::similarity::SimilarPerson;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Highest rating a person can get for an activity.
pub const MAX_RATING: u8 = 5;

/// How much one person took part in one activity, relative to everyone else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRating {
    pub person: String,
    pub activity: String,
    /// Roster rows for this (person, activity) pair.
    pub occurrences: usize,
    /// Roster rows for this activity, all people included.
    pub activity_total: usize,
    pub ratio: f64,
    pub rating: u8,
}

/// Ratings for every (person, activity) pair of a roster, sorted by person
/// then activity. Derived from a roster and rebuilt whenever it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityRatings {
    ratings: Vec<ActivityRating>,
}

impl ActivityRatings {
    /// Blank activity labels are not rated.
    pub fn from_roster(roster: &Roster) -> Result<Self> {
        if roster.is_empty() {
            return Err(TalentMatcherError::EmptyInput("Cannot rate activities of an empty roster".to_string()));
        }

        let mut pair_counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        let mut activity_totals: HashMap<&str, usize> = HashMap::new();
        for record in roster {
            let activity = record.activity.trim();
            if activity.is_empty() {
                continue;
            }
            *pair_counts.entry((record.name.as_str(), activity)).or_insert(0) += 1;
            *activity_totals.entry(activity).or_insert(0) += 1;
        }

        let ratios: Vec<((&str, &str), usize, usize, f64)> = pair_counts
            .into_iter()
            .map(|(pair, count)| {
                let total = activity_totals[pair.1];
                (pair, count, total, count as f64 / total as f64)
            })
            .collect();

        let mut max_ratio: HashMap<&str, f64> = HashMap::new();
        for ((_, activity), _, _, ratio) in &ratios {
            let entry = max_ratio.entry(activity).or_insert(0.0);
            *entry = entry.max(*ratio);
        }

        let ratings = ratios
            .into_iter()
            .map(|((person, activity), occurrences, activity_total, ratio)| {
                let max = max_ratio[activity];
                ActivityRating {
                    person: person.to_string(),
                    activity: activity.to_string(),
                    occurrences,
                    activity_total,
                    ratio,
                    rating: scale_rating(ratio, max),
                }
            })
            .collect();

        Ok(Self { ratings })
    }

    pub fn ratings(&self) -> &[ActivityRating] {
        &self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn for_person<'a>(&'a self, person: &'a str) -> impl Iterator<Item = &'a ActivityRating> + 'a {
        self.ratings.iter().filter(move |r| r.person == person)
    }
}

/// `ratio / max` scaled to 0..=5, rounding half to even. 0 when `max` is 0.
fn scale_rating(ratio: f64, max: f64) -> u8 {
    if max <= 0.0 {
        return 0;
    }
    let scaled = (ratio / max * f64::from(MAX_RATING)).round_ties_even();
    scaled.clamp(0.0, f64::from(MAX_RATING)) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedActivity {
    pub activity: String,
    pub score: f64,
}

/// Sum, per activity, each similar person's rating times their similarity.
/// Activities nobody similar has a rating for do not appear. Best first,
/// at most `top_n`; equal scores keep first-seen order.
pub fn recommend_activities(
    ratings: &ActivityRatings,
    similar: &[SimilarPerson],
    top_n: usize,
) -> Result<Vec<RecommendedActivity>> {
    if top_n == 0 {
        return Err(TalentMatcherError::InvalidInput("Result count must be at least 1".to_string()));
    }

    let mut recommended: Vec<RecommendedActivity> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for person in similar {
        for rating in ratings.for_person(&person.name) {
            let contribution = f64::from(rating.rating) * person.score;
            match slots.get(rating.activity.as_str()) {
                Some(&slot) => recommended[slot].score += contribution,
                None => {
                    slots.insert(rating.activity.as_str(), recommended.len());
                    recommended.push(RecommendedActivity {
                        activity: rating.activity.clone(),
                        score: contribution,
                    });
                }
            }
        }
    }

    recommended.sort_by(|a, b| b.score.total_cmp(&a.score));
    recommended.truncate(top_n);

    debug!("Recommended {} activities from {} similar people", recommended.len(), similar.len());
    Ok(recommended)
}
