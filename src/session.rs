//! Per-session roster state
//!
//! A session owns one roster and the activity ratings derived from it. Every
//! change recomputes the ratings from scratch into fresh values and only then
//! replaces the stored state, so a failing action leaves the session as it was.

use crate::error::{Result, TalentMatcherError};
use crate::roster::Roster;
use crate::scoring::activity::{recommend_activities, ActivityRatings, RecommendedActivity};
use crate::scoring::similarity::{SimilarPerson, SimilarityScorer};
use log::info;
use serde::{Deserialize, Serialize};

/// Neighbours used for a recommendation and the activities they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub target: String,
    pub similar_people: Vec<SimilarPerson>,
    pub activities: Vec<RecommendedActivity>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    roster: Roster,
    ratings: ActivityRatings,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from `roster`.
    pub fn with_roster(roster: Roster) -> Result<Self> {
        let mut session = Self::new();
        session.load_roster(roster)?;
        Ok(session)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn ratings(&self) -> &ActivityRatings {
        &self.ratings
    }

    /// Replace the roster.
    pub fn load_roster(&mut self, roster: Roster) -> Result<()> {
        let ratings = ActivityRatings::from_roster(&roster)?;
        self.commit(roster, ratings);
        Ok(())
    }

    /// Append `people` after the current rows.
    pub fn add_people(&mut self, people: &Roster) -> Result<()> {
        if people.is_empty() {
            return Err(TalentMatcherError::EmptyInput("No people to add to the roster".to_string()));
        }

        let roster = self.roster.merged(people);
        let ratings = ActivityRatings::from_roster(&roster)?;
        self.commit(roster, ratings);
        Ok(())
    }

    fn commit(&mut self, roster: Roster, ratings: ActivityRatings) {
        info!("Session roster now has {} rows and {} activity ratings", roster.len(), ratings.len());
        self.roster = roster;
        self.ratings = ratings;
    }

    /// Find the `neighbours` people most similar to `target`, then the
    /// `top_n` activities they rate best.
    pub fn recommend(
        &self,
        scorer: &SimilarityScorer,
        target: &str,
        neighbours: usize,
        top_n: usize,
    ) -> Result<Recommendation> {
        if self.roster.is_empty() {
            return Err(TalentMatcherError::EmptyInput("The session roster is empty".to_string()));
        }

        let similar_people = scorer.most_similar(&self.roster, target, neighbours)?;
        let activities = recommend_activities(&self.ratings, &similar_people, top_n)?;

        Ok(Recommendation {
            target: target.to_string(),
            similar_people,
            activities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimilarityConfig;
    use crate::roster::PersonRecord;

    fn person(name: &str, skills: &str, activity: &str) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            skills: skills.to_string(),
            institution: "INSA".to_string(),
            degree: "Master".to_string(),
            activity: activity.to_string(),
            ..Default::default()
        }
    }

    fn base_roster() -> Roster {
        Roster::new(vec![
            person("Alice", "python,sql", "Audit"),
            person("Bob", "java", "Conseil"),
        ])
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let mut session = Session::with_roster(base_roster()).unwrap();
        let before_ratings = session.ratings().clone();

        assert!(session.load_roster(Roster::default()).is_err());
        assert_eq!(session.roster(), &base_roster());
        assert_eq!(session.ratings(), &before_ratings);
    }

    #[test]
    fn test_failed_add_keeps_previous_state() {
        let mut session = Session::with_roster(base_roster()).unwrap();
        assert!(session.add_people(&Roster::default()).is_err());
        assert_eq!(session.roster().len(), 2);
    }

    #[test]
    fn test_add_people_recomputes_ratings() {
        let mut session = Session::with_roster(base_roster()).unwrap();
        assert_eq!(session.ratings().len(), 2);

        session
            .add_people(&Roster::new(vec![person("Chloé", "python", "Formation")]))
            .unwrap();

        assert_eq!(session.roster().records()[2].name, "Chloé");
        assert_eq!(session.ratings().len(), 3);
    }

    #[test]
    fn test_recommend_for_new_person() {
        let mut session = Session::with_roster(base_roster()).unwrap();
        session
            .add_people(&Roster::new(vec![person("New", "python", "")]))
            .unwrap();

        let scorer = SimilarityScorer::new(SimilarityConfig::default()).unwrap();
        let recommendation = session.recommend(&scorer, "New", 5, 5).unwrap();

        assert_eq!(recommendation.similar_people[0].name, "Alice");
        assert!(recommendation.similar_people.iter().all(|p| p.name != "New"));
        assert_eq!(recommendation.activities[0].activity, "Audit");
    }

    #[test]
    fn test_recommend_on_empty_session() {
        let scorer = SimilarityScorer::new(SimilarityConfig::default()).unwrap();
        assert!(matches!(
            Session::new().recommend(&scorer, "Anyone", 1, 1),
            Err(TalentMatcherError::EmptyInput(_))
        ));
    }
}
