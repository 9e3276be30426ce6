//! Assembles a person record from a segmented CV

use crate::config::{Config, IdStrategy};
use crate::error::Result;
use crate::processing::field_extractor::{age_on, EmploymentDetails, FieldExtractor};
use crate::processing::segmenter::{Section, SectionMap, SectionSegmenter};
use crate::roster::PersonRecord;
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Hands out person identifiers.
///
/// `Random` draws are not checked against existing records, so two people
/// can receive the same identifier.
#[derive(Debug, Clone)]
pub enum IdAllocator {
    Random { min: u32, max: u32 },
    Sequential { next: u32 },
}

impl IdAllocator {
    pub fn from_strategy(strategy: &IdStrategy) -> Self {
        match *strategy {
            IdStrategy::Random { min, max } => IdAllocator::Random { min, max },
            IdStrategy::Sequential { start } => IdAllocator::Sequential { next: start },
        }
    }

    pub fn next_id(&mut self) -> u32 {
        match self {
            IdAllocator::Random { min, max } => {
                let span = u64::from(*max - *min) + 1;
                let draw = uuid::Uuid::new_v4().as_u128() % u128::from(span);
                *min + draw as u32
            }
            IdAllocator::Sequential { next } => {
                let id = *next;
                *next = next.wrapping_add(1);
                id
            }
        }
    }
}

/// Everything produced while turning one CV into a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedProfile {
    pub record: PersonRecord,
    pub sections: SectionMap,
    pub employment: EmploymentDetails,
    pub birth_date: Option<String>,
}

pub struct ProfileBuilder {
    segmenter: SectionSegmenter,
    extractor: FieldExtractor,
    ids: IdAllocator,
    institution_regex: Regex,
}

impl ProfileBuilder {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            segmenter: SectionSegmenter::new(&config.segmentation)?,
            extractor: FieldExtractor::new()?,
            ids: IdAllocator::from_strategy(&config.profile.id_strategy),
            institution_regex: RegexBuilder::new(r"(école|université|institut|centre de formation)")
                .case_insensitive(true)
                .build()?,
        })
    }

    pub fn build(&mut self, cv_text: &str) -> ParsedProfile {
        self.build_on(cv_text, Local::now().date_naive())
    }

    /// Build a record with ages computed as of `today`.
    pub fn build_on(&mut self, cv_text: &str, today: NaiveDate) -> ParsedProfile {
        let segmented = self.segmenter.segment(cv_text);
        let sections = self.segmenter.clean(&segmented);

        // The extractors need the "/" and ":" that normalization strips.
        let birth_date = self
            .extractor
            .find_date(segmented.raw(Section::BirthDate))
            .map(str::to_string);
        let age = birth_date.as_deref().and_then(|d| age_on(d, today));
        if birth_date.is_some() && age.is_none() {
            warn!("Birth date {:?} does not give a valid age", birth_date);
        }

        let employment = self.extractor.extract_employment(segmented.raw(Section::Experience));
        let record = self.assemble(&sections, age, &employment);

        debug!("Built profile {} for '{}'", record.id, record.name);
        ParsedProfile {
            record,
            sections,
            employment,
            birth_date,
        }
    }

    fn assemble(
        &mut self,
        sections: &SectionMap,
        age: Option<u32>,
        employment: &EmploymentDetails,
    ) -> PersonRecord {
        let institution = sections
            .fragments(Section::Education)
            .iter()
            .filter(|fragment| self.institution_regex.is_match(fragment))
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");

        PersonRecord {
            id: self.ids.next_id(),
            name: sections.joined(Section::Name, " "),
            surname: sections.joined(Section::Surname, " "),
            age,
            skills: sections.joined(Section::Skills, ", "),
            degree: sections.joined(Section::Degree, ", "),
            institution,
            job_titles: employment.job_titles.join(", "),
            companies: employment.companies.join(", "),
            durations: employment.date_ranges.join(", "),
            key_projects: sections.joined(Section::Projects, ", "),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SegmentationPolicy;

    const CV: &str = "Nom: Dupont\n\
        Date de naissance: 15/03/1990\n\
        Compétence: Python, SQL\n\
        Université de Lyon.\n\
        Formation: Bootcamp Data\n\
        Diplôme: Master Informatique\n\
        Projets: Migration cloud. Refonte API\n\
        Expérience professionnelle: Analyste 01/09/2015 - 31/08/2018 Entreprise: Acme\n\
        Hobbies: escalade";

    fn builder(config: &Config) -> ProfileBuilder {
        ProfileBuilder::new(config).unwrap()
    }

    #[test]
    fn test_build_profile_fields() {
        let mut config = Config::default();
        config.profile.id_strategy = IdStrategy::Sequential { start: 42 };
        let mut builder = builder(&config);

        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let profile = builder.build_on(CV, today);
        let record = &profile.record;

        assert_eq!(record.id, 42);
        assert_eq!(record.name, "Dupont");
        assert_eq!(record.age, Some(33));
        assert_eq!(profile.birth_date.as_deref(), Some("15/03/1990"));
        assert_eq!(record.skills, "Python, SQL");
        assert_eq!(record.institution, "Université de Lyon");
        assert_eq!(record.degree, "Master Informatique");
        // Plural labels are not in the stop list and survive normalization.
        assert_eq!(record.key_projects, "Projets Migration cloud, Refonte API");
        assert_eq!(record.job_titles, "Analyste");
        assert_eq!(record.companies, "Acme");
        assert_eq!(record.durations, "01/09/2015 - 31/08/2018");
        assert_eq!(record.activity, "");
        assert_eq!(profile.sections.unclassified, "Hobbies: escalade");
    }

    #[test]
    fn test_missing_birth_date_gives_unknown_age() {
        let mut builder = builder(&Config::default());
        let profile = builder.build("Nom: Martin\nDate de naissance: inconnue");
        assert_eq!(profile.record.age, None);
        assert_eq!(profile.record.name, "Martin");
    }

    #[test]
    fn test_carry_forward_collects_experience_lines() {
        let mut config = Config::default();
        config.segmentation.policy = SegmentationPolicy::CarryForward;
        let mut builder = builder(&config);

        let profile = builder.build("Expérience professionnelle\nDéveloppeur 01/01/2020 - 01/01/2022\nEntreprise : Globex");
        assert_eq!(profile.record.job_titles, "Expérience professionnelle Développeur");
        assert_eq!(profile.record.companies, "Globex");
    }

    #[test]
    fn test_id_allocators() {
        let mut random = IdAllocator::Random { min: 700, max: 900 };
        for _ in 0..200 {
            let id = random.next_id();
            assert!((700..=900).contains(&id));
        }

        let mut sequential = IdAllocator::Sequential { next: 1 };
        assert_eq!(sequential.next_id(), 1);
        assert_eq!(sequential.next_id(), 2);
    }
}
