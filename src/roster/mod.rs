//! Person records and the staff roster they are scored against

pub mod loader;

use crate::error::{Result, TalentMatcherError};
use log::debug;
use serde::{Deserialize, Serialize};

pub use loader::RosterLoader;

/// Column headers of the tabular roster contract.
pub mod columns {
    pub const ID: &str = "ID";
    pub const NAME: &str = "Nom";
    pub const SURNAME: &str = "Prénom";
    pub const AGE: &str = "Âge";
    pub const GENDER: &str = "Sexe";
    pub const NATIONALITY: &str = "Nationalité";
    pub const SKILLS: &str = "Compétence";
    pub const MASTERY_LEVEL: &str = "Niveau de Maîtrise";
    pub const DEGREE: &str = "Diplôme";
    pub const INSTITUTION: &str = "Institution";
    pub const GRADUATION_YEAR: &str = "Année de Obtention";
    pub const JOB_TITLE: &str = "Titre du Poste";
    pub const COMPANY: &str = "Entreprise";
    pub const DURATION: &str = "Durée";
    pub const KEY_PROJECTS: &str = "Projets Clés";
    pub const ACTIVITY: &str = "Activity";

    /// Columns every roster row must fill before it reaches the scorers.
    pub const REQUIRED: [&str; 5] = [NAME, SKILLS, ACTIVITY, INSTITUTION, DEGREE];

    /// Columns a file of people being added must fill. Other cells may be blank.
    pub const PERSON_REQUIRED: [&str; 1] = [NAME];
}

/// One person, either parsed from a CV or read verbatim from a roster row.
///
/// Free-text list fields keep their comma-joined form; scorers split them
/// as they need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Not guaranteed unique across a roster.
    pub id: u32,
    pub name: String,
    pub surname: String,
    pub age: Option<u32>,
    pub gender: String,
    pub nationality: String,
    pub skills: String,
    pub mastery_level: String,
    pub degree: String,
    pub institution: String,
    pub graduation_year: String,
    pub job_titles: String,
    pub companies: String,
    pub durations: String,
    pub key_projects: String,
    pub activity: String,
}

impl PersonRecord {
    /// All fields as (column header, value) pairs, in roster column order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (columns::ID, self.id.to_string()),
            (columns::NAME, self.name.clone()),
            (columns::SURNAME, self.surname.clone()),
            (columns::AGE, self.age.map(|a| a.to_string()).unwrap_or_default()),
            (columns::GENDER, self.gender.clone()),
            (columns::NATIONALITY, self.nationality.clone()),
            (columns::SKILLS, self.skills.clone()),
            (columns::MASTERY_LEVEL, self.mastery_level.clone()),
            (columns::DEGREE, self.degree.clone()),
            (columns::INSTITUTION, self.institution.clone()),
            (columns::GRADUATION_YEAR, self.graduation_year.clone()),
            (columns::JOB_TITLE, self.job_titles.clone()),
            (columns::COMPANY, self.companies.clone()),
            (columns::DURATION, self.durations.clone()),
            (columns::KEY_PROJECTS, self.key_projects.clone()),
            (columns::ACTIVITY, self.activity.clone()),
        ]
    }

    fn from_row(headers: &[String], row: &[String], fallback_id: u32) -> Self {
        let cell = |name: &str| -> String {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|idx| row.get(idx))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            id: cell(columns::ID).parse().unwrap_or(fallback_id),
            name: cell(columns::NAME),
            surname: cell(columns::SURNAME),
            age: cell(columns::AGE).parse().ok(),
            gender: cell(columns::GENDER),
            nationality: cell(columns::NATIONALITY),
            skills: cell(columns::SKILLS),
            mastery_level: cell(columns::MASTERY_LEVEL),
            degree: cell(columns::DEGREE),
            institution: cell(columns::INSTITUTION),
            graduation_year: cell(columns::GRADUATION_YEAR),
            job_titles: cell(columns::JOB_TITLE),
            companies: cell(columns::COMPANY),
            durations: cell(columns::DURATION),
            key_projects: cell(columns::KEY_PROJECTS),
            activity: cell(columns::ACTIVITY),
        }
    }

    fn fills(&self, required: &[&str]) -> bool {
        let fields = self.fields();
        required
            .iter()
            .all(|column| fields.iter().any(|(name, value)| name == column && !value.is_empty()))
    }
}

/// Ordered rows of a staff table. A person may span several rows, one per
/// activity they took part in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    records: Vec<PersonRecord>,
}

impl Roster {
    pub fn new(records: Vec<PersonRecord>) -> Self {
        Self { records }
    }

    /// Build a roster from a header row and data rows. Fails when a required
    /// column is absent; rows leaving a required field blank are dropped.
    pub fn from_table(headers: &[String], rows: &[Vec<String>]) -> Result<Self> {
        Self::from_table_requiring(headers, rows, &columns::REQUIRED)
    }

    /// Same as [`Roster::from_table`] with a caller-chosen set of required columns.
    pub fn from_table_requiring(headers: &[String], rows: &[Vec<String>], required: &[&str]) -> Result<Self> {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|required| !headers.iter().any(|h| h == *required))
            .map(|s| s.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TalentMatcherError::MissingColumns(missing));
        }

        let records: Vec<PersonRecord> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| PersonRecord::from_row(&headers, row, idx as u32 + 1))
            .filter(|record| record.fills(required))
            .collect();

        let dropped = rows.len() - records.len();
        if dropped > 0 {
            debug!("Dropped {} roster rows with missing required fields", dropped);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[PersonRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PersonRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First row carrying this name.
    pub fn find_by_name(&self, name: &str) -> Option<&PersonRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// A new roster with `other`'s rows appended after this one's.
    pub fn merged(&self, other: &Roster) -> Roster {
        let mut records = self.records.clone();
        records.extend(other.records.iter().cloned());
        Roster { records }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a PersonRecord;
    type IntoIter = std::slice::Iter<'a, PersonRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_table_maps_columns() {
        let headers = strings(&["ID", "Nom", "Compétence", "Activity", "Institution", "Diplôme", "Âge"]);
        let rows = vec![strings(&["12", "Alice", "python,sql", "Audit", "ENSIMAG", "Master", "31"])];

        let roster = Roster::from_table(&headers, &rows).unwrap();
        let alice = &roster.records()[0];
        assert_eq!(alice.id, 12);
        assert_eq!(alice.skills, "python,sql");
        assert_eq!(alice.age, Some(31));
        assert_eq!(alice.surname, "");
    }

    #[test]
    fn test_missing_required_columns() {
        let headers = strings(&["Nom", "Compétence", "Institution"]);
        match Roster::from_table(&headers, &[]) {
            Err(TalentMatcherError::MissingColumns(missing)) => {
                assert_eq!(missing, strings(&["Activity", "Diplôme"]));
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn test_rows_with_blank_required_fields_are_dropped() {
        let headers = strings(&["Nom", "Compétence", "Activity", "Institution", "Diplôme"]);
        let rows = vec![
            strings(&["Alice", "python", "Audit", "ENSIMAG", "Master"]),
            strings(&["Bob", "", "Audit", "ENSIMAG", "Master"]),
            strings(&["Chloé", "java", "Conseil", "INSA"]),
        ];

        let roster = Roster::from_table(&headers, &rows).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records()[0].name, "Alice");
        assert_eq!(roster.records()[0].id, 1);
    }

    #[test]
    fn test_person_columns_keep_blank_fields() {
        let headers = strings(&["Nom", "Compétence", "Diplôme", "Institution", "Activity"]);
        let rows = vec![
            strings(&["Eve", "python", "Master", "ENSIMAG", ""]),
            strings(&["", "java", "Licence", "INSA", "Audit"]),
        ];

        let people = Roster::from_table_requiring(&headers, &rows, &columns::PERSON_REQUIRED).unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people.records()[0].name, "Eve");
        assert_eq!(people.records()[0].activity, "");

        assert!(Roster::from_table(&headers, &rows).unwrap().is_empty());

        let nameless = strings(&["Compétence", "Activity"]);
        assert!(matches!(
            Roster::from_table_requiring(&nameless, &[], &columns::PERSON_REQUIRED),
            Err(TalentMatcherError::MissingColumns(_))
        ));
    }

    #[test]
    fn test_merged_keeps_order() {
        let a = Roster::new(vec![PersonRecord { name: "A".into(), ..Default::default() }]);
        let b = Roster::new(vec![PersonRecord { name: "B".into(), ..Default::default() }]);

        let merged = a.merged(&b);
        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(a.len(), 1);
    }
}
