//! Structured values pulled out of segmented CV text

use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Job titles, companies and date ranges found in an experience block.
///
/// The three lists are extracted independently and are not aligned: the
/// n-th title does not necessarily belong to the n-th company or range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmploymentDetails {
    pub job_titles: Vec<String>,
    pub companies: Vec<String>,
    pub date_ranges: Vec<String>,
}

pub struct FieldExtractor {
    date_regex: Regex,
    title_regex: Regex,
    company_regex: Regex,
    range_regex: Regex,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        let range = r"\d{2}/\d{2}/\d{4}\s*-\s*\d{2}/\d{2}/\d{4}";

        Ok(Self {
            date_regex: Regex::new(r"\b(\d{2}/\d{2}/\d{4})\b")?,
            title_regex: Regex::new(r"[\w\s]+$")?,
            company_regex: RegexBuilder::new(r"(?:entreprise|company)\s*:\s*(\w+)")
                .case_insensitive(true)
                .build()?,
            range_regex: Regex::new(range)?,
        })
    }

    /// First dd/mm/yyyy date in the text, if any.
    pub fn find_date<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.date_regex.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
    }

    pub fn extract_employment(&self, text: &str) -> EmploymentDetails {
        let job_titles = self.job_titles(text);

        let companies = self
            .company_regex
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect();

        let date_ranges = self
            .range_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();

        EmploymentDetails {
            job_titles,
            companies,
            date_ranges,
        }
    }

    /// Word run ending in whitespace right before each date range. The range
    /// itself stays available, so the end year of one range can title the
    /// next range when they follow each other.
    fn job_titles(&self, text: &str) -> Vec<String> {
        let mut titles = Vec::new();
        let mut search_from = 0;

        for range in self.range_regex.find_iter(text) {
            let before = &text[search_from..range.start()];
            let Some(run) = self.title_regex.find(before) else {
                continue;
            };
            let run = run.as_str();
            if run.chars().nth(1).is_none() || !run.ends_with(char::is_whitespace) {
                continue;
            }

            search_from = range.start();
            let title = run.trim();
            if !title.is_empty() {
                titles.push(title.to_string());
            }
        }

        titles
    }
}

/// Age in whole years on `today` for a dd/mm/yyyy birth date. `None` when
/// the date cannot be parsed or lies after `today`.
pub fn age_on(birth_date: &str, today: NaiveDate) -> Option<u32> {
    let birth = NaiveDate::parse_from_str(birth_date.trim(), DATE_FORMAT).ok()?;

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    u32::try_from(years).ok()
}
