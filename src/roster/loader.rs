//! Roster loading from delimited text and spreadsheet files

use crate::error::{Result, TalentMatcherError};
use crate::input::file_detector::FileType;
use crate::roster::{columns, Roster};
use calamine::{open_workbook_auto, DataType, Reader};
use log::info;
use std::path::Path;

/// Header row plus data rows, all cells trimmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster, picking the reader from the file extension.
    pub fn load(path: &Path) -> Result<Roster> {
        Self::load_requiring(path, &columns::REQUIRED)
    }

    /// Load people to add to a roster. Only the name must be filled, so a new
    /// hire with no activity yet is kept.
    pub fn load_people(path: &Path) -> Result<Roster> {
        Self::load_requiring(path, &columns::PERSON_REQUIRED)
    }

    fn load_requiring(path: &Path, required: &[&str]) -> Result<Roster> {
        let table = Self::load_table(path)?;
        if table.rows.is_empty() {
            return Err(TalentMatcherError::EmptyInput(format!(
                "No data rows in: {}",
                path.display()
            )));
        }

        let roster = Roster::from_table_requiring(&table.headers, &table.rows, required)?;
        if roster.is_empty() {
            return Err(TalentMatcherError::EmptyInput(format!(
                "Every row of {} is missing a required field",
                path.display()
            )));
        }

        info!("Loaded {} roster rows from {}", roster.len(), path.display());
        Ok(roster)
    }

    pub fn load_table(path: &Path) -> Result<Table> {
        match FileType::from_path(path) {
            FileType::Csv => Self::read_delimited(path, b','),
            FileType::Tsv => Self::read_delimited(path, b'\t'),
            FileType::Spreadsheet => Self::read_spreadsheet(path),
            _ => Err(TalentMatcherError::UnsupportedFormat(format!(
                "Unsupported roster file: {} (expected .csv, .tsv, .xlsx or .xls)",
                path.display()
            ))),
        }
    }

    fn read_delimited(path: &Path, delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|value| value.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let values: Vec<String> = record?.iter().map(|value| value.trim().to_string()).collect();
            if values.iter().all(|value| value.is_empty()) {
                continue;
            }
            rows.push(values);
        }

        Ok(Table { headers, rows })
    }

    fn read_spreadsheet(path: &Path) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|err| TalentMatcherError::Tabular(format!("Unable to open the spreadsheet: {}", err)))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| TalentMatcherError::EmptyInput("The workbook does not contain any worksheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .ok_or_else(|| TalentMatcherError::Tabular(format!("Unable to read the worksheet named '{}'", sheet_name)))?
            .map_err(|err| TalentMatcherError::Tabular(format!("Unable to read the worksheet data: {}", err)))?;

        let mut rows_iter = range.rows();
        let header_row = rows_iter
            .next()
            .ok_or_else(|| TalentMatcherError::EmptyInput("The worksheet is empty".to_string()))?;

        let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();
        let mut rows = Vec::new();
        for row in rows_iter {
            let values: Vec<String> = row.iter().map(cell_to_string).collect();
            if values.iter().all(|value| value.is_empty()) {
                continue;
            }
            rows.push(values);
        }

        Ok(Table { headers, rows })
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        // Integral floats come back as "12.0" otherwise.
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        _ => cell.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "staff.csv",
            "Nom,Compétence,Activity,Institution,Diplôme\nAlice,\"python,sql\",Audit,ENSIMAG,Master\n,,,,\n",
        );

        let roster = RosterLoader::load(&path).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records()[0].skills, "python,sql");
    }

    #[test]
    fn test_load_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "staff.tsv",
            "Nom\tCompétence\tActivity\tInstitution\tDiplôme\nBob\tjava\tConseil\tINSA\tLicence\n",
        );

        let roster = RosterLoader::load(&path).unwrap();
        assert_eq!(roster.records()[0].name, "Bob");
        assert_eq!(roster.records()[0].activity, "Conseil");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "staff.json", "[]");

        assert!(matches!(
            RosterLoader::load(&path),
            Err(TalentMatcherError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_header_only_file_is_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "staff.csv", "Nom,Compétence,Activity,Institution,Diplôme\n");

        assert!(matches!(RosterLoader::load(&path), Err(TalentMatcherError::EmptyInput(_))));
    }
}
