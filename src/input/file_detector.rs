//! File type detection

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Csv,
    Tsv,
    Spreadsheet,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "csv" => FileType::Csv,
            "tsv" | "tab" => FileType::Tsv,
            "xlsx" | "xls" => FileType::Spreadsheet,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &std::path::Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Formats a roster can be loaded from.
    pub fn is_tabular(&self) -> bool {
        matches!(self, FileType::Csv | FileType::Tsv | FileType::Spreadsheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_detection_by_extension() {
        assert_eq!(FileType::from_path(Path::new("cv.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("staff.tsv")), FileType::Tsv);
        assert_eq!(FileType::from_path(Path::new("staff.xls")), FileType::Spreadsheet);
        assert_eq!(FileType::from_path(Path::new("notes")), FileType::Unknown);
        assert!(FileType::Csv.is_tabular());
        assert!(!FileType::Markdown.is_tabular());
    }
}
