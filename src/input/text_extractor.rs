//! Text extraction from various file formats

use crate::error::{Result, TalentMatcherError};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(TalentMatcherError::Io)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            TalentMatcherError::ExtractionFailure(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(TalentMatcherError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(TalentMatcherError::Io)?;
        self.markdown_to_text(&markdown_content)
    }
}

impl MarkdownExtractor {
    /// Render markdown and keep one line per block, which is what the
    /// line-based segmenter expects.
    pub fn markdown_to_text(&self, markdown: &str) -> Result<String> {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        let block_end = Regex::new(r"</(p|h[1-6]|li)>|<br\s*/?>")?;
        let tag = Regex::new(r"<[^>]*>")?;

        let text = block_end.replace_all(&html_output, "\n");
        let text = tag.replace_all(&text, "");
        let text = text
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_blocks_become_lines() {
        let md = "# Nom du projet: Alpha\n\n**Objectifs**: Build X\n\n- python\n- sql & co\n";
        let text = MarkdownExtractor.markdown_to_text(md).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Nom du projet: Alpha", "Objectifs: Build X", "python", "sql & co"]);
    }
}
