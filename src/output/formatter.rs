//! Output formatters - console, JSON, markdown and HTML renderings of a report

use crate::config::OutputFormat;
use crate::error::{Result, TalentMatcherError};
use crate::output::report::*;
use crate::roster::PersonRecord;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
    detailed: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 960px; margin: 0 auto; padding: 24px; color: #2c3e50; }
        h1 { border-bottom: 3px solid #3498db; padding-bottom: 8px; }
        .meta { color: #7f8c8d; font-size: 0.9em; }
        table { border-collapse: collapse; width: 100%; margin: 16px 0; }
        th, td { border: 1px solid #dfe6e9; padding: 8px; text-align: left; vertical-align: top; }
        th { background: #ecf0f1; }
        .score { font-weight: bold; color: #27ae60; }
        .empty { color: #e67e22; font-style: italic; }
        details { margin: 8px 0; }
    </style>
    {% endif %}
</head>
<body>
    <h1>{{ title }}</h1>
    <p class="meta">Generated {{ generated_at }} from {{ source }} (talent-matcher {{ version }})</p>
    {{ body_html|safe }}
</body>
</html>"#,
    ext = "html"
)]
struct HtmlTemplate {
    title: String,
    generated_at: String,
    source: String,
    version: String,
    include_styles: bool,
    body_html: String,
}

fn format_timestamp(metadata: &ReportMetadata) -> String {
    metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Non-empty fields of a record, in roster column order.
fn filled_fields(record: &PersonRecord) -> Vec<(&'static str, String)> {
    record
        .fields()
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

fn no_results_message(report: &Report) -> &'static str {
    match report {
        Report::Project(_) => "No project fields found in the description.",
        Report::Staffing(_) => "No matching staff found.",
        Report::Profile(_) => "",
        Report::Activities(_) => "No activities to recommend: nobody similar was found.",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_record(&self, record: &PersonRecord, output: &mut String) {
        for (label, value) in filled_fields(record) {
            output.push_str(&format!("      {}: {}\n", self.colorize(label, Color::Cyan), value));
        }
    }

    fn format_project(&self, report: &ProjectReport, output: &mut String) {
        for field in &report.fields {
            output.push_str(&format!("{}: {}\n", self.colorize(&field.label, Color::Cyan), field.value));
        }
    }

    fn format_staffing(&self, report: &StaffingReport, output: &mut String) {
        output.push_str(&format!("Keywords: {}\n", self.colorize(&report.keywords, Color::Cyan)));
        output.push_str(&format!("Roster rows scored: {}\n", report.roster_size));

        output.push_str(&self.format_header("Ranking", 2));
        for (rank, candidate) in report.candidates.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {} (ID {}) score {}\n",
                rank + 1,
                self.colorize(&candidate.name, Color::White),
                candidate.id,
                self.colorize(&format!("{:.2}", candidate.score), Color::Green)
            ));
            if self.detailed {
                self.format_record(&candidate.record, output);
            }
        }
    }

    fn format_profile(&self, report: &ProfileReport, output: &mut String) {
        let profile = &report.profile;
        self.format_record(&profile.record, output);

        if let Some(date) = &profile.birth_date {
            output.push_str(&format!("      Date de naissance: {}\n", date));
        }

        if self.detailed {
            output.push_str(&self.format_header("Sections", 2));
            for (section, fragments) in &profile.sections.sections {
                output.push_str(&format!("{}\n", self.colorize(section.label(), Color::Yellow)));
                for fragment in fragments {
                    output.push_str(&format!("  • {}\n", fragment));
                }
            }
            if !profile.sections.unclassified.is_empty() {
                output.push_str(&format!(
                    "{}\n  {}\n",
                    self.colorize("Non classé", Color::Yellow),
                    profile.sections.unclassified
                ));
            }
        }
    }

    fn format_activities(&self, report: &ActivityReport, output: &mut String) {
        let recommendation = &report.recommendation;
        output.push_str(&format!("Person: {}\n", self.colorize(&recommendation.target, Color::Cyan)));

        output.push_str(&self.format_header("Similar People", 2));
        if recommendation.similar_people.is_empty() {
            output.push_str("  none\n");
        }
        for (rank, person) in recommendation.similar_people.iter().enumerate() {
            output.push_str(&format!("{:>3}. {} ({:.2})\n", rank + 1, person.name, person.score));
        }

        output.push_str(&self.format_header("Recommended Activities", 2));
        for (rank, activity) in recommendation.activities.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {} score {}\n",
                rank + 1,
                activity.activity,
                self.colorize(&format!("{:.2}", activity.score), Color::Green)
            ));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();
        let metadata = report.metadata();

        output.push_str(&self.format_header(report.title(), 1));
        output.push_str(&format!("Generated: {} | Source: {}\n", format_timestamp(metadata), metadata.source));

        if report.has_no_results() {
            output.push_str(&format!("\n{}\n", self.colorize(no_results_message(report), Color::Yellow)));
        }

        match report {
            Report::Project(r) => self.format_project(r, &mut output),
            Report::Staffing(r) => self.format_staffing(r, &mut output),
            Report::Profile(r) => self.format_profile(r, &mut output),
            Report::Activities(r) => self.format_activities(r, &mut output),
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self { include_metadata, detailed }
    }

    fn escape_cell(value: &str) -> String {
        value.replace('|', "\\|").replace('\n', " ")
    }

    fn record_table(record: &PersonRecord, output: &mut String) {
        output.push_str("| Field | Value |\n|-------|-------|\n");
        for (label, value) in filled_fields(record) {
            output.push_str(&format!("| {} | {} |\n", label, Self::escape_cell(&value)));
        }
        output.push('\n');
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = format!("# {}\n\n", report.title());

        if self.include_metadata {
            let metadata = report.metadata();
            output.push_str(&format!(
                "**Generated:** {} | **Source:** `{}` | **Version:** {}\n\n",
                format_timestamp(metadata),
                metadata.source,
                metadata.tool_version
            ));
        }

        if report.has_no_results() {
            output.push_str(&format!("_{}_\n\n", no_results_message(report)));
        }

        match report {
            Report::Project(r) => {
                for field in &r.fields {
                    output.push_str(&format!("## {}\n\n{}\n\n", field.label, field.value));
                }
            }
            Report::Staffing(r) => {
                output.push_str(&format!("**Keywords:** {}\n\n", r.keywords));
                output.push_str("| Rank | ID | Name | Score |\n|------|----|------|-------|\n");
                for (rank, c) in r.candidates.iter().enumerate() {
                    output.push_str(&format!(
                        "| {} | {} | {} | {:.2} |\n",
                        rank + 1,
                        c.id,
                        Self::escape_cell(&c.name),
                        c.score
                    ));
                }
                output.push('\n');
                if self.detailed {
                    for c in &r.candidates {
                        output.push_str(&format!("### {} (ID {})\n\n", c.name, c.id));
                        Self::record_table(&c.record, &mut output);
                    }
                }
            }
            Report::Profile(r) => {
                Self::record_table(&r.profile.record, &mut output);
                if self.detailed {
                    for (section, fragments) in &r.profile.sections.sections {
                        output.push_str(&format!("### {}\n\n", section.label()));
                        for fragment in fragments {
                            output.push_str(&format!("- {}\n", fragment));
                        }
                        output.push('\n');
                    }
                }
            }
            Report::Activities(r) => {
                let rec = &r.recommendation;
                output.push_str(&format!("**Person:** {}\n\n## Similar People\n\n", rec.target));
                output.push_str("| Name | Similarity |\n|------|------------|\n");
                for p in &rec.similar_people {
                    output.push_str(&format!("| {} | {:.2} |\n", Self::escape_cell(&p.name), p.score));
                }
                output.push_str("\n## Recommended Activities\n\n");
                output.push_str("| Rank | Activity | Score |\n|------|----------|-------|\n");
                for (rank, a) in rec.activities.iter().enumerate() {
                    output.push_str(&format!("| {} | {} | {:.2} |\n", rank + 1, Self::escape_cell(&a.activity), a.score));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, detailed: bool) -> Self {
        Self { include_styles, detailed }
    }

    fn record_details(summary: &str, record: &PersonRecord) -> String {
        let rows: String = filled_fields(record)
            .iter()
            .map(|(label, value)| format!("<tr><th>{}</th><td>{}</td></tr>", escape_html(label), escape_html(value)))
            .collect();
        format!("<details><summary>{}</summary><table>{}</table></details>\n", escape_html(summary), rows)
    }

    fn create_body(&self, report: &Report) -> String {
        let mut body = String::new();

        if report.has_no_results() {
            body.push_str(&format!("<p class=\"empty\">{}</p>\n", no_results_message(report)));
        }

        match report {
            Report::Project(r) => {
                body.push_str("<table>\n");
                for field in &r.fields {
                    body.push_str(&format!(
                        "<tr><th>{}</th><td>{}</td></tr>\n",
                        escape_html(&field.label),
                        escape_html(&field.value)
                    ));
                }
                body.push_str("</table>\n");
            }
            Report::Staffing(r) => {
                body.push_str(&format!("<p>Keywords: <strong>{}</strong></p>\n", escape_html(&r.keywords)));
                body.push_str("<table>\n<tr><th>Rank</th><th>ID</th><th>Name</th><th>Score</th></tr>\n");
                for (rank, c) in r.candidates.iter().enumerate() {
                    body.push_str(&format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"score\">{:.2}</td></tr>\n",
                        rank + 1,
                        c.id,
                        escape_html(&c.name),
                        c.score
                    ));
                }
                body.push_str("</table>\n");
                if self.detailed {
                    for c in &r.candidates {
                        body.push_str(&Self::record_details(&format!("{} (ID {})", c.name, c.id), &c.record));
                    }
                }
            }
            Report::Profile(r) => {
                body.push_str(&Self::record_details(&r.profile.record.name, &r.profile.record));
                if self.detailed {
                    for (section, fragments) in &r.profile.sections.sections {
                        body.push_str(&format!("<h3>{}</h3>\n<ul>\n", escape_html(section.label())));
                        for fragment in fragments {
                            body.push_str(&format!("<li>{}</li>\n", escape_html(fragment)));
                        }
                        body.push_str("</ul>\n");
                    }
                }
            }
            Report::Activities(r) => {
                let rec = &r.recommendation;
                body.push_str(&format!("<p>Person: <strong>{}</strong></p>\n", escape_html(&rec.target)));
                body.push_str("<h2>Similar People</h2>\n<table>\n<tr><th>Name</th><th>Similarity</th></tr>\n");
                for p in &rec.similar_people {
                    body.push_str(&format!(
                        "<tr><td>{}</td><td class=\"score\">{:.2}</td></tr>\n",
                        escape_html(&p.name),
                        p.score
                    ));
                }
                body.push_str("</table>\n<h2>Recommended Activities</h2>\n<table>\n<tr><th>Rank</th><th>Activity</th><th>Score</th></tr>\n");
                for (rank, a) in rec.activities.iter().enumerate() {
                    body.push_str(&format!(
                        "<tr><td>{}</td><td>{}</td><td class=\"score\">{:.2}</td></tr>\n",
                        rank + 1,
                        escape_html(&a.activity),
                        a.score
                    ));
                }
                body.push_str("</table>\n");
            }
        }

        body
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let metadata = report.metadata();
        let template = HtmlTemplate {
            title: report.title().to_string(),
            generated_at: format_timestamp(metadata),
            source: metadata.source.clone(),
            version: metadata.tool_version.clone(),
            include_styles: self.include_styles,
            body_html: self.create_body(report),
        };

        template
            .render()
            .map_err(|e| TalentMatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true, false),
            html_formatter: HtmlFormatter::new(true, false),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata, detailed),
            html_formatter: HtmlFormatter::new(true, detailed),
        }
    }

    pub fn generate_report(&self, report: &Report, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
