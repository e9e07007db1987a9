//! Output formatters for screening reports

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::ScreeningReport;
use crate::processing::aggregator::{AnalysisResult, RecommendationTier};
use crate::processing::requirements::JobRequirements;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Strengths and gaps shown per candidate in non-detailed console output
const BRIEF_STRENGTHS: usize = 3;
const BRIEF_GAPS: usize = 2;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for downstream tools
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

fn format_timestamp(report: &ScreeningReport) -> String {
    chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn experience_label(requirements: &JobRequirements) -> String {
    if requirements.experience_level == 0 {
        "unspecified".to_string()
    } else {
        format!("{}+ years", requirements.experience_level)
    }
}

fn tier_label(tier: RecommendationTier) -> &'static str {
    match tier {
        RecommendationTier::Excellent => "EXCELLENT",
        RecommendationTier::Strong => "STRONG",
        RecommendationTier::Good => "GOOD",
        RecommendationTier::Moderate => "MODERATE",
        RecommendationTier::NotSuitable => "WEAK",
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

    fn score_color(score: u8) -> Color {
        match score {
            85..=u8::MAX => Color::Green,
            70..=84 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_score(&self, score: u8) -> String {
        self.colorize(&format!("{}%", score), Self::score_color(score))
    }

    fn format_tier_badge(&self, tier: RecommendationTier, score: u8) -> String {
        let badge = format!("[{}]", tier_label(tier));
        if self.use_colors {
            badge.color(Self::score_color(score)).bold().to_string()
        } else {
            badge
        }
    }

    fn format_candidate(&self, rank: usize, result: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "#{} {} {} {}\n",
            rank,
            result.file_name,
            self.format_score(result.overall_score),
            self.format_tier_badge(result.tier, result.overall_score)
        ));
        output.push_str(&format!(
            "   Skills {} | Experience {} | Education {}\n",
            self.format_score(result.skills_match),
            self.format_score(result.experience_match),
            self.format_score(result.education_match)
        ));

        let strength_limit = if self.detailed { result.key_strengths.len() } else { BRIEF_STRENGTHS };
        for strength in result.key_strengths.iter().take(strength_limit) {
            output.push_str(&format!("   {} {}\n", self.colorize("+", Color::Green), strength));
        }

        let gap_limit = if self.detailed { result.gaps.len() } else { BRIEF_GAPS };
        for gap in result.gaps.iter().take(gap_limit) {
            output.push_str(&format!("   {} {}\n", self.colorize("-", Color::Red), gap));
        }

        output.push_str(&format!(
            "   Recommendation: {}\n",
            self.colorize(&result.recommendation, Color::Cyan)
        ));

        if self.detailed {
            output.push_str(&format!("   {}\n", result.analysis));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();
        let requirements = &report.requirements;
        let summary = &report.summary;

        output.push_str(&self.format_header("RESUME SCREENING RESULTS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Job Requirements", 2));
        if self.detailed {
            output.push_str(&format!("Job: {}\n", report.metadata.job_description_preview));
        }
        output.push_str(&format!("Required skills: {}\n", join_or_none(&requirements.required_skills)));
        output.push_str(&format!("Preferred skills: {}\n", join_or_none(&requirements.preferred_skills)));
        output.push_str(&format!(
            "Experience: {} | Education: {}\n",
            experience_label(requirements),
            requirements.education_level
        ));

        output.push_str(&self.format_header("Candidate Rankings", 2));
        if report.results.is_empty() {
            output.push_str("No candidates to rank.\n");
        }
        for (index, result) in report.results.iter().enumerate() {
            output.push_str(&self.format_candidate(index + 1, result));
            output.push('\n');
        }
        if report.results.len() < summary.total_candidates {
            output.push_str(&format!(
                "... {} more candidate(s) not shown\n",
                summary.total_candidates - report.results.len()
            ));
        }

        output.push_str(&self.format_header("Batch Summary", 2));
        output.push_str(&format!(
            "Candidates: {} | Average score: {:.1}%\n",
            summary.total_candidates, summary.average_score
        ));
        output.push_str(&format!(
            "Top (80%+): {} | Good (70-79%): {} | Weak (<70%): {}\n",
            summary.top_candidates, summary.good_candidates, summary.weak_candidates
        ));

        if !summary.top_chart.is_empty() {
            output.push_str(&self.format_header("Top Candidates", 3));
            for entry in &summary.top_chart {
                let bar = "█".repeat(usize::from(entry.overall_score / 5));
                output.push_str(&format!(
                    "{:<28} {} {}\n",
                    entry.file_name,
                    self.colorize(&bar, Self::score_color(entry.overall_score)),
                    entry.overall_score
                ));
            }
        }

        if !summary.guidance.is_empty() {
            output.push_str(&self.format_header("Next Steps", 3));
            for line in &summary.guidance {
                output.push_str(&format!("• {}\n", line));
            }
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
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
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
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();
        let requirements = &report.requirements;
        let summary = &report.summary;

        output.push_str("# Resume Screening Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms | **Candidates:** {}\n\n",
                format_timestamp(report),
                report.metadata.processing_time_ms,
                report.metadata.resume_count
            ));
        }

        output.push_str("## Job Requirements\n\n");
        output.push_str(&format!("- **Required skills:** {}\n", join_or_none(&requirements.required_skills)));
        output.push_str(&format!("- **Preferred skills:** {}\n", join_or_none(&requirements.preferred_skills)));
        output.push_str(&format!("- **Experience:** {}\n", experience_label(requirements)));
        output.push_str(&format!("- **Education:** {}\n\n", requirements.education_level));

        output.push_str("## Rankings\n\n");
        output.push_str("| Rank | Candidate | Overall | Skills | Experience | Education | Recommendation |\n");
        output.push_str("|------|-----------|---------|--------|------------|-----------|----------------|\n");
        for (index, result) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {}% | {}% | {}% | {}% | {} |\n",
                index + 1,
                Self::escape_cell(&result.file_name),
                result.overall_score,
                result.skills_match,
                result.experience_match,
                result.education_match,
                result.recommendation
            ));
        }
        output.push('\n');

        output.push_str("## Candidate Details\n\n");
        for (index, result) in report.results.iter().enumerate() {
            output.push_str(&format!("### {}. {} ({}%)\n\n", index + 1, result.file_name, result.overall_score));
            output.push_str(&format!("{}\n\n", result.analysis));
            output.push_str("**Strengths**\n\n");
            for strength in &result.key_strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push_str("\n**Gaps**\n\n");
            for gap in &result.gaps {
                output.push_str(&format!("- {}\n", gap));
            }
            output.push('\n');
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("- **Average score:** {:.1}%\n", summary.average_score));
        output.push_str(&format!("- **Top candidates (80%+):** {}\n", summary.top_candidates));
        output.push_str(&format!("- **Good candidates (70-79%):** {}\n", summary.good_candidates));
        output.push_str(&format!("- **Weak candidates (<70%):** {}\n\n", summary.weak_candidates));

        if !summary.guidance.is_empty() {
            output.push_str("### Next Steps\n\n");
            for line in &summary.guidance {
                output.push_str(&format!("- {}\n", line));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by Resume Screener v{}*\n", report.metadata.screener_version));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

struct HtmlCandidate {
    rank: usize,
    file_name: String,
    overall_score: u8,
    score_class: &'static str,
    skills_match: u8,
    experience_match: u8,
    education_match: u8,
    key_strengths: Vec<String>,
    gaps: Vec<String>,
    recommendation: String,
    analysis: String,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Screening Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 960px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { border-bottom: 3px solid #007acc; padding-bottom: 12px; }
        h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 8px; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e9ecef; }
        .score-high { color: #28a745; font-weight: bold; }
        .score-mid { color: #b8860b; font-weight: bold; }
        .score-low { color: #dc3545; font-weight: bold; }
        .candidate { border-left: 4px solid #007acc; padding: 10px 16px; margin: 16px 0; background: #f8f9fa; }
        .metadata { color: #6c757d; font-size: 0.9em; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>Resume Screening Report</h1>
        <p>Generated {{ generated_at }} in {{ processing_time }}ms</p>

        <h2>Job Requirements</h2>
        <ul>
            <li><strong>Required skills:</strong> {{ required_skills }}</li>
            <li><strong>Preferred skills:</strong> {{ preferred_skills }}</li>
            <li><strong>Experience:</strong> {{ experience }}</li>
            <li><strong>Education:</strong> {{ education }}</li>
        </ul>

        <h2>Rankings</h2>
        <table>
            <tr><th>Rank</th><th>Candidate</th><th>Overall</th><th>Skills</th><th>Experience</th><th>Education</th></tr>
            {% for c in candidates %}
            <tr>
                <td>{{ c.rank }}</td>
                <td>{{ c.file_name }}</td>
                <td class="{{ c.score_class }}">{{ c.overall_score }}%</td>
                <td>{{ c.skills_match }}%</td>
                <td>{{ c.experience_match }}%</td>
                <td>{{ c.education_match }}%</td>
            </tr>
            {% endfor %}
        </table>

        {% for c in candidates %}
        <div class="candidate">
            <h3>{{ c.rank }}. {{ c.file_name }} <span class="{{ c.score_class }}">{{ c.overall_score }}%</span></h3>
            <p><strong>{{ c.recommendation }}</strong></p>
            <p>{{ c.analysis }}</p>
            <p>Strengths:</p>
            <ul>{% for s in c.key_strengths %}<li>{{ s }}</li>{% endfor %}</ul>
            <p>Gaps:</p>
            <ul>{% for g in c.gaps %}<li>{{ g }}</li>{% endfor %}</ul>
        </div>
        {% endfor %}

        <h2>Summary</h2>
        <p>{{ total_candidates }} candidates, average score {{ average_score }}%</p>
        <p>Top (80%+): {{ top_candidates }} | Good (70-79%): {{ good_candidates }} | Weak (&lt;70%): {{ weak_candidates }}</p>
        {% if has_guidance %}
        <ul>{% for line in guidance %}<li>{{ line }}</li>{% endfor %}</ul>
        {% endif %}

        <div class="metadata">
            <p>Generated by Resume Screener v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    required_skills: String,
    preferred_skills: String,
    experience: String,
    education: String,
    candidates: Vec<HtmlCandidate>,
    total_candidates: usize,
    average_score: String,
    top_candidates: usize,
    good_candidates: usize,
    weak_candidates: usize,
    has_guidance: bool,
    guidance: Vec<String>,
    version: String,
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn score_class(score: u8) -> &'static str {
        match score {
            85..=u8::MAX => "score-high",
            70..=84 => "score-mid",
            _ => "score-low",
        }
    }

    fn create_template_data(&self, report: &ScreeningReport) -> HtmlTemplate {
        let candidates = report
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| HtmlCandidate {
                rank: index + 1,
                file_name: result.file_name.clone(),
                overall_score: result.overall_score,
                score_class: Self::score_class(result.overall_score),
                skills_match: result.skills_match,
                experience_match: result.experience_match,
                education_match: result.education_match,
                key_strengths: result.key_strengths.clone(),
                gaps: result.gaps.clone(),
                recommendation: result.recommendation.clone(),
                analysis: result.analysis.clone(),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: format_timestamp(report),
            processing_time: report.metadata.processing_time_ms,
            required_skills: join_or_none(&report.requirements.required_skills),
            preferred_skills: join_or_none(&report.requirements.preferred_skills),
            experience: experience_label(&report.requirements),
            education: report.requirements.education_level.to_string(),
            candidates,
            total_candidates: report.summary.total_candidates,
            average_score: format!("{:.1}", report.summary.average_score),
            top_candidates: report.summary.top_candidates,
            good_candidates: report.summary.good_candidates,
            weak_candidates: report.summary.weak_candidates,
            has_guidance: !report.summary.guidance.is_empty(),
            guidance: report.summary.guidance.clone(),
            version: report.metadata.screener_version.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ScreenerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
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

pub fn suggest_filename(format: &OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("screening{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("screening{}.json", timestamp_suffix),
        OutputFormat::Markdown => format!("screening{}.md", timestamp_suffix),
        OutputFormat::Html => format!("screening{}.html", timestamp_suffix),
    }
}
