//! Screening report: ranked results plus a batch-level summary

use crate::processing::aggregator::AnalysisResult;
use crate::processing::requirements::JobRequirements;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use unicode_segmentation::UnicodeSegmentation;

/// Overall score at or above which a candidate counts as top
pub const TOP_CANDIDATE_SCORE: u8 = 80;
/// Overall score at or above which a candidate counts as good
pub const GOOD_CANDIDATE_SCORE: u8 = 70;

const JOB_PREVIEW_GRAPHEMES: usize = 160;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub metadata: ReportMetadata,
    pub requirements: JobRequirements,
    pub summary: BatchSummary,
    /// Ranked, best first
    pub results: Vec<AnalysisResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,
    pub screener_version: String,
    pub job_description_chars: usize,
    pub job_description_preview: String,
    pub resume_count: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Top,
    Good,
    Weak,
}

impl ScoreBand {
    pub fn from_score(overall_score: u8) -> Self {
        if overall_score >= TOP_CANDIDATE_SCORE {
            ScoreBand::Top
        } else if overall_score >= GOOD_CANDIDATE_SCORE {
            ScoreBand::Good
        } else {
            ScoreBand::Weak
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub file_name: String,
    pub overall_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_candidates: usize,
    pub average_score: f64,
    pub top_candidates: usize,
    pub good_candidates: usize,
    pub weak_candidates: usize,
    pub top_chart: Vec<ChartEntry>,
    pub guidance: Vec<String>,
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl BatchSummary {
    /// `results` are expected in ranked order; the chart takes the first
    /// `top_n` of them.
    pub fn from_results(results: &[AnalysisResult], top_n: usize) -> Self {
        let total_candidates = results.len();
        let average_score = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| f64::from(r.overall_score)).sum::<f64>() / total_candidates as f64
        };

        let count_band = |band: ScoreBand| {
            results
                .iter()
                .filter(|r| ScoreBand::from_score(r.overall_score) == band)
                .count()
        };
        let top_candidates = count_band(ScoreBand::Top);
        let good_candidates = count_band(ScoreBand::Good);
        let weak_candidates = count_band(ScoreBand::Weak);

        let top_chart = results
            .iter()
            .take(top_n)
            .map(|r| ChartEntry {
                file_name: r.file_name.clone(),
                overall_score: r.overall_score,
            })
            .collect();

        let mut guidance = Vec::new();
        if top_candidates > 0 {
            guidance.push(format!(
                "Priority: Schedule interviews with top {} candidate{} ({}%+ match)",
                top_candidates,
                plural(top_candidates),
                TOP_CANDIDATE_SCORE
            ));
        }
        if good_candidates > 0 {
            guidance.push(format!(
                "Consider: Review {} good candidate{} for backup options",
                good_candidates,
                plural(good_candidates)
            ));
        }
        if weak_candidates > 0 {
            guidance.push(format!(
                "Review: {} candidate{} may not meet minimum requirements",
                weak_candidates,
                plural(weak_candidates)
            ));
        }

        Self {
            total_candidates,
            average_score,
            top_candidates,
            good_candidates,
            weak_candidates,
            top_chart,
            guidance,
        }
    }
}

impl ScreeningReport {
    pub fn new(
        job_description: &str,
        requirements: JobRequirements,
        results: Vec<AnalysisResult>,
        processing_time_ms: u64,
        top_chart_entries: usize,
    ) -> Self {
        let summary = BatchSummary::from_results(&results, top_chart_entries);

        Self {
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                screener_version: env!("CARGO_PKG_VERSION").to_string(),
                job_description_chars: job_description.chars().count(),
                job_description_preview: preview(job_description, JOB_PREVIEW_GRAPHEMES),
                resume_count: results.len(),
                processing_time_ms,
            },
            requirements,
            summary,
            results,
        }
    }

    /// Keep only the first `n` ranked results; the summary still covers
    /// the whole batch.
    pub fn truncate_results(&mut self, n: usize) {
        self.results.truncate(n);
    }
}

/// Collapse whitespace and cut at a grapheme boundary, preferring the last
/// word boundary before the limit
pub fn preview(text: &str, max_graphemes: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.graphemes(true).count() <= max_graphemes {
        return collapsed;
    }

    let cut: String = collapsed.graphemes(true).take(max_graphemes).collect();
    let truncated = match cut.rfind(' ') {
        Some(space) if space > 0 => &cut[..space],
        _ => cut.as_str(),
    };
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::aggregator::RecommendationTier;
    use crate::processing::requirements::EducationLevel;

    fn result(name: &str, overall_score: u8) -> AnalysisResult {
        AnalysisResult {
            resume_id: name.to_string(),
            file_name: format!("{}.txt", name),
            overall_score,
            skills_match: overall_score,
            experience_match: overall_score,
            education_match: overall_score,
            key_strengths: vec!["Candidate shows potential".to_string()],
            gaps: vec!["No significant gaps identified".to_string()],
            recommendation: RecommendationTier::from_score(overall_score).message().to_string(),
            tier: RecommendationTier::from_score(overall_score),
            analysis: String::new(),
        }
    }

    #[test]
    fn test_summary_counts_and_guidance() {
        let results = vec![
            result("a", 91),
            result("b", 80),
            result("c", 79),
            result("d", 70),
            result("e", 69),
            result("f", 30),
        ];
        let summary = BatchSummary::from_results(&results, 5);

        assert_eq!(summary.total_candidates, 6);
        assert_eq!(summary.top_candidates, 2);
        assert_eq!(summary.good_candidates, 2);
        assert_eq!(summary.weak_candidates, 2);
        assert!((summary.average_score - 69.833_333).abs() < 1e-3);
        assert_eq!(summary.top_chart.len(), 5);
        assert_eq!(summary.top_chart[0].file_name, "a.txt");
        assert_eq!(
            summary.guidance,
            vec![
                "Priority: Schedule interviews with top 2 candidates (80%+ match)",
                "Consider: Review 2 good candidates for backup options",
                "Review: 2 candidates may not meet minimum requirements",
            ]
        );
    }

    #[test]
    fn test_summary_singular_and_empty() {
        let summary = BatchSummary::from_results(&[result("a", 85)], 5);
        assert_eq!(
            summary.guidance,
            vec!["Priority: Schedule interviews with top 1 candidate (80%+ match)"]
        );

        let empty = BatchSummary::from_results(&[], 5);
        assert_eq!(empty.total_candidates, 0);
        assert_eq!(empty.average_score, 0.0);
        assert!(empty.guidance.is_empty());
        assert!(empty.top_chart.is_empty());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short  text\nhere", 50), "short text here");
        assert_eq!(preview("one two three four", 9), "one two...");
        assert_eq!(preview("abcdefghij", 4), "abcd...");
        assert_eq!(preview("naïve café résumé", 11), "naïve café...");
    }

    #[test]
    fn test_truncate_keeps_summary() {
        let results = vec![result("a", 90), result("b", 60), result("c", 50)];
        let requirements = JobRequirements {
            required_skills: Vec::new(),
            preferred_skills: Vec::new(),
            experience_level: 0,
            education_level: EducationLevel::Any,
            keywords: Vec::new(),
        };
        let mut report = ScreeningReport::new("job text", requirements, results, 12, 5);
        report.truncate_results(1);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.summary.total_candidates, 3);
        assert_eq!(report.metadata.resume_count, 3);
        assert_eq!(report.metadata.job_description_chars, 8);
    }
}
