//! Combines dimension scores into the final per-resume record

use crate::processing::resume_parser::{ParsedResume, Resume};
use crate::processing::scoring::DimensionScores;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimension scores strictly above this earn a strength
pub const STRENGTH_THRESHOLD: f64 = 80.0;
/// Dimension scores strictly below this are reported as gaps
pub const GAP_THRESHOLD: f64 = 60.0;
/// Dimension scores strictly above this get the positive analysis clause
pub const ANALYSIS_THRESHOLD: f64 = 70.0;

pub const DIVERSE_SKILLS_MIN: usize = 8;
pub const COMPREHENSIVE_EXPERIENCE_MIN: usize = 3;
pub const NARROW_SKILLS_MAX: usize = 3;

pub const FALLBACK_STRENGTH: &str = "Candidate shows potential";
pub const FALLBACK_GAP: &str = "No significant gaps identified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Excellent,
    Strong,
    Good,
    Moderate,
    NotSuitable,
}

impl RecommendationTier {
    /// Bands checked top-down; the first matching lower bound wins
    pub fn from_score(overall_score: u8) -> Self {
        match overall_score {
            85..=u8::MAX => RecommendationTier::Excellent,
            75..=84 => RecommendationTier::Strong,
            65..=74 => RecommendationTier::Good,
            50..=64 => RecommendationTier::Moderate,
            _ => RecommendationTier::NotSuitable,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RecommendationTier::Excellent => "Excellent match - Priority candidate for interview",
            RecommendationTier::Strong => "Strong candidate - Recommend for interview",
            RecommendationTier::Good => "Good potential - Consider for interview",
            RecommendationTier::Moderate => "Moderate fit - Review carefully",
            RecommendationTier::NotSuitable => "May not be suitable for this role",
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Final output record, one per resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub resume_id: String,
    pub file_name: String,
    pub overall_score: u8,
    pub skills_match: u8,
    pub experience_match: u8,
    pub education_match: u8,
    pub key_strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendation: String,
    pub tier: RecommendationTier,
    pub analysis: String,
}

fn round_score(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

fn or_fallback(items: Vec<String>, fallback: &str) -> Vec<String> {
    if items.is_empty() {
        vec![fallback.to_string()]
    } else {
        items
    }
}

pub fn key_strengths(scores: &DimensionScores, parsed: &ParsedResume) -> Vec<String> {
    let checks = [
        (scores.skills > STRENGTH_THRESHOLD, "Strong technical skill alignment"),
        (scores.experience > STRENGTH_THRESHOLD, "Excellent experience level match"),
        (scores.education > STRENGTH_THRESHOLD, "Strong educational background"),
        (parsed.skills.len() > DIVERSE_SKILLS_MIN, "Diverse technical skill set"),
        (parsed.experience.len() > COMPREHENSIVE_EXPERIENCE_MIN, "Comprehensive work experience"),
    ];

    let strengths = checks
        .iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, text)| text.to_string())
        .collect();

    or_fallback(strengths, FALLBACK_STRENGTH)
}

pub fn gaps(scores: &DimensionScores, parsed: &ParsedResume) -> Vec<String> {
    let checks = [
        (scores.skills < GAP_THRESHOLD, "Limited relevant technical skills"),
        (scores.experience < GAP_THRESHOLD, "Experience level below requirements"),
        (scores.education < GAP_THRESHOLD, "Educational background may not meet requirements"),
        (parsed.skills.len() < NARROW_SKILLS_MAX, "Limited technical skill diversity"),
    ];

    let gaps = checks
        .iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, text)| text.to_string())
        .collect();

    or_fallback(gaps, FALLBACK_GAP)
}

pub fn analysis_sentence(overall_score: u8, scores: &DimensionScores) -> String {
    let clause = |score: f64, good: &'static str, weak: &'static str| {
        if score > ANALYSIS_THRESHOLD {
            good
        } else {
            weak
        }
    };

    format!(
        "Candidate scored {}% overall match. {} {} {}",
        overall_score,
        clause(
            scores.skills,
            "Technical skills are well-aligned with requirements.",
            "Technical skills need strengthening."
        ),
        clause(
            scores.experience,
            "Experience level meets expectations.",
            "Experience level may be below ideal."
        ),
        clause(
            scores.education,
            "Educational background is appropriate.",
            "Educational requirements may not be fully met."
        ),
    )
}

/// Builds the result record; the overall score uses the unrounded
/// dimension scores.
pub fn aggregate(resume: &Resume, parsed: &ParsedResume, scores: &DimensionScores) -> AnalysisResult {
    let overall_score = round_score(scores.overall());
    let tier = RecommendationTier::from_score(overall_score);

    AnalysisResult {
        resume_id: resume.id.clone(),
        file_name: resume.file_name.clone(),
        overall_score,
        skills_match: round_score(scores.skills),
        experience_match: round_score(scores.experience),
        education_match: round_score(scores.education),
        key_strengths: key_strengths(scores, parsed),
        gaps: gaps(scores, parsed),
        recommendation: tier.message().to_string(),
        tier,
        analysis: analysis_sentence(overall_score, scores),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(skill_count: usize, experience_count: usize) -> ParsedResume {
        ParsedResume {
            skills: (0..skill_count).map(|i| format!("skill{}", i)).collect(),
            experience: (0..experience_count).map(|i| format!("{} years experience", i)).collect(),
            education: Vec::new(),
            raw_text: String::new(),
        }
    }

    fn scores(skills: f64, experience: f64, education: f64) -> DimensionScores {
        DimensionScores {
            skills,
            experience,
            education,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RecommendationTier::from_score(100), RecommendationTier::Excellent);
        assert_eq!(RecommendationTier::from_score(85), RecommendationTier::Excellent);
        assert_eq!(RecommendationTier::from_score(84), RecommendationTier::Strong);
        assert_eq!(RecommendationTier::from_score(75), RecommendationTier::Strong);
        assert_eq!(RecommendationTier::from_score(74), RecommendationTier::Good);
        assert_eq!(RecommendationTier::from_score(65), RecommendationTier::Good);
        assert_eq!(RecommendationTier::from_score(64), RecommendationTier::Moderate);
        assert_eq!(RecommendationTier::from_score(50), RecommendationTier::Moderate);
        assert_eq!(RecommendationTier::from_score(49), RecommendationTier::NotSuitable);
        assert_eq!(RecommendationTier::from_score(0), RecommendationTier::NotSuitable);
    }

    #[test]
    fn test_strengths_in_check_order() {
        let strengths = key_strengths(&scores(81.0, 95.0, 90.0), &parsed(9, 4));
        assert_eq!(
            strengths,
            vec![
                "Strong technical skill alignment",
                "Excellent experience level match",
                "Strong educational background",
                "Diverse technical skill set",
                "Comprehensive work experience",
            ]
        );
    }

    #[test]
    fn test_strength_thresholds_are_strict() {
        let strengths = key_strengths(&scores(80.0, 80.0, 80.0), &parsed(8, 3));
        assert_eq!(strengths, vec![FALLBACK_STRENGTH]);
    }

    #[test]
    fn test_gaps_and_fallback() {
        let found = gaps(&scores(59.9, 40.0, 50.0), &parsed(2, 0));
        assert_eq!(
            found,
            vec![
                "Limited relevant technical skills",
                "Experience level below requirements",
                "Educational background may not meet requirements",
                "Limited technical skill diversity",
            ]
        );

        let none = gaps(&scores(60.0, 60.0, 60.0), &parsed(3, 0));
        assert_eq!(none, vec![FALLBACK_GAP]);
    }

    #[test]
    fn test_analysis_sentence() {
        let text = analysis_sentence(82, &scores(70.0, 90.0, 90.0));
        assert_eq!(
            text,
            "Candidate scored 82% overall match. Technical skills need strengthening. \
             Experience level meets expectations. Educational background is appropriate."
        );
    }

    #[test]
    fn test_aggregate_rounds_after_weighting() {
        let resume = Resume::new("r1", "jane.txt", "");
        let result = aggregate(&resume, &parsed(2, 2), &scores(70.0, 90.0, 90.0));
        assert_eq!(result.overall_score, 82);
        assert_eq!(result.skills_match, 70);
        assert_eq!(result.tier, RecommendationTier::Strong);
        assert_eq!(result.recommendation, "Strong candidate - Recommend for interview");
        assert_eq!(result.resume_id, "r1");
        assert_eq!(result.file_name, "jane.txt");
    }

    #[test]
    fn test_aggregate_rounds_half_up() {
        // 0.4 * 52.5 + 0.35 * 80 + 0.25 * 85 = 70.25
        let resume = Resume::new("r2", "b.txt", "");
        let result = aggregate(&resume, &parsed(0, 0), &scores(52.5, 80.0, 85.0));
        assert_eq!(result.skills_match, 53);
        assert_eq!(result.overall_score, 70);
    }
}
