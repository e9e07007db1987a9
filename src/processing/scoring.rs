//! Dimension scorers: skills, experience and education
//!
//! Every scorer returns a value in `[0, 100]`. Rounding happens in the
//! aggregator, after the weighted overall score is computed from the raw
//! values.

use crate::error::Result;
use crate::processing::requirements::{parse_year_count, EducationLevel, JobRequirements};
use crate::processing::resume_parser::ParsedResume;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const SKILLS_WEIGHT: f64 = 0.4;
pub const EXPERIENCE_WEIGHT: f64 = 0.35;
pub const EDUCATION_WEIGHT: f64 = 0.25;

pub const REQUIRED_SKILLS_WEIGHT: f64 = 0.7;
pub const PREFERRED_SKILLS_WEIGHT: f64 = 0.3;

/// Score when the job names no skills
pub const DEFAULT_SKILLS_SCORE: f64 = 75.0;
/// Score when the job names no experience level
pub const DEFAULT_EXPERIENCE_SCORE: f64 = 80.0;
/// Score when the job accepts any education
pub const DEFAULT_EDUCATION_SCORE: f64 = 85.0;

/// Bonus for resumes listing more than `SKILL_BREADTH_THRESHOLD` skills
pub const SKILL_BREADTH_BONUS: f64 = 10.0;
pub const SKILL_BREADTH_THRESHOLD: usize = 5;

/// (minimum years ratio, score), checked top-down
pub const EXPERIENCE_TIERS: [(f64, f64); 4] = [(1.2, 95.0), (1.0, 90.0), (0.8, 75.0), (0.5, 60.0)];
pub const EXPERIENCE_FLOOR_SCORE: f64 = 40.0;

pub const EDUCATION_MEETS_SCORE: f64 = 90.0;
pub const EDUCATION_ONE_BELOW_SCORE: f64 = 70.0;
pub const EDUCATION_BELOW_SCORE: f64 = 50.0;

/// Raw, unrounded dimension scores for one resume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl DimensionScores {
    pub fn overall(&self) -> f64 {
        overall_score(self.skills, self.experience, self.education)
    }
}

pub fn overall_score(skills: f64, experience: f64, education: f64) -> f64 {
    skills * SKILLS_WEIGHT + experience * EXPERIENCE_WEIGHT + education * EDUCATION_WEIGHT
}

fn matched_ratio(wanted: &[String], resume_skills: &[String]) -> f64 {
    if wanted.is_empty() {
        return 0.0;
    }
    let matched = wanted.iter().filter(|skill| resume_skills.contains(skill)).count();
    matched as f64 / wanted.len() as f64
}

pub fn skills_match(resume_skills: &[String], requirements: &JobRequirements) -> f64 {
    if requirements.skill_count() == 0 {
        return DEFAULT_SKILLS_SCORE;
    }

    let required = matched_ratio(&requirements.required_skills, resume_skills) * 100.0 * REQUIRED_SKILLS_WEIGHT;
    let preferred = matched_ratio(&requirements.preferred_skills, resume_skills) * 100.0 * PREFERRED_SKILLS_WEIGHT;
    let bonus = if resume_skills.len() > SKILL_BREADTH_THRESHOLD {
        SKILL_BREADTH_BONUS
    } else {
        0.0
    };

    (required + preferred + bonus).min(100.0)
}

/// Step function over `resume_years / required_years`
pub fn experience_match(resume_years: u32, required_years: u32) -> f64 {
    if required_years == 0 {
        return DEFAULT_EXPERIENCE_SCORE;
    }

    let ratio = f64::from(resume_years) / f64::from(required_years);
    EXPERIENCE_TIERS
        .iter()
        .find(|(min_ratio, _)| ratio >= *min_ratio)
        .map(|(_, score)| *score)
        .unwrap_or(EXPERIENCE_FLOOR_SCORE)
}

pub fn education_match(resume_level: EducationLevel, required_level: EducationLevel) -> f64 {
    if required_level == EducationLevel::Any {
        return DEFAULT_EDUCATION_SCORE;
    }

    let resume_rank = resume_level.rank();
    let required_rank = required_level.rank();

    if resume_rank >= required_rank {
        EDUCATION_MEETS_SCORE
    } else if resume_rank + 1 == required_rank {
        EDUCATION_ONE_BELOW_SCORE
    } else {
        EDUCATION_BELOW_SCORE
    }
}

/// Applies the three scorers to parsed resume signals
pub struct DimensionScorer {
    years_regex: Regex,
}

impl DimensionScorer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            years_regex: Regex::new(r"([0-9]+)\s*(?:years?|yrs?)")?,
        })
    }

    /// Largest "<n> years" figure across the experience snippets
    pub fn resume_years(&self, experience: &[String]) -> u32 {
        let joined = experience.join(" ");
        self.years_regex
            .captures_iter(&joined)
            .filter_map(|cap| cap.get(1))
            .map(|m| parse_year_count(m.as_str()))
            .max()
            .unwrap_or(0)
    }

    /// Education level shown in the snippets, associate/diploma included
    pub fn resume_education_level(&self, education: &[String]) -> EducationLevel {
        EducationLevel::detect(&education.join(" ").to_lowercase(), true)
    }

    pub fn score(&self, resume: &ParsedResume, requirements: &JobRequirements) -> DimensionScores {
        DimensionScores {
            skills: skills_match(&resume.skills, requirements),
            experience: experience_match(self.resume_years(&resume.experience), requirements.experience_level),
            education: education_match(
                self.resume_education_level(&resume.education),
                requirements.education_level,
            ),
        }
    }
}
