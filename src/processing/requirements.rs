//! Job requirement extraction

use crate::error::Result;
use crate::processing::vocabulary::SkillVocabulary;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of informational keywords kept per job description
pub const MAX_KEYWORDS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    Any,
    Associate,
    Bachelor,
    Master,
    Phd,
}

impl EducationLevel {
    pub fn rank(self) -> u8 {
        match self {
            EducationLevel::Any => 0,
            EducationLevel::Associate => 1,
            EducationLevel::Bachelor => 2,
            EducationLevel::Master => 3,
            EducationLevel::Phd => 4,
        }
    }

    /// Highest degree marked in `lowercased`. Markers are plain substrings,
    /// so "m.s" also fires on "team.session". Associate is only detected
    /// when `include_associate` is set.
    pub fn detect(lowercased: &str, include_associate: bool) -> Self {
        let has = |markers: &[&str]| markers.iter().any(|m| lowercased.contains(m));

        if has(&["phd", "doctorate"]) {
            EducationLevel::Phd
        } else if has(&["master", "m.s", "m.a"]) {
            EducationLevel::Master
        } else if has(&["bachelor", "b.s", "b.a"]) {
            EducationLevel::Bachelor
        } else if include_associate && has(&["associate", "diploma"]) {
            EducationLevel::Associate
        } else {
            EducationLevel::Any
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EducationLevel::Any => "any",
            EducationLevel::Associate => "associate",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
            EducationLevel::Phd => "phd",
        };
        write!(f, "{}", name)
    }
}

/// Structured requirements derived once per screening run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    /// Years; 0 means unspecified
    pub experience_level: u32,
    pub education_level: EducationLevel,
    /// Informational only, not used in scoring
    pub keywords: Vec<String>,
}

impl JobRequirements {
    pub fn all_skills(&self) -> impl Iterator<Item = &String> {
        self.required_skills.iter().chain(self.preferred_skills.iter())
    }

    pub fn skill_count(&self) -> usize {
        self.required_skills.len() + self.preferred_skills.len()
    }
}

pub struct RequirementExtractor {
    experience_regex: Regex,
    keyword_regex: Regex,
}

impl RequirementExtractor {
    pub fn new() -> Result<Self> {
        let experience_regex =
            Regex::new(r"([0-9]+)\s*\+?\s*years?\s*(?:of\s*)?(?:experience|exp)")?;
        let keyword_regex = Regex::new(r"(?-u:\b)[0-9A-Za-z_]{4,}(?-u:\b)")?;

        Ok(Self {
            experience_regex,
            keyword_regex,
        })
    }

    pub fn extract(&self, job_description: &str, vocabulary: &SkillVocabulary) -> JobRequirements {
        let text = job_description.to_lowercase();

        let experience_level = self.experience_years(&text);

        // Positional split over vocabulary order; the text's "must have" /
        // "nice to have" wording is not consulted.
        let mut required_skills = vocabulary.find_job_skills(&text);
        let midpoint = required_skills.len().div_ceil(2);
        let preferred_skills = required_skills.split_off(midpoint);

        let education_level = EducationLevel::detect(&text, false);

        let keywords = self
            .keyword_regex
            .find_iter(&text)
            .take(MAX_KEYWORDS)
            .map(|m| m.as_str().to_string())
            .collect();

        let requirements = JobRequirements {
            required_skills,
            preferred_skills,
            experience_level,
            education_level,
            keywords,
        };

        debug!(
            "Extracted requirements: {} required, {} preferred skills, {} years, education {}",
            requirements.required_skills.len(),
            requirements.preferred_skills.len(),
            requirements.experience_level,
            requirements.education_level
        );

        requirements
    }

    /// First "<n>+ years of experience" phrase, 0 when absent
    fn experience_years(&self, lowercased: &str) -> u32 {
        self.experience_regex
            .captures(lowercased)
            .and_then(|cap| cap.get(1))
            .map(|m| parse_year_count(m.as_str()))
            .unwrap_or(0)
    }
}

/// Parse a captured `[0-9]+` run. Counts too large for `u32` saturate.
pub(crate) fn parse_year_count(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> JobRequirements {
        let vocab = SkillVocabulary::new().unwrap();
        RequirementExtractor::new().unwrap().extract(text, &vocab)
    }

    #[test]
    fn test_experience_level_variants() {
        assert_eq!(extract("We need 5+ years of experience.").experience_level, 5);
        assert_eq!(extract("3 Years Experience in backend").experience_level, 3);
        assert_eq!(extract("7yearsexp").experience_level, 7);
        assert_eq!(extract("10 + year exp minimum").experience_level, 10);
        assert_eq!(extract("Several years of experience").experience_level, 0);
    }

    #[test]
    fn test_first_experience_phrase_wins() {
        let req = extract("2 years of experience with go, 8 years experience overall");
        assert_eq!(req.experience_level, 2);
    }

    #[test]
    fn test_overflowing_year_count_saturates() {
        let req = extract("12345678901 years of experience");
        assert_eq!(req.experience_level, u32::MAX);
        assert_eq!(parse_year_count("42"), 42);
        assert_eq!(parse_year_count("4294967296"), u32::MAX);
    }

    #[test]
    fn test_skill_split_rounds_up_to_required() {
        let req = extract("react, aws, docker");
        assert_eq!(req.required_skills, vec!["react", "aws"]);
        assert_eq!(req.preferred_skills, vec!["docker"]);

        let req = extract("Only python here");
        assert_eq!(req.required_skills, vec!["python"]);
        assert!(req.preferred_skills.is_empty());
    }

    #[test]
    fn test_no_skills() {
        let req = extract("A friendly office role");
        assert_eq!(req.skill_count(), 0);
    }

    #[test]
    fn test_education_precedence() {
        assert_eq!(extract("bachelor required").education_level, EducationLevel::Bachelor);
        assert_eq!(
            extract("PhD preferred, bachelor minimum").education_level,
            EducationLevel::Phd
        );
        assert_eq!(
            extract("Bachelor's or Master's degree").education_level,
            EducationLevel::Master
        );
        assert_eq!(extract("Doctorate welcome").education_level, EducationLevel::Phd);
        assert_eq!(extract("No degree needed").education_level, EducationLevel::Any);
        assert_eq!(extract("Associate degree").education_level, EducationLevel::Any);
    }

    #[test]
    fn test_keywords_limited_and_ordered() {
        let text = (0..30).map(|i| format!("word{:02}", i)).collect::<Vec<_>>().join(" ");
        let req = extract(&format!("a an the {}", text));
        assert_eq!(req.keywords.len(), MAX_KEYWORDS);
        assert_eq!(req.keywords[0], "word00");
        assert_eq!(req.keywords[19], "word19");
    }

    #[test]
    fn test_keywords_are_lowercased_and_min_length() {
        let req = extract("Senior Rust dev for APIs");
        assert_eq!(req.keywords, vec!["senior", "rust", "apis"]);
    }

    #[test]
    fn test_education_rank_order() {
        assert!(EducationLevel::Phd.rank() > EducationLevel::Master.rank());
        assert_eq!(EducationLevel::Any.rank(), 0);
        assert_eq!(EducationLevel::detect("associate of arts", true), EducationLevel::Associate);
        assert_eq!(EducationLevel::detect("high school diploma", true), EducationLevel::Associate);
    }
}
