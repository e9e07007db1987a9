//! Resume signal extraction
//!
//! Skills come from the vocabulary table. Experience and education evidence
//! is captured as short snippets of the original text by ordered pattern
//! rules, each with its own cap, concatenated and then capped globally.

use crate::error::Result;
use crate::processing::vocabulary::SkillVocabulary;
use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_EXPERIENCE_SNIPPETS: usize = 5;
pub const MAX_EDUCATION_SNIPPETS: usize = 3;

/// One resume as handed over by the text acquisition layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub id: String,
    pub file_name: String,
    pub content: String,
}

impl Resume {
    pub fn new(id: impl Into<String>, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub raw_text: String,
}

/// A named pattern and how many of its matches to keep
#[derive(Debug, Clone)]
pub struct SnippetRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub per_rule_cap: usize,
}

impl SnippetRule {
    fn new(name: &'static str, pattern: &str, per_rule_cap: usize) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            per_rule_cap,
        })
    }
}

/// Ordered rules with a global cap on the combined output
#[derive(Debug, Clone)]
pub struct SnippetRuleSet {
    rules: Vec<SnippetRule>,
    total_cap: usize,
}

impl SnippetRuleSet {
    pub fn new(rules: Vec<SnippetRule>, total_cap: usize) -> Self {
        Self { rules, total_cap }
    }

    /// Experience evidence; matched case-sensitively on the original text
    pub fn experience() -> Result<Self> {
        Ok(Self::new(
            vec![
                SnippetRule::new(
                    "years_of_experience",
                    r"[0-9]+\s*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)",
                    3,
                )?,
                SnippetRule::new("worked_as", r"worked\s+(?:as|at|for)\s+[^.]+", 3)?,
                SnippetRule::new("experience_in", r"experience\s+(?:in|with|as)\s+[^.]+", 3)?,
            ],
            MAX_EXPERIENCE_SNIPPETS,
        ))
    }

    pub fn education() -> Result<Self> {
        Ok(Self::new(
            vec![
                SnippetRule::new(
                    "degree",
                    r"(?i)(?:bachelor|master|phd|doctorate|degree|diploma|certificate)\s+[^.]+",
                    2,
                )?,
                SnippetRule::new("institution", r"(?i)(?:university|college|institute|school)\s+[^.]+", 2)?,
                SnippetRule::new(
                    "degree_abbreviation",
                    r"(?i)(?:b\.?s\.?|m\.?s\.?|b\.?a\.?|m\.?a\.?|ph\.?d\.?)\s+[^.]+",
                    2,
                )?,
            ],
            MAX_EDUCATION_SNIPPETS,
        ))
    }

    pub fn apply(&self, text: &str) -> Vec<String> {
        self.rules
            .iter()
            .flat_map(|rule| {
                rule.pattern
                    .find_iter(text)
                    .take(rule.per_rule_cap)
                    .map(|m| m.as_str().to_string())
            })
            .take(self.total_cap)
            .collect()
    }

    pub fn rules(&self) -> &[SnippetRule] {
        &self.rules
    }
}

pub struct ResumeParser {
    experience_rules: SnippetRuleSet,
    education_rules: SnippetRuleSet,
}

impl ResumeParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            experience_rules: SnippetRuleSet::experience()?,
            education_rules: SnippetRuleSet::education()?,
        })
    }

    /// `file_name` is carried for tracing only; extraction reads `content`
    pub fn parse(&self, content: &str, file_name: &str, vocabulary: &SkillVocabulary) -> ParsedResume {
        let skills = vocabulary.find_resume_skills(&content.to_lowercase());
        let experience = self.experience_rules.apply(content);
        let education = self.education_rules.apply(content);

        trace!(
            "Parsed {}: {} skills, {} experience and {} education snippets",
            file_name,
            skills.len(),
            experience.len(),
            education.len()
        );

        ParsedResume {
            skills,
            experience,
            education,
            raw_text: content.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParsedResume {
        let vocab = SkillVocabulary::new().unwrap();
        ResumeParser::new().unwrap().parse(content, "resume.txt", &vocab)
    }

    #[test]
    fn test_skills_in_table_order() {
        let parsed = parse("Teamwork, Docker and Python; strong Leadership");
        assert_eq!(parsed.skills, vec!["python", "docker", "leadership", "teamwork"]);
    }

    #[test]
    fn test_experience_snippets_by_rule_order() {
        let parsed = parse(
            "Worked at home. I worked as a developer at Acme. 4 years experience total. \
             Extensive experience with distributed systems.",
        );
        assert_eq!(
            parsed.experience,
            vec![
                "4 years experience",
                "worked as a developer at Acme",
                "experience with distributed systems",
            ]
        );
    }

    #[test]
    fn test_experience_is_case_sensitive() {
        let parsed = parse("5 Years Experience. Experience with Rust.");
        assert!(parsed.experience.is_empty());
    }

    #[test]
    fn test_experience_caps() {
        let content = "1 yr exp. 2 yrs exp. 3 yrs exp. 4 yrs exp. \
                       worked for a. worked for b. worked for c. worked for d. \
                       experience in x. experience in y.";
        let parsed = parse(content);
        assert_eq!(parsed.experience.len(), MAX_EXPERIENCE_SNIPPETS);
        assert_eq!(parsed.experience[0], "1 yr exp");
        assert_eq!(parsed.experience[2], "3 yrs exp");
        assert_eq!(parsed.experience[3], "worked for a");
        assert_eq!(parsed.experience[4], "worked for b");
    }

    #[test]
    fn test_education_snippets_and_caps() {
        let parsed = parse(
            "Bachelor of Science in Physics. Master of Arts in History. Diploma in Design. \
             Stanford University alumni. MIT college days.",
        );
        assert_eq!(
            parsed.education,
            vec![
                "Bachelor of Science in Physics",
                "Master of Arts in History",
                "University alumni",
            ]
        );
    }

    #[test]
    fn test_degree_abbreviation_rule() {
        let rules = SnippetRuleSet::education().unwrap();
        let abbreviation = &rules.rules()[2];
        let found: Vec<_> = abbreviation
            .pattern
            .find_iter("B.S. Computer Science")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["B.S. Computer Science"]);
    }

    #[test]
    fn test_snippets_stop_at_period() {
        let parsed = parse("I worked for Initech on reports. Then moved on");
        assert_eq!(parsed.experience, vec!["worked for Initech on reports"]);
    }

    #[test]
    fn test_raw_text_retained() {
        let parsed = parse("Plain text resume");
        assert_eq!(parsed.raw_text, "Plain text resume");
        assert!(parsed.skills.is_empty());
    }
}
