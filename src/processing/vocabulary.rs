//! Skill vocabulary table and substring-based presence detection
//!
//! The vocabulary is an ordered table of terms. Table order matters: job
//! skills are reported in table order, and the required/preferred split is
//! taken over that order.

use crate::error::{Result, ScreenerError};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Language,
    Framework,
    Markup,
    Datastore,
    Cloud,
    DevOps,
    Platform,
    Process,
    Collaboration,
    Soft,
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillCategory::Language => "language",
            SkillCategory::Framework => "framework",
            SkillCategory::Markup => "markup",
            SkillCategory::Datastore => "datastore",
            SkillCategory::Cloud => "cloud",
            SkillCategory::DevOps => "devops",
            SkillCategory::Platform => "platform",
            SkillCategory::Process => "process",
            SkillCategory::Collaboration => "collaboration",
            SkillCategory::Soft => "soft",
        };
        write!(f, "{}", name)
    }
}

impl SkillCategory {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "language" => Some(SkillCategory::Language),
            "framework" => Some(SkillCategory::Framework),
            "markup" => Some(SkillCategory::Markup),
            "datastore" => Some(SkillCategory::Datastore),
            "cloud" => Some(SkillCategory::Cloud),
            "devops" => Some(SkillCategory::DevOps),
            "platform" => Some(SkillCategory::Platform),
            "process" => Some(SkillCategory::Process),
            "collaboration" => Some(SkillCategory::Collaboration),
            "soft" => Some(SkillCategory::Soft),
            _ => None,
        }
    }
}

/// Where a term is looked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermScope {
    /// Discovered in job descriptions and resumes
    #[default]
    JobAndResume,
    /// Only looked for in resumes
    ResumeOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTerm {
    pub term: String,
    pub category: SkillCategory,
    #[serde(default)]
    pub scope: TermScope,
}

use SkillCategory::*;
use TermScope::*;

const DEFAULT_TERMS: &[(&str, SkillCategory, TermScope)] = &[
    ("javascript", Language, JobAndResume),
    ("typescript", Language, JobAndResume),
    ("react", Framework, JobAndResume),
    ("angular", Framework, JobAndResume),
    ("vue", Framework, JobAndResume),
    ("node.js", Framework, JobAndResume),
    ("python", Language, JobAndResume),
    ("java", Language, JobAndResume),
    ("c++", Language, JobAndResume),
    ("c#", Language, JobAndResume),
    ("php", Language, JobAndResume),
    ("ruby", Language, JobAndResume),
    ("go", Language, JobAndResume),
    ("rust", Language, JobAndResume),
    ("html", Markup, JobAndResume),
    ("css", Markup, JobAndResume),
    ("sass", Markup, JobAndResume),
    ("less", Markup, JobAndResume),
    ("mongodb", Datastore, JobAndResume),
    ("postgresql", Datastore, JobAndResume),
    ("mysql", Datastore, JobAndResume),
    ("redis", Datastore, JobAndResume),
    ("aws", Cloud, JobAndResume),
    ("azure", Cloud, JobAndResume),
    ("gcp", Cloud, JobAndResume),
    ("docker", DevOps, JobAndResume),
    ("kubernetes", DevOps, JobAndResume),
    ("jenkins", DevOps, JobAndResume),
    ("gitlab", DevOps, JobAndResume),
    ("github", DevOps, JobAndResume),
    ("git", DevOps, JobAndResume),
    ("linux", Platform, JobAndResume),
    ("windows", Platform, JobAndResume),
    ("agile", Process, JobAndResume),
    ("scrum", Process, JobAndResume),
    ("kanban", Process, JobAndResume),
    ("jira", Collaboration, JobAndResume),
    ("confluence", Collaboration, JobAndResume),
    ("slack", Collaboration, JobAndResume),
    ("teams", Collaboration, JobAndResume),
    ("express", Framework, ResumeOnly),
    ("project management", Process, ResumeOnly),
    ("leadership", Soft, ResumeOnly),
    ("communication", Soft, ResumeOnly),
    ("problem solving", Soft, ResumeOnly),
    ("teamwork", Soft, ResumeOnly),
    ("analytical", Soft, ResumeOnly),
    ("creative", Soft, ResumeOnly),
    ("detail-oriented", Soft, ResumeOnly),
];

/// Compiled vocabulary. Detection is plain substring containment on
/// lowercased text, so "go" is found inside "google" and "java" inside
/// "javascript".
pub struct SkillVocabulary {
    terms: Vec<SkillTerm>,
    matcher: AhoCorasick,
}

impl SkillVocabulary {
    pub fn new() -> Result<Self> {
        Self::with_additional_terms(Vec::new())
    }

    /// Append extra terms after the built-in table. Blank terms and terms
    /// already present are ignored, so built-in order never changes.
    pub fn with_additional_terms(additional: Vec<SkillTerm>) -> Result<Self> {
        let mut terms: Vec<SkillTerm> = DEFAULT_TERMS
            .iter()
            .map(|(term, category, scope)| SkillTerm {
                term: term.to_string(),
                category: *category,
                scope: *scope,
            })
            .collect();

        for extra in additional {
            let term = extra.term.trim().to_lowercase();
            if term.is_empty() || terms.iter().any(|t| t.term == term) {
                continue;
            }
            terms.push(SkillTerm { term, ..extra });
        }

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(terms.iter().map(|t| t.term.as_str()))
            .map_err(|e| ScreenerError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { terms, matcher })
    }

    /// Table-ordered terms contained in `lowercased` that satisfy `in_scope`
    fn find_terms<F>(&self, lowercased: &str, in_scope: F) -> Vec<String>
    where
        F: Fn(TermScope) -> bool,
    {
        let mut present = vec![false; self.terms.len()];
        for mat in self.matcher.find_overlapping_iter(lowercased) {
            present[mat.pattern().as_usize()] = true;
        }

        self.terms
            .iter()
            .zip(present)
            .filter(|(term, found)| *found && in_scope(term.scope))
            .map(|(term, _)| term.term.clone())
            .collect()
    }

    /// Skills discoverable in a job description
    pub fn find_job_skills(&self, lowercased: &str) -> Vec<String> {
        self.find_terms(lowercased, |scope| scope == TermScope::JobAndResume)
    }

    /// Skills discoverable in a resume: the whole table
    pub fn find_resume_skills(&self, lowercased: &str) -> Vec<String> {
        self.find_terms(lowercased, |_| true)
    }

    pub fn terms(&self) -> &[SkillTerm] {
        &self.terms
    }

    pub fn category_of(&self, term: &str) -> Option<SkillCategory> {
        self.terms.iter().find(|t| t.term == term).map(|t| t.category)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_shape() {
        let vocab = SkillVocabulary::new().unwrap();
        let job_terms = vocab
            .terms()
            .iter()
            .filter(|t| t.scope == TermScope::JobAndResume)
            .count();
        assert_eq!(job_terms, 40);
        assert_eq!(vocab.len(), 49);
        assert_eq!(vocab.category_of("leadership"), Some(SkillCategory::Soft));
        assert_eq!(vocab.category_of("cobol"), None);
    }

    #[test]
    fn test_job_skills_follow_table_order() {
        let vocab = SkillVocabulary::new().unwrap();
        let found = vocab.find_job_skills("docker, aws, then react and typescript");
        assert_eq!(found, vec!["typescript", "react", "aws", "docker"]);
    }

    #[test]
    fn test_substring_containment_is_not_word_aware() {
        let vocab = SkillVocabulary::new().unwrap();
        let found = vocab.find_job_skills("javascript at google");
        assert_eq!(found, vec!["javascript", "java", "go"]);
    }

    #[test]
    fn test_overlapping_terms_are_all_found() {
        let vocab = SkillVocabulary::new().unwrap();
        let found = vocab.find_job_skills("gitlab");
        assert_eq!(found, vec!["gitlab", "git"]);
    }

    #[test]
    fn test_resume_only_terms_excluded_from_job() {
        let vocab = SkillVocabulary::new().unwrap();
        let text = "leadership and communication with express";
        assert!(vocab.find_job_skills(text).is_empty());
        assert_eq!(
            vocab.find_resume_skills(text),
            vec!["express", "leadership", "communication"]
        );
    }

    #[test]
    fn test_additional_terms_append_without_duplicates() {
        let vocab = SkillVocabulary::with_additional_terms(vec![
            SkillTerm {
                term: "Terraform".to_string(),
                category: SkillCategory::DevOps,
                scope: TermScope::JobAndResume,
            },
            SkillTerm {
                term: "react".to_string(),
                category: SkillCategory::Soft,
                scope: TermScope::ResumeOnly,
            },
            SkillTerm {
                term: "  ".to_string(),
                category: SkillCategory::Soft,
                scope: TermScope::ResumeOnly,
            },
        ])
        .unwrap();

        assert_eq!(vocab.len(), 50);
        assert_eq!(vocab.category_of("react"), Some(SkillCategory::Framework));
        assert_eq!(
            vocab.find_job_skills("terraform and react"),
            vec!["react", "terraform"]
        );
    }

    #[test]
    fn test_category_parse_round_trips_display() {
        for term in SkillVocabulary::new().unwrap().terms() {
            assert_eq!(SkillCategory::parse(&term.category.to_string()), Some(term.category));
        }
        assert_eq!(SkillCategory::parse("unknown"), None);
    }
}
