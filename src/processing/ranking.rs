//! Screening engine: requirement extraction once, per-resume scoring,
//! then a stable descending sort by overall score

use crate::error::Result;
use crate::processing::aggregator::{aggregate, AnalysisResult};
use crate::processing::requirements::{JobRequirements, RequirementExtractor};
use crate::processing::resume_parser::{ParsedResume, Resume, ResumeParser};
use crate::processing::scoring::DimensionScorer;
use crate::processing::vocabulary::{SkillTerm, SkillVocabulary};
use log::debug;

/// Holds the compiled vocabulary and pattern tables. Analysis methods take
/// `&self` and keep no state between calls.
pub struct ScreeningEngine {
    vocabulary: SkillVocabulary,
    requirement_extractor: RequirementExtractor,
    resume_parser: ResumeParser,
    scorer: DimensionScorer,
}

impl ScreeningEngine {
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(SkillVocabulary::new()?)
    }

    pub fn with_custom_skills(additional_terms: Vec<SkillTerm>) -> Result<Self> {
        Self::with_vocabulary(SkillVocabulary::with_additional_terms(additional_terms)?)
    }

    pub fn with_vocabulary(vocabulary: SkillVocabulary) -> Result<Self> {
        Ok(Self {
            vocabulary,
            requirement_extractor: RequirementExtractor::new()?,
            resume_parser: ResumeParser::new()?,
            scorer: DimensionScorer::new()?,
        })
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn extract_requirements(&self, job_description: &str) -> JobRequirements {
        self.requirement_extractor.extract(job_description, &self.vocabulary)
    }

    pub fn parse_resume(&self, content: &str, file_name: &str) -> ParsedResume {
        self.resume_parser.parse(content, file_name, &self.vocabulary)
    }

    pub fn analyze_resume(&self, requirements: &JobRequirements, resume: &Resume) -> AnalysisResult {
        let parsed = self.parse_resume(&resume.content, &resume.file_name);
        let scores = self.scorer.score(&parsed, requirements);
        let result = aggregate(resume, &parsed, &scores);

        debug!(
            "Scored {}: overall {} (skills {}, experience {}, education {})",
            resume.file_name,
            result.overall_score,
            result.skills_match,
            result.experience_match,
            result.education_match
        );

        result
    }

    /// Ranked results for every resume against one job description. An
    /// empty resume list yields an empty result list.
    pub fn analyze(&self, resumes: &[Resume], job_description: &str) -> Vec<AnalysisResult> {
        let requirements = self.extract_requirements(job_description);

        let results = resumes
            .iter()
            .map(|resume| self.analyze_resume(&requirements, resume))
            .collect();

        rank_results(results)
    }
}

/// Descending by overall score. `sort_by` is stable, so equal scores keep
/// their input order.
pub fn rank_results(mut results: Vec<AnalysisResult>) -> Vec<AnalysisResult> {
    results.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
    results
}

/// One-shot convenience wrapper around [`ScreeningEngine::analyze`]
pub fn analyze_resumes(resumes: &[Resume], job_description: &str) -> Result<Vec<AnalysisResult>> {
    Ok(ScreeningEngine::new()?.analyze(resumes, job_description))
}
