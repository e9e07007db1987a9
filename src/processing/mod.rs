//! Scoring pipeline: requirement extraction, resume signal extraction,
//! dimension scoring, aggregation and ranking

pub mod vocabulary;
pub mod requirements;
pub mod resume_parser;
pub mod scoring;
pub mod aggregator;
pub mod ranking;

pub use aggregator::{AnalysisResult, RecommendationTier};
pub use ranking::{analyze_resumes, rank_results, ScreeningEngine};
pub use requirements::{EducationLevel, JobRequirements};
pub use resume_parser::{ParsedResume, Resume};
