//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use crate::processing::vocabulary::SkillTerm;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub screening: ScreeningConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    /// Shorter job descriptions are accepted with a warning
    pub min_job_description_chars: usize,
    /// Rows in the top-candidates chart of the batch summary
    pub top_chart_entries: usize,
    /// Appended after the built-in skill table
    #[serde(default)]
    pub custom_skills: Vec<SkillTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub enable_caching: bool,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screening: ScreeningConfig {
                min_job_description_chars: 100,
                top_chart_entries: 5,
                custom_skills: Vec::new(),
            },
            input: InputConfig {
                enable_caching: true,
                allowed_extensions: vec![
                    "pdf".to_string(),
                    "txt".to_string(),
                    "md".to_string(),
                    "markdown".to_string(),
                ],
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::vocabulary::TermScope;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.screening.min_job_description_chars, 100);
        assert_eq!(config.screening.top_chart_entries, 5);
        assert_eq!(config.output.format, OutputFormat::Console);
        assert!(config.input.allowed_extensions.contains(&"pdf".to_string()));
    }

    #[test]
    fn test_custom_skills_from_toml() {
        let text = r#"
            [screening]
            min_job_description_chars = 100
            top_chart_entries = 5

            [[screening.custom_skills]]
            term = "Terraform"
            category = "devops"

            [[screening.custom_skills]]
            term = "mentoring"
            category = "soft"
            scope = "resume_only"

            [input]
            enable_caching = true
            allowed_extensions = ["txt"]

            [output]
            format = "Json"
            detailed = false
            color_output = false
            pretty_json = true
        "#;
        let config: Config = toml::from_str(text).unwrap();
        let skills = &config.screening.custom_skills;
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].scope, TermScope::JobAndResume);
        assert_eq!(skills[1].scope, TermScope::ResumeOnly);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[screening]"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
