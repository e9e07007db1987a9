//! Input manager for handling different file types

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::resume_parser::Resume;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    allowed_extensions: Option<Vec<String>>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            allowed_extensions: None,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Restrict accepted files to these extensions (case-insensitive)
    pub fn with_allowed_extensions(mut self, extensions: Vec<String>) -> Self {
        self.allowed_extensions = Some(extensions.into_iter().map(|e| e.to_lowercase()).collect());
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ScreenerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Load one resume file under the given id
    pub async fn load_resume(&mut self, path: &Path, id: impl Into<String>) -> Result<Resume> {
        let content = self.extract_text(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Resume::new(id, file_name, content))
    }

    /// Load resumes from files and directories. Directories are read one
    /// level deep in file-name order, skipping unsupported files. Ids are
    /// assigned sequentially in load order.
    pub async fn load_resumes(&mut self, paths: &[PathBuf]) -> Result<Vec<Resume>> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_dir() {
                files.extend(self.list_directory(path).await?);
            } else {
                files.push(path.clone());
            }
        }

        let mut resumes = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            let resume = self.load_resume(file, format!("resume-{:03}", index + 1)).await?;
            resumes.push(resume);
        }

        info!("Loaded {} resume(s)", resumes.len());
        Ok(resumes)
    }

    async fn list_directory(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            if self.detect_file_type(&path).is_supported() {
                files.push(path);
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Files outside the allow-list, or without an extension, are Unknown
    fn detect_file_type(&self, path: &Path) -> FileType {
        if let Some(allowed) = &self.allowed_extensions {
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_lowercase);
            if !extension.is_some_and(|ext| allowed.contains(&ext)) {
                return FileType::Unknown;
            }
        }

        FileType::from_path(path)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
