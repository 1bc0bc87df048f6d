//! Plan files on disk.

use super::PlanSource;
use crate::error::{PlanError, Result};
use config::{File, FileFormat, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A plan file in YAML, TOML, or JSON.
///
/// The format comes from the extension (`.yaml`/`.yml`, `.toml`, `.json`).
/// A file may hold a whole plan or only the sections it changes.
///
/// # Examples
///
/// ```rust,no_run
/// use provision_check::sources::{FileSource, PlanSource};
///
/// let overlay = FileSource::new("aws-overrides.yaml").with_priority(150);
/// let sections = overlay.load();
/// ```
pub struct FileSource {
    path: PathBuf,
    priority: i32,
}

impl FileSource {
    /// Read the plan file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            priority: 100,
        }
    }

    /// Set the merge priority. Higher priority files win key by key.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// The plan file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> Result<FileFormat> {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(FileFormat::Yaml),
            Some("toml") => Ok(FileFormat::Toml),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(PlanError::LoadError(format!(
                "{}: plan files must end in .yaml, .yml, .toml or .json",
                self.path.display()
            ))),
        }
    }
}

impl PlanSource for FileSource {
    fn load(&self) -> Result<HashMap<String, Value>> {
        let format = self.format()?;

        if !self.path.is_file() {
            return Err(PlanError::LoadError(format!(
                "Plan file not found: {}",
                self.path.display()
            )));
        }

        let sections = config::Config::builder()
            .add_source(File::from(self.path.as_path()).format(format))
            .build()
            .and_then(|parsed| parsed.try_deserialize::<HashMap<String, Value>>())
            .map_err(|e| PlanError::ParseError(format!("{}: {}", self.path.display(), e)))?;

        if sections.is_empty() {
            return Err(PlanError::LoadError(format!(
                "{}: plan file has no sections",
                self.path.display()
            )));
        }

        Ok(sections)
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
