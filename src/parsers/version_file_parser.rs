use crate::error::{BumpError, Result};
use crate::parsers::VersionSource;
use crate::project::Project;
use log::info;
use std::path::{Path, PathBuf};

pub const VERSION_FILE: &str = "version";

/// A file containing nothing but the version string.
pub struct VersionFileParser {
    file: PathBuf,
}

impl Default for VersionFileParser {
    fn default() -> Self {
        VersionFileParser {
            file: PathBuf::from(VERSION_FILE),
        }
    }
}

impl VersionSource for VersionFileParser {
    fn name(&self) -> &'static str {
        "version file"
    }

    fn file(&self) -> &Path {
        &self.file
    }

    fn read_version(&self, project: &Project) -> Result<String> {
        let contents = std::fs::read_to_string(project.path(&self.file))?;
        let version = contents.trim();
        if version.is_empty() {
            return Err(BumpError::VersionFieldNotFound(self.file.clone()));
        }
        Ok(version.to_string())
    }

    fn write_version(&self, project: &Project, version: &str) -> Result<()> {
        let path = project.path(&self.file);
        let previous = std::fs::read_to_string(&path)?;
        let newline = if previous.ends_with('\n') { "\n" } else { "" };
        std::fs::write(&path, format!("{version}{newline}"))?;
        info!("Updated version in {} to {}", self.file.display(), version);
        Ok(())
    }
}
