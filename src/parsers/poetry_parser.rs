use crate::error::{BumpError, Result};
use crate::parsers::VersionSource;
use crate::project::Project;
use log::{debug, info};
use std::path::{Path, PathBuf};

pub const PYPROJECT: &str = "pyproject.toml";

/// Whether the project has a `pyproject.toml` with a `[tool.poetry]` table.
pub fn is_poetry_project(project: &Project) -> Result<bool> {
    if !project.exists(PYPROJECT) {
        return Ok(false);
    }
    let contents = std::fs::read_to_string(project.path(PYPROJECT))?;
    let manifest = toml::from_str::<toml::Table>(&contents);
    let manifest = manifest.map_err(|source| BumpError::Manifest {
        file: PathBuf::from(PYPROJECT),
        source,
    })?;

    let has_poetry = manifest
        .get("tool")
        .and_then(|tool| tool.as_table())
        .is_some_and(|tool| tool.contains_key("poetry"));
    debug!("{} has [tool.poetry]: {}", PYPROJECT, has_poetry);
    Ok(has_poetry)
}

/// Version owned by Poetry; read and written through the `poetry` CLI so the
/// manifest keeps its formatting.
pub struct PoetryParser {
    file: PathBuf,
}

impl Default for PoetryParser {
    fn default() -> Self {
        PoetryParser {
            file: PathBuf::from(PYPROJECT),
        }
    }
}

impl VersionSource for PoetryParser {
    fn name(&self) -> &'static str {
        "poetry"
    }

    fn file(&self) -> &Path {
        &self.file
    }

    fn read_version(&self, project: &Project) -> Result<String> {
        let output = project.run_checked("poetry", &["version", "-s"])?;
        let version = output.stdout.trim();
        if version.is_empty() {
            return Err(BumpError::VersionFieldNotFound(self.file.clone()));
        }
        debug!("Poetry reports version {}", version);
        Ok(version.to_string())
    }

    fn write_version(&self, project: &Project, version: &str) -> Result<()> {
        project.run_checked("poetry", &["version", version])?;
        info!("Updated version in {} to {}", self.file.display(), version);
        Ok(())
    }
}
