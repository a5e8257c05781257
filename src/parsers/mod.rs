use crate::error::{BumpError, Result};
use crate::project::Project;
use log::{debug, info};
use regex::Regex;
use std::path::Path;

pub mod dunder_version_parser;
pub mod poetry_parser;
pub mod setup_cfg_parser;
pub mod setup_py_parser;
pub mod version_file_parser;

use dunder_version_parser::DunderVersionParser;
use poetry_parser::PoetryParser;
use setup_cfg_parser::SetupCfgParser;
use setup_py_parser::SetupPyParser;
use version_file_parser::VersionFileParser;

/// Where a project's authoritative version string lives.
pub trait VersionSource {
    /// Short human-readable name used in log output.
    fn name(&self) -> &'static str;

    /// Project-relative path of the file a version change modifies.
    fn file(&self) -> &Path;

    fn read_version(&self, project: &Project) -> Result<String>;

    fn write_version(&self, project: &Project, version: &str) -> Result<()>;
}

/// A version declared inside a text file and located with a regex.
///
/// The regex must name three groups: `pre` (everything before the version,
/// including any opening quote), `version`, and `post`.
pub trait Parser {
    fn version_match_regex(&self) -> Result<Regex>;

    /// Replacement template for the matched line. A `$` in `version` is
    /// escaped so it is written literally instead of naming a group.
    fn version_line_format(&self, version: &str) -> String {
        let version = version.replace('$', "$$");
        format!("${{pre}}{version}${{post}}")
    }

    fn read_declared_version(&self, project: &Project, file: &Path) -> Result<String> {
        let contents = std::fs::read_to_string(project.path(file))?;
        let regex = self.version_match_regex()?;
        let version = regex
            .captures(&contents)
            .and_then(|captures| captures.name("version"))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| BumpError::VersionFieldNotFound(file.to_path_buf()))?;
        debug!("Found current version {} in {}", version, file.display());
        Ok(version)
    }

    fn write_declared_version(&self, project: &Project, file: &Path, version: &str) -> Result<()> {
        let path = project.path(file);
        let contents = std::fs::read_to_string(&path)?;
        let regex = self.version_match_regex()?;
        if !regex.is_match(&contents) {
            return Err(BumpError::VersionFieldNotFound(file.to_path_buf()));
        }
        let new_contents = regex.replace(&contents, self.version_line_format(version));
        std::fs::write(&path, new_contents.as_bytes())?;
        info!("Updated version in {} to {}", file.display(), version);
        Ok(())
    }
}

/// Looks for the project's version source, in priority order: the bare
/// `version` file, `__version__` modules, a Poetry `pyproject.toml`, then the
/// legacy `setup.py` and `setup.cfg`.
pub fn resolve(project: &Project) -> Result<Box<dyn VersionSource>> {
    if project.exists(version_file_parser::VERSION_FILE) {
        return Ok(found(Box::new(VersionFileParser::default())));
    }

    for candidate in dunder_version_parser::CANDIDATES {
        if project.exists(candidate) {
            return Ok(found(Box::new(DunderVersionParser::new(candidate))));
        }
    }

    if poetry_parser::is_poetry_project(project)? {
        return Ok(found(Box::new(PoetryParser::default())));
    }

    if project.exists(setup_py_parser::SETUP_PY) {
        return Ok(found(Box::new(SetupPyParser::default())));
    }

    if project.exists(setup_cfg_parser::SETUP_CFG) {
        return Ok(found(Box::new(SetupCfgParser::default())));
    }

    let root = project.root().to_path_buf();
    Err(BumpError::MissingVersionSource(root))
}

fn found(source: Box<dyn VersionSource>) -> Box<dyn VersionSource> {
    debug!("Using {} ({})", source.name(), source.file().display());
    source
}
