use crate::error::Result;
use crate::parsers::{Parser, VersionSource};
use crate::project::Project;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Modules searched for a `__version__ = "..."` assignment, in order.
pub const CANDIDATES: [&str; 3] = ["src/__version__.py", "__version__.py", "version.py"];

pub struct DunderVersionParser {
    file: PathBuf,
}

impl DunderVersionParser {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        DunderVersionParser { file: file.into() }
    }
}

impl Parser for DunderVersionParser {
    fn version_match_regex(&self) -> Result<Regex> {
        Ok(Regex::new(
            r#"(?m)^(?P<pre>__version__\s*=\s*['"])(?P<version>[^'"]+)(?P<post>['"])"#,
        )?)
    }
}

impl VersionSource for DunderVersionParser {
    fn name(&self) -> &'static str {
        "__version__ module"
    }

    fn file(&self) -> &Path {
        &self.file
    }

    fn read_version(&self, project: &Project) -> Result<String> {
        self.read_declared_version(project, &self.file)
    }

    fn write_version(&self, project: &Project, version: &str) -> Result<()> {
        self.write_declared_version(project, &self.file, version)
    }
}
