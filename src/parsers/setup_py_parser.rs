use crate::error::Result;
use crate::parsers::{Parser, VersionSource};
use crate::project::Project;
use regex::Regex;
use std::path::{Path, PathBuf};

pub const SETUP_PY: &str = "setup.py";

/// The `version=` keyword of a legacy `setup()` call.
pub struct SetupPyParser {
    file: PathBuf,
}

impl Default for SetupPyParser {
    fn default() -> Self {
        SetupPyParser {
            file: PathBuf::from(SETUP_PY),
        }
    }
}

impl Parser for SetupPyParser {
    fn version_match_regex(&self) -> Result<Regex> {
        Ok(Regex::new(
            r#"(?P<pre>\bversion\s*=\s*['"])(?P<version>[^'"]+)(?P<post>['"])"#,
        )?)
    }
}

impl VersionSource for SetupPyParser {
    fn name(&self) -> &'static str {
        "setup.py"
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
