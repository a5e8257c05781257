use crate::error::Result;
use crate::parsers::{Parser, VersionSource};
use crate::project::Project;
use regex::Regex;
use std::path::{Path, PathBuf};

pub const SETUP_CFG: &str = "setup.cfg";

/// The `version` key of a legacy `setup.cfg`, quoted or bare.
pub struct SetupCfgParser {
    file: PathBuf,
}

impl Default for SetupCfgParser {
    fn default() -> Self {
        SetupCfgParser {
            file: PathBuf::from(SETUP_CFG),
        }
    }
}

impl Parser for SetupCfgParser {
    fn version_match_regex(&self) -> Result<Regex> {
        Ok(Regex::new(concat!(
            r#"(?m)^(?P<pre>version[ \t]*=[ \t]*['"]?)"#,
            r#"(?P<version>[^'"\s]+)(?P<post>['"]?[ \t\r]*)$"#,
        ))?)
    }
}

impl VersionSource for SetupCfgParser {
    fn name(&self) -> &'static str {
        "setup.cfg"
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
