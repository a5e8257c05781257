use crate::error::{BumpError, Result};
use crate::runner::{CommandOutput, CommandRunner, command_line};
use std::path::{Path, PathBuf};

/// The checked-out project a run operates on: its root directory and the
/// runner used for every git and package-manager invocation.
pub struct Project<'a> {
    root: PathBuf,
    runner: &'a dyn CommandRunner,
}

impl<'a> Project<'a> {
    pub fn new(root: impl AsRef<Path>, runner: &'a dyn CommandRunner) -> Self {
        Project {
            root: root.as_ref().to_path_buf(),
            runner,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a project-relative path.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.path(relative).is_file()
    }

    /// Runs a command in the project root and returns its output whatever the exit status.
    pub fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run(&self.root, program, args)
    }

    /// Runs a command in the project root, failing on a non-zero exit status.
    pub fn run_checked(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = self.run(program, args)?;
        if output.is_success() {
            Ok(output)
        } else {
            Err(BumpError::CommandFailed {
                command: command_line(program, args),
                code: output.status.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}
