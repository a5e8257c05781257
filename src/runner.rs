use crate::error::{BumpError, Result};
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of an external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            status: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external programs (git, poetry) on behalf of the bumper.
pub trait CommandRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Shells out with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = command_line(program, args);
        debug!("Running `{}` in {:?}", command, cwd);
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|source| BumpError::Spawn { command, source })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// A runner that answers from canned responses and records every call.
///
/// Responses are keyed by the full command line (`"git tag --list"`).
/// Commands without a response succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, CommandOutput>,
    calls: RefCell<Vec<String>>,
    cwds: RefCell<Vec<PathBuf>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, output: CommandOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }

    pub fn stdout(self, command: &str, stdout: &str) -> Self {
        self.respond(command, CommandOutput::success(stdout))
    }

    pub fn fail(self, command: &str, code: i32, stderr: &str) -> Self {
        self.respond(command, CommandOutput::failure(code, stderr))
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn was_called(&self, command: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command)
    }

    /// Whether any command line run so far starts with `prefix`.
    pub fn ran_any(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }

    pub fn working_dirs(&self) -> Vec<PathBuf> {
        self.cwds.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = command_line(program, args);
        debug!("Scripted `{}`", line);
        self.calls.borrow_mut().push(line.clone());
        self.cwds.borrow_mut().push(cwd.to_path_buf());

        let output = self.responses.get(&line).cloned();
        Ok(output.unwrap_or_else(|| CommandOutput::success("")))
    }
}
