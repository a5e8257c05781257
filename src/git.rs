use crate::error::{BumpError, Result};
use crate::guard::bump_commit_message;
use crate::project::Project;
use crate::runner::command_line;
use log::{debug, info, warn};
use regex::Regex;
use std::path::Path;

/// Version-control operations, carried out with the `git` CLI through the
/// project's command runner.
pub struct GitTracker<'p, 'r> {
    project: &'p Project<'r>,
    remote: String,
}

impl<'p, 'r> GitTracker<'p, 'r> {
    pub fn new(project: &'p Project<'r>, remote: impl Into<String>) -> Self {
        GitTracker {
            project,
            remote: remote.into(),
        }
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        Ok(self.project.run_checked("git", args)?.stdout)
    }

    /// Message of the most recent commit.
    pub fn head_commit_message(&self) -> Result<String> {
        Ok(self.git(&["log", "-1", "--pretty=%B"])?.trim().to_string())
    }

    /// Fetches tags from the remote
    pub fn fetch_tags(&self) -> Result<()> {
        debug!("Fetching tags from {}", self.remote);
        self.git(&["fetch", "--tags", self.remote.as_str()])?;
        Ok(())
    }

    /// Gets all tags from the repository
    pub fn get_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .git(&["tag", "--list"])?
            .lines()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Highest `vMAJOR.MINOR.PATCH` tag; suffixed tags are not releases and are skipped.
    pub fn latest_release_tag(&self) -> Result<Option<String>> {
        let release = Regex::new(r"^v(\d+)\.(\d+)\.(\d+)$")?;
        let latest = self
            .get_tags()?
            .into_iter()
            .filter_map(|tag| {
                let captures = release.captures(&tag)?;
                let version = semver::Version::new(
                    captures[1].parse().ok()?,
                    captures[2].parse().ok()?,
                    captures[3].parse().ok()?,
                );
                Some((version, tag))
            })
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, tag)| tag);

        match &latest {
            Some(tag) => debug!("Latest release tag: {}", tag),
            None => warn!("No valid version tags found"),
        }
        Ok(latest)
    }

    /// Stages a single file
    pub fn stage_file(&self, file: &Path) -> Result<()> {
        let file = file.to_string_lossy();
        self.git(&["add", "--", &*file])?;
        debug!("Staged {}", file);
        Ok(())
    }

    /// Whether the index differs from HEAD for `file`.
    pub fn has_staged_changes(&self, file: &Path) -> Result<bool> {
        let file = file.to_string_lossy();
        let args = ["diff", "--cached", "--quiet", "--", &*file];
        let output = self.project.run("git", &args)?;
        match output.status {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            status => Err(BumpError::CommandFailed {
                command: command_line("git", &args),
                code: status.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            }),
        }
    }

    /// Commits `file` alone, whatever else is staged
    pub fn create_commit(&self, message: &str, file: &Path) -> Result<()> {
        info!("Creating commit: {}", message);
        let file = file.to_string_lossy();
        self.git(&["commit", "-m", message, "--", &*file])?;
        Ok(())
    }

    /// Creates a lightweight tag at HEAD
    pub fn create_tag(&self, tag_name: &str) -> Result<()> {
        self.git(&["tag", tag_name])?;
        info!("Created tag {}", tag_name);
        Ok(())
    }

    /// Deletes a local tag
    pub fn delete_tag(&self, tag_name: &str) -> Result<()> {
        self.git(&["tag", "-d", tag_name])?;
        info!("Deleted local tag {}", tag_name);
        Ok(())
    }

    /// Pushes a tag to the remote
    pub fn push_tag(&self, tag_name: &str) -> Result<()> {
        info!("Pushing tag {} to {}", tag_name, self.remote);
        let refspec = format!("refs/tags/{}", tag_name);
        self.git(&["push", self.remote.as_str(), refspec.as_str()])?;
        info!("Pushed tag {}", tag_name);
        Ok(())
    }

    /// Pushes the current branch to the remote
    pub fn push_head(&self) -> Result<()> {
        info!("Pushing HEAD to {}", self.remote);
        self.git(&["push", self.remote.as_str(), "HEAD"])?;
        info!("Pushed version bump to {}", self.remote);
        Ok(())
    }

    fn push(&self, tag_name: &str, committed: bool) -> Result<()> {
        self.push_tag(tag_name)?;
        if committed {
            self.push_head()?;
        }
        Ok(())
    }

    /// Commits `file` (when it changed), tags `v<version>` and pushes the tag
    /// before the commit. A failed push removes the local tag again.
    pub fn publish(&self, version: &str, file: &Path) -> Result<String> {
        let tag_name = format!("v{}", version);

        self.stage_file(file)?;
        let committed = self.has_staged_changes(file)?;
        if committed {
            self.create_commit(&bump_commit_message(version), file)?;
        } else {
            info!("No changes to commit, tagging {} only", tag_name);
        }

        self.create_tag(&tag_name)?;

        if let Err(err) = self.push(&tag_name, committed) {
            if let Err(cleanup) = self.delete_tag(&tag_name) {
                warn!("Failed to delete local tag {}: {}", tag_name, cleanup);
            }
            return Err(BumpError::PushFailure {
                tag: tag_name,
                reason: err.to_string(),
            });
        }

        Ok(tag_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ScriptedRunner;

    const DIFF_VERSION: &str = "git diff --cached --quiet -- version";

    #[test]
    fn test_latest_release_tag_orders_numerically() {
        let tags = "v1.2.0\nv1.10.0\nv1.9.3\n";
        let runner = ScriptedRunner::new().stdout("git tag --list", tags);
        let project = Project::new("/work", &runner);
        let git = GitTracker::new(&project, "origin");

        let latest = git.latest_release_tag().unwrap();
        assert_eq!(latest.as_deref(), Some("v1.10.0"));
    }

    #[test]
    fn test_latest_release_tag_skips_non_release_tags() {
        let tags = "v2.0.0-dev4\nv1.0.0\nnightly\nrelease-3.0.0\nv3.0\n";
        let runner = ScriptedRunner::new().stdout("git tag --list", tags);
        let project = Project::new("/work", &runner);
        let git = GitTracker::new(&project, "origin");

        let latest = git.latest_release_tag().unwrap();
        assert_eq!(latest.as_deref(), Some("v1.0.0"));
    }

    #[test]
    fn test_latest_release_tag_none() {
        let runner = ScriptedRunner::new();
        let project = Project::new("/work", &runner);
        let git = GitTracker::new(&project, "origin");

        assert_eq!(git.latest_release_tag().unwrap(), None);
    }

    #[test]
    fn test_head_commit_message_is_trimmed() {
        let message = "feat: thing\n\n";
        let runner = ScriptedRunner::new()
            .stdout("git log -1 --pretty=%B", message);
        let project = Project::new("/work", &runner);
        let git = GitTracker::new(&project, "origin");

        assert_eq!(git.head_commit_message().unwrap(), "feat: thing");
    }

    #[test]
    fn test_has_staged_changes_exit_codes() {
        let runner = ScriptedRunner::new().fail(DIFF_VERSION, 1, "");
        let project = Project::new("/work", &runner);
        let git = GitTracker::new(&project, "origin");
        assert!(git.has_staged_changes(Path::new("version")).unwrap());
        assert!(!git.has_staged_changes(Path::new("setup.py")).unwrap());

        let stderr = "not a git repository";
        let runner = ScriptedRunner::new().fail(DIFF_VERSION, 128, stderr);
        let project = Project::new("/work", &runner);
        let git = GitTracker::new(&project, "origin");
        assert!(matches!(
            git.has_staged_changes(Path::new("version")),
            Err(BumpError::CommandFailed { code: 128, .. })
        ));
    }

    #[test]
    fn test_commit_is_limited_to_version_file() {
        let runner = ScriptedRunner::new();
        let project = Project::new("/work", &runner);
        let git = GitTracker::new(&project, "origin");

        let file = Path::new("setup.cfg");
        git.create_commit("release", file).unwrap();

        assert_eq!(runner.calls(), vec!["git commit -m release -- setup.cfg"]);
    }

    #[test]
    fn test_fetch_tags_uses_remote() {
        let runner = ScriptedRunner::new();
        let project = Project::new("/work", &runner);
        GitTracker::new(&project, "upstream").fetch_tags().unwrap();
        assert_eq!(runner.calls(), vec!["git fetch --tags upstream"]);
    }
}
