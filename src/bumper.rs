use crate::error::{BumpError, Result};
use crate::git::GitTracker;
use crate::guard::is_self_triggered;
use crate::parsers;
use crate::project::Project;
use crate::version::{DEFAULT_DEV_SUFFIX, DevVersion, increment_dev_version, is_new_version};
use log::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOptions {
    pub dev_suffix: String,
    pub remote: String,
    /// Message of the triggering commit. `None` reads it from `HEAD`.
    pub commit_message: Option<String>,
}

impl Default for BumpOptions {
    fn default() -> Self {
        BumpOptions {
            dev_suffix: DEFAULT_DEV_SUFFIX.to_string(),
            remote: "origin".to_string(),
            commit_message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The triggering commit was a bump (or opted out); nothing was changed.
    Skipped,
    /// The declared version was newer than the latest tag and was tagged as is.
    Released { version: String, tag: String },
    /// The declared version was already released; a dev version was written and tagged.
    DevBumped {
        from: String,
        to: String,
        tag: String,
    },
}

pub struct Bumper<'p, 'r> {
    project: &'p Project<'r>,
    options: BumpOptions,
}

impl<'p, 'r> Bumper<'p, 'r> {
    pub fn new(project: &'p Project<'r>, options: BumpOptions) -> Self {
        Bumper { project, options }
    }

    pub fn run(&self) -> Result<Outcome> {
        let git = GitTracker::new(self.project, &self.options.remote);

        let commit_message = match &self.options.commit_message {
            Some(message) => message.clone(),
            None => git.head_commit_message()?,
        };
        info!("Latest commit message: {}", commit_message);
        if is_self_triggered(&commit_message) {
            info!("Version bump commit detected, skipping to avoid a loop");
            return Ok(Outcome::Skipped);
        }

        let suffix = self.options.dev_suffix.as_str();
        if suffix.trim().is_empty() {
            return Err(BumpError::InvalidSuffix(suffix.to_string()));
        }

        let source = parsers::resolve(self.project)?;
        let current = source.read_version(self.project)?;
        let current_version = DevVersion::parse(&current, suffix)?;
        info!("Current version {} from {}", current_version, source.name());

        git.fetch_tags()?;
        let latest_tag = git.latest_release_tag()?;
        if is_new_version(&current, latest_tag.as_deref(), suffix)? {
            info!(
                "Current version {} is a new release compared to latest tag {}",
                current_version,
                latest_tag.as_deref().unwrap_or("<none>")
            );
            let tag = git.publish(&current, source.file())?;
            return Ok(Outcome::Released {
                version: current,
                tag,
            });
        }

        let next = increment_dev_version(&current, suffix)?;
        info!("Version already released, bumping to {}", next);
        source.write_version(self.project, &next)?;
        debug!("Wrote {} to {}", next, source.file().display());

        let tag = git.publish(&next, source.file())?;
        Ok(Outcome::DevBumped {
            from: current,
            to: next,
            tag,
        })
    }
}
