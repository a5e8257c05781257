use log::debug;

/// Prefix of the commit message written by a bump.
pub const BUMP_COMMIT_PREFIX: &str = "Bump version to";

/// Explicit opt-out marker for a commit that must not trigger a bump.
pub const NO_BUMP_MARKER: &str = "no bump";

const MARKERS: [&str; 2] = [BUMP_COMMIT_PREFIX, NO_BUMP_MARKER];

pub fn bump_commit_message(version: &str) -> String {
    format!("🚀 {BUMP_COMMIT_PREFIX} {version}")
}

/// Whether the triggering commit was produced by a bump, or opted out of one.
pub fn is_self_triggered(commit_message: &str) -> bool {
    let found = MARKERS
        .iter()
        .find(|marker| commit_message.contains(*marker));
    match found {
        Some(marker) => {
            debug!("Commit message contains {:?}", marker);
            true
        }
        None => false,
    }
}
