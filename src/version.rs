use crate::error::{BumpError, Result};
use log::debug;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

pub const DEFAULT_DEV_SUFFIX: &str = "-dev";

/// A `MAJOR.MINOR.PATCH` version with an optional development counter.
///
/// The base triple is kept as a [`semver::Version`] with empty pre-release and
/// build metadata so that ordering on it is plain numeric triple ordering. The
/// base text is kept as written so that `01.2.3` is not rewritten as `1.2.3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevVersion {
    pub base: semver::Version,
    pub dev: Option<u64>,
    base_text: String,
    suffix: String,
}

impl DevVersion {
    /// Parses `MAJOR.MINOR.PATCH` or `MAJOR.MINOR.PATCH<suffix><N>`.
    pub fn parse(version: &str, suffix: &str) -> Result<Self> {
        let regex = version_regex(suffix)?;
        let captures = regex
            .captures(version)
            .ok_or_else(|| BumpError::MalformedVersion(version.to_string()))?;

        let component = |index: usize| -> Result<u64> {
            captures[index]
                .parse::<u64>()
                .map_err(|_| BumpError::MalformedVersion(version.to_string()))
        };
        let base = semver::Version::new(component(2)?, component(3)?, component(4)?);
        let dev = match captures.get(5) {
            Some(_) => match component(5)? {
                0 => return Err(BumpError::MalformedVersion(version.to_string())),
                n => Some(n),
            },
            None => None,
        };

        Ok(DevVersion {
            base,
            dev,
            base_text: captures[1].to_string(),
            suffix: suffix.to_string(),
        })
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn is_dev(&self) -> bool {
        self.dev.is_some()
    }

    /// Returns the next development version: `<suffix>N` becomes `<suffix>N+1`,
    /// a stable version gets `<suffix>1`.
    pub fn next_dev(&self) -> Result<Self> {
        let dev = match self.dev {
            Some(n) => n
                .checked_add(1)
                .ok_or_else(|| BumpError::MalformedVersion(self.to_string()))?,
            None => 1,
        };
        Ok(DevVersion {
            dev: Some(dev),
            ..self.clone()
        })
    }

    /// Whether this version should be released relative to `tag`.
    ///
    /// A stable version beats any development build of the same base, while a
    /// development build never beats a stable tag of the same base.
    pub fn is_newer_than(&self, tag: &DevVersion) -> bool {
        if self == tag {
            return false;
        }
        match self.base.cmp(&tag.base) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match (self.dev, tag.dev) {
                (None, _) => true,
                (Some(_), None) => false,
                (Some(current), Some(latest)) => current > latest,
            },
        }
    }
}

impl fmt::Display for DevVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_text)?;
        if let Some(n) = self.dev {
            write!(f, "{}{}", self.suffix, n)?;
        }
        Ok(())
    }
}

fn version_regex(suffix: &str) -> Result<Regex> {
    let pattern = format!(
        r"^((\d+)\.(\d+)\.(\d+))(?:{}(\d+))?$",
        regex::escape(suffix)
    );
    Regex::new(&pattern)
        .map_err(|_| BumpError::InvalidSuffix(suffix.to_string()))
}

/// Decides whether `current` counts as a new release relative to `latest_tag`.
pub fn is_new_version(current: &str, latest_tag: Option<&str>, suffix: &str) -> Result<bool> {
    let Some(latest_tag) = latest_tag else {
        debug!("No previous tag, {} is new", current);
        return Ok(true);
    };

    let latest = DevVersion::parse(latest_tag.trim_start_matches('v'), suffix)?;
    let current = DevVersion::parse(current, suffix)?;
    let is_new = current.is_newer_than(&latest);
    debug!(
        "Comparing {} against tag {}: new = {}",
        current, latest_tag, is_new
    );
    Ok(is_new)
}

/// Appends or increments the development counter of `version`.
pub fn increment_dev_version(version: &str, suffix: &str) -> Result<String> {
    Ok(DevVersion::parse(version, suffix)?.next_dev()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV: &str = "-dev";

    fn is_new(current: &str, tag: &str) -> bool {
        is_new_version(current, Some(tag), DEV).unwrap()
    }

    fn bump(version: &str) -> String {
        increment_dev_version(version, DEV).unwrap()
    }

    #[test]
    fn test_parse_stable() {
        let version = DevVersion::parse("1.2.3", DEV).unwrap();
        assert_eq!(version.base, semver::Version::new(1, 2, 3));
        assert_eq!(version.dev, None);
        assert!(!version.is_dev());
    }

    #[test]
    fn test_parse_dev() {
        let version = DevVersion::parse("1.2.3-dev4", DEV).unwrap();
        assert_eq!(version.base, semver::Version::new(1, 2, 3));
        assert_eq!(version.dev, Some(4));
    }

    #[test]
    fn test_parse_custom_suffix_is_literal() {
        let version = DevVersion::parse("0.9.0.dev12", ".dev").unwrap();
        assert_eq!(version.dev, Some(12));
        assert!(DevVersion::parse("0.9.0xdev12", ".dev").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let inputs = [
            "1.2",
            "1.2.3.4",
            "v1.2.3",
            "1.2.3-dev",
            "1.2.3-rc1",
            " 1.2.3",
            "1.2.3-dev0",
        ];
        for input in inputs {
            match DevVersion::parse(input, DEV) {
                Err(BumpError::MalformedVersion(v)) => assert_eq!(v, input),
                other => panic!("{input}: unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_display() {
        let stable = DevVersion::parse("10.0.1", DEV).unwrap();
        assert_eq!(stable.to_string(), "10.0.1");
        let dev = DevVersion::parse("10.0.1-dev7", DEV).unwrap();
        assert_eq!(dev.to_string(), "10.0.1-dev7");
    }

    #[test]
    fn test_display_keeps_leading_zeros() {
        let version = DevVersion::parse("01.2.03", DEV).unwrap();
        assert_eq!(version.base, semver::Version::new(1, 2, 3));
        assert_eq!(version.to_string(), "01.2.03");
    }

    #[test]
    fn test_no_tag_is_always_new() {
        assert!(is_new_version("0.0.0", None, DEV).unwrap());
        assert!(is_new_version("3.1.4-dev2", None, DEV).unwrap());
    }

    #[test]
    fn test_greater_base_is_new() {
        assert!(is_new("2.1.0", "v2.0.0"));
        assert!(is_new("1.0.1", "v1.0.0"));
        assert!(is_new("2.0.0", "v1.9.9"));
        assert!(is_new("1.10.0", "v1.9.0"));
        assert!(is_new("2.0.0-dev1", "v1.9.9"));
    }

    #[test]
    fn test_lower_base_is_not_new() {
        assert!(!is_new("1.9.9", "v2.0.0"));
        assert!(!is_new("1.0.0-dev5", "v1.0.1"));
    }

    #[test]
    fn test_same_version_is_not_new() {
        assert!(!is_new("2.0.0", "v2.0.0"));
        assert!(!is_new("2.0.0-dev3", "v2.0.0-dev3"));
    }

    #[test]
    fn test_differently_written_base_is_new() {
        assert!(is_new("01.2.3", "v1.2.3"));
        assert!(!is_new("01.2.3", "v01.2.3"));
    }

    #[test]
    fn test_stable_beats_dev_tag_of_same_base() {
        assert!(is_new("2.0.0", "v2.0.0-dev9"));
    }

    #[test]
    fn test_dev_never_beats_stable_tag_of_same_base() {
        assert!(!is_new("2.0.0-dev1", "v2.0.0"));
        assert!(!is_new("2.0.0-dev99", "v2.0.0"));
    }

    #[test]
    fn test_dev_counters_compare_numerically() {
        assert!(is_new("1.0.0-dev10", "v1.0.0-dev9"));
        assert!(!is_new("1.0.0-dev2", "v1.0.0-dev10"));
    }

    #[test]
    fn test_tag_without_v_prefix() {
        assert!(is_new("1.0.1", "1.0.0"));
    }

    #[test]
    fn test_malformed_inputs_error() {
        assert!(matches!(
            is_new_version("1.0", Some("v1.0.0"), DEV),
            Err(BumpError::MalformedVersion(_))
        ));
        assert!(matches!(
            is_new_version("1.0.0", Some("release-1"), DEV),
            Err(BumpError::MalformedVersion(_))
        ));
    }

    #[test]
    fn test_increment_stable() {
        assert_eq!(bump("1.2.3"), "1.2.3-dev1");
    }

    #[test]
    fn test_increment_dev() {
        assert_eq!(bump("1.2.3-dev4"), "1.2.3-dev5");
        assert_eq!(bump("1.2.3-dev9"), "1.2.3-dev10");
    }

    #[test]
    fn test_increment_dev_counter_overflow() {
        let version = format!("1.2.3-dev{}", u64::MAX);
        match increment_dev_version(&version, DEV) {
            Err(BumpError::MalformedVersion(v)) => assert_eq!(v, version),
            other => panic!("expected malformed version, got {:?}", other),
        }
    }

    #[test]
    fn test_increment_keeps_leading_zeros() {
        assert_eq!(bump("01.2.3"), "01.2.3-dev1");
        assert_eq!(bump("01.2.3-dev1"), "01.2.3-dev2");
    }

    #[test]
    fn test_increment_custom_suffix() {
        let bumped = increment_dev_version("0.4.0", ".post").unwrap();
        assert_eq!(bumped, "0.4.0.post1");
        let bumped = increment_dev_version(&bumped, ".post").unwrap();
        assert_eq!(bumped, "0.4.0.post2");
    }

    #[test]
    fn test_increment_malformed() {
        assert!(matches!(
            increment_dev_version("one.two.three", DEV),
            Err(BumpError::MalformedVersion(_))
        ));
        // A counter under a different suffix is not recognised.
        assert!(increment_dev_version("1.2.3-beta1", DEV).is_err());
    }

    #[test]
    fn test_incremented_version_is_new_against_previous_dev_tag() {
        let next = bump("2.0.0-dev1");
        assert!(is_new(&next, "v2.0.0-dev1"));
    }
}
