use std::path::{Path, PathBuf};
use std::time::Duration;

use aliasync_types::policy::DEFAULT_MAX_STALENESS;
use aliasync_types::SyncPolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::SyncArgs;

/// Settings read from an optional TOML file. Command-line flags win.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub strict: bool,
    pub keep: bool,
    pub branches: Vec<String>,
    pub max_age_days: Option<u64>,
    /// Inline header text. Ignored when a header file is given.
    pub header: Option<String>,
    pub header_file: Option<PathBuf>,
    pub ignored_users: Vec<String>,
    pub update_directly: bool,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load the file named by `--config`, or fall back to defaults.
    pub fn for_args(sync: &SyncArgs) -> anyhow::Result<Self> {
        match &sync.config {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Combine file settings with command-line flags into a policy.
    pub fn policy(
        &self,
        sync: &SyncArgs,
        branches: &[String],
        max_age_days: Option<u64>,
    ) -> anyhow::Result<SyncPolicy> {
        let branch_patterns = if branches.is_empty() {
            self.branches.clone()
        } else {
            branches.to_vec()
        };

        let max_staleness = match max_age_days.or(self.max_age_days) {
            Some(days) => Duration::from_secs(days.saturating_mul(24 * 60 * 60)),
            None => DEFAULT_MAX_STALENESS,
        };

        Ok(SyncPolicy {
            strict: sync.strict || self.strict,
            keep_unknown: sync.keep || self.keep,
            branch_patterns,
            max_staleness,
            header: self.header(sync)?,
        })
    }

    fn header(&self, sync: &SyncArgs) -> anyhow::Result<String> {
        match sync.header_file.as_ref().or(self.header_file.as_ref()) {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read header file {}", path.display())),
            None => Ok(self.header.clone().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sync_args() -> SyncArgs {
        SyncArgs {
            roster: "teams.yaml".into(),
            config: None,
            strict: false,
            keep: false,
            header_file: None,
        }
    }

    #[test]
    fn default_config_gives_default_window() {
        let policy = Config::default().policy(&sync_args(), &["main".to_string()], None).unwrap();
        assert_eq!(policy.max_staleness, DEFAULT_MAX_STALENESS);
        assert_eq!(policy.branch_patterns, vec!["main"]);
        assert!(!policy.strict);
        assert!(policy.header.is_empty());
    }

    #[test]
    fn parse_toml() {
        let config = Config::from_toml(
            r##"
            strict = true
            branches = ["main", "release-*"]
            max_age_days = 30
            header = "# managed by aliasync"
            ignored_users = ["sync-bot"]
            "##,
        )
        .unwrap();
        assert!(config.strict);
        assert_eq!(config.max_age_days, Some(30));
        assert_eq!(config.ignored_users, vec!["sync-bot"]);

        let policy = config.policy(&sync_args(), &[], None).unwrap();
        assert!(policy.strict);
        assert_eq!(policy.branch_patterns, vec!["main", "release-*"]);
        assert_eq!(policy.max_staleness, Duration::from_secs(30 * 86_400));
        assert_eq!(policy.header, "# managed by aliasync");
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(Config::from_toml("stritc = true").is_err());
    }

    #[test]
    fn flags_override_file() {
        let config = Config {
            branches: vec!["main".into()],
            max_age_days: Some(10),
            ..Default::default()
        };
        let mut args = sync_args();
        args.keep = true;
        let policy = config.policy(&args, &["dev".to_string()], Some(5)).unwrap();
        assert!(policy.keep_unknown);
        assert_eq!(policy.branch_patterns, vec!["dev"]);
        assert_eq!(policy.max_staleness, Duration::from_secs(5 * 86_400));
    }

    #[test]
    fn header_file_wins_over_inline_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# from file").unwrap();

        let config = Config {
            header: Some("# inline".into()),
            ..Default::default()
        };
        let mut args = sync_args();
        args.header_file = Some(file.path().to_path_buf());
        let policy = config.policy(&args, &[], None).unwrap();
        assert_eq!(policy.header, "# from file");
    }

    #[test]
    fn missing_header_file_is_an_error() {
        let mut args = sync_args();
        args.header_file = Some("/nonexistent/aliasync/header".into());
        assert!(Config::default().policy(&args, &[], None).is_err());
    }
}
