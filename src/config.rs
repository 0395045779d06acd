//! Run configuration loaded from `.githooks/config.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Directory, relative to the repo root, holding grapnel's files.
pub const SCRIPT_HOME: &str = ".githooks";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "GRAPNEL_";

/// Per-repository configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Print discovery and per-invocation progress.
    #[serde(default)]
    pub debug: bool,

    /// Names of checkers to enable. `None` enables every registered
    /// checker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkers: Option<Vec<String>>,
}

impl Config {
    /// The preferred config file path for a repository.
    pub fn path(repo_root: &Path) -> PathBuf {
        repo_root.join(SCRIPT_HOME).join("config.yaml")
    }

    /// Load config for a repository. `config.yaml` is preferred,
    /// `config.json` is accepted; a missing file yields the defaults,
    /// a file that fails to parse is fatal.
    pub fn load(repo_root: &Path) -> Result<Self, Error> {
        let yaml = Self::path(repo_root);
        let json = repo_root.join(SCRIPT_HOME).join("config.json");
        let path = if yaml.exists() {
            yaml
        } else if json.exists() {
            json
        } else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply `GRAPNEL_*` overrides from an explicit variable list.
    /// The caller decides which environment (if any) to pass in.
    pub fn apply_env(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in vars {
            let Some(option) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            if option.eq_ignore_ascii_case("debug") {
                self.debug = parse_bool(&value);
            }
        }
    }
}

/// Truthiness for override values: an integer is compared against
/// zero, anything else is true when non-empty.
fn parse_bool(value: &str) -> bool {
    match value.trim().parse::<i64>() {
        Ok(n) => n != 0,
        Err(_) => !value.is_empty(),
    }
}
