//! Staged JSON files must parse.

use serde::de::IgnoredAny;

use crate::checker::Checker;
use crate::hook::HookKind;

/// Build the `json` checker: every staged `.json` file must be valid
/// JSON. Content is read as staged, not as it sits in the worktree.
pub fn checker() -> Checker {
    Checker::each("json", |repo, _hook, content| {
        let Some(path) = content.file_path() else {
            return Ok(());
        };
        let bytes = repo.file_content(path)?;
        serde_json::from_slice::<IgnoredAny>(&bytes)?;
        Ok(())
    })
    .active_hooks([HookKind::PreCommit])
    .file_extension(".json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Registry;
    use crate::config::Config;
    use crate::content::Content;
    use crate::context::Context;
    use crate::dispatch;
    use crate::git::GitRepo;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn run_against(dir: &TempDir, file: &str, body: &str) -> dispatch::RunReport {
        fs::write(dir.path().join(file), body).unwrap();
        let ctx = Context::new(GitRepo::open(dir.path()), Config::default());
        let mut registry = Registry::new();
        registry.register(checker());
        let contents = [Content::Staged {
            path: PathBuf::from(file),
        }];
        dispatch::run(&ctx, HookKind::PreCommit, &registry, &contents)
    }

    #[test]
    fn test_valid_json_passes() {
        let dir = TempDir::new().unwrap();
        let report = run_against(&dir, "ok.json", r#"{"a": [1, 2, 3]}"#);
        assert_eq!(report.failures, 0);
        assert_eq!(report.invoked, 1);
    }

    #[test]
    fn test_malformed_json_is_a_recorded_failure() {
        let dir = TempDir::new().unwrap();
        let report = run_against(&dir, "bad.json", "{\"a\": [1, 2,");
        assert_eq!(report.failures, 1);
        assert!(report.failed());
    }

    #[test]
    fn test_only_active_for_pre_commit() {
        let json = checker();
        assert!(json.is_active_for_hook(HookKind::PreCommit));
        assert!(!json.is_active_for_hook(HookKind::PrePush));
    }

    #[test]
    fn test_non_json_paths_filtered_out() {
        let dir = TempDir::new().unwrap();
        let report = run_against(&dir, "notes.txt", "not json at all");
        // The file filter skips it before invocation.
        assert_eq!(report.invoked, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failures, 0);
    }
}
