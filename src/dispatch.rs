//! Dispatch engine: pair checkers with content and aggregate
//! outcomes.

use tracing::debug;

use crate::checker::{CheckerAction, Registry};
use crate::content::Content;
use crate::context::Context;
use crate::hook::HookKind;

/// Outcome summary for one hook firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Checker invocations attempted.
    pub invoked: usize,
    /// (checker, content) pairs skipped by a file filter.
    pub skipped: usize,
    /// Invocations that returned an error.
    pub failures: usize,
}

impl RunReport {
    pub fn failed(&self) -> bool {
        self.failures > 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.failed() {
            1
        } else {
            0
        }
    }
}

/// Run every applicable checker against every applicable content
/// item.
///
/// A checker error is recorded and reported on stderr; it never stops
/// the remaining (checker, content) pairs from running. Run-once
/// checkers fire exactly once per call, even with no content.
/// Checkers run in registration order, content in classification
/// order; nothing to check is not a failure.
pub fn run(ctx: &Context, hook: HookKind, registry: &Registry, contents: &[Content]) -> RunReport {
    let mut report = RunReport::default();
    debug!(hook = %hook, contents = contents.len(), "dispatch start");

    for checker in registry.active_for(hook) {
        match checker.action() {
            CheckerAction::Once(check) => {
                report.invoked += 1;
                match check(&ctx.repo, hook, contents) {
                    Ok(()) => {
                        if ctx.config.debug {
                            println!("{} checker success", checker.name());
                        }
                    }
                    Err(error) => {
                        report.failures += 1;
                        eprintln!(
                            "{} hook failed\nchecker: {}\n{:#}",
                            hook,
                            checker.name(),
                            error
                        );
                    }
                }
            }
            CheckerAction::Each(check) => {
                for content in contents {
                    if let Some(path) = content.file_path() {
                        if !checker.is_active_for_path(path) {
                            report.skipped += 1;
                            if ctx.config.debug {
                                println!("{}", content.inactive_message(checker));
                            }
                            continue;
                        }
                    }
                    report.invoked += 1;
                    match check(&ctx.repo, hook, content) {
                        Ok(()) => {
                            if ctx.config.debug {
                                println!("{}", content.success_message(checker));
                            }
                        }
                        Err(error) => {
                            report.failures += 1;
                            eprintln!("{}", content.error_message(checker, &error));
                        }
                    }
                }
            }
        }
    }

    debug!(
        invoked = report.invoked,
        skipped = report.skipped,
        failures = report.failures,
        "dispatch complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Checker;
    use crate::config::Config;
    use crate::git::GitRepo;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn ctx(dir: &TempDir) -> Context {
        Context::new(GitRepo::open(dir.path()), Config::default())
    }

    fn staged(path: &str) -> Content {
        Content::Staged {
            path: PathBuf::from(path),
        }
    }

    fn ref_push() -> Content {
        Content::RefPush {
            remote_name: "origin".to_string(),
            remote_url: "url".to_string(),
            local_ref: "refs/heads/main".to_string(),
            local_commit: "a".repeat(40),
            remote_ref: "refs/heads/main".to_string(),
            remote_commit: "b".repeat(40),
            branch_deleted_locally: false,
            new_branch_to_remote: false,
        }
    }

    fn counting(name: &str, count: Arc<AtomicUsize>, fail: bool) -> Checker {
        Checker::each(name, move |_, _, _| {
            count.fetch_add(1, Ordering::SeqCst);
            if fail {
                anyhow::bail!("always fails")
            }
            Ok(())
        })
    }

    #[test]
    fn test_empty_registry_is_successful_noop() {
        let dir = TempDir::new().unwrap();
        let report = run(
            &ctx(&dir),
            HookKind::PreCommit,
            &Registry::new(),
            &[staged("a.json")],
        );
        assert_eq!(report, RunReport::default());
        assert!(!report.failed());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_empty_contents_skips_per_item_checkers() {
        let dir = TempDir::new().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new();
        registry.register(counting("noop", count.clone(), false));

        let report = run(&ctx(&dir), HookKind::PreCommit, &registry, &[]);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!report.failed());
    }

    #[test]
    fn test_run_once_fires_with_empty_contents() {
        let dir = TempDir::new().unwrap();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen2 = seen.clone();
        let mut registry = Registry::new();
        registry.register(Checker::once("all", move |_, _, contents| {
            seen2.fetch_add(1, Ordering::SeqCst);
            assert!(contents.is_empty());
            Ok(())
        }));

        let report = run(&ctx(&dir), HookKind::PostCommit, &registry, &[]);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(report.invoked, 1);
        assert!(!report.failed());
    }

    #[test]
    fn test_run_once_receives_full_collection() {
        let dir = TempDir::new().unwrap();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen2 = seen.clone();
        let mut registry = Registry::new();
        registry.register(Checker::once("all", move |_, _, contents| {
            seen2.store(contents.len(), Ordering::SeqCst);
            Ok(())
        }));

        let contents = [staged("a.json"), staged("b.txt"), staged("c.txt")];
        let report = run(&ctx(&dir), HookKind::PreCommit, &registry, &contents);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
        assert_eq!(report.invoked, 1);
    }

    #[test]
    fn test_failure_isolation_across_checkers() {
        let dir = TempDir::new().unwrap();
        let failing = Arc::new(AtomicUsize::new(0));
        let passing = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new();
        registry.register(counting("k1", failing.clone(), true));
        registry.register(counting("k2", passing.clone(), false));

        let report = run(&ctx(&dir), HookKind::PreCommit, &registry, &[staged("a.json")]);

        // Both ran; exactly one failure recorded.
        assert_eq!(failing.load(Ordering::SeqCst), 1);
        assert_eq!(passing.load(Ordering::SeqCst), 1);
        assert_eq!(report.invoked, 2);
        assert_eq!(report.failures, 1);
        assert!(report.failed());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_failure_isolation_across_contents() {
        let dir = TempDir::new().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let count2 = count.clone();
        let mut registry = Registry::new();
        registry.register(Checker::each("flaky", move |_, _, content| {
            count2.fetch_add(1, Ordering::SeqCst);
            if content.file_path() == Some(std::path::Path::new("a.json")) {
                anyhow::bail!("bad file")
            }
            Ok(())
        }));

        let contents = [staged("a.json"), staged("b.txt")];
        let report = run(&ctx(&dir), HookKind::PreCommit, &registry, &contents);

        // The failure on a.json did not suppress the b.txt invocation.
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(report.failures, 1);
    }

    #[test]
    fn test_file_filter_skips_without_failure() {
        let dir = TempDir::new().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let count2 = count.clone();
        let mut registry = Registry::new();
        registry.register(
            Checker::each("json-only", move |_, _, _| {
                count2.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .file_extension(".json"),
        );

        let contents = [staged("a.json"), staged("b.txt")];
        let report = run(&ctx(&dir), HookKind::PreCommit, &registry, &contents);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(report.invoked, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failures, 0);
    }

    #[test]
    fn test_ref_content_bypasses_file_filter() {
        let dir = TempDir::new().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let count2 = count.clone();
        let mut registry = Registry::new();
        registry.register(
            Checker::each("push-guard", move |_, _, _| {
                count2.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .file_extension(".json"),
        );

        let report = run(&ctx(&dir), HookKind::PrePush, &registry, &[ref_push()]);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_run_once_failure_is_recorded_and_isolated() {
        let dir = TempDir::new().unwrap();
        let passing = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new();
        registry.register(Checker::once("broken", |_, _, _| {
            anyhow::bail!("setup missing")
        }));
        registry.register(counting("fine", passing.clone(), false));

        let report = run(&ctx(&dir), HookKind::PreCommit, &registry, &[staged("a.json")]);
        assert_eq!(report.failures, 1);
        assert_eq!(passing.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_idempotent_reports() {
        let dir = TempDir::new().unwrap();
        let mut registry = Registry::new();
        registry.register(Checker::each("fails-on-json", |_, _, content| {
            match content.file_path().and_then(|p| p.extension()) {
                Some(ext) if ext == "json" => anyhow::bail!("nope"),
                _ => Ok(()),
            }
        }));

        let contents = [staged("a.json"), staged("b.txt")];
        let context = ctx(&dir);
        let first = run(&context, HookKind::PreCommit, &registry, &contents);
        let second = run(&context, HookKind::PreCommit, &registry, &contents);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invocation_order_is_registration_then_classification() {
        let dir = TempDir::new().unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = Registry::new();
        for name in ["first", "second"] {
            let order = order.clone();
            registry.register(Checker::each(name, move |_, _, content| {
                order
                    .lock()
                    .unwrap()
                    .push(format!("{}:{}", name, content.describe()));
                Ok(())
            }));
        }

        let contents = [staged("a.json"), staged("b.txt")];
        run(&ctx(&dir), HookKind::PreCommit, &registry, &contents);

        let order = order.lock().unwrap();
        assert_eq!(
            *order,
            vec![
                "first:a.json".to_string(),
                "first:b.txt".to_string(),
                "second:a.json".to_string(),
                "second:b.txt".to_string(),
            ]
        );
    }
}
