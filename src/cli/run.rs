//! Execute one hook firing: classify content, dispatch checkers.

use std::io::Read;

use crate::checker::Registry;
use crate::classify::{self, Trigger};
use crate::config::Config;
use crate::context::Context;
use crate::dispatch;
use crate::error::Error;
use crate::git::GitRepo;
use crate::hook::HookKind;

/// Run checkers for `hook_name` with the raw arguments Git supplied.
/// Returns the process exit code: 0 when every check passed or there
/// was nothing to check, 1 when any (checker, content) pair failed.
pub fn run(hook_name: &str, args: Vec<String>) -> Result<i32, Error> {
    let hook: HookKind = hook_name.parse()?;
    let repo = GitRepo::discover(&std::env::current_dir()?)?;

    let mut config = Config::load(repo.root())?;
    config.apply_env(std::env::vars());

    // Hook stdin is only defined for pre-push; reading it elsewhere
    // can block on an open descriptor.
    let stdin = if hook == HookKind::PrePush {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        String::new()
    };

    let trigger = Trigger {
        args,
        stdin,
        env: std::env::vars().collect(),
    };
    let ctx = Context::new(repo, config);

    let registry = Registry::from_config(&ctx.config)?;
    if ctx.config.debug {
        let active: Vec<_> = registry.active_for(hook).collect();
        if active.is_empty() {
            println!("No checkers for {}", hook);
        }
        for checker in active {
            println!("Found checker: {}", checker.name());
        }
    }

    let contents = classify::classify(&ctx, hook, &trigger)?;
    if ctx.config.debug {
        if contents.is_empty() {
            println!("No content to check for {}", hook);
        }
        for content in &contents {
            println!("{}", content.discovered_message());
        }
    }

    let report = dispatch::run(&ctx, hook, &registry, &contents);
    Ok(report.exit_code())
}
