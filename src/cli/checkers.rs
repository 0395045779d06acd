//! List registered checkers.

use crate::checker::Registry;
use crate::config::Config;
use crate::error::Error;
use crate::git::GitRepo;
use crate::hook::HookKind;

/// Print every enabled checker with its activation metadata. Outside
/// a repository the full builtin set is shown.
pub fn run() -> Result<(), Error> {
    let config = match GitRepo::discover(&std::env::current_dir()?) {
        Ok(repo) => {
            let mut config = Config::load(repo.root())?;
            config.apply_env(std::env::vars());
            config
        }
        Err(_) => Config::default(),
    };
    let registry = Registry::from_config(&config)?;

    if registry.is_empty() {
        println!("No checkers enabled.");
        return Ok(());
    }

    for checker in registry.iter() {
        let hooks = if checker.hooks().is_empty() {
            "all hooks".to_string()
        } else {
            checker
                .hooks()
                .iter()
                .map(HookKind::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let once = if checker.runs_once() { " (once)" } else { "" };
        println!(
            "{:<16} {:<24} {}{}",
            checker.name(),
            hooks,
            checker.filter(),
            once
        );
    }
    Ok(())
}
