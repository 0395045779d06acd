//! Per-run context threaded through classification and dispatch.

use crate::config::Config;
use crate::git::GitRepo;

/// Everything a hook firing needs from its surroundings, resolved once
/// at startup. Core logic receives this explicitly and never reads
/// process globals.
#[derive(Debug)]
pub struct Context {
    pub repo: GitRepo,
    pub config: Config,
}

impl Context {
    pub fn new(repo: GitRepo, config: Config) -> Self {
        Self { repo, config }
    }
}
