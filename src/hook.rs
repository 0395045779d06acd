//! Git hook kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The Git lifecycle events grapnel can be installed for.
///
/// Five of these produce content to check (`pre-commit`, `commit-msg`,
/// `post-checkout`, `post-merge`, `pre-push`); the rest fire with no
/// content, which only run-once checkers observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    ApplypatchMsg,
    PreApplypatch,
    PostApplypatch,
    PreCommit,
    PrepareCommitMsg,
    CommitMsg,
    PostCommit,
    PreRebase,
    PostCheckout,
    PostMerge,
    PreAutoGc,
    PostRewrite,
    PrePush,
}

impl HookKind {
    /// Every supported hook, in Git's documentation order.
    pub const ALL: [HookKind; 13] = [
        HookKind::ApplypatchMsg,
        HookKind::PreApplypatch,
        HookKind::PostApplypatch,
        HookKind::PreCommit,
        HookKind::PrepareCommitMsg,
        HookKind::CommitMsg,
        HookKind::PostCommit,
        HookKind::PreRebase,
        HookKind::PostCheckout,
        HookKind::PostMerge,
        HookKind::PreAutoGc,
        HookKind::PostRewrite,
        HookKind::PrePush,
    ];

    /// The entry-point name Git uses under `.git/hooks/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::ApplypatchMsg => "applypatch-msg",
            HookKind::PreApplypatch => "pre-applypatch",
            HookKind::PostApplypatch => "post-applypatch",
            HookKind::PreCommit => "pre-commit",
            HookKind::PrepareCommitMsg => "prepare-commit-msg",
            HookKind::CommitMsg => "commit-msg",
            HookKind::PostCommit => "post-commit",
            HookKind::PreRebase => "pre-rebase",
            HookKind::PostCheckout => "post-checkout",
            HookKind::PostMerge => "post-merge",
            HookKind::PreAutoGc => "pre-auto-gc",
            HookKind::PostRewrite => "post-rewrite",
            HookKind::PrePush => "pre-push",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        HookKind::ALL
            .into_iter()
            .find(|hook| hook.as_str() == s)
            .ok_or_else(|| Error::UnknownHook(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_names() {
        for hook in HookKind::ALL {
            let parsed: HookKind = hook.as_str().parse().unwrap();
            assert_eq!(parsed, hook);
        }
    }

    #[test]
    fn test_unknown_name_is_error() {
        let err = "post-push".parse::<HookKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownHook(name) if name == "post-push"));
    }

    #[test]
    fn test_display_matches_entry_point() {
        assert_eq!(HookKind::PreCommit.to_string(), "pre-commit");
        assert_eq!(HookKind::PreAutoGc.to_string(), "pre-auto-gc");
    }
}
