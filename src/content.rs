//! Hook-specific content items produced by classification.

use std::path::{Path, PathBuf};

use crate::checker::Checker;
use crate::hook::HookKind;

/// One unit of content a checker runs against. Each variant belongs
/// to exactly one hook kind; items are never reused across firings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A file staged for commit (`pre-commit`).
    Staged { path: PathBuf },

    /// The file holding the message being committed (`commit-msg`).
    CommitMessage { path: PathBuf },

    /// A file that changed in a branch checkout (`post-checkout`).
    Checkout {
        path: PathBuf,
        original_commit: String,
        destination_commit: String,
    },

    /// A file that changed relative to the merged-in head
    /// (`post-merge`).
    Merge {
        path: PathBuf,
        source_commit: String,
        squash: bool,
    },

    /// One ref update line from a `pre-push` firing.
    RefPush {
        remote_name: String,
        remote_url: String,
        local_ref: String,
        local_commit: String,
        remote_ref: String,
        remote_commit: String,
        /// The local side is the zero oid: the branch was deleted
        /// locally.
        branch_deleted_locally: bool,
        /// The remote side is the zero oid: this push creates the
        /// branch.
        new_branch_to_remote: bool,
    },
}

impl Content {
    pub fn hook_kind(&self) -> HookKind {
        match self {
            Content::Staged { .. } => HookKind::PreCommit,
            Content::CommitMessage { .. } => HookKind::CommitMsg,
            Content::Checkout { .. } => HookKind::PostCheckout,
            Content::Merge { .. } => HookKind::PostMerge,
            Content::RefPush { .. } => HookKind::PrePush,
        }
    }

    /// The file this content is about, when it is about a file at
    /// all. Ref updates are not file-scoped.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Content::Staged { path }
            | Content::CommitMessage { path }
            | Content::Checkout { path, .. }
            | Content::Merge { path, .. } => Some(path),
            Content::RefPush { .. } => None,
        }
    }

    /// Short description for progress and error output: the file
    /// path, or `local -> remote` for a ref update.
    pub fn describe(&self) -> String {
        match self {
            Content::RefPush {
                local_ref,
                remote_ref,
                ..
            } => format!("{} -> {}", local_ref, remote_ref),
            _ => self
                .file_path()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn discovered_message(&self) -> String {
        match self {
            Content::RefPush { .. } => format!("Found ref update: {}", self.describe()),
            _ => format!("Found content: {}", self.describe()),
        }
    }

    pub fn inactive_message(&self, checker: &Checker) -> String {
        format!(
            "\"{}\" is inactive for \"{}\"",
            checker.name(),
            self.describe()
        )
    }

    pub fn error_message(&self, checker: &Checker, error: &anyhow::Error) -> String {
        let subject = match self {
            Content::RefPush { .. } => "ref",
            _ => "file",
        };
        format!(
            "{} hook failed\nchecker: {}\n{}: {}\n{:#}",
            self.hook_kind(),
            checker.name(),
            subject,
            self.describe(),
            error
        )
    }

    pub fn success_message(&self, checker: &Checker) -> String {
        format!(
            "Invoked \"{}\" with \"{}\" successfully",
            checker.name(),
            self.describe()
        )
    }
}
