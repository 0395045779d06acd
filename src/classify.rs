//! Content classification: turn one hook firing into content items.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::content::Content;
use crate::context::Context;
use crate::error::Error;
use crate::git::Status;
use crate::hook::HookKind;

/// A commit id of 40 zeros, Git's marker for an absent ref.
const ZERO_OID: &str = "0000000000000000000000000000000000000000";

/// Raw trigger data for one hook firing, captured once by the CLI
/// layer. Classification reads only this snapshot, never process
/// globals.
#[derive(Debug, Clone, Default)]
pub struct Trigger {
    /// Positional arguments Git passed to the hook.
    pub args: Vec<String>,

    /// Hook stdin. Only `pre-push` supplies any; the CLI layer leaves
    /// this empty for every other hook.
    pub stdin: String,

    /// Environment snapshot. Only `post-merge` consults it, for the
    /// `GITHEAD_<oid>` variable Git exports during a merge.
    pub env: Vec<(String, String)>,
}

/// Produce the ordered content items for a hook firing.
///
/// Hooks without specialized handling yield an empty sequence; run-once
/// checkers still fire for those.
pub fn classify(ctx: &Context, hook: HookKind, trigger: &Trigger) -> Result<Vec<Content>, Error> {
    match hook {
        HookKind::PreCommit => {
            let status = ctx.repo.staged_status()?;
            Ok(staged_contents(&status))
        }
        HookKind::CommitMsg => {
            let path = trigger.args.last().ok_or_else(|| {
                Error::Trigger("commit-msg expects the message file path".to_string())
            })?;
            Ok(vec![Content::CommitMessage {
                path: PathBuf::from(path),
            }])
        }
        HookKind::PostCheckout => {
            let (original, destination, flag) = match trigger.args.as_slice() {
                [original, destination, flag] => (original, destination, flag),
                _ => {
                    return Err(Error::Trigger(
                        "post-checkout expects <original> <destination> <branch-flag>".to_string(),
                    ))
                }
            };
            // Flag 0 is a file-level checkout; only branch switches
            // produce content.
            if flag != "1" {
                return Ok(Vec::new());
            }
            let files = ctx.repo.changed_files(original, Some(destination))?;
            Ok(files
                .into_iter()
                .map(|path| Content::Checkout {
                    path,
                    original_commit: original.clone(),
                    destination_commit: destination.clone(),
                })
                .collect())
        }
        HookKind::PostMerge => {
            let squash = trigger.args.last().map(|arg| arg == "1").unwrap_or(false);
            let Some((source_commit, _source_branch)) = merge_head(&trigger.env) else {
                return Ok(Vec::new());
            };
            let files = ctx.repo.changed_files(&source_commit, None)?;
            Ok(files
                .into_iter()
                .map(|path| Content::Merge {
                    path,
                    source_commit: source_commit.clone(),
                    squash,
                })
                .collect())
        }
        HookKind::PrePush => {
            let (remote_name, remote_url) = match trigger.args.as_slice() {
                [name, url] => (name.as_str(), url.as_str()),
                _ => {
                    return Err(Error::Trigger(
                        "pre-push expects <remote-name> <remote-url>".to_string(),
                    ))
                }
            };
            trigger
                .stdin
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| parse_ref_update(remote_name, remote_url, line))
                .collect()
        }
        _ => Ok(Vec::new()),
    }
}

/// Staged paths that will be part of the next commit, in path order.
fn staged_contents(status: &BTreeMap<PathBuf, Status>) -> Vec<Content> {
    status
        .iter()
        .filter(|(_, status)| status.is_staged_change())
        .map(|(path, _)| Content::Staged { path: path.clone() })
        .collect()
}

/// Find the `GITHEAD_<oid>=<branch>` variable Git exports for a
/// merge. Absent when the hook fires outside a real merge.
fn merge_head(env: &[(String, String)]) -> Option<(String, String)> {
    env.iter().find_map(|(key, value)| {
        let oid = key.strip_prefix("GITHEAD_")?;
        if oid.len() == 40 && oid.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some((oid.to_string(), value.clone()))
        } else {
            None
        }
    })
}

/// Parse one `pre-push` stdin line:
/// `<local-ref> <local-oid> <remote-ref> <remote-oid>`.
fn parse_ref_update(remote_name: &str, remote_url: &str, line: &str) -> Result<Content, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[local_ref, local_commit, remote_ref, remote_commit] = fields.as_slice() else {
        return Err(Error::Trigger(format!(
            "malformed pre-push ref line: \"{}\"",
            line
        )));
    };
    Ok(Content::RefPush {
        remote_name: remote_name.to_string(),
        remote_url: remote_url.to_string(),
        local_ref: local_ref.to_string(),
        local_commit: local_commit.to_string(),
        remote_ref: remote_ref.to_string(),
        remote_commit: remote_commit.to_string(),
        branch_deleted_locally: local_commit == ZERO_OID,
        new_branch_to_remote: remote_commit == ZERO_OID,
    })
}
