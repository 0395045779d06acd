//! Staged files must not contain leftover merge conflict markers.

use anyhow::bail;

use crate::checker::Checker;
use crate::hook::HookKind;

fn is_marker(line: &str) -> bool {
    line.starts_with("<<<<<<< ") || line.starts_with(">>>>>>> ") || line == "======="
}

/// Build the `merge-conflict` checker: reject staged files that still
/// carry conflict markers.
pub fn checker() -> Checker {
    Checker::each("merge-conflict", |repo, _hook, content| {
        let Some(path) = content.file_path() else {
            return Ok(());
        };
        let bytes = repo.file_content(path)?;
        let text = String::from_utf8_lossy(&bytes);
        for (lineno, line) in text.lines().enumerate() {
            if is_marker(line) {
                bail!("conflict marker at line {}", lineno + 1);
            }
        }
        Ok(())
    })
    .active_hooks([HookKind::PreCommit])
}
