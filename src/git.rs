//! Read-only queries against the Git repository.
//!
//! Every query shells out to the `git` binary and blocks until it
//! exits. Paths returned to callers are always repo-root-relative.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Error;

/// Index and worktree status codes for one path, as reported by
/// `git status --porcelain` (untracked files carry `??`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub index: char,
    pub worktree: char,
}

impl Status {
    /// True when the index side records a change that will be part of
    /// the next commit: typechange, modified, added, renamed, copied.
    pub fn is_staged_change(&self) -> bool {
        matches!(self.index, 'T' | 'M' | 'A' | 'R' | 'C')
    }
}

/// Handle to a Git repository rooted at a working-tree directory.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Wrap a known repository root without validating it.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk upward from `start` until a directory containing `.git`
    /// is found.
    pub fn discover(start: &Path) -> Result<Self, Error> {
        let mut dir = start.canonicalize()?;
        loop {
            if dir.join(".git").exists() {
                return Ok(Self { root: dir });
            }
            if !dir.pop() {
                return Err(Error::NoGitRepo(start.to_path_buf()));
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn git(&self, args: &[&str]) -> Result<String, Error> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()?;
        if !output.status.success() {
            return Err(Error::Git {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Status of every path `git status` reports, keyed by path.
    pub fn staged_status(&self) -> Result<BTreeMap<PathBuf, Status>, Error> {
        let out = self.git(&["status", "--porcelain"])?;
        Ok(parse_porcelain(&out))
    }

    /// Content of `path` as staged in the index, falling back to the
    /// working-tree file for paths outside the index (commit message
    /// files live under `.git/`).
    pub fn file_content(&self, path: &Path) -> Result<Vec<u8>, Error> {
        let spec = format!(":{}", path.display());
        match Command::new("git")
            .args(["show", &spec])
            .current_dir(&self.root)
            .output()
        {
            Ok(output) if output.status.success() => Ok(output.stdout),
            _ => Ok(fs::read(self.root.join(path))?),
        }
    }

    /// Paths changed between two commits; `to` defaults to `HEAD`.
    pub fn changed_files(&self, from: &str, to: Option<&str>) -> Result<Vec<PathBuf>, Error> {
        let range = format!("{}..{}", from, to.unwrap_or("HEAD"));
        let out = self.git(&["diff", "--name-only", &range])?;
        Ok(out
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}

/// Parse `git status --porcelain` output into a status map.
fn parse_porcelain(out: &str) -> BTreeMap<PathBuf, Status> {
    let mut map = BTreeMap::new();
    for line in out.lines() {
        let bytes = line.as_bytes();
        if bytes.len() < 4 {
            continue;
        }
        let index = bytes[0] as char;
        let worktree = bytes[1] as char;
        // Renames and copies are reported as "old -> new"; the staged
        // path is the destination.
        let rest = &line[3..];
        let path = match rest.split_once(" -> ") {
            Some((_, new)) => new,
            None => rest,
        };
        let path = path.trim_matches('"');
        map.insert(PathBuf::from(path), Status { index, worktree });
    }
    map
}
