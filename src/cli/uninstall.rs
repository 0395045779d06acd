//! Remove grapnel entries from installed hooks.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Error;
use crate::git::GitRepo;
use crate::hook::HookKind;

pub fn run() -> Result<(), Error> {
    let repo = GitRepo::discover(&std::env::current_dir()?)?;
    uninstall_from(repo.root())?;
    println!("grapnel hooks removed.");
    Ok(())
}

fn uninstall_from(root: &Path) -> Result<(), Error> {
    let hooks_dir = root.join(".git").join("hooks");
    if !hooks_dir.exists() {
        return Ok(());
    }

    for hook in HookKind::ALL {
        let path = hooks_dir.join(hook.as_str());
        if !path.exists() {
            continue;
        }
        let content = fs::read_to_string(&path)?;
        if !content.contains("grapnel") {
            continue;
        }
        let cleaned = remove_grapnel_section(&content);
        if cleaned.trim().is_empty() || cleaned.trim() == "#!/bin/sh" {
            fs::remove_file(&path)?;
        } else {
            fs::write(&path, cleaned)?;
        }
        info!(hook = hook.as_str(), "Removed grapnel hook");
    }
    Ok(())
}

/// Drop grapnel-managed lines, keeping anything the user added.
fn remove_grapnel_section(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.contains("grapnel"))
        .collect::<Vec<_>>()
        .join("\n")
}
