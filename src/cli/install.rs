//! Hook entry-point installation.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::config::SCRIPT_HOME;
use crate::error::Error;
use crate::git::GitRepo;
use crate::hook::HookKind;

/// Marker identifying grapnel-managed lines in hook scripts.
const MARKER: &str = "grapnel";

/// Seed configuration written on first install.
const DEFAULT_CONFIG: &str = "\
# grapnel configuration
# debug: true prints discovery and per-check progress
debug: false

# Enable a subset of checkers by name; remove to enable all.
# checkers:
#   - json
#   - merge-conflict
";

/// Entry script installed for one hook.
fn hook_script(hook: HookKind) -> String {
    format!(
        "#!/bin/sh\n# grapnel hook entry (auto-installed)\nexec grapnel run {} \"$@\"\n",
        hook
    )
}

/// Install an entry script for every supported hook, plus the
/// `.githooks/` config skeleton.
pub fn run(dry_run: bool) -> Result<(), Error> {
    let repo = GitRepo::discover(&std::env::current_dir()?)?;
    if !dry_run {
        verify_entry()?;
    }
    install_into(repo.root(), dry_run)?;
    if !dry_run {
        println!("grapnel hooks installed.");
    }
    Ok(())
}

/// Spawn ourselves in identification mode before pointing hooks at
/// the binary.
fn verify_entry() -> Result<(), Error> {
    let exe = std::env::current_exe()?;
    let output = Command::new(&exe).env("GRAPNEL_INSTALL_TEST", "1").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() || stdout.trim() != "grapnel 1" {
        return Err(Error::Config(format!(
            "entry point sanity check failed for {}",
            exe.display()
        )));
    }
    Ok(())
}

fn install_into(root: &Path, dry_run: bool) -> Result<(), Error> {
    let hooks_dir = root.join(".git").join("hooks");
    if !dry_run {
        fs::create_dir_all(&hooks_dir)?;
    }

    for hook in HookKind::ALL {
        install_hook(&hooks_dir.join(hook.as_str()), &hook_script(hook), dry_run)?;
    }

    let home = root.join(SCRIPT_HOME);
    let config_path = home.join("config.yaml");
    if !config_path.exists() {
        if dry_run {
            println!("would write {}", config_path.display());
        } else {
            fs::create_dir_all(&home)?;
            fs::write(&config_path, DEFAULT_CONFIG)?;
            info!(path = %config_path.display(), "Created config.yaml");
        }
    }
    Ok(())
}

/// Install a single hook script, appending to an existing non-grapnel
/// hook rather than replacing it.
fn install_hook(path: &Path, content: &str, dry_run: bool) -> Result<(), Error> {
    let final_content = if path.exists() {
        let existing = fs::read_to_string(path)?;

        // Already ours.
        if existing.contains(MARKER) {
            return Ok(());
        }

        format!("{}\n\n{}", existing.trim(), content)
    } else {
        content.to_string()
    };

    if dry_run {
        println!("would install {}", path.display());
        return Ok(());
    }

    fs::write(path, &final_content)?;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    info!(hook = %path.display(), "Installed hook");

    Ok(())
}
