//! Component installation
//!
//! Validates that a component is installable, then executes its declared
//! install scripts in order inside the component's acquired directory.
//!
//! Duplicate specification records in the store can attach the same script
//! twice; scripts are deduped by content before execution, keeping the
//! first occurrence order. The first failing script aborts the rest; no
//! rollback of already-executed scripts is attempted.

use std::path::Path;
use std::process::Command;

use crate::error::{KcmError, Result};
use crate::graph::{ComponentId, GraphQueryGateway};

/// Install a component in its acquired directory
///
/// A component with zero install scripts is a successful no-op that touches
/// nothing.
///
/// # Errors
///
/// - [`KcmError::NotReusable`] - component lacks the reusable flag
/// - [`KcmError::InvalidInstallationMethod`] - no installation method declared
/// - [`KcmError::InstallScriptFailed`] - a script exited non-zero or could
///   not be spawned; names the script by index and content
pub fn install<G: GraphQueryGateway + ?Sized>(
    gateway: &G,
    id: &ComponentId,
    work_dir: &Path,
) -> Result<()> {
    if !gateway.is_reusable(id) {
        return Err(KcmError::NotReusable {
            id: id.to_string(),
        });
    }

    if gateway.installation_method(id).is_none() {
        return Err(KcmError::InvalidInstallationMethod {
            id: id.to_string(),
        });
    }

    let scripts = dedupe_scripts(gateway.install_scripts(id));

    for (index, script) in scripts.iter().enumerate() {
        run_script(id, index, script, work_dir)?;
    }

    Ok(())
}

/// Drop duplicate script entries, keeping first occurrence order
fn dedupe_scripts(scripts: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    scripts
        .into_iter()
        .filter(|script| seen.insert(script.clone()))
        .collect()
}

/// Execute one script via the shell, in the component's directory
fn run_script(id: &ComponentId, index: usize, script: &str, work_dir: &Path) -> Result<()> {
    let status = Command::new("sh")
        .arg("-c")
        .arg(script)
        .current_dir(work_dir)
        .status()
        .map_err(|e| KcmError::InstallScriptFailed {
            id: id.to_string(),
            index,
            script: script.to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(KcmError::InstallScriptFailed {
            id: id.to_string(),
            index,
            script: script.to_string(),
            reason: format!("exited with {}", status),
        });
    }

    Ok(())
}
