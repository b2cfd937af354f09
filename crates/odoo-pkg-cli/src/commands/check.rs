use anyhow::Result;
use clap::Args;
use colored::Colorize;
use odoo_pkg_logger as logger;
use odoo_pkg_manifest::{is_installable, read_manifest};
use std::path::PathBuf;

use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Directory to check
    pub addon_dir: PathBuf,
}

/// Report whether the directory holds an installable addon; returns the verdict
pub fn handle_check(cmd: CheckCommand, _global: &GlobalOpts) -> Result<bool> {
    let installable = is_installable(&cmd.addon_dir);
    if installable {
        println!("{}: {}", cmd.addon_dir.display(), "installable".green());
    } else {
        println!("{}: {}", cmd.addon_dir.display(), "not installable".yellow());
        match read_manifest(&cmd.addon_dir) {
            Ok(_) => logger::debug("Manifest sets 'installable' to a false value"),
            Err(e) => logger::debug(&e.to_string()),
        }
    }
    Ok(installable)
}
