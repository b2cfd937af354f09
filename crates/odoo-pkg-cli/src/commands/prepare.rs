use anyhow::{Context, Result};
use clap::Args;
use odoo_pkg_logger as logger;
use std::path::PathBuf;

use super::load_packager;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct PrepareCommand {
    /// Packaging project directory (holding the addons namespace directory)
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,
    /// Addons namespace directory name (default from config, else odoo_addons)
    #[arg(long)]
    pub namespace: Option<String>,
}

fn packager(cmd: &PrepareCommand, global: &GlobalOpts) -> Result<odoo_pkg_core::AddonPackager> {
    let packager = load_packager(global)?;
    Ok(match &cmd.namespace {
        Some(namespace) => packager.with_namespace(namespace.clone()),
        None => packager,
    })
}

/// Setup keywords of a single-addon project, as JSON
pub fn handle_prepare(cmd: PrepareCommand, global: &GlobalOpts) -> Result<()> {
    let packager = packager(&cmd, global)?;
    let setup = packager
        .prepare_addon(&cmd.project_dir)
        .context("Cannot prepare addon distribution")?;
    if setup.long_description.is_none() {
        logger::warn(&format!(
            "{} has no README and no manifest description",
            setup.name
        ));
    }
    println!("{}", serde_json::to_string_pretty(&setup)?);
    logger::success(&format!("{} {}", setup.name, setup.version));
    Ok(())
}

/// Setup keywords of a project bundling several addons, as JSON
pub fn handle_prepare_all(cmd: PrepareCommand, global: &GlobalOpts) -> Result<()> {
    let packager = packager(&cmd, global)?;
    let setup = packager
        .prepare_addons(&cmd.project_dir)
        .context("Cannot prepare addons distribution")?;
    println!("{}", serde_json::to_string_pretty(&setup)?);
    logger::success(&format!(
        "{} requirements for {}",
        setup.install_requires.len(),
        packager.addons_dir(&cmd.project_dir).display()
    ));
    Ok(())
}
