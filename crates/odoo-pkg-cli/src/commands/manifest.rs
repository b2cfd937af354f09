use anyhow::{Context, Result};
use clap::Args;
use odoo_pkg_manifest::read_manifest;
use std::path::PathBuf;

use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct ManifestCommand {
    /// Addon directory
    pub addon_dir: PathBuf,
    /// Print the manifest as a Python literal instead of JSON
    #[arg(long)]
    pub repr: bool,
}

pub fn handle_manifest(cmd: ManifestCommand, _global: &GlobalOpts) -> Result<()> {
    let manifest = read_manifest(&cmd.addon_dir)
        .with_context(|| format!("Cannot read manifest of {}", cmd.addon_dir.display()))?;
    if cmd.repr {
        println!("{}", manifest.value());
    } else {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    }
    Ok(())
}
