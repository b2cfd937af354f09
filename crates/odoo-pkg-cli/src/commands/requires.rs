use anyhow::{Context, Result};
use clap::Args;
use odoo_pkg_logger as logger;
use std::path::PathBuf;

use super::load_packager;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct RequiresCommand {
    /// Addon directory (holding __odoo__.py, __openerp__.py or __terp__.py)
    pub addon_dir: PathBuf,
    /// Print a JSON array instead of one requirement per line
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RequiresDirCommand {
    /// Directory holding addon directories
    pub addons_dir: PathBuf,
    /// Print a JSON array instead of one requirement per line
    #[arg(long)]
    pub json: bool,
}

pub fn handle_requires(cmd: RequiresCommand, global: &GlobalOpts) -> Result<()> {
    let packager = load_packager(global)?;
    let requires = packager
        .addon_requires(&cmd.addon_dir)
        .with_context(|| format!("Cannot resolve requirements of {}", cmd.addon_dir.display()))?;
    logger::debug(&format!(
        "{} requirements for {}",
        requires.len(),
        cmd.addon_dir.display()
    ));
    print_requires(&requires, cmd.json)
}

pub fn handle_requires_dir(cmd: RequiresDirCommand, global: &GlobalOpts) -> Result<()> {
    let packager = load_packager(global)?;
    logger::spinner_start(&format!("Scanning {}", cmd.addons_dir.display()));
    let requires = match packager.addons_requires(&cmd.addons_dir) {
        Ok(requires) => {
            logger::spinner_success(&format!(
                "{} requirements from {}",
                requires.len(),
                cmd.addons_dir.display()
            ));
            requires
        }
        Err(e) => {
            logger::spinner_error(&format!("Scan of {} failed", cmd.addons_dir.display()));
            return Err(e).with_context(|| {
                format!("Cannot resolve requirements of {}", cmd.addons_dir.display())
            });
        }
    };
    print_requires(&requires, cmd.json)
}

fn print_requires(requires: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(requires)?);
    } else {
        for requirement in requires {
            println!("{}", requirement);
        }
    }
    Ok(())
}
