use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::collections::BTreeMap;

use super::load_packager;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct SeriesCommand {
    /// Print the registry as JSON, base addons included
    #[arg(long)]
    pub json: bool,
}

/// List the Odoo series odoo-pkg can resolve
pub fn handle_series(cmd: SeriesCommand, global: &GlobalOpts) -> Result<()> {
    let packager = load_packager(global)?;
    let registry = packager.registry();

    if cmd.json {
        let series: BTreeMap<_, _> = registry.series().collect();
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    for (series, profile) in registry.series() {
        println!(
            "{}  {}  addons {}  ({} base addons)",
            series.bold(),
            profile.core_dependency,
            profile.addon_dependency_range,
            profile.base_addons.len()
        );
    }
    Ok(())
}
