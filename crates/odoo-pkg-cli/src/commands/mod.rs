//! Command handlers

pub mod check;
pub mod manifest;
pub mod prepare;
pub mod requires;
pub mod series;

use anyhow::{Context, Result};
use odoo_pkg_config::Config;
use odoo_pkg_core::AddonPackager;
use odoo_pkg_logger as logger;

use crate::GlobalOpts;

/// Packager configured from the config file selected by the global options
pub(crate) fn load_packager(global: &GlobalOpts) -> Result<AddonPackager> {
    if let Ok(path) = Config::path(global.config.as_deref()) {
        logger::info(&format!("Configuration file: {}", path.display()));
    }
    let config = Config::load(global.config.as_deref()).context("Failed to load configuration")?;
    logger::step(&format!(
        "Using addons namespace '{}'",
        config.addons_namespace()
    ));
    AddonPackager::from_config(&config).context("Invalid configuration")
}
