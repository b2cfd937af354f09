//! Odoo series profiles and the external dependency name map
//!
//! The built-in registry is a process-wide constant. A config file produces
//! a separate owned registry; the built-in one is never modified.

use once_cell::sync::Lazy;
use odoo_pkg_config::{Config, SeriesConfig};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::errors::ResolveError;
use crate::tables;

/// How addons of one Odoo series map onto Python requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesProfile {
    /// Requirement on the Odoo distribution itself
    pub core_dependency: String,
    /// Version range appended to every addon requirement
    pub addon_dependency_range: String,
    /// Addons shipped with Odoo, which need no requirement
    pub base_addons: BTreeSet<String>,
}

impl SeriesProfile {
    pub fn is_base_addon(&self, name: &str) -> bool {
        self.base_addons.contains(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    series: BTreeMap<String, SeriesProfile>,
    external_dependencies: BTreeMap<String, String>,
}

static BUILTIN: Lazy<Registry> = Lazy::new(|| {
    let series = tables::SERIES
        .iter()
        .map(|(series, core, range)| {
            let profile = SeriesProfile {
                core_dependency: (*core).to_string(),
                addon_dependency_range: (*range).to_string(),
                base_addons: tables::base_addons(series)
                    .iter()
                    .map(|name| (*name).to_string())
                    .collect(),
            };
            ((*series).to_string(), profile)
        })
        .collect();
    let external_dependencies = tables::EXTERNAL_DEPENDENCIES
        .iter()
        .map(|(alias, dist)| ((*alias).to_string(), (*dist).to_string()))
        .collect();
    Registry {
        series,
        external_dependencies,
    }
});

impl Registry {
    /// The registry compiled into odoo-pkg
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Built-in registry extended with the `series` and `external_dependencies` config tables
    pub fn with_config(config: &Config) -> Result<Registry, ResolveError> {
        let mut registry = Registry::builtin().clone();
        for (series, overrides) in &config.series {
            registry.apply_series_config(series, overrides)?;
        }
        for (alias, dist) in &config.external_dependencies {
            debug!("External dependency override: {} -> {}", alias, dist);
            registry
                .external_dependencies
                .insert(alias.clone(), dist.clone());
        }
        Ok(registry)
    }

    fn apply_series_config(
        &mut self,
        series: &str,
        overrides: &SeriesConfig,
    ) -> Result<(), ResolveError> {
        if !is_series_key(series) {
            return Err(ResolveError::InvalidSeriesConfig {
                series: series.to_string(),
                reason: "series must look like '<major>.<minor>'".to_string(),
            });
        }

        let mut profile = match self.series.remove(series) {
            Some(mut known) => {
                if let Some(core) = &overrides.core_dependency {
                    known.core_dependency.clone_from(core);
                }
                if let Some(range) = &overrides.addon_dependency_range {
                    known.addon_dependency_range.clone_from(range);
                }
                if let Some(base) = &overrides.base_addons {
                    known.base_addons = base.iter().cloned().collect();
                }
                known
            }
            None => {
                let missing = |field: &str| ResolveError::InvalidSeriesConfig {
                    series: series.to_string(),
                    reason: format!("new series requires '{}'", field),
                };
                SeriesProfile {
                    core_dependency: overrides
                        .core_dependency
                        .clone()
                        .ok_or_else(|| missing("core_dependency"))?,
                    addon_dependency_range: overrides
                        .addon_dependency_range
                        .clone()
                        .ok_or_else(|| missing("addon_dependency_range"))?,
                    base_addons: overrides
                        .base_addons
                        .clone()
                        .unwrap_or_default()
                        .into_iter()
                        .collect(),
                }
            }
        };

        profile
            .base_addons
            .extend(overrides.extra_base_addons.iter().cloned());
        debug!(
            "Series {}: {} ({} base addons)",
            series,
            profile.core_dependency,
            profile.base_addons.len()
        );
        self.series.insert(series.to_string(), profile);
        Ok(())
    }

    /// Profile registered for a two-component series such as "8.0"
    pub fn profile(&self, series: &str) -> Option<&SeriesProfile> {
        self.series.get(series)
    }

    /// Registered series in ascending key order
    pub fn series(&self) -> impl Iterator<Item = (&str, &SeriesProfile)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Installable name for a Python module declared in `external_dependencies`
    pub fn external_dependency<'a>(&'a self, name: &'a str) -> &'a str {
        self.external_dependencies
            .get(name)
            .map_or(name, String::as_str)
    }
}

fn is_series_key(series: &str) -> bool {
    let mut parts = series.split('.');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(major), Some(minor), None)
            if !major.is_empty() && !minor.is_empty()
    )
}
