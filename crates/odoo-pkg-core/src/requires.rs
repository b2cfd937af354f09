//! Python requirements of addons
//!
//! Each addon needs the Odoo distribution of its series, one
//! `odoo-addon-<name>` requirement per non-base addon in `depends`, and the
//! Python distributions listed in `external_dependencies`.

use odoo_pkg_manifest::{is_installable, read_manifest, Manifest, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::errors::ResolveError;
use crate::registry::{Registry, SeriesProfile};
use crate::version::resolve_version;

/// Prefix turning an addon name into its Python distribution name
pub const ADDON_PKG_NAME_PREFIX: &str = "odoo-addon-";

/// Python distribution name of an addon
pub fn addon_package_name(addon_name: &str) -> String {
    format!("{}{}", ADDON_PKG_NAME_PREFIX, addon_name)
}

/// Strings of a list/tuple/set manifest entry; absent or `None` reads as empty
fn string_items<'m>(
    manifest: &Manifest,
    field: &'static str,
    value: Option<&'m Value>,
) -> Result<Vec<&'m str>, ResolveError> {
    let invalid = |reason: String| ResolveError::InvalidManifestField {
        manifest: manifest.path().to_path_buf(),
        field,
        reason,
    };
    let items = match value {
        None | Some(Value::None) => return Ok(Vec::new()),
        Some(value) => value
            .as_sequence()
            .ok_or_else(|| invalid(format!("expected a list, found {}", value.type_name())))?,
    };
    items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| invalid(format!("expected strings, found {}", item)))
        })
        .collect()
}

fn python_dependencies(manifest: &Manifest) -> Result<Vec<&str>, ResolveError> {
    let python = match manifest.get("external_dependencies") {
        None | Some(Value::None) => None,
        Some(deps @ Value::Dict(_)) => deps.get("python"),
        Some(other) => {
            return Err(ResolveError::InvalidManifestField {
                manifest: manifest.path().to_path_buf(),
                field: "external_dependencies",
                reason: format!("expected a dict, found {}", other.type_name()),
            })
        }
    };
    string_items(manifest, "external_dependencies", python)
}

/// Sorted, duplicate-free requirements of one addon.
///
/// Addons named in `exclude` produce no requirement; directory scans pass
/// the names of the addons packaged together.
pub fn install_requires(
    registry: &Registry,
    profile: &SeriesProfile,
    manifest: &Manifest,
    exclude: &BTreeSet<String>,
) -> Result<Vec<String>, ResolveError> {
    let mut requires = BTreeSet::new();
    requires.insert(profile.core_dependency.clone());

    for depend in string_items(manifest, "depends", manifest.get("depends"))? {
        if profile.is_base_addon(depend) {
            continue;
        }
        if exclude.contains(depend) {
            debug!("Skipping {}: packaged alongside", depend);
            continue;
        }
        requires.insert(format!(
            "{}{}",
            addon_package_name(depend),
            profile.addon_dependency_range
        ));
    }

    for dependency in python_dependencies(manifest)? {
        requires.insert(registry.external_dependency(dependency).to_string());
    }

    Ok(requires.into_iter().collect())
}

/// Requirements of the addon in `addon_dir`
pub fn addon_install_requires(
    addon_dir: &Path,
    registry: &Registry,
    exclude: &BTreeSet<String>,
) -> Result<Vec<String>, ResolveError> {
    let manifest = read_manifest(addon_dir)?;
    let resolved = resolve_version(&manifest, registry)?;
    debug!(
        "{}: version {} (Odoo {})",
        addon_dir.display(),
        resolved.version,
        resolved.series
    );
    install_requires(registry, resolved.profile, &manifest, exclude)
}

/// An immediate child of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
}

/// Immediate children of `dir`, sorted by name
pub(crate) fn list_dir(dir: &Path) -> Result<Vec<DirEntryInfo>, ResolveError> {
    // A missing path surfaces as a walk error below
    if dir.exists() && !dir.is_dir() {
        return Err(ResolveError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ResolveError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        entries.push(DirEntryInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().to_path_buf(),
        });
    }
    Ok(entries)
}

/// Union of the requirements of every installable addon in `addons_dir`.
///
/// Entries that are not installable addons are skipped. Requirements on
/// addons found in the same directory are left out.
pub fn addons_install_requires(
    addons_dir: &Path,
    registry: &Registry,
) -> Result<Vec<String>, ResolveError> {
    let entries = list_dir(addons_dir)?;
    let siblings: BTreeSet<String> = entries.iter().map(|e| e.name.clone()).collect();

    let mut requires = BTreeSet::new();
    let mut addons = 0;
    for entry in entries.iter().filter(|e| is_installable(&e.path)) {
        requires.extend(addon_install_requires(&entry.path, registry, &siblings)?);
        addons += 1;
    }

    info!(
        "Resolved {} requirements for {} addons in {}",
        requires.len(),
        addons,
        addons_dir.display()
    );
    Ok(requires.into_iter().collect())
}
