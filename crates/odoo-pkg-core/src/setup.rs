//! Setup keywords for packaging addons
//!
//! A packaging project holds its addons in a namespace directory
//! (`odoo_addons/` by default). With one addon in it, the project is the
//! distribution of that addon; with several, it bundles them and only the
//! combined requirements are produced.

use odoo_pkg_config::{Config, DEFAULT_ADDONS_NAMESPACE, DEFAULT_README_FILE};
use odoo_pkg_manifest::{is_installable, read_manifest, Manifest};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::ResolveError;
use crate::registry::Registry;
use crate::requires::{
    addon_package_name, addons_install_requires, install_requires, list_dir,
};
use crate::version::resolve_version;

/// Keywords that do not depend on the addons themselves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagingFlags {
    pub include_package_data: bool,
    pub namespace_packages: Vec<String>,
    pub zip_safe: bool,
}

impl PackagingFlags {
    pub fn for_namespace(namespace: &str) -> Self {
        PackagingFlags {
            include_package_data: true,
            namespace_packages: vec![namespace.to_string()],
            zip_safe: false,
        }
    }
}

/// Full metadata of a single-addon distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonSetup {
    pub name: String,
    pub version: String,
    pub description: String,
    pub long_description: Option<String>,
    pub url: Option<String>,
    pub license: Option<String>,
    pub install_requires: Vec<String>,
    #[serde(flatten)]
    pub flags: PackagingFlags,
}

/// Metadata of a distribution bundling several addons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonsSetup {
    pub install_requires: Vec<String>,
    #[serde(flatten)]
    pub flags: PackagingFlags,
}

/// Prepares setup keywords for a packaging project
#[derive(Debug, Clone)]
pub struct AddonPackager {
    registry: Registry,
    namespace: String,
    readme_file: String,
}

impl Default for AddonPackager {
    fn default() -> Self {
        AddonPackager::new(Registry::builtin().clone())
    }
}

impl AddonPackager {
    pub fn new(registry: Registry) -> Self {
        AddonPackager {
            registry,
            namespace: DEFAULT_ADDONS_NAMESPACE.to_string(),
            readme_file: DEFAULT_README_FILE.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ResolveError> {
        Ok(AddonPackager {
            registry: Registry::with_config(config)?,
            namespace: config.addons_namespace().to_string(),
            readme_file: config.readme_file().to_string(),
        })
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Namespace directory inside `project_dir`
    pub fn addons_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.namespace)
    }

    /// Requirements of a single addon, resolved outside any batch
    pub fn addon_requires(&self, addon_dir: &Path) -> Result<Vec<String>, ResolveError> {
        crate::requires::addon_install_requires(addon_dir, &self.registry, &BTreeSet::new())
    }

    /// Combined requirements of the installable addons in `addons_dir`
    pub fn addons_requires(&self, addons_dir: &Path) -> Result<Vec<String>, ResolveError> {
        addons_install_requires(addons_dir, &self.registry)
    }

    /// Setup keywords for a project whose namespace directory holds exactly one addon
    pub fn prepare_addon(&self, project_dir: &Path) -> Result<AddonSetup, ResolveError> {
        let addons_dir = self.addons_dir(project_dir);
        let addon_dirs: Vec<_> = list_dir(&addons_dir)?
            .into_iter()
            .filter(|entry| entry.path.is_dir())
            .collect();

        let [addon] = addon_dirs.as_slice() else {
            return Err(ResolveError::NotExactlyOneAddon {
                dir: addons_dir,
                found: addon_dirs.len(),
            });
        };
        if !is_installable(&addon.path) {
            return Err(ResolveError::NotInstallable {
                addon_dir: addon.path.clone(),
            });
        }

        let manifest = read_manifest(&addon.path)?;
        let resolved = resolve_version(&manifest, &self.registry)?;
        let install_requires =
            install_requires(&self.registry, resolved.profile, &manifest, &BTreeSet::new())?;

        let setup = AddonSetup {
            name: addon_package_name(&addon.name),
            version: resolved.version,
            description: description(&manifest),
            long_description: self.long_description(&addon.path, &manifest)?,
            url: manifest.get_str("website").map(str::to_string),
            license: manifest.get_str("license").map(str::to_string),
            install_requires,
            flags: PackagingFlags::for_namespace(&self.namespace),
        };
        info!("Prepared {} {}", setup.name, setup.version);
        Ok(setup)
    }

    /// Setup keywords for a project bundling every addon of its namespace directory
    pub fn prepare_addons(&self, project_dir: &Path) -> Result<AddonsSetup, ResolveError> {
        let addons_dir = self.addons_dir(project_dir);
        Ok(AddonsSetup {
            install_requires: addons_install_requires(&addons_dir, &self.registry)?,
            flags: PackagingFlags::for_namespace(&self.namespace),
        })
    }

    fn long_description(
        &self,
        addon_dir: &Path,
        manifest: &Manifest,
    ) -> Result<Option<String>, ResolveError> {
        let readme = addon_dir.join(&self.readme_file);
        if readme.exists() {
            debug!("Long description from {}", readme.display());
            return fs::read_to_string(&readme)
                .map(Some)
                .map_err(|source| ResolveError::Io {
                    path: readme,
                    source,
                });
        }
        Ok(manifest.get_str("description").map(str::to_string))
    }
}

/// Trimmed summary, or the trimmed addon name when there is no summary
fn description(manifest: &Manifest) -> String {
    let summary = manifest.get_str("summary").unwrap_or_default().trim();
    if summary.is_empty() {
        manifest.get_str("name").unwrap_or_default().trim().to_string()
    } else {
        summary.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_addon(project: &Path, name: &str, manifest: &str) -> std::io::Result<PathBuf> {
        let dir = project.join("odoo_addons").join(name);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("__openerp__.py"), manifest)?;
        Ok(dir)
    }

    const LOT_MANIFEST: &str = r#"{
    'name': 'Sale Lot',
    'summary': '  Lot on sale order lines  ',
    'version': '8.0.1.0.0',
    'website': 'https://github.com/OCA/sale-workflow',
    'license': 'AGPL-3',
    'description': 'From the manifest',
    'depends': ['sale', 'stock', 'base'],
    'external_dependencies': {'python': ['PIL']},
}"#;

    #[test]
    fn test_prepare_addon() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        write_addon(project.path(), "sale_lot", LOT_MANIFEST)?;

        let setup = AddonPackager::default().prepare_addon(project.path())?;
        assert_eq!(setup.name, "odoo-addon-sale_lot");
        assert_eq!(setup.version, "8.0.1.0.0");
        assert_eq!(setup.description, "Lot on sale order lines");
        assert_eq!(setup.long_description.as_deref(), Some("From the manifest"));
        assert_eq!(setup.url.as_deref(), Some("https://github.com/OCA/sale-workflow"));
        assert_eq!(setup.license.as_deref(), Some("AGPL-3"));
        assert_eq!(
            setup.install_requires,
            vec![
                "Pillow",
                "odoo-addon-sale>=8.0a,<9.0a",
                "odoo-addon-stock>=8.0a,<9.0a",
                "odoo>=8.0a,<9.0a",
            ]
        );
        assert_eq!(setup.flags, PackagingFlags::for_namespace("odoo_addons"));
        Ok(())
    }

    #[test]
    fn test_readme_is_long_description() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        let dir = write_addon(project.path(), "sale_lot", LOT_MANIFEST)?;
        fs::write(dir.join("README.rst"), "Sale Lot\n========\n")?;

        let setup = AddonPackager::default().prepare_addon(project.path())?;
        assert_eq!(setup.long_description.as_deref(), Some("Sale Lot\n========\n"));
        Ok(())
    }

    #[test]
    fn test_description_falls_back_to_name() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        write_addon(
            project.path(),
            "lot",
            "{'name': ' Lot ', 'summary': '  ', 'version': '9.0.1.0.0'}",
        )?;

        let setup = AddonPackager::default().prepare_addon(project.path())?;
        assert_eq!(setup.description, "Lot");
        assert_eq!(setup.long_description, None);
        assert_eq!(setup.url, None);
        assert_eq!(setup.install_requires, vec!["odoo>=9.0a,<9.1a"]);
        Ok(())
    }

    #[test]
    fn test_prepare_addon_requires_exactly_one() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        fs::create_dir_all(project.path().join("odoo_addons"))?;
        let packager = AddonPackager::default();
        assert!(matches!(
            packager.prepare_addon(project.path()),
            Err(ResolveError::NotExactlyOneAddon { found: 0, .. })
        ));

        write_addon(project.path(), "a", "{'version': '8.0.1.0.0'}")?;
        write_addon(project.path(), "b", "{'version': '8.0.1.0.0'}")?;
        assert!(matches!(
            packager.prepare_addon(project.path()),
            Err(ResolveError::NotExactlyOneAddon { found: 2, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_prepare_addon_ignores_files() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        write_addon(project.path(), "lot", "{'version': '8.0.1.0.0'}")?;
        fs::write(project.path().join("odoo_addons").join("__init__.py"), "")?;

        let setup = AddonPackager::default().prepare_addon(project.path())?;
        assert_eq!(setup.name, "odoo-addon-lot");
        Ok(())
    }

    #[test]
    fn test_prepare_addon_not_installable() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        write_addon(
            project.path(),
            "lot",
            "{'version': '8.0.1.0.0', 'installable': False}",
        )?;
        assert!(matches!(
            AddonPackager::default().prepare_addon(project.path()),
            Err(ResolveError::NotInstallable { .. })
        ));

        let project = TempDir::new()?;
        fs::create_dir_all(project.path().join("odoo_addons").join("docs"))?;
        assert!(matches!(
            AddonPackager::default().prepare_addon(project.path()),
            Err(ResolveError::NotInstallable { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_prepare_addons() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        write_addon(
            project.path(),
            "sale_lot",
            "{'version': '8.0.1.0.0', 'depends': ['sale', 'stock_lot']}",
        )?;
        write_addon(project.path(), "stock_lot", "{'version': '8.0.1.0.0', 'depends': ['stock']}")?;

        let setup = AddonPackager::default().prepare_addons(project.path())?;
        assert_eq!(
            setup.install_requires,
            vec![
                "odoo-addon-sale>=8.0a,<9.0a",
                "odoo-addon-stock>=8.0a,<9.0a",
                "odoo>=8.0a,<9.0a",
            ]
        );

        let json = serde_json::to_value(&setup)?;
        assert_eq!(json["zip_safe"], serde_json::json!(false));
        assert_eq!(json["namespace_packages"], serde_json::json!(["odoo_addons"]));
        Ok(())
    }

    #[test]
    fn test_custom_namespace_from_config() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        let dir = project.path().join("addons").join("lot");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("__odoo__.py"), "{'version': '10.0.1.0.0'}")?;

        let config: Config = toml_config(
            r#"
addons_namespace = "addons"
[series."10.0"]
core_dependency = "odoo>=10.0,<10.1dev"
addon_dependency_range = ">=10.0,<10.1dev"
"#,
        )?;
        let packager = AddonPackager::from_config(&config)?;
        let setup = packager.prepare_addon(project.path())?;
        assert_eq!(setup.install_requires, vec!["odoo>=10.0,<10.1dev"]);
        assert_eq!(setup.flags.namespace_packages, vec!["addons"]);
        Ok(())
    }

    fn toml_config(content: &str) -> Result<Config, Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("odoo-pkg.toml");
        fs::write(&path, content)?;
        Ok(Config::load_from_path(&path)?)
    }
}
