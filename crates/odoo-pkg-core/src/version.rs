//! Addon version validation and series lookup
//!
//! Addon versions embed the Odoo series they target: `8.0.1.0.0` is version
//! `1.0.0` of an addon for Odoo 8.0.

use odoo_pkg_manifest::{Manifest, Value};

use crate::errors::ResolveError;
use crate::registry::{Registry, SeriesProfile};

/// Minimum number of dot-separated components in an addon version
pub const MIN_VERSION_COMPONENTS: usize = 5;

/// A validated addon version and the profile of its series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion<'r> {
    /// Manifest version, used verbatim as the package version
    pub version: String,
    /// Leading two components, e.g. "8.0"
    pub series: String,
    pub profile: &'r SeriesProfile,
}

pub fn resolve_version<'r>(
    manifest: &Manifest,
    registry: &'r Registry,
) -> Result<ResolvedVersion<'r>, ResolveError> {
    let version = match manifest.get("version") {
        None => None,
        Some(value) if !value.is_truthy() => None,
        Some(Value::Str(version)) => Some(version.as_str()),
        Some(other) => {
            return Err(ResolveError::InvalidVersionFormat {
                manifest: manifest.path().to_path_buf(),
                version: other.to_string(),
            })
        }
    };
    let Some(version) = version else {
        return Err(ResolveError::MissingVersion {
            manifest: manifest.path().to_path_buf(),
        });
    };

    let components: Vec<&str> = version.split('.').collect();
    if components.len() < MIN_VERSION_COMPONENTS {
        return Err(ResolveError::InvalidVersionFormat {
            manifest: manifest.path().to_path_buf(),
            version: version.to_string(),
        });
    }

    let series = components[..2].join(".");
    let profile =
        registry
            .profile(&series)
            .ok_or_else(|| ResolveError::UnsupportedFrameworkVersion {
                manifest: manifest.path().to_path_buf(),
                series: series.clone(),
            })?;

    Ok(ResolvedVersion {
        version: version.to_string(),
        series,
        profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use odoo_pkg_manifest::ManifestError;
    use std::path::Path;

    fn manifest(source: &str) -> Result<Manifest, ManifestError> {
        Manifest::parse(source, Path::new("addon/__openerp__.py"))
    }

    #[test]
    fn test_resolve_odoo8_version() -> Result<(), Box<dyn std::error::Error>> {
        let registry = Registry::builtin();
        let resolved = resolve_version(&manifest("{'version': '8.0.1.0.0'}")?, registry)?;
        assert_eq!(resolved.version, "8.0.1.0.0");
        assert_eq!(resolved.series, "8.0");
        assert_eq!(resolved.profile.core_dependency, "odoo>=8.0a,<9.0a");
        assert_eq!(Some(resolved.profile), registry.profile("8.0"));
        Ok(())
    }

    #[test]
    fn test_more_components_allowed() -> Result<(), Box<dyn std::error::Error>> {
        let resolved =
            resolve_version(&manifest("{'version': '9.0.2.1.0.1'}")?, Registry::builtin())?;
        assert_eq!(resolved.series, "9.0");
        assert_eq!(resolved.version, "9.0.2.1.0.1");
        Ok(())
    }

    #[test]
    fn test_missing_version() -> Result<(), ManifestError> {
        for source in ["{'name': 'x'}", "{'version': ''}", "{'version': None}"] {
            let result = resolve_version(&manifest(source)?, Registry::builtin());
            assert!(matches!(result, Err(ResolveError::MissingVersion { .. })));
        }
        Ok(())
    }

    #[test]
    fn test_too_few_components() -> Result<(), ManifestError> {
        let result = resolve_version(&manifest("{'version': '8.0.1.0'}")?, Registry::builtin());
        assert!(matches!(
            result,
            Err(ResolveError::InvalidVersionFormat { ref version, .. }) if version == "8.0.1.0"
        ));
        Ok(())
    }

    #[test]
    fn test_non_string_version() -> Result<(), ManifestError> {
        let result = resolve_version(&manifest("{'version': 8.0}")?, Registry::builtin());
        assert!(matches!(
            result,
            Err(ResolveError::InvalidVersionFormat { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_unsupported_series() -> Result<(), ManifestError> {
        let result = resolve_version(&manifest("{'version': '7.0.1.0.0'}")?, Registry::builtin());
        assert!(matches!(
            result,
            Err(ResolveError::UnsupportedFrameworkVersion { ref series, .. }) if series == "7.0"
        ));
        Ok(())
    }
}
