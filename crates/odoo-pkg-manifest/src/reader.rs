//! Locating and reading addon manifests on disk

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::ManifestError;
use crate::literal::LiteralError;
use crate::manifest::Manifest;

/// Manifest file names, in lookup order (current first, then legacy ones)
pub const MANIFEST_NAMES: [&str; 3] = ["__odoo__.py", "__openerp__.py", "__terp__.py"];

/// First manifest file present in `addon_dir`
pub fn find_manifest_path(addon_dir: &Path) -> Option<PathBuf> {
    MANIFEST_NAMES
        .iter()
        .map(|name| addon_dir.join(name))
        .find(|path| path.is_file())
}

/// Read and parse the manifest of the addon in `addon_dir`
pub fn read_manifest(addon_dir: &Path) -> Result<Manifest, ManifestError> {
    let path = find_manifest_path(addon_dir)
        .ok_or_else(|| ManifestError::NotFound(addon_dir.to_path_buf()))?;
    debug!("Reading manifest {}", path.display());

    let bytes = fs::read(&path).map_err(|source| ManifestError::Io {
        path: path.clone(),
        source,
    })?;
    let source = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        ManifestError::Parse {
            path: path.clone(),
            source: LiteralError {
                line: valid.iter().filter(|b| **b == b'\n').count() + 1,
                message: "manifest is not valid UTF-8".to_string(),
            },
        }
    })?;
    Manifest::parse(&source, &path)
}

/// Whether `addon_dir` holds an installable addon.
///
/// Any failure to read the manifest counts as "not installable"; this is
/// meant for scanning directories where non-addon entries are expected.
pub fn is_installable(addon_dir: &Path) -> bool {
    match read_manifest(addon_dir) {
        Ok(manifest) => manifest.installable(),
        Err(e) => {
            debug!("{} is not an addon: {}", addon_dir.display(), e);
            false
        }
    }
}
