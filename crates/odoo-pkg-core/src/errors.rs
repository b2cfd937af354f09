use odoo_pkg_manifest::ManifestError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort dependency resolution or setup preparation
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("No version in manifest {}", .manifest.display())]
    MissingVersion { manifest: PathBuf },

    #[error(
        "Version '{version}' in manifest {} must have at least 5 components \
         and start with the Odoo series number",
        .manifest.display()
    )]
    InvalidVersionFormat { manifest: PathBuf, version: String },

    #[error("Unsupported Odoo series '{series}' in manifest {}", .manifest.display())]
    UnsupportedFrameworkVersion { manifest: PathBuf, series: String },

    #[error("Invalid '{field}' in manifest {}: {reason}", .manifest.display())]
    InvalidManifestField {
        manifest: PathBuf,
        field: &'static str,
        reason: String,
    },

    #[error("{} must contain exactly one Odoo addon directory, found {found}", .dir.display())]
    NotExactlyOneAddon { dir: PathBuf, found: usize },

    #[error("{} is not an installable Odoo addon", .addon_dir.display())]
    NotInstallable { addon_dir: PathBuf },

    #[error("Invalid configuration for series '{series}': {reason}")]
    InvalidSeriesConfig { series: String, reason: String },

    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to list {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
