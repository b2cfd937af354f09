use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::literal::LiteralError;

/// Errors raised while locating or reading an addon manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("no Odoo manifest found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: LiteralError,
    },

    #[error("manifest {} must hold a dictionary, found {found}", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },
}

impl ManifestError {
    /// Whether the manifest exists but its content is not a literal dictionary
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ManifestError::Parse { .. } | ManifestError::NotAMapping { .. })
    }
}
