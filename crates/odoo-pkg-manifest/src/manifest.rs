//! The parsed manifest of one addon

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::errors::ManifestError;
use crate::literal::parse_literal;
use crate::value::Value;

/// A manifest dictionary together with the file it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    root: Value,
}

impl Manifest {
    /// Parse manifest source; `path` is only used for error messages
    pub fn parse(source: &str, path: &Path) -> Result<Self, ManifestError> {
        let root = parse_literal(source).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if !matches!(root, Value::Dict(_)) {
            return Err(ManifestError::NotAMapping {
                path: path.to_path_buf(),
                found: root.type_name(),
            });
        }
        Ok(Manifest {
            path: path.to_path_buf(),
            root,
        })
    }

    /// File the manifest was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// String value of `key`, `None` when absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// `installable` flag, true unless the manifest sets a falsy value
    pub fn installable(&self) -> bool {
        self.get("installable").map_or(true, Value::is_truthy)
    }

    /// The whole manifest dictionary
    pub fn value(&self) -> &Value {
        &self.root
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
