//! Odoo addon manifests
//!
//! An addon declares its metadata in a manifest file (`__odoo__.py`, or the
//! legacy `__openerp__.py` / `__terp__.py`) holding a single Python dict
//! literal. This crate locates that file and parses it with a strict literal
//! parser: the manifest is read as data and never executed.

pub mod errors;
pub mod literal;
pub mod manifest;
pub mod reader;
pub mod value;

pub use errors::ManifestError;
pub use literal::{parse_literal, LiteralError};
pub use manifest::Manifest;
pub use reader::{find_manifest_path, is_installable, read_manifest, MANIFEST_NAMES};
pub use value::Value;
