//! Dependency resolution for packaging Odoo addons as Python distributions
//!
//! The pipeline runs once per addon directory:
//!
//! 1. read the manifest ([`odoo_pkg_manifest::read_manifest`]);
//! 2. validate its version and find the profile of its Odoo series
//!    ([`resolve_version`]);
//! 3. turn `depends` and `external_dependencies` into sorted requirement
//!    specifiers ([`install_requires`]).
//!
//! [`addons_install_requires`] aggregates a whole directory of addons and
//! [`AddonPackager`] produces the setup keywords handed to the packaging tool.

pub mod errors;
pub mod registry;
pub mod requires;
pub mod setup;
mod tables;
pub mod version;

pub use errors::ResolveError;
pub use registry::{Registry, SeriesProfile};
pub use requires::{
    addon_install_requires, addon_package_name, addons_install_requires, install_requires,
    ADDON_PKG_NAME_PREFIX,
};
pub use setup::{AddonPackager, AddonSetup, AddonsSetup, PackagingFlags};
pub use version::{resolve_version, ResolvedVersion, MIN_VERSION_COMPONENTS};
