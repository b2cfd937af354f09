//! odoo-pkg library - command implementations shared by the binary and tests

pub mod commands;
pub mod common;

pub use common::GlobalOpts;
