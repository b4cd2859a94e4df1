// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Parsing and validation of `gnigen.toml`.
//!
//! The manifest names the workspace, how to query it, and which generated
//! `.gni` files to produce from which build rules.

mod error;
mod manifest;

pub use error::{Error, Result};
pub use manifest::{
    GniExportDesc, GniFileListExportDesc, GnigenToml, Manifest, ParseContext, QueryConfig,
};
