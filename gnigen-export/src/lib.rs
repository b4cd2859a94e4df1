// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Export of Bazel rule sources as GN `.gni` file lists.
//!
//! A single build-graph query is decoded into a [`QueryResult`]; each
//! [`GniExportDesc`] then names the rules whose sources make up each GN list
//! variable. [`GniExporter`] renders the files and either writes them or
//! reports which variables on disk are out of date.
//!
//! ```
//! use gnigen_core::testing::{MemoryFileSystem, StaticQuery};
//! use gnigen_export::{ExporterParams, GniExportDesc, GniExporter};
//!
//! let query = StaticQuery::new(
//!     r#"{"target":[{"type":"RULE","rule":{"name":"//src/core:core_srcs",
//!        "ruleClass":"filegroup","attribute":[{"name":"srcs",
//!        "stringListValue":["//src/core:SkAAClip.cpp"]}]}}]}"#,
//! );
//! let params = ExporterParams::new(
//!     "/ws",
//!     vec![GniExportDesc::new("gn/core.gni").var("skia_core_sources", ["//src/core:core_srcs"])],
//! );
//!
//! let exporter = GniExporter::new(params, MemoryFileSystem::new());
//! let files = exporter.render(&query).unwrap();
//! assert!(files[0].content.contains("\"$_src/core/SkAAClip.cpp\","));
//! ```

mod check;
mod error;
mod exporter;
mod filter;
mod label;
mod query;
mod render;

// Currency checking
pub use check::{
    VariableStatus, compare_blocks, describe_status, extract_variable_blocks,
    get_gni_line_variable, is_gn_identifier,
};
pub use error::{Error, Result};
// Exporter facade
pub use exporter::{ExporterParams, GniExporter};
// Source list filtering
pub use filter::{
    DEPRECATED_FILES, file_list_contains_only_cpp_header_files, filter_deprecated_files,
    find_duplicate, is_header_file, is_source_file_deprecated,
};
pub use gnigen_manifest::{GniExportDesc, GniFileListExportDesc};
// Label resolution
pub use label::{
    ROOT_DIRS, ROOT_VARIABLE_MARKER, add_gni_variables_to_workspace_paths,
    convert_target_to_file_path, convert_targets_to_file_paths, extract_top_level_folder,
    make_relative_file_path_for_gni, root_of_gni_path, strip_root_variable,
};
// Query decoding
pub use query::{QueryResult, Rule, Target, TargetKind};
// Rendering
pub use render::{
    GENERATED_FILE_BANNER, GniBuilder, RenderedFile, RenderedVariable, render_gni,
    root_prologue_line,
};
