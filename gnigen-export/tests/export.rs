//! End-to-end export and check against a real directory.

use std::{fs, path::Path};

use gnigen_core::{FileQuery, OsFileSystem};
use gnigen_export::{Error, ExporterParams, GniExportDesc, GniExporter};
use tempfile::TempDir;

const CORE_QUERY: &str = r#"{
  "target": [
    {
      "type": "RULE",
      "rule": {
        "name": "//src/core:core_srcs",
        "ruleClass": "filegroup",
        "location": "/path/to/workspace/src/core/BUILD.bazel:376:20",
        "attribute": [
          {
            "name": "srcs",
            "type": "LABEL_LIST",
            "stringListValue": [
              "//src/core:SkAAClip.cpp",
              "//src/core:SkATrace.cpp",
              "//src/core:SkAlphaRuns.cpp"
            ]
          },
          { "name": "visibility", "type": "STRING_LIST", "stringListValue": ["//visibility:public"] }
        ]
      }
    },
    {
      "type": "RULE",
      "rule": {
        "name": "//src/opts:private_hdrs",
        "ruleClass": "filegroup",
        "location": "/path/to/workspace/src/opts/BUILD.bazel:26:10",
        "attribute": [
          {
            "name": "srcs",
            "type": "LABEL_LIST",
            "stringListValue": [
              "//src/opts:SkBitmapProcState_opts.h",
              "//src/opts:SkBlitMask_opts.h",
              "//src/opts:SkBlitRow_opts.h"
            ]
          }
        ]
      }
    },
    { "type": "SOURCE_FILE" }
  ]
}"#;

fn core_descs() -> Vec<GniExportDesc> {
    vec![
        GniExportDesc::new("gn/core.gni")
            .var(
                "skia_core_sources",
                ["//src/core:core_srcs", "//src/opts:private_hdrs"],
            )
            .footer_line("skia_core_sources += skia_pathops_sources")
            .footer_line("skia_core_sources += skia_skpicture_sources")
            .footer_line("")
            .footer_line("skia_core_public += skia_pathops_public")
            .footer_line("skia_core_public += skia_skpicture_public"),
    ]
}

fn setup() -> (TempDir, FileQuery, GniExporter<OsFileSystem>) {
    let dir = TempDir::new().unwrap();
    let query_path = dir.path().join("query.json");
    fs::write(&query_path, CORE_QUERY).unwrap();

    let exporter = GniExporter::new(
        ExporterParams::new(dir.path(), core_descs()),
        OsFileSystem::new(),
    );
    (dir, FileQuery::new(query_path), exporter)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_export_writes_core_gni() {
    let (dir, query, exporter) = setup();

    let files = exporter.export(&query).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, dir.path().join("gn/core.gni"));
    assert!(!files[0].variables[0].headers_only);
    insta::assert_snapshot!(read(&files[0].path), @r#"
    # DO NOT EDIT: This is a generated file.
    # See //bazel/exporter_tool/README.md for more information.

    _src = get_path_info("../src", "abspath")

    skia_core_sources = [
      "$_src/core/SkAAClip.cpp",
      "$_src/core/SkATrace.cpp",
      "$_src/core/SkAlphaRuns.cpp",
      "$_src/opts/SkBitmapProcState_opts.h",
      "$_src/opts/SkBlitMask_opts.h",
      "$_src/opts/SkBlitRow_opts.h",
    ]

    skia_core_sources += skia_pathops_sources
    skia_core_sources += skia_skpicture_sources

    skia_core_public += skia_pathops_public
    skia_core_public += skia_skpicture_public
    "#);
}

#[test]
fn test_check_after_export_is_current() {
    let (_dir, query, exporter) = setup();
    exporter.export(&query).unwrap();

    let mut report: Vec<u8> = Vec::new();
    let count = exporter.check_current(&query, &mut report).unwrap();

    assert_eq!(count, 0);
    assert!(report.is_empty());
}

#[test]
fn test_check_ignores_comments_and_footer_changes() {
    let (dir, query, exporter) = setup();
    let path = dir.path().join("gn/core.gni");
    exporter.export(&query).unwrap();

    let edited = read(&path)
        .replace("# See //bazel/exporter_tool/README.md", "# Edited by hand")
        .replace("skia_skpicture_public", "skia_other_public");
    fs::write(&path, edited).unwrap();

    let mut report: Vec<u8> = Vec::new();
    assert_eq!(exporter.check_current(&query, &mut report).unwrap(), 0);
}

#[test]
fn test_check_reports_stale_entry() {
    let (dir, query, exporter) = setup();
    let path = dir.path().join("gn/core.gni");
    exporter.export(&query).unwrap();

    let edited = read(&path).replace("SkATrace.cpp", "SkATraceOld.cpp");
    fs::write(&path, &edited).unwrap();

    let mut report: Vec<u8> = Vec::new();
    let count = exporter.check_current(&query, &mut report).unwrap();
    let report = String::from_utf8(report).unwrap();

    assert_eq!(count, 1);
    assert_eq!(
        report,
        "gn/core.gni: 'skia_core_sources' is out of date\n  \
         - \"$_src/core/SkATraceOld.cpp\",\n  \
         + \"$_src/core/SkATrace.cpp\",\n"
    );
    // Checking never rewrites the file.
    assert_eq!(read(&path), edited);
}

#[test]
fn test_check_without_existing_file_fails() {
    let (_dir, query, exporter) = setup();

    let mut report: Vec<u8> = Vec::new();
    let err = exporter.check_current(&query, &mut report).unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_export_missing_query_file_fails() {
    let (dir, _query, exporter) = setup();
    let query = FileQuery::new(dir.path().join("missing.json"));

    let err = exporter.export(&query).unwrap_err();

    assert!(matches!(err, Error::Query(_)));
    assert!(!dir.path().join("gn").exists());
}
