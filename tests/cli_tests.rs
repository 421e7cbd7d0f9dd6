//! End-to-end tests: build log on disk to rendered report

use buildref::config::Config;
use buildref::log::{InvocationSource, LogError, TextLogReader, VecSource};
use buildref::report::{JsonSink, Report, ReportSink, TextSink, TopLimit};
use buildref::stats;
use std::fs;
use tempfile::TempDir;

const BUILD_LOG: &str = r#"Build started 10/18/2026 09:12:44.
Project "C:\src\All.sln" on node 1 (default targets).
CoreCompile:
  C:\Program Files\dotnet\dotnet.exe exec "C:\sdk\Roslyn\bincore\csc.dll" /noconfig /reference:C:\refs\System.Runtime.dll /reference:C:\refs\Core.dll /out:obj\A.dll A.cs
CoreCompile:
  C:\Program Files\dotnet\dotnet.exe exec "C:\sdk\Roslyn\bincore\csc.dll" /noconfig /reference:C:\refs\System.Runtime.dll /reference:C:\refs\core.dll /reference:C:\refs\Util.dll /out:obj\B.dll B.cs
CoreCompile:
  C:\Program Files\dotnet\dotnet.exe exec "C:\sdk\Roslyn\bincore\csc.dll" /noconfig /reference:"C:\Program Files\refs\System.Runtime.dll" /out:obj\C.dll C.cs
CoreCompile:
  C:\Program Files\dotnet\dotnet.exe exec "C:\sdk\Roslyn\bincore\csc.dll" /noconfig /out:obj\D.dll D.cs
Build succeeded.
"#;

fn write_log(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("build.log");
    fs::write(&path, content).expect("write log");
    path
}

/// Read and aggregate through the source trait
fn analyze_source(source: &dyn InvocationSource) -> stats::Analysis {
    let invocations = source.read_invocations().expect("read invocations");
    stats::analyze(&invocations)
}

fn run(content: &str, top: Option<&str>) -> (Report, String) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let log_path = write_log(&temp_dir, content);

    let config = Config::default();
    let reader = TextLogReader::new(&log_path).expect("reader");
    let invocations = reader.read_invocations().expect("read invocations");
    let analysis = stats::analyze(&invocations);
    let report = Report::build(&analysis, &TopLimit::parse(top), &config);

    let mut sink = TextSink::new(Vec::new(), config.bar_marker, 120);
    sink.render(&report).expect("render");
    let output = String::from_utf8(sink.into_inner()).expect("utf8");
    (report, output)
}

#[test]
fn test_build_log_to_text_report() {
    let (report, output) = run(BUILD_LOG, Some("*"));

    assert_eq!(report.invocations, 4);
    // the quoted System.Runtime.dll has a different path, so it is its own key
    assert_eq!(report.unique_references, 4);
    assert!(output.contains("Number of unique references: 4"));

    let ranked = report.ranked.expect("ranked rows");
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked[0].name, "System.Runtime.dll");
    assert_eq!(ranked[0].count, 2);
    assert_eq!(ranked[1].name, "Core.dll");
    assert_eq!(ranked[1].count, 2);
    assert!(output.contains("Assembly Name"));
}

#[test]
fn test_build_log_without_top_has_no_ranked_table() {
    let (report, output) = run(BUILD_LOG, None);

    assert!(report.ranked.is_none());
    assert!(!output.contains("Assembly Name"));
    assert!(output.contains("# of References"));
}

#[test]
fn test_invalid_top_behaves_like_absent() {
    let (with_invalid, _) = run(BUILD_LOG, Some("lots"));
    let (absent, _) = run(BUILD_LOG, None);

    assert_eq!(with_invalid, absent);
}

#[test]
fn test_log_without_invocations() {
    let (report, output) = run("Build succeeded.\n    0 Warning(s)\n", Some("10"));

    assert_eq!(report.invocations, 0);
    assert_eq!(report.unique_references, 0);
    assert_eq!(report.ranked, Some(Vec::new()));
    assert!(report.distribution.is_empty());
    assert!(output.contains("Number of unique references: 0"));
}

#[test]
fn test_distribution_from_log() {
    let mut log = String::new();
    // 60 assemblies referenced once, 3 referenced by every project
    for project in 0..20 {
        log.push_str("  csc.exe /noconfig");
        for shared in 0..3 {
            log.push_str(&format!(" /reference:C:\\refs\\Shared{shared}.dll"));
        }
        for own in 0..3 {
            log.push_str(&format!(" /reference:C:\\refs\\P{project}_{own}.dll"));
        }
        log.push_str(&format!(" /out:obj\\P{project}.dll\n"));
    }

    let (report, output) = run(&log, None);

    assert_eq!(report.unique_references, 63);
    // max frequency 60 -> factor 2; count 1 -> 30, count 20 -> floor(3 / 2) = 1 (dropped)
    assert_eq!(report.distribution.len(), 1);
    assert_eq!(report.distribution[0].count, 1);
    assert_eq!(report.distribution[0].bar_length, 30);
    assert!(output.contains(&"*".repeat(30)));
    assert!(!output.contains(&"*".repeat(31)));
}

#[test]
fn test_missing_log_is_input_unavailable() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let reader = TextLogReader::new(temp_dir.path().join("nope.log")).expect("reader");

    match reader.read_invocations() {
        Err(LogError::InputUnavailable { path, .. }) => {
            assert!(path.ends_with("nope.log"));
        }
        other => panic!("expected InputUnavailable, got {other:?}"),
    }
}

#[test]
fn test_binary_log_is_rejected() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let log_path = temp_dir.path().join("msbuild.binlog");
    fs::write(&log_path, [0x1f, 0x8b, 0x08, 0x00, 0xde, 0xad]).expect("write binlog");

    let reader = TextLogReader::new(&log_path).expect("reader");
    match reader.read_invocations() {
        Err(LogError::UnsupportedFormat { path }) => assert_eq!(path, log_path),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn test_in_memory_and_file_sources_agree() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let log_path = write_log(&temp_dir, BUILD_LOG);
    let file_source = TextLogReader::new(&log_path).expect("reader");

    let lines = file_source.read_invocations().expect("read");
    let memory_source = VecSource(lines);

    let from_file = analyze_source(&file_source);
    let from_memory = analyze_source(&memory_source);

    assert_eq!(from_memory.invocations, from_file.invocations);
    assert_eq!(
        from_memory.unique_references(),
        from_file.unique_references()
    );
    assert_eq!(from_memory.frequencies, from_file.frequencies);
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let log_path = write_log(&temp_dir, BUILD_LOG);

    let reader = TextLogReader::new(&log_path).expect("reader");
    let analysis = stats::analyze(reader.read_invocations().expect("read"));
    let report = Report::build(&analysis, &TopLimit::Count(1), &Config::default());

    let mut sink = JsonSink::new(Vec::new());
    sink.render(&report).expect("render");
    let value: serde_json::Value =
        serde_json::from_slice(&sink.into_inner()).expect("valid json");

    assert_eq!(value["unique_references"], 4);
    assert_eq!(value["ranked"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["ranked"][0]["name"], "System.Runtime.dll");
}
