//! Tests for the batch command.

use super::*;
use crate::cli::{CommonArgs, OutputArgs};
use std::fs;
use tempfile::TempDir;

fn args(dir: &Path) -> BatchArgs {
    BatchArgs {
        pattern: None,
        common: CommonArgs {
            dir: dir.to_path_buf(),
            config: None,
        },
        output: OutputArgs {
            quiet: true,
            ..OutputArgs::default()
        },
    }
}

#[test]
fn test_batch_compiles_every_template() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Home.shtml"), "home <%=a%>").unwrap();
    fs::write(dir.path().join("About.shtml"), "about").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a template <%").unwrap();

    cmd_batch(args(dir.path())).unwrap();

    let home = fs::read_to_string(dir.path().join("Home.swift")).unwrap();
    assert!(home.contains("HomeProcessor"));
    let about = fs::read_to_string(dir.path().join("About.swift")).unwrap();
    assert!(about.contains("AboutProcessor"));
    assert!(!dir.path().join("notes.swift").exists());
}

#[test]
fn test_batch_continues_past_failures() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("A.shtml"), "<% unterminated").unwrap();
    fs::write(dir.path().join("B.shtml"), "fine").unwrap();

    let err = cmd_batch(args(dir.path())).unwrap_err();

    assert!(matches!(err, SspError::BatchFailed { failed: 1, total: 2, .. }));
    assert!(err.to_string().contains("A.shtml"));
    assert!(!dir.path().join("A.swift").exists());
    assert!(dir.path().join("B.swift").exists());
}

#[test]
fn test_batch_custom_pattern_and_out_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Home.page"), "x").unwrap();
    fs::write(dir.path().join("Home.shtml"), "y").unwrap();

    let mut batch_args = args(dir.path());
    batch_args.pattern = Some("*.page".to_string());
    batch_args.output.out_dir = Some(dir.path().join("gen"));
    cmd_batch(batch_args).unwrap();

    let module = fs::read_to_string(dir.path().join("gen").join("Home.swift")).unwrap();
    assert!(module.contains("// compiled from Home.page"));
    assert!(module.contains("response += \"x\""));
}

#[test]
fn test_batch_empty_directory_is_ok() {
    let dir = TempDir::new().unwrap();
    assert!(cmd_batch(args(dir.path())).is_ok());
}

#[test]
fn test_invalid_pattern_is_config_error() {
    let dir = TempDir::new().unwrap();
    let mut batch_args = args(dir.path());
    batch_args.pattern = Some("[unclosed".to_string());
    assert!(matches!(
        cmd_batch(batch_args),
        Err(SspError::ConfigError(_))
    ));
}

#[test]
fn test_find_templates_is_sorted_and_skips_dirs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.shtml"), "").unwrap();
    fs::write(dir.path().join("a.shtml"), "").unwrap();
    fs::create_dir(dir.path().join("c.shtml")).unwrap();

    let matcher = build_matcher("*.shtml").unwrap();
    let found = find_templates(dir.path(), &matcher).unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.shtml", "b.shtml"]);
}

#[test]
fn test_broad_pattern_skips_generated_modules() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Home.shtml"), "home").unwrap();

    for _ in 0..2 {
        let mut batch_args = args(dir.path());
        batch_args.pattern = Some("*".to_string());
        cmd_batch(batch_args).unwrap();
    }

    let module = fs::read_to_string(dir.path().join("Home.swift")).unwrap();
    assert!(module.contains("// compiled from Home.shtml"));
    assert!(module.contains("response += \"home\""));
}

#[test]
fn test_shared_destination_is_reported_not_compiled() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Home.page"), "page").unwrap();
    fs::write(dir.path().join("Home.shtml"), "shtml").unwrap();

    let mut batch_args = args(dir.path());
    batch_args.pattern = Some("Home.*".to_string());
    let err = cmd_batch(batch_args).unwrap_err();

    assert!(matches!(err, SspError::BatchFailed { failed: 2, total: 2, .. }));
    assert!(err.to_string().contains("is also generated from"));
    assert!(!dir.path().join("Home.swift").exists());
}

#[test]
fn test_non_identifier_stem_fails_alone() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("my.page.shtml"), "x").unwrap();
    fs::write(dir.path().join("Good.shtml"), "y").unwrap();

    let err = cmd_batch(args(dir.path())).unwrap_err();

    assert!(matches!(err, SspError::BatchFailed { failed: 1, total: 2, .. }));
    assert!(err.to_string().contains("not a valid identifier"));
    assert!(dir.path().join("Good.swift").exists());
    assert!(!dir.path().join("my.page.swift").exists());
}
