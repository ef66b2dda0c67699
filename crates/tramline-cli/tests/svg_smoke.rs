use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture_dir() -> PathBuf {
    repo_root().join("fixtures").join("tram")
}

#[test]
fn cli_renders_svg_smoke() {
    let data = fixture_dir();
    assert!(data.exists(), "fixtures missing: {}", data.display());

    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.svg");

    let exe = assert_cmd::cargo_bin!("tramline-cli");
    Command::new(exe)
        .args([
            "render",
            "--data",
            data.to_string_lossy().as_ref(),
            "--height",
            "800",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg "), "output is not an SVG");
    // Default width is 1.3 x height.
    assert!(svg.contains(r#"viewBox="0 0 1040 800""#));
}

#[test]
fn cli_prints_overflow_notice_to_stderr() {
    let exe = assert_cmd::cargo_bin!("tramline-cli");
    let assert = Command::new(exe)
        .args([
            "render",
            "--data",
            fixture_dir().to_string_lossy().as_ref(),
            "--height",
            "800",
            "--viewport-width",
            "900",
        ])
        .assert()
        .success();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf-8");
    assert!(stderr.contains("wider than the 900px viewport"), "{stderr}");
}

#[test]
fn cli_normalize_prints_model_json() {
    let exe = assert_cmd::cargo_bin!("tramline-cli");
    let assert = Command::new(exe)
        .args([
            "normalize",
            "--data",
            fixture_dir().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8");
    let model: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(model["years"].as_array().map(Vec::len), Some(7));
    assert!(model["max_position"]["2026"].is_number());
}

#[test]
fn cli_rejects_missing_data_dir_with_usage() {
    let exe = assert_cmd::cargo_bin!("tramline-cli");
    Command::new(exe).args(["render"]).assert().code(2);
}

#[test]
fn cli_fails_cleanly_when_a_document_is_missing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    // Only one of the four documents present.
    fs::write(tmp.path().join("roads.json"), "[]").expect("write");

    let exe = assert_cmd::cargo_bin!("tramline-cli");
    let assert = Command::new(exe)
        .args(["render", "--data", tmp.path().to_string_lossy().as_ref()])
        .assert()
        .code(1);

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf-8");
    assert!(stderr.contains("stops.json"), "{stderr}");
}
