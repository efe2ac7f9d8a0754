#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const PAIR: &str = r##"
title: Pair
charts:
  - id: pair
    tab: Pair
    spine_ratio: 0.5
    divergence_phase: p1
    phases:
      - { id: p0, x: 0.1, label: Start }
      - { id: p1, x: 0.5, label: Middle }
      - { id: p2, x: 0.9, label: End }
    branches:
      - { id: ic, label: IC, color: "#7b9ec7", offset: 0 }
      - { id: lead, label: Lead, color: "#c9865a", offset: 1 }
    nodes:
      - { id: ic0, branch: ic, phase: p0, title: First Steps }
      - { id: ic2, branch: ic, phase: p2, title: Deep Work }
      - { id: lead2, branch: lead, phase: p2, title: Leading <Teams>, items: [Runs planning] }
    tracks:
      - { id: mgr, label: Manager, color: "#6bc59e", offset: 2, from_branches: [lead] }
"##;

fn ladder() -> Command {
    let mut cmd = Command::cargo_bin("ladder").unwrap();
    cmd.env_remove("LADDER_CONFIG");
    cmd
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("ladder.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_builtin_spectrum() {
    ladder()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Engineering Career Spectrum"))
        .stdout(predicate::str::contains("* future"))
        .stdout(predicate::str::contains("7 phases, 5 branches, 16 nodes, 2 tracks, 0 overlays"))
        .stdout(predicate::str::contains("Configuration OK"));
}

#[test]
fn validate_reports_orphan_branch() {
    let dir = TempDir::new().unwrap();
    let broken = PAIR.replace("from_branches: [lead]", "from_branches: []");
    let path = write_config(&dir, &broken);

    ladder()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"))
        .stderr(predicate::str::contains("branch 'lead' does not feed any track"));
}

#[test]
fn validate_reads_config_from_env() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, PAIR);

    ladder()
        .env("LADDER_CONFIG", &path)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("* pair"));
}

#[test]
fn validate_missing_file() {
    ladder()
        .args(["validate", "--config", "does-not-exist.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.yaml"));
}

// ---------------------------------------------------------------------------
// render / layout
// ---------------------------------------------------------------------------

#[test]
fn render_default_chart_to_stdout() {
    ladder()
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"960\" height=\"580\""))
        .stdout(predicate::str::contains("data-track=\"staff\""));
}

#[test]
fn render_clamps_width_and_writes_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out/current.svg");

    ladder()
        .args(["render", "--chart", "current", "--width", "2000", "-o"])
        .arg(&out)
        .assert()
        .success();

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("width=\"1060\" height=\"420\""));
    assert!(svg.contains("data-overlay=\"tech-lead\""));
}

#[test]
fn render_fullscreen_uses_window_size() {
    ladder()
        .args(["render", "--fullscreen", "--width", "1400", "--height", "900"])
        .assert()
        .success()
        .stdout(predicate::str::contains("width=\"1320\" height=\"780\""));
}

#[test]
fn render_rejects_non_finite_viewport() {
    ladder()
        .args(["render", "--fullscreen", "--height", "inf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Viewport must be finite and positive"));

    ladder()
        .args(["layout", "--width", "NaN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Viewport must be finite and positive"));
}

#[test]
fn render_selection_and_escaping() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, PAIR);

    ladder()
        .arg("render")
        .arg("--config")
        .arg(&path)
        .args(["--select", "lead2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Leading &lt;Teams&gt;"))
        .stdout(predicate::str::contains("url(#nodeGlow)"));
}

#[test]
fn render_unknown_selection_fails() {
    ladder()
        .args(["render", "--select", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no node, track or overlay 'nobody'"));
}

#[test]
fn render_unknown_chart_fails() {
    ladder()
        .args(["render", "--chart", "past"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("past"));
}

#[test]
fn layout_prints_scene_json() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, PAIR);

    let output = ladder()
        .arg("layout")
        .arg("--config")
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let scene: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(scene["chart"], "pair");
    assert_eq!(scene["canvas"]["width"], 960.0);
    assert_eq!(scene["spine_y"], 290.0);
    assert_eq!(scene["nodes"].as_array().unwrap().len(), 3);

    // Before divergence everything sits on the spine
    assert_eq!(scene["nodes"][0]["position"]["y"], 290.0);
    let terminal = &scene["tracks"][0]["terminal"];
    assert!((terminal["x"].as_f64().unwrap() - 912.0).abs() < 1e-9);
    assert_eq!(terminal["y"], 290.0 + 2.0 * 55.0);
    let connector = scene["tracks"][0]["paths"][0][1].as_str().unwrap();
    assert!(connector.starts_with("M "));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_node_detail() {
    ladder()
        .args(["show", "del-2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("▶ DELIVERY OWNERSHIP · FEATURE AREA LEAD\nFeature Area Delivery\n"));
}

#[test]
fn show_track_detail() {
    ladder()
        .args(["show", "em"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Primarily draws from: Delivery Ownership"));
}

#[test]
fn show_overlay_on_other_chart() {
    ladder()
        .args(["show", "tech-lead", "--chart", "current"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tech Lead"));

    ladder()
        .args(["show", "tech-lead"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// init / schema
// ---------------------------------------------------------------------------

#[test]
fn init_writes_builtin_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ladder.yaml");

    ladder()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote ladder.yaml"));

    ladder()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "keep me");

    ladder()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

    ladder()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .arg("--force")
        .assert()
        .success();
    assert!(std::fs::read_to_string(&path).unwrap().contains("charts:"));
}

#[test]
fn schema_describes_config() {
    let output = ladder().arg("schema").output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["title"], "Config");
    assert!(schema["properties"]["charts"].is_object());
    assert!(schema["definitions"]["ChartConfig"].is_object());
}
