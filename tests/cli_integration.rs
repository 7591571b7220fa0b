//! Integration tests for the leafy command line.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_labels_lists_every_species() {
    let mut cmd = cargo_bin_cmd!("leafy");
    cmd.arg("labels");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1  common guava"))
        .stdout(predicate::str::contains("3  garden geranium"))
        .stdout(predicate::str::contains("7  sago cycad"));
}

#[test]
fn test_labels_json_envelope() {
    let mut cmd = cargo_bin_cmd!("leafy");
    cmd.arg("labels").arg("--output-mode").arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"spec_version\":\"1.0\""))
        .stdout(predicate::str::contains("\"event\":\"result\""))
        .stdout(predicate::str::contains("\"result_type\":\"labels\""))
        .stdout(predicate::str::contains("\"name\":\"sago cycad\""));
}

#[test]
fn test_missing_model_fails_with_model_load() {
    let mut cmd = cargo_bin_cmd!("leafy");
    cmd.arg("--no-progress")
        .arg("--model")
        .arg("/nonexistent/plants.onnx")
        .arg("--output-mode")
        .arg("json")
        .arg("leaf.jpg");

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"status\":\"loading_model\""))
        .stdout(predicate::str::contains("\"status\":\"failed\""))
        .stdout(predicate::str::contains("\"code\":\"model_load\""))
        .stderr(predicate::str::contains("error: failed to load model"));
}

#[test]
fn test_invalid_output_mode_is_rejected() {
    let mut cmd = cargo_bin_cmd!("leafy");
    cmd.arg("--output-mode").arg("xml").arg("leaf.jpg");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'xml'"));
}

#[test]
fn test_config_path_prints_toml_location() {
    let mut cmd = cargo_bin_cmd!("leafy");
    cmd.arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
