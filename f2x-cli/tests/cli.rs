use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("f2x-parser")
        .join("samples")
        .join(name)
}

#[test]
fn dump_is_the_default_format() {
    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.arg(sample_path("subroutine.f90"));

    cmd.assert().success().stdout(predicate::eq(
        "root (0)\n  subroutine (1) [foo]: subroutine foo(x)\n    declaration (2) [x]: integer x\n    assignment (2) [x]: x = 1\n",
    ));
}

#[test]
fn missing_path_prints_usage_and_fails() {
    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn extra_positional_argument_is_rejected() {
    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.arg(sample_path("subroutine.f90")).arg("second.f90");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn parse_error_shows_source_context() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("broken.F90");
    fs::write(&source, "x = 1\n#define FOO 1\ny = 2\n").unwrap();

    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.arg(&source);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("line 2: unclassifiable statement \"#define FOO 1\"")
                .and(predicate::str::contains(">>   2 | #define FOO 1")),
        );
}

#[test]
fn path_selects_a_subtree() {
    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.arg(sample_path("kitchensink.f90"))
        .arg("--path")
        .arg("module:geometry/function:NORM2D");

    cmd.assert().success().stdout(
        predicate::str::starts_with("    function (2) [norm2d]")
            .and(predicate::str::contains("assignment (3) [r]")),
    );
}

#[test]
fn unknown_path_fails() {
    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.arg(sample_path("subroutine.f90"))
        .arg("--path")
        .arg("module:nowhere");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("No node at path"));
}

#[test]
fn prune_flags_remove_statements() {
    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.arg(sample_path("preprocessor.F90"))
        .arg("--prune")
        .arg("using");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("using").not())
        .stdout(predicate::str::contains("call (2) [run]"));
}

#[test]
fn config_file_selects_format() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("f2x.toml");
    fs::write(&config, "[output]\nformat = \"json\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.arg(sample_path("continuation.f90"))
        .arg("--config")
        .arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"text\": \"x = 1 + 2\""));
}

#[test]
fn unknown_format_lists_the_alternatives() {
    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.arg(sample_path("subroutine.f90"))
        .arg("--format")
        .arg("xml");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("dot, dump, json, treeviz, yaml"));
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("f2x");
    cmd.arg("--list-formats");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("treeviz").and(predicate::str::contains("yaml")));
}
