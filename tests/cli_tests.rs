//! CLI integration tests using the REAL workload-acquire binary

mod common;

use common::{TestSdk, tree, workload_acquire_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    workload_acquire_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--packageName"))
        .stdout(predicate::str::contains("--workloadId"))
        .stdout(predicate::str::contains("-name:value"));
}

#[test]
fn test_version_output() {
    workload_acquire_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("workload-acquire"));
}

#[test]
fn test_version_pin_without_value_fails_without_changes() {
    let sdk = TestSdk::new();
    let before = tree(sdk.temp.path());

    sdk.cmd()
        .arg("-v:onlykey")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("onlykey"));

    assert_eq!(tree(sdk.temp.path()), before);
}

#[test]
fn test_version_pin_with_empty_key_fails() {
    workload_acquire_cmd()
        .arg("-v:=1.0.0")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing key"));
}

#[test]
fn test_unknown_flag_fails() {
    workload_acquire_cmd()
        .arg("-bogus:1")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn test_bare_argument_fails() {
    workload_acquire_cmd()
        .arg("install")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown argument: install"));
}

#[test]
fn test_flag_without_colon_fails() {
    workload_acquire_cmd()
        .arg("-rid")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed argument: -rid"));
}

#[test]
fn test_missing_dotnet_host_fails() {
    let sdk = TestSdk::new();
    let missing = sdk.temp.path().join("no-such-dotnet");

    workload_acquire_cmd()
        .arg(format!("-dotnet:{}", missing.display()))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: File not found"))
        .stderr(predicate::str::contains("no-such-dotnet"));
}
