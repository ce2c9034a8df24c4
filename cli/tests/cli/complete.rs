use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Precondition: None.
/// Action: Run `ccpng complete bash`.
/// Expectation: A completion script naming the binary is printed.
#[test]
fn complete_bash() {
    cargo_bin_cmd!("ccpng")
        .args(["complete", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ccpng"));
}
