use crate::utils::{CHARA, PLAIN, setup};
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Precondition: A PNG with a v2 card.
/// Action: Run `ccpng info`.
/// Expectation: Kind, name and creator are listed.
#[test]
fn info_v2_card() {
    let dir = setup("info_v2_card");
    cargo_bin_cmd!("ccpng")
        .args(["info", "-f"])
        .arg(dir.join(CHARA))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("chara")
                .and(predicate::str::contains("Alice"))
                .and(predicate::str::contains("ccpng"))
                .and(predicate::str::contains("chara_card_v2")),
        );
}

/// Precondition: A PNG without a card.
/// Action: Run `ccpng info`.
/// Expectation: The command fails.
#[test]
fn info_without_card() {
    let dir = setup("info_without_card");
    cargo_bin_cmd!("ccpng")
        .args(["info", "-f"])
        .arg(dir.join(PLAIN))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no character data found"));
}
