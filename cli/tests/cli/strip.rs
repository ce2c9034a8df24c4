use crate::utils::{CHARA, PLAIN, path_str, setup};
use assert_cmd::cargo::cargo_bin_cmd;
use clap::Parser;
use character_card_png::{cli, command};
use libccpng::CardError;
use std::fs;

/// Precondition: A PNG with a `chara` card.
/// Action: Run `ccpng strip -o`.
/// Expectation: The output has no card and the input still does.
#[test]
fn strip_to_output() {
    let dir = setup("strip_to_output");
    cargo_bin_cmd!("ccpng")
        .args(["strip", "-f"])
        .arg(dir.join(CHARA))
        .arg("-o")
        .arg(dir.join("clean.png"))
        .assert()
        .success();
    assert!(matches!(
        libccpng::parse(&fs::read(dir.join("clean.png")).unwrap()),
        Err(CardError::NotFound)
    ));
    assert!(libccpng::parse(&fs::read(dir.join(CHARA)).unwrap()).is_ok());
}

/// Precondition: A PNG without a card.
/// Action: Run `ccpng strip` in place.
/// Expectation: The file is unchanged.
#[test]
fn strip_without_card() {
    let dir = setup("strip_without_card");
    let before = fs::read(dir.join(PLAIN)).unwrap();
    command::entry(cli::Cli::parse_from([
        "ccpng",
        "strip",
        "-f",
        path_str(&dir.join(PLAIN)),
    ]))
    .unwrap();
    assert_eq!(fs::read(dir.join(PLAIN)).unwrap(), before);
}

/// Precondition: A PNG with a `chara` card.
/// Action: Run `ccpng strip` in place.
/// Expectation: The card is gone.
#[test]
fn strip_in_place() {
    let dir = setup("strip_in_place");
    command::entry(cli::Cli::parse_from([
        "ccpng",
        "strip",
        "-f",
        path_str(&dir.join(CHARA)),
    ]))
    .unwrap();
    assert!(matches!(
        libccpng::parse(&fs::read(dir.join(CHARA)).unwrap()),
        Err(CardError::NotFound)
    ));
}
