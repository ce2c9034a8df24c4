use crate::utils::{CHARA, PLAIN, path_str, setup};
use assert_cmd::cargo::cargo_bin_cmd;
use base64::{Engine, engine::general_purpose::STANDARD};
use clap::Parser;
use character_card_png::{cli, command};
use libccpng::{CardVersion, GenerateOptions};
use predicates::prelude::*;
use std::fs;

/// Precondition: A PNG with a Base64 `chara` card.
/// Action: Run `ccpng extract`.
/// Expectation: The decoded JSON is printed to stdout.
#[test]
fn extract_to_stdout() {
    let dir = setup("extract_to_stdout");
    cargo_bin_cmd!("ccpng")
        .args(["extract", "-f"])
        .arg(dir.join(CHARA))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"Alice""#));
}

/// Precondition: A PNG with a `chara` card.
/// Action: Run `ccpng extract --pretty` and `--raw`.
/// Expectation: Pretty JSON and the stored Base64 text respectively.
#[test]
fn extract_pretty_and_raw() {
    let dir = setup("extract_pretty_and_raw");
    cargo_bin_cmd!("ccpng")
        .args(["extract", "--pretty", "-f"])
        .arg(dir.join(CHARA))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "Alice""#));

    let raw = libccpng::parse(&fs::read(dir.join(CHARA)).unwrap())
        .unwrap()
        .raw()
        .to_owned();
    cargo_bin_cmd!("ccpng")
        .args(["extract", "--raw", "-f"])
        .arg(dir.join(CHARA))
        .assert()
        .success()
        .stdout(format!("{raw}\n"));
}

/// Precondition: A PNG with a card.
/// Action: Run `ccpng extract -o`.
/// Expectation: The file holds exactly the decoded card text.
#[test]
fn extract_to_file() {
    let dir = setup("extract_to_file");
    command::entry(cli::Cli::parse_from([
        "ccpng",
        "extract",
        "-f",
        path_str(&dir.join(CHARA)),
        "-o",
        path_str(&dir.join("card.json")),
    ]))
    .unwrap();
    let expected = libccpng::parse(&fs::read(dir.join(CHARA)).unwrap()).unwrap();
    assert_eq!(
        fs::read_to_string(dir.join("card.json")).unwrap(),
        expected.text()
    );
}

/// Precondition: A PNG without a card.
/// Action: Run `ccpng extract`.
/// Expectation: The command fails with a not found message.
#[test]
fn extract_without_card() {
    let dir = setup("extract_without_card");
    cargo_bin_cmd!("ccpng")
        .args(["extract", "-f"])
        .arg(dir.join(PLAIN))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no character data found"));
}

/// Precondition: A v3 card with nested, escaping and Base64 assets.
/// Action: Run `ccpng extract --assets-dir --decode-assets`.
/// Expectation: Safe assets are written decoded, escaping paths are skipped.
#[test]
fn extract_assets() {
    let dir = setup("extract_assets");
    let options = GenerateOptions::builder()
        .version(CardVersion::V3)
        .asset("img/avatar.bin", STANDARD.encode([1u8, 2, 3]))
        .asset("../escape.bin", STANDARD.encode("nope"))
        .asset("/abs.bin", STANDARD.encode("nope"))
        .build();
    let png = libccpng::generate(
        &fs::read(dir.join(PLAIN)).unwrap(),
        r#"{"name":"Assets"}"#,
        &options,
    )
    .unwrap();
    fs::write(dir.join("card.png"), png).unwrap();

    command::entry(cli::Cli::parse_from([
        "ccpng",
        "--quiet",
        "extract",
        "-f",
        path_str(&dir.join("card.png")),
        "-o",
        path_str(&dir.join("card.json")),
        "--assets-dir",
        path_str(&dir.join("assets")),
        "--decode-assets",
    ]))
    .unwrap();

    assert_eq!(
        fs::read(dir.join("assets/img/avatar.bin")).unwrap(),
        [1u8, 2, 3]
    );
    assert!(!dir.join("escape.bin").exists());
    assert_eq!(fs::read_dir(dir.join("assets")).unwrap().count(), 1);
}

/// Precondition: A v3 card whose asset paths `./a` and `a` name the same file.
/// Action: Run `ccpng extract --assets-dir`.
/// Expectation: The command succeeds and the first asset is written.
#[test]
fn extract_assets_with_colliding_paths() {
    let dir = setup("extract_assets_with_colliding_paths");
    let options = GenerateOptions::builder()
        .version(CardVersion::V3)
        .asset("./a", "first")
        .asset("a", "second")
        .asset("b", "other")
        .build();
    let png = libccpng::generate(
        &fs::read(dir.join(PLAIN)).unwrap(),
        r#"{"name":"Assets"}"#,
        &options,
    )
    .unwrap();
    fs::write(dir.join("card.png"), png).unwrap();

    command::entry(cli::Cli::parse_from([
        "ccpng",
        "--quiet",
        "extract",
        "-f",
        path_str(&dir.join("card.png")),
        "-o",
        path_str(&dir.join("card.json")),
        "--assets-dir",
        path_str(&dir.join("assets")),
    ]))
    .unwrap();

    assert_eq!(fs::read(dir.join("assets/a")).unwrap(), b"first");
    assert_eq!(fs::read(dir.join("assets/b")).unwrap(), b"other");
    assert_eq!(fs::read_dir(dir.join("assets")).unwrap().count(), 2);
}

/// Precondition: `--decode-assets` without `--assets-dir`.
/// Action: Parse the command line.
/// Expectation: clap rejects it.
#[test]
fn decode_assets_requires_dir() {
    assert!(
        cli::Cli::try_parse_from(["ccpng", "extract", "-f", "a.png", "--decode-assets"]).is_err()
    );
}
