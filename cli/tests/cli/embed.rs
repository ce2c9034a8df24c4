use crate::utils::{PLAIN, path_str, read_card, setup};
use assert_cmd::cargo::cargo_bin_cmd;
use clap::Parser;
use character_card_png::{cli, command};
use libccpng::CardKind;
use predicates::prelude::*;
use std::fs;

const CARD: &str = r#"{"spec":"chara_card_v2","spec_version":"2.0","data":{"name":"Bob"}}"#;

/// Precondition: A PNG without a card and a card JSON file.
/// Action: Run `ccpng embed` with `-o`.
/// Expectation: The output carries a `chara` card and the input is untouched.
#[test]
fn embed_v2_to_output() {
    let dir = setup("embed_v2_to_output");
    fs::write(dir.join("card.json"), CARD).unwrap();
    let before = fs::read(dir.join(PLAIN)).unwrap();

    cargo_bin_cmd!("ccpng")
        .args(["embed", "-f"])
        .arg(dir.join(PLAIN))
        .arg("--card")
        .arg(dir.join("card.json"))
        .arg("-o")
        .arg(dir.join("out/card.png"))
        .assert()
        .success();

    let card = read_card(&dir.join("out/card.png"));
    assert_eq!(card.kind(), CardKind::Chara);
    assert_eq!(card.text(), CARD);
    assert_eq!(fs::read(dir.join(PLAIN)).unwrap(), before);
}

/// Precondition: A PNG without a card.
/// Action: Run `ccpng embed` without `-o`.
/// Expectation: The input is replaced and no temporary file is left behind.
#[test]
fn embed_in_place() {
    let dir = setup("embed_in_place");
    fs::write(dir.join("card.json"), CARD).unwrap();
    let entries = fs::read_dir(&dir).unwrap().count();

    command::entry(cli::Cli::parse_from([
        "ccpng",
        "--quiet",
        "embed",
        "-f",
        path_str(&dir.join(PLAIN)),
        "--card",
        path_str(&dir.join("card.json")),
    ]))
    .unwrap();

    assert_eq!(read_card(&dir.join(PLAIN)).text(), CARD);
    assert_eq!(fs::read_dir(&dir).unwrap().count(), entries);
}

/// Precondition: A card and two asset files.
/// Action: Embed as v3 with `--asset`.
/// Expectation: A `ccv3` card whose assets keep command line order.
#[test]
fn embed_v3_with_assets() {
    let dir = setup("embed_v3_with_assets");
    fs::write(dir.join("card.json"), CARD).unwrap();
    fs::write(dir.join("z.txt"), "zzz").unwrap();
    fs::write(dir.join("a.txt"), "aaa").unwrap();

    command::entry(cli::Cli::parse_from([
        "ccpng",
        "embed",
        "-f",
        path_str(&dir.join(PLAIN)),
        "--card",
        path_str(&dir.join("card.json")),
        "--card-version",
        "v3",
        "--asset",
        &format!("img/z.png={}", path_str(&dir.join("z.txt"))),
        "--asset",
        &format!("a.png={}", path_str(&dir.join("a.txt"))),
    ]))
    .unwrap();

    let card = read_card(&dir.join(PLAIN));
    assert_eq!(card.kind(), CardKind::Ccv3);
    assert_eq!(
        card.assets().iter().collect::<Vec<_>>(),
        [
            (&"img/z.png".to_string(), &"zzz".to_string()),
            (&"a.png".to_string(), &"aaa".to_string()),
        ]
    );
}

/// Precondition: A binary asset file.
/// Action: Embed with and without `--encode-assets`.
/// Expectation: Without the flag the command fails, with it the asset is Base64 text.
#[test]
fn embed_binary_asset() {
    let dir = setup("embed_binary_asset");
    fs::write(dir.join("card.json"), CARD).unwrap();
    fs::write(dir.join("bin"), [0x00, 0xFF, 0x01]).unwrap();
    let asset = format!("bin={}", path_str(&dir.join("bin")));

    cargo_bin_cmd!("ccpng")
        .args(["embed", "--card-version", "v3", "--asset", &asset, "-f"])
        .arg(dir.join(PLAIN))
        .arg("--card")
        .arg(dir.join("card.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--encode-assets"));

    cargo_bin_cmd!("ccpng")
        .args(["embed", "--card-version", "v3", "--encode-assets", "--asset", &asset, "-f"])
        .arg(dir.join(PLAIN))
        .arg("--card")
        .arg(dir.join("card.json"))
        .assert()
        .success();

    assert_eq!(read_card(&dir.join(PLAIN)).assets()["bin"], "AP8B");
}

/// Precondition: Card data piped to stdin.
/// Action: Run `ccpng embed --card -`.
/// Expectation: The piped text becomes the card.
#[test]
fn embed_card_from_stdin() {
    let dir = setup("embed_card_from_stdin");
    cargo_bin_cmd!("ccpng")
        .args(["embed", "--card", "-", "-f"])
        .arg(dir.join(PLAIN))
        .write_stdin(CARD)
        .assert()
        .success();
    assert_eq!(read_card(&dir.join(PLAIN)).text(), CARD);
}

/// Precondition: An asset path outside Latin-1.
/// Action: Embed with `--strict-latin1`, then without it.
/// Expectation: Strict mode fails, the default masks the path.
#[test]
fn embed_strict_latin1() {
    let dir = setup("embed_strict_latin1");
    fs::write(dir.join("card.json"), CARD).unwrap();
    fs::write(dir.join("a.txt"), "aaa").unwrap();
    let asset = format!("背景={}", path_str(&dir.join("a.txt")));

    cargo_bin_cmd!("ccpng")
        .args(["embed", "--card-version", "v3", "--strict-latin1", "--asset", &asset, "-f"])
        .arg(dir.join(PLAIN))
        .arg("--card")
        .arg(dir.join("card.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Latin-1"));
    assert!(matches!(
        libccpng::parse(&fs::read(dir.join(PLAIN)).unwrap()),
        Err(libccpng::CardError::NotFound)
    ));

    cargo_bin_cmd!("ccpng")
        .args(["embed", "--card-version", "v3", "--asset", &asset, "-f"])
        .arg(dir.join(PLAIN))
        .arg("--card")
        .arg(dir.join("card.json"))
        .assert()
        .success();
    assert_eq!(read_card(&dir.join(PLAIN)).assets().len(), 1);
}

/// Precondition: The output file already exists.
/// Action: Embed to it with and without `--overwrite`.
/// Expectation: Only `--overwrite` replaces it.
#[test]
fn embed_existing_output() {
    let dir = setup("embed_existing_output");
    fs::write(dir.join("card.json"), CARD).unwrap();
    fs::write(dir.join("out.png"), "keep").unwrap();

    cargo_bin_cmd!("ccpng")
        .args(["embed", "-f"])
        .arg(dir.join(PLAIN))
        .arg("--card")
        .arg(dir.join("card.json"))
        .arg("-o")
        .arg(dir.join("out.png"))
        .assert()
        .failure();
    assert_eq!(fs::read(dir.join("out.png")).unwrap(), b"keep");

    cargo_bin_cmd!("ccpng")
        .args(["embed", "--overwrite", "-f"])
        .arg(dir.join(PLAIN))
        .arg("--card")
        .arg(dir.join("card.json"))
        .arg("-o")
        .arg(dir.join("out.png"))
        .assert()
        .success();
    assert_eq!(read_card(&dir.join("out.png")).text(), CARD);
}

/// Precondition: A PNG whose IEND chunk was cut off.
/// Action: Run `ccpng embed`.
/// Expectation: The command fails and reports the broken structure.
#[test]
fn embed_without_iend() {
    let dir = setup("embed_without_iend");
    let plain = fs::read(dir.join(PLAIN)).unwrap();
    fs::write(dir.join("broken.png"), &plain[..plain.len() - 12]).unwrap();
    fs::write(dir.join("card.json"), CARD).unwrap();

    cargo_bin_cmd!("ccpng")
        .args(["embed", "-f"])
        .arg(dir.join("broken.png"))
        .arg("--card")
        .arg(dir.join("card.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid chunk structure"));
    assert_eq!(
        fs::read(dir.join("broken.png")).unwrap(),
        &plain[..plain.len() - 12]
    );
}
