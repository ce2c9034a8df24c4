use std::{
    fs,
    path::{Path, PathBuf},
};

pub const PLAIN: &str = "plain.png";
pub const CHARA: &str = "chara.png";

/// Creates an empty working directory under the target tmpdir holding
/// copies of the PNG fixtures.
pub fn setup(name: &str) -> PathBuf {
    let resources = Path::new(env!("CARGO_MANIFEST_DIR")).join("../resources/test");
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    for fixture in [PLAIN, CHARA] {
        fs::copy(resources.join(fixture), dir.join(fixture)).unwrap();
    }
    dir
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

pub fn read_card(path: &Path) -> libccpng::Card {
    libccpng::parse(&fs::read(path).unwrap()).unwrap()
}
