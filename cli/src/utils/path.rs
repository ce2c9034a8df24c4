use std::path::{Component, Path, PathBuf};

/// Converts an asset path into a relative path that stays inside the
/// extraction directory.
///
/// Returns `None` for paths that are absolute, climb out with `..`, or have
/// no normal component at all.
pub(crate) fn sanitize_asset_path(path: &str) -> Option<PathBuf> {
    let mut sanitized = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(name) => sanitized.push(name),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!sanitized.as_os_str().is_empty()).then_some(sanitized)
}
