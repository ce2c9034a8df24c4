use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[inline]
pub(crate) fn mv<Src: AsRef<Path>, Dest: AsRef<Path>>(src: Src, dest: Dest) -> io::Result<()> {
    #[cfg(unix)]
    fn inner(src: &Path, dest: &Path) -> io::Result<()> {
        use std::os::unix::fs::MetadataExt;
        let src_meta = fs::metadata(src)?;
        if dest
            .parent()
            .and_then(|parent| fs::metadata(parent).ok())
            .is_some_and(|dest_meta| src_meta.dev() == dest_meta.dev())
        {
            fs::rename(src, dest)
        } else {
            fs::copy(src, dest)?;
            fs::remove_file(src)
        }
    }
    #[cfg(not(unix))]
    fn inner(src: &Path, dest: &Path) -> io::Result<()> {
        fs::rename(src, dest).or_else(|_| {
            fs::copy(src, dest)?;
            fs::remove_file(src)
        })
    }
    inner(src.as_ref(), dest.as_ref())
}

#[inline]
pub(crate) fn file_create(path: impl AsRef<Path>, overwrite: bool) -> io::Result<fs::File> {
    if overwrite {
        fs::File::create(path)
    } else {
        fs::File::create_new(path)
    }
}

/// Writes `bytes` to `output` when given, otherwise replaces `input` through
/// a temporary sibling file so a failed write never leaves it half written.
/// The replacement keeps the permissions of `input`.
pub(crate) fn write_or_replace(
    input: &Path,
    output: Option<&Path>,
    overwrite: bool,
    bytes: &[u8],
) -> io::Result<()> {
    if let Some(output) = output {
        if let Some(parent) = output.parent().filter(|it| !it.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = file_create(output, overwrite)?;
        return file.write_all(bytes);
    }
    let temp = temp_sibling(input);
    log::debug!("writing {}", temp.display());
    let permissions = fs::metadata(input)?.permissions();
    if let Err(e) = fs::write(&temp, bytes)
        .and_then(|_| fs::set_permissions(&temp, permissions))
        .and_then(|_| mv(&temp, input))
    {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|it| it.to_string_lossy().into_owned())
        .unwrap_or_default();
    let random = rand::random::<u32>();
    path.with_file_name(format!(".{name}.{random:08x}.tmp"))
}
