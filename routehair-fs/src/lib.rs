//! UTF-8 path filesystem helpers built on `cap-std` and `camino`.
//!
//! Every operation resolves the parent directory of its target with ambient
//! authority and then works relative to that directory handle, so callers
//! only ever touch the one file they named.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Open a UTF-8 file path for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory containing `path` and return it with the file name.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Read `path` to a string, treating a missing file or directory as `None`.
///
/// # Examples
/// ```
/// use camino::Utf8PathBuf;
///
/// let dir = tempfile::tempdir()?;
/// let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json")).expect("utf-8 path");
/// assert_eq!(routehair_fs::read_optional_utf8(&path)?, None);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn read_optional_utf8(path: &Utf8Path) -> io::Result<Option<String>> {
    let (dir, name) = match open_parent_dir(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(&name) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Replace the contents of `path` atomically.
///
/// The payload is written to a hidden sibling file which is then renamed
/// over the target, so readers observe either the old or the new contents.
/// Missing parent directories are created first.
pub fn write_atomic_utf8(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    let staging = format!(".{name}.tmp");
    dir.write(&staging, contents)?;
    if let Err(err) = dir.rename(&staging, &dir, &name) {
        // Best effort; the rename error is the one worth reporting.
        drop(dir.remove_file(&staging));
        return Err(err);
    }
    Ok(())
}

/// Remove `path`, returning whether a file was removed.
pub fn remove_if_exists(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_parent_dir(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.remove_file(&name) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create the parent directory of `path` and any missing ancestors.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Split a directory path into an opened anchor (root, drive prefix or the
/// current directory) and the remainder relative to it.
fn split_anchor(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (anchor, relative) = match std_parent.components().next() {
        // Windows drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let anchor =
                Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(anchor.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (anchor, relative)
        }
        Some(Component::RootDir) => {
            let anchor = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(anchor.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (anchor, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;
    Ok((dir, relative))
}
