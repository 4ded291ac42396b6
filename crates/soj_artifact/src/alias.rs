//! Symlinks publishing one compressed bitstream under sibling names.

use std::io;
use std::path::{Path, PathBuf};

use crate::compress::published_name;
use crate::error::PostProcessError;

/// Links every alias in `aliases` to `target` inside its directory.
///
/// Links are relative so the output directory can be moved as a whole.
/// Names that already exist, dangling links included, are left alone.
/// Returns the links created by this call.
pub fn link_aliases(target: &Path, aliases: &[String]) -> Result<Vec<PathBuf>, PostProcessError> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let Some(file_name) = target.file_name() else {
        return Err(PostProcessError::io(
            target,
            io::Error::new(io::ErrorKind::InvalidInput, "not a file path"),
        ));
    };

    let mut created = Vec::new();
    for alias in aliases {
        let link = dir.join(published_name(alias));
        if link == target || link.symlink_metadata().is_ok() {
            log::debug!("alias {} exists, skipping", link.display());
            continue;
        }
        symlink(Path::new(file_name), &link).map_err(|e| PostProcessError::io(&link, e))?;
        log::info!("linked {}", link.display());
        created.push(link);
    }
    Ok(created)
}

#[cfg(unix)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}
