//! Post-processing of built spiOverJtag bitstreams.
//!
//! Vivado bitstreams are published gzip-compressed into the output directory,
//! with symlinks for every package that shares the same silicon. Bitstreams
//! of the other toolchains are copied from the tool's run tree to the root of
//! the working directory. Every step can be repeated without changing the
//! result.

#![warn(missing_docs)]

pub mod alias;
pub mod compress;
pub mod error;

use std::path::{Path, PathBuf};

use soj_parts::ToolchainKind;
use soj_toolchain::BuildArtifact;

pub use alias::link_aliases;
pub use compress::{compress, published_name};
pub use error::PostProcessError;

/// What post-processing produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    /// The primary output file.
    pub path: PathBuf,
    /// Alias links created by this run.
    pub links: Vec<PathBuf>,
}

/// Publishes a built bitstream.
///
/// `output_dir` receives compressed Vivado bitstreams and is created if
/// missing.
///
/// # Errors
///
/// Returns [`PostProcessError::MissingArtifact`] if the bitstream does not
/// exist, or [`PostProcessError::Io`] if any file operation fails.
pub fn post_process(
    artifact: &BuildArtifact,
    output_dir: &Path,
) -> Result<Published, PostProcessError> {
    if !artifact.path.is_file() {
        return Err(PostProcessError::MissingArtifact {
            path: artifact.path.clone(),
        });
    }

    match artifact.toolchain {
        ToolchainKind::Vivado => publish_compressed(artifact, output_dir),
        ToolchainKind::Ise | ToolchainKind::Quartus | ToolchainKind::Efinity => {
            relocate(&artifact.path, &artifact.work_dir).map(|path| Published {
                path,
                links: Vec::new(),
            })
        }
    }
}

fn publish_compressed(
    artifact: &BuildArtifact,
    output_dir: &Path,
) -> Result<Published, PostProcessError> {
    std::fs::create_dir_all(output_dir).map_err(|e| PostProcessError::io(output_dir, e))?;
    let dest = output_dir.join(published_name(&artifact.part));
    let path = compress(&artifact.path, &dest)?;
    let links = if artifact.family.shares_bitstream() {
        link_aliases(&path, &artifact.aliases)?
    } else {
        Vec::new()
    };
    Ok(Published { path, links })
}

/// Copies `bitstream` to the root of `work_dir`.
///
/// A bitstream already at the root is left in place.
pub fn relocate(bitstream: &Path, work_dir: &Path) -> Result<PathBuf, PostProcessError> {
    let Some(file_name) = bitstream.file_name() else {
        return Err(PostProcessError::MissingArtifact {
            path: bitstream.to_path_buf(),
        });
    };
    let dest = work_dir.join(file_name);
    if bitstream.parent() == Some(work_dir) {
        log::debug!("{} already at working directory root", dest.display());
        return Ok(dest);
    }
    std::fs::copy(bitstream, &dest).map_err(|e| PostProcessError::io(&dest, e))?;
    log::info!("copied bitstream to {}", dest.display());
    Ok(dest)
}
