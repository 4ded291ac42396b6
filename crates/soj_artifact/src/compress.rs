//! Gzip publication of Vivado bitstreams.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::NamedTempFile;

use crate::error::PostProcessError;

/// Stem shared by every published bitstream.
pub const PUBLISHED_STEM: &str = "spiOverJtag";

/// Returns the published file name for an identifier.
pub fn published_name(part: &str) -> String {
    format!("{PUBLISHED_STEM}_{part}.bit.gz")
}

/// Compresses `bitstream` at the highest level into `dest`.
///
/// The archive is staged next to `dest` and renamed over it, so an existing
/// `dest` is replaced rather than written through. An alias link left at
/// `dest` by another identifier's run becomes a regular file and its target
/// is untouched.
pub fn compress(bitstream: &Path, dest: &Path) -> Result<PathBuf, PostProcessError> {
    let mut input = File::open(bitstream).map_err(|e| PostProcessError::io(bitstream, e))?;
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = NamedTempFile::new_in(dir).map_err(|e| PostProcessError::io(dir, e))?;

    let mut encoder = GzEncoder::new(BufWriter::new(staged), Compression::best());
    io::copy(&mut input, &mut encoder).map_err(|e| PostProcessError::io(dest, e))?;
    let staged = encoder
        .finish()
        .and_then(|w| w.into_inner().map_err(|e| e.into_error()))
        .map_err(|e| PostProcessError::io(dest, e))?;
    staged
        .persist(dest)
        .map_err(|e| PostProcessError::io(dest, e.error))?;

    log::info!("compressed {}", dest.display());
    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn name_embeds_identifier() {
        assert_eq!(
            published_name("xc7a35tcsg324"),
            "spiOverJtag_xc7a35tcsg324.bit.gz"
        );
    }

    #[test]
    fn compressed_contents_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let bit = dir.path().join("spiOverJtag.bit");
        let payload: Vec<u8> = (0..4096u32).map(|i| (i % 7) as u8).collect();
        std::fs::write(&bit, &payload).unwrap();

        let dest = dir.path().join(published_name("xc7s25"));
        compress(&bit, &dest).unwrap();

        let mut decoded = Vec::new();
        GzDecoder::new(File::open(&dest).unwrap())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, payload);
        assert!(std::fs::metadata(&dest).unwrap().len() < payload.len() as u64);
    }

    #[test]
    fn overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let bit = dir.path().join("spiOverJtag.bit");
        std::fs::write(&bit, b"bitstream").unwrap();
        let dest = dir.path().join("out.bit.gz");
        std::fs::write(&dest, b"stale and much longer than the new contents").unwrap();

        compress(&bit, &dest).unwrap();
        let first = std::fs::read(&dest).unwrap();
        compress(&bit, &dest).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), first);
    }

    #[cfg(unix)]
    #[test]
    fn replaces_symlink_instead_of_following_it() {
        let dir = tempfile::tempdir().unwrap();
        let bit = dir.path().join("spiOverJtag.bit");
        std::fs::write(&bit, b"package bits").unwrap();
        let other = dir.path().join(published_name("xc7a35t"));
        std::fs::write(&other, b"other archive").unwrap();
        let dest = dir.path().join(published_name("xc7a35tcsg324"));
        std::os::unix::fs::symlink(published_name("xc7a35t"), &dest).unwrap();

        compress(&bit, &dest).unwrap();
        assert!(!dest.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read(&other).unwrap(), b"other archive");
        let mut decoded = Vec::new();
        GzDecoder::new(File::open(&dest).unwrap())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, b"package bits");
    }

    #[test]
    fn no_staging_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let bit = dir.path().join("spiOverJtag.bit");
        std::fs::write(&bit, b"bits").unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        compress(&bit, &out.join(published_name("xc7s6"))).unwrap();
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
    }

    #[test]
    fn missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = compress(&dir.path().join("none.bit"), &dir.path().join("o.gz")).unwrap_err();
        assert!(matches!(err, PostProcessError::Io { .. }));
    }
}
