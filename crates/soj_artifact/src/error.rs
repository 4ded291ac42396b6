//! Error types for bitstream post-processing.

use std::path::PathBuf;

/// Errors raised while publishing a built bitstream.
#[derive(Debug, thiserror::Error)]
pub enum PostProcessError {
    /// The toolchain reported success but left no bitstream behind.
    #[error("bitstream not found at {path}")]
    MissingArtifact {
        /// Where the bitstream was expected.
        path: PathBuf,
    },

    /// Compressing, copying or linking failed.
    #[error("post-processing I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl PostProcessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_artifact() {
        let err = PostProcessError::MissingArtifact {
            path: PathBuf::from("tmp_xc7a35t/spiOverJtag.bit"),
        };
        assert_eq!(
            format!("{err}"),
            "bitstream not found at tmp_xc7a35t/spiOverJtag.bit"
        );
    }
}
