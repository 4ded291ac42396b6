//! Configuration types deserialized from `soj.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Toolchain names accepted under `[toolchains.<name>]`.
pub const KNOWN_TOOLCHAINS: &[&str] = &["ise", "vivado", "quartus", "efinity"];

/// The top-level build configuration.
#[derive(Debug, Default, Deserialize)]
pub struct BuildConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Launch settings keyed by toolchain name.
    #[serde(default)]
    pub toolchains: BTreeMap<String, ToolSettings>,
}

impl BuildConfig {
    /// Returns the launch settings for a toolchain, or defaults if unset.
    pub fn toolchain(&self, name: &str) -> ToolSettings {
        self.toolchains.get(name).cloned().unwrap_or_default()
    }
}

/// Where sources are read from and artifacts written to.
///
/// Relative paths are resolved against the directory the build runs in.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the HDL sources and constraint files.
    #[serde(default = "current_dir")]
    pub sources: PathBuf,
    /// Parent directory of the `tmp_<part>` working directories.
    #[serde(default = "current_dir")]
    pub work: PathBuf,
    /// Directory receiving compressed bitstreams.
    #[serde(default = "current_dir")]
    pub output: PathBuf,
}

fn current_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources: current_dir(),
            work: current_dir(),
            output: current_dir(),
        }
    }
}

impl PathsConfig {
    /// Resolves all paths against `base`, leaving absolute paths untouched.
    pub fn resolve(&self, base: &Path) -> ResolvedPaths {
        ResolvedPaths {
            sources: base.join(&self.sources),
            work: base.join(&self.work),
            output: base.join(&self.output),
        }
    }
}

/// Absolute locations used by one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// HDL and constraint sources.
    pub sources: PathBuf,
    /// Parent of the working directory.
    pub work: PathBuf,
    /// Compressed bitstream destination.
    pub output: PathBuf,
}

/// How to launch one vendor toolchain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolSettings {
    /// Overrides the executable of the main tool (e.g. a versioned path).
    pub command: Option<String>,
    /// Runs the tool through wine.
    #[serde(default)]
    pub use_wine: bool,
    /// Extra environment; a `PATH` entry is also used to locate the tool.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}
