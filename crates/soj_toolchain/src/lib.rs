//! Vendor toolchain backends and the per-invocation build driver.
//!
//! A [`Toolchain`] receives a [`BuildPlan`] and a working directory during
//! `configure`, writes its project scripts there, and runs the vendor tool
//! during `build`. The [`ToolchainDriver`] sequences these calls and owns the
//! working directory.

#![warn(missing_docs)]

pub mod driver;
pub mod efinity;
pub mod error;
pub mod ise;
pub mod launcher;
pub mod quartus;
pub mod vivado;

use std::path::{Path, PathBuf};

use soj_config::BuildConfig;
use soj_parts::{BuildPlan, ToolchainKind};

pub use driver::{BuildArtifact, BuildContext, DriverState, ToolchainDriver};
pub use error::ToolchainError;
pub use launcher::Launcher;

/// An external vendor synthesis toolchain.
///
/// The driver calls `configure` once, then `build` once. Neither call is
/// retried.
pub trait Toolchain {
    /// Returns which toolchain this is.
    fn kind(&self) -> ToolchainKind;

    /// Prepares the project for `plan` inside `work_root`.
    fn configure(&mut self, plan: &BuildPlan, work_root: &Path) -> Result<(), ToolchainError>;

    /// Runs the vendor flow to a bitstream.
    fn build(&mut self) -> Result<(), ToolchainError>;

    /// Returns where the bitstream of project `name` lands, relative to the
    /// working directory.
    fn bitstream(&self, name: &str) -> PathBuf;
}

/// Creates the backend for a toolchain, using its configured launch settings.
pub fn create_toolchain(kind: ToolchainKind, config: &BuildConfig) -> Box<dyn Toolchain> {
    let launcher = Launcher::new(config.toolchain(kind.name()));
    match kind {
        ToolchainKind::Vivado => Box::new(vivado::Vivado::new(launcher)),
        ToolchainKind::Ise => Box::new(ise::Ise::new(launcher)),
        ToolchainKind::Quartus => Box::new(quartus::Quartus::new(launcher)),
        ToolchainKind::Efinity => Box::new(efinity::Efinity::new(launcher)),
    }
}

/// Joins the verilog defines of a plan as `name=value` words.
pub(crate) fn define_words(plan: &BuildPlan) -> Vec<String> {
    plan.parameters
        .iter()
        .map(|(name, param)| format!("{name}={}", param.default))
        .collect()
}

/// Working directory and project name captured at configure time.
#[derive(Debug, Clone)]
pub(crate) struct Project {
    pub(crate) work_root: PathBuf,
    pub(crate) name: String,
}

impl Project {
    pub(crate) fn new(plan: &BuildPlan, work_root: &Path) -> Self {
        Self {
            work_root: work_root.to_path_buf(),
            name: plan.name.clone(),
        }
    }
}

/// Returns the configured project or an error naming the missing step.
pub(crate) fn configured<'a>(
    project: &'a Option<Project>,
    tool: &'static str,
) -> Result<&'a Project, ToolchainError> {
    project.as_ref().ok_or_else(|| ToolchainError::InvalidPlan {
        tool,
        reason: "build requested before configure".to_string(),
    })
}
