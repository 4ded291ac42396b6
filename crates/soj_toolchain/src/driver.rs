//! Sequencing of one toolchain run.

use std::fmt;
use std::path::{Path, PathBuf};

use soj_config::ResolvedPaths;
use soj_parts::{work_dir_name, BuildPlan, Family, ToolchainKind};

use crate::error::ToolchainError;
use crate::Toolchain;

/// Directories and identifier of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// The part identifier being built.
    pub part: String,
    /// Per-part working directory (`tmp_<part>`).
    pub work_dir: PathBuf,
    /// Where compressed bitstreams are published.
    pub output_dir: PathBuf,
}

impl BuildContext {
    /// Derives the context of `part` from resolved configuration paths.
    pub fn new(part: &str, paths: &ResolvedPaths) -> Self {
        Self {
            part: part.to_string(),
            work_dir: paths.work.join(work_dir_name(part)),
            output_dir: paths.output.clone(),
        }
    }
}

/// Lifecycle of a [`ToolchainDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Working directory exists, nothing configured yet.
    Created,
    /// Project files written.
    Configured,
    /// The vendor flow completed.
    Built,
    /// The artifact was handed off.
    Done,
    /// A step failed; no further steps are accepted.
    Failed,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Configured => "configured",
            Self::Built => "built",
            Self::Done => "done",
            Self::Failed => "failed",
        })
    }
}

/// A successfully built bitstream and what post-processing needs to know
/// about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    /// The part identifier.
    pub part: String,
    /// Resolved family.
    pub family: Family,
    /// Toolchain that produced the bitstream.
    pub toolchain: ToolchainKind,
    /// Bitstream as written by the toolchain.
    pub path: PathBuf,
    /// The working directory root.
    pub work_dir: PathBuf,
    /// Identifiers served by the same bitstream.
    pub aliases: Vec<String>,
}

/// Drives one toolchain through configure and build.
///
/// Each transition is attempted once. A failure moves the driver to
/// [`DriverState::Failed`] and leaves the working directory as the tool
/// left it.
pub struct ToolchainDriver {
    ctx: BuildContext,
    toolchain: Box<dyn Toolchain>,
    state: DriverState,
    plan: Option<BuildPlan>,
}

impl ToolchainDriver {
    /// Ensures the working directory exists and wraps `toolchain`.
    ///
    /// An existing directory is reused as is.
    pub fn create(
        ctx: BuildContext,
        toolchain: Box<dyn Toolchain>,
    ) -> Result<Self, ToolchainError> {
        std::fs::create_dir_all(&ctx.work_dir)
            .map_err(|e| ToolchainError::io(&ctx.work_dir, e))?;
        log::debug!("working directory {}", ctx.work_dir.display());
        Ok(Self {
            ctx,
            toolchain,
            state: DriverState::Created,
            plan: None,
        })
    }

    /// Returns the current state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Returns the working directory.
    pub fn work_dir(&self) -> &Path {
        &self.ctx.work_dir
    }

    fn require_state(
        &self,
        expected: DriverState,
        action: &'static str,
    ) -> Result<(), ToolchainError> {
        if self.state != expected {
            return Err(ToolchainError::InvalidState {
                action,
                state: self.state,
            });
        }
        Ok(())
    }

    fn track<T>(
        &mut self,
        result: Result<T, ToolchainError>,
        next: DriverState,
    ) -> Result<T, ToolchainError> {
        self.state = if result.is_ok() {
            next
        } else {
            DriverState::Failed
        };
        result
    }

    /// Writes the plan's generated files and lets the toolchain write its
    /// project.
    pub fn configure(&mut self, plan: BuildPlan) -> Result<(), ToolchainError> {
        self.require_state(DriverState::Created, "configure")?;
        let result = self.configure_inner(&plan);
        self.track(result, DriverState::Configured)?;
        log::info!("configured {} in {}", plan.part, self.ctx.work_dir.display());
        self.plan = Some(plan);
        Ok(())
    }

    fn configure_inner(&mut self, plan: &BuildPlan) -> Result<(), ToolchainError> {
        if plan.toolchain != self.toolchain.kind() {
            return Err(ToolchainError::InvalidPlan {
                tool: self.toolchain.kind().name(),
                reason: format!("plan targets {}", plan.toolchain),
            });
        }
        for file in &plan.generated {
            log::debug!("generating {}", file.path.display());
            std::fs::write(&file.path, &file.contents)
                .map_err(|e| ToolchainError::io(&file.path, e))?;
        }
        self.toolchain.configure(plan, &self.ctx.work_dir)
    }

    /// Runs the vendor flow. Blocks until the tool exits.
    pub fn build(&mut self) -> Result<(), ToolchainError> {
        self.require_state(DriverState::Configured, "build")?;
        let result = self.toolchain.build();
        self.track(result, DriverState::Built)?;
        log::info!("built {}", self.ctx.part);
        Ok(())
    }

    /// Hands off the built bitstream.
    pub fn artifact(&mut self) -> Result<BuildArtifact, ToolchainError> {
        self.require_state(DriverState::Built, "collect the artifact")?;
        let Some(plan) = self.plan.take() else {
            return Err(ToolchainError::InvalidState {
                action: "collect the artifact",
                state: self.state,
            });
        };
        self.state = DriverState::Done;
        Ok(BuildArtifact {
            part: self.ctx.part.clone(),
            family: plan.family,
            toolchain: plan.toolchain,
            path: self.ctx.work_dir.join(self.toolchain.bitstream(&plan.name)),
            work_dir: self.ctx.work_dir.clone(),
            aliases: plan.bitstream_aliases,
        })
    }
}
