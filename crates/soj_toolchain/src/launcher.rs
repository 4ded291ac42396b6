//! Vendor tool process construction.

use std::path::Path;
use std::process::{Command, Stdio};

use soj_config::ToolSettings;

use crate::error::ToolchainError;

/// Builds and runs vendor tool commands according to [`ToolSettings`].
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    settings: ToolSettings,
}

impl Launcher {
    /// Creates a launcher from configured settings.
    pub fn new(settings: ToolSettings) -> Self {
        Self { settings }
    }

    /// Returns the executable to run for `default_program`.
    ///
    /// The configured `command` replaces the default name.
    pub fn program<'a>(&'a self, default_program: &'a str) -> &'a str {
        self.settings.command.as_deref().unwrap_or(default_program)
    }

    /// Prepares a command running `program` inside `work_dir`.
    ///
    /// With wine enabled the program becomes wine's first argument. When the
    /// settings carry a `PATH`, the program is resolved in that search path.
    pub fn command(&self, program: &str, work_dir: &Path) -> Result<Command, ToolchainError> {
        let mut cmd = if self.settings.use_wine {
            let mut cmd = Command::new("wine");
            cmd.arg(program);
            cmd
        } else if let Some(path) = self.settings.env.get("PATH") {
            let resolved = which::which_in(program, Some(path), work_dir).map_err(|e| {
                ToolchainError::Locate {
                    program: program.to_string(),
                    reason: e.to_string(),
                }
            })?;
            Command::new(resolved)
        } else {
            Command::new(program)
        };

        for (key, value) in &self.settings.env {
            cmd.env(key, value);
        }
        cmd.current_dir(work_dir);
        cmd.stdin(Stdio::null());
        Ok(cmd)
    }

    /// Runs a prepared command to completion.
    ///
    /// Output is inherited so the vendor diagnostics reach the operator
    /// unmodified. Blocks for as long as the tool runs.
    pub fn run(
        &self,
        tool: &'static str,
        step: &str,
        mut cmd: Command,
    ) -> Result<(), ToolchainError> {
        let program = cmd.get_program().to_string_lossy().into_owned();
        log::info!("running {tool} {step}: {cmd:?}");
        let status = cmd
            .status()
            .map_err(|source| ToolchainError::Spawn { program, source })?;
        if !status.success() {
            return Err(ToolchainError::Failed {
                tool,
                step: step.to_string(),
                status,
            });
        }
        Ok(())
    }
}

/// Writes a generated script or project file.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), ToolchainError> {
    log::debug!("writing {}", path.display());
    std::fs::write(path, contents).map_err(|e| ToolchainError::io(path, e))
}

/// Formats a path as a brace-quoted Tcl word.
pub(crate) fn tcl_path(path: &Path) -> String {
    format!("{{{}}}", path.display())
}
