//! Error types for toolchain configuration and execution.

use std::path::PathBuf;
use std::process::ExitStatus;

use crate::driver::DriverState;

/// Errors raised while configuring or running a vendor toolchain.
///
/// None of these are retried: vendor runs are slow and not idempotent, so a
/// failure is reported as-is and the working directory is left in place.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// A file or directory in the working tree could not be written.
    #[error("toolchain I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The tool executable could not be located in the configured PATH.
    #[error("cannot locate '{program}': {reason}")]
    Locate {
        /// Program name that was searched for.
        program: String,
        /// Why the lookup failed.
        reason: String,
    },

    /// The tool process could not be started.
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The tool ran and reported failure.
    #[error("{tool} {step} failed ({status})")]
    Failed {
        /// Toolchain name.
        tool: &'static str,
        /// What the tool was asked to do.
        step: String,
        /// Exit status of the tool.
        status: ExitStatus,
    },

    /// The plan cannot be expressed for this toolchain.
    #[error("{tool} cannot use this plan: {reason}")]
    InvalidPlan {
        /// Toolchain name.
        tool: &'static str,
        /// What is wrong with the plan.
        reason: String,
    },

    /// A driver step was requested out of order.
    #[error("cannot {action} while {state}")]
    InvalidState {
        /// The requested step.
        action: &'static str,
        /// The driver state at the time.
        state: DriverState,
    },
}

impl ToolchainError {
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
    fn display_invalid_state() {
        let err = ToolchainError::InvalidState {
            action: "build",
            state: DriverState::Created,
        };
        assert_eq!(format!("{err}"), "cannot build while created");
    }

    #[test]
    fn display_invalid_plan() {
        let err = ToolchainError::InvalidPlan {
            tool: "vivado",
            reason: "expected Vivado options".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "vivado cannot use this plan: expected Vivado options"
        );
    }
}
