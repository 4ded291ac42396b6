//! Error types for part resolution.

/// Errors raised while turning a part identifier into a build plan.
///
/// Both variants are raised before any filesystem or toolchain side effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The identifier does not belong to any supported family.
    #[error("unsupported device '{part}': {reason}")]
    UnsupportedDevice {
        /// The rejected identifier.
        part: String,
        /// Why classification failed.
        reason: String,
    },

    /// The family is known but a required table has no entry for the part.
    ///
    /// This is a data gap: a new part needs a table entry.
    #[error("unknown package for '{part}': no entry in the {table} table")]
    UnknownPackage {
        /// The identifier that missed.
        part: String,
        /// Name of the table that was consulted.
        table: &'static str,
    },
}

impl ResolveError {
    pub(crate) fn unsupported(part: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedDevice {
            part: part.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_package(part: &str, table: &'static str) -> Self {
        Self::UnknownPackage {
            part: part.to_string(),
            table,
        }
    }
}
