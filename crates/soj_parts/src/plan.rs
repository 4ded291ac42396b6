//! The build plan aggregate.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constraint::{assemble_files, ConstraintFile, SourceFile};
use crate::efinix;
use crate::error::ResolveError;
use crate::family::{classify, Family, FamilySpec, ToolchainKind};
use crate::package::{resolve_package, ToolOptions};
use crate::params::{build_parameters, ParameterSet};

/// Top-level module of every bridge design.
pub const TOPLEVEL: &str = "spiOverJtag";

/// Returns the working directory name for an identifier.
pub fn work_dir_name(part: &str) -> String {
    format!("tmp_{part}")
}

/// A file the driver writes into the working directory before configuring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Destination path.
    pub path: PathBuf,
    /// File contents.
    pub contents: String,
}

/// Everything a toolchain backend needs to build one bitstream.
///
/// Built once per invocation and handed by value to the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    /// The identifier the plan was built from.
    pub part: String,
    /// Resolved family.
    pub family: Family,
    /// Selected toolchain.
    pub toolchain: ToolchainKind,
    /// Project name, also the bitstream file stem.
    pub name: String,
    /// Top-level module.
    pub toplevel: &'static str,
    /// Ordered file list.
    pub files: Vec<SourceFile>,
    /// The constraint file, also present in `files`.
    pub constraint: ConstraintFile,
    /// Toolchain options record.
    pub tool_options: ToolOptions,
    /// Verilog defines.
    pub parameters: ParameterSet,
    /// Files to generate before the toolchain is configured.
    pub generated: Vec<GeneratedFile>,
    /// Other identifiers served by the same bitstream.
    pub bitstream_aliases: Vec<String>,
}

/// Resolves `part` into a complete build plan.
///
/// `sources` is the directory holding the HDL and constraint files and
/// `work_dir` the per-part working directory. Nothing is read from or
/// written to either: a failure here leaves no trace on disk.
///
/// # Errors
///
/// Returns [`ResolveError`] if the identifier is unsupported or missing
/// from a required table.
pub fn assemble_plan(
    part: &str,
    sources: &Path,
    work_dir: &Path,
) -> Result<BuildPlan, ResolveError> {
    let spec = classify(part)?;
    build_plan(part, &spec, sources, work_dir)
}

fn build_plan(
    part: &str,
    spec: &FamilySpec,
    sources: &Path,
    work_dir: &Path,
) -> Result<BuildPlan, ResolveError> {
    let entry = resolve_package(part, spec)?;

    let name = match spec.toolchain {
        ToolchainKind::Efinity => format!("efinix_{TOPLEVEL}"),
        _ => TOPLEVEL.to_string(),
    };

    let (files, constraint) = assemble_files(part, spec, &entry, sources, work_dir, &name)?;
    let parameters = build_parameters(part, spec);

    let generated = match entry.spi_pins {
        Some(pins) => vec![GeneratedFile {
            path: constraint.path.clone(),
            contents: efinix::render_isf(&pins),
        }],
        None => Vec::new(),
    };

    let bitstream_aliases = match entry.shared {
        Some(shared) if spec.family.shares_bitstream() => shared
            .siblings
            .iter()
            .map(|pkg| format!("{}{pkg}", shared.device))
            .filter(|alias| alias != part)
            .collect(),
        _ => Vec::new(),
    };

    log::debug!(
        "plan for {part}: {} files, {} parameters, {} aliases",
        files.len(),
        parameters.len(),
        bitstream_aliases.len()
    );

    Ok(BuildPlan {
        part: part.to_string(),
        family: spec.family,
        toolchain: spec.toolchain,
        name,
        toplevel: TOPLEVEL,
        files,
        constraint,
        tool_options: entry.options,
        parameters,
        generated,
        bitstream_aliases,
    })
}
