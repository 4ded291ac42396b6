//! Constraint selection and source file list assembly.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ResolveError;
use crate::family::{Family, FamilySpec, ToolchainKind};
use crate::package::PackageEntry;

/// Shared bridge logic, last in every Xilinx and Intel file list.
pub const CORE_SOURCE: &str = "spiOverJtag_core.v";
/// Xilinx wrapper around the BSCAN primitive.
pub const XILINX_SOURCE: &str = "xilinx_spiOverJtag.v";
/// Intel wrapper around the virtual JTAG primitive.
pub const ALTERA_SOURCE: &str = "altera_spiOverJtag.v";
/// Intel timing constraints, attached to every Quartus build.
pub const ALTERA_SDC: &str = "altera_spiOverJtag.sdc";
/// Extra pin setup for Cyclone V and Stratix V.
pub const CYCLONE_V_TCL: &str = "constr_cycloneV.tcl";
/// Efinix wrapper around the JTAG user tap.
pub const EFINIX_SOURCE: &str = "efinix_spiOverJtag.v";

/// File-type tags understood by the toolchain backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileType {
    /// Verilog source.
    #[serde(rename = "verilogSource")]
    VerilogSource,
    /// Tcl script sourced into the project.
    #[serde(rename = "tclSource")]
    TclSource,
    /// ISE user constraints.
    #[serde(rename = "UCF")]
    Ucf,
    /// Vivado design constraints.
    #[serde(rename = "xdc")]
    Xdc,
    /// Synopsys design constraints.
    #[serde(rename = "SDC")]
    Sdc,
    /// Efinity interface script.
    #[serde(rename = "ISF")]
    Isf,
}

/// One entry of a build plan's file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Absolute or source-root relative path.
    pub name: PathBuf,
    /// How the toolchain consumes the file.
    pub file_type: FileType,
}

impl SourceFile {
    /// Creates a file entry.
    pub fn new(name: impl Into<PathBuf>, file_type: FileType) -> Self {
        Self {
            name: name.into(),
            file_type,
        }
    }
}

/// Constraint formats, one per toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintKind {
    /// ISE pin and timing constraints (`.ucf`).
    Ucf,
    /// Vivado physical constraints (`.xdc`).
    Xdc,
    /// Quartus timing script (`.sdc`).
    Sdc,
    /// Efinity interface script (`.isf`), generated per build.
    Isf,
}

impl ConstraintKind {
    /// Returns the constraint format consumed by a toolchain.
    pub fn for_toolchain(toolchain: ToolchainKind) -> Self {
        match toolchain {
            ToolchainKind::Ise => Self::Ucf,
            ToolchainKind::Vivado => Self::Xdc,
            ToolchainKind::Quartus => Self::Sdc,
            ToolchainKind::Efinity => Self::Isf,
        }
    }

    /// Returns the filename extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ucf => "ucf",
            Self::Xdc => "xdc",
            Self::Sdc => "sdc",
            Self::Isf => "isf",
        }
    }

    /// Returns the file-type tag for the file list.
    pub fn file_type(&self) -> FileType {
        match self {
            Self::Ucf => FileType::Ucf,
            Self::Xdc => FileType::Xdc,
            Self::Sdc => FileType::Sdc,
            Self::Isf => FileType::Isf,
        }
    }
}

/// The constraint file selected for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintFile {
    /// Where the file is read from (or generated to, for ISF).
    pub path: PathBuf,
    /// Constraint format.
    pub kind: ConstraintKind,
}

/// Assembles the ordered file list of a plan.
///
/// The family wrapper always precedes its constraint file and the shared
/// core comes last; the Quartus flow is sensitive to this order. `sources`
/// is where HDL and constraint files live, `work_dir` receives generated
/// files.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownPackage`] if a Xilinx plan has no
/// canonical package code.
pub fn assemble_files(
    part: &str,
    spec: &FamilySpec,
    entry: &PackageEntry,
    sources: &Path,
    work_dir: &Path,
    name: &str,
) -> Result<(Vec<SourceFile>, ConstraintFile), ResolveError> {
    let kind = ConstraintKind::for_toolchain(spec.toolchain);
    let mut files = Vec::new();

    let constraint = match spec.toolchain {
        ToolchainKind::Ise | ToolchainKind::Vivado => {
            let code = entry
                .code
                .as_deref()
                .ok_or_else(|| ResolveError::unknown_package(part, "package alias"))?;
            let path = sources.join(format!("constr_{code}.{}", kind.extension()));
            files.push(SourceFile::new(sources.join(XILINX_SOURCE), FileType::VerilogSource));
            files.push(SourceFile::new(&path, kind.file_type()));
            files.push(SourceFile::new(sources.join(CORE_SOURCE), FileType::VerilogSource));
            ConstraintFile { path, kind }
        }
        ToolchainKind::Quartus => {
            if matches!(spec.family, Family::CycloneV | Family::StratixV) {
                files.push(SourceFile::new(sources.join(CYCLONE_V_TCL), FileType::TclSource));
            }
            let path = sources.join(ALTERA_SDC);
            files.push(SourceFile::new(sources.join(ALTERA_SOURCE), FileType::VerilogSource));
            files.push(SourceFile::new(&path, kind.file_type()));
            files.push(SourceFile::new(sources.join(CORE_SOURCE), FileType::VerilogSource));
            ConstraintFile { path, kind }
        }
        ToolchainKind::Efinity => {
            let path = work_dir.join(format!("{name}.{}", kind.extension()));
            files.push(SourceFile::new(sources.join(EFINIX_SOURCE), FileType::VerilogSource));
            files.push(SourceFile::new(&path, kind.file_type()));
            ConstraintFile { path, kind }
        }
    };

    Ok((files, constraint))
}
