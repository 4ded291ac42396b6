//! Part identifier resolution for spiOverJtag bitstream builds.
//!
//! Turns a raw FPGA part identifier such as `xc7a35tcsg324` into a
//! [`BuildPlan`]: the family and toolchain, the package-specific constraint
//! file, the ordered file list, the toolchain options and the Verilog
//! defines. Resolution is pure; nothing touches the filesystem.
//!
//! ```
//! use std::path::Path;
//! use soj_parts::{assemble_plan, ToolOptions};
//!
//! let plan = assemble_plan("xc7a35tcsg324", Path::new("."), Path::new("tmp_xc7a35tcsg324")).unwrap();
//! assert_eq!(plan.family.name(), "Artix");
//! assert_eq!(plan.tool_options, ToolOptions::Vivado { part: "xc7a35tcsg324-1".into() });
//! ```
//!
//! The lookup tables reproduce the vendors' naming irregularities as they
//! are; exact-match misses are reported rather than guessed.

#![warn(missing_docs)]

pub mod constraint;
pub mod efinix;
pub mod error;
pub mod family;
pub mod intel;
pub mod package;
pub mod params;
pub mod plan;
pub mod xilinx;

pub use constraint::{ConstraintFile, ConstraintKind, FileType, SourceFile};
pub use error::ResolveError;
pub use family::{classify, Family, FamilySpec, ToolchainKind};
pub use package::{resolve_package, PackageEntry, ToolOptions};
pub use params::{build_parameters, Parameter, ParameterSet};
pub use plan::{assemble_plan, work_dir_name, BuildPlan, GeneratedFile, TOPLEVEL};
