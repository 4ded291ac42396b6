//! Package resolution and toolchain options.
//!
//! Maps an identifier to its canonical package code and to the options
//! record the selected toolchain consumes. Every table miss is fatal: a wrong
//! package silently changes the pinout of the generated bitstream.

use serde::Serialize;

use crate::efinix::{self, SpiPins};
use crate::error::ResolveError;
use crate::family::{Family, FamilySpec, ToolchainKind};
use crate::intel;
use crate::xilinx::{self, SharedPackage};

/// Toolchain-specific device selection.
///
/// Serializes to the flat option records the vendor backends consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolOptions {
    /// ISE needs family, device, package and speed separately.
    Ise {
        /// ISE family name.
        family: &'static str,
        /// Bare device name.
        device: &'static str,
        /// Bare package name.
        package: &'static str,
        /// Speed grade, negative as ISE writes it.
        speed: i32,
    },
    /// Vivado takes a single part string including the speed suffix.
    Vivado {
        /// Full Vivado part name (e.g. `xc7a35tcsg324-1`).
        part: String,
    },
    /// Quartus takes the full ordering code and family.
    Quartus {
        /// Full device ordering code.
        device: &'static str,
        /// Quartus family name.
        family: &'static str,
    },
    /// Efinity takes the part, family and timing model.
    Efinity {
        /// Device name (e.g. `T20F256`).
        part: String,
        /// Trion or Titanium.
        family: &'static str,
        /// Timing model.
        timing: &'static str,
    },
}

/// The resolved package information for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Canonical package code naming the Xilinx constraint file.
    pub code: Option<String>,
    /// Options record for the toolchain.
    pub options: ToolOptions,
    /// Shared-package device, for families with package-independent bitstreams.
    pub shared: Option<SharedPackage>,
    /// Flash pins for generated Efinix interface scripts.
    pub spi_pins: Option<SpiPins>,
}

/// Resolves the package and toolchain options of a classified identifier.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownPackage`] when a table required by the
/// toolchain has no entry for `part`.
pub fn resolve_package(part: &str, spec: &FamilySpec) -> Result<PackageEntry, ResolveError> {
    match spec.toolchain {
        ToolchainKind::Ise | ToolchainKind::Vivado => resolve_xilinx(part, spec),
        ToolchainKind::Quartus => {
            let device = intel::quartus_device(part)
                .ok_or_else(|| ResolveError::unknown_package(part, "Quartus device"))?;
            Ok(PackageEntry {
                code: None,
                options: ToolOptions::Quartus {
                    device,
                    family: spec.family.name(),
                },
                shared: None,
                spi_pins: None,
            })
        }
        ToolchainKind::Efinity => {
            let device = efinix::parse_device(part)
                .ok_or_else(|| ResolveError::unsupported(part, "not an Efinix device name"))?;
            let pins = efinix::spi_pins(part, &device)?;
            Ok(PackageEntry {
                code: None,
                options: ToolOptions::Efinity {
                    part: device.part_name(),
                    family: spec.family.name(),
                    timing: efinix::TIMING_MODEL,
                },
                shared: None,
                spi_pins: Some(pins),
            })
        }
    }
}

fn resolve_xilinx(part: &str, spec: &FamilySpec) -> Result<PackageEntry, ResolveError> {
    let shared = xilinx::shared_package(spec.family, part);

    let code = match (xilinx::package_alias(part), shared, shared_model(spec.family)) {
        (Some(code), _, _) => code.to_string(),
        (None, Some(shared), Some(model)) => format!("{model}_{}", shared.package),
        _ => return Err(ResolveError::unknown_package(part, "package alias")),
    };

    let options = match spec.toolchain {
        ToolchainKind::Ise => {
            let device = xilinx::ise_device(part)
                .ok_or_else(|| ResolveError::unknown_package(part, "ISE device"))?;
            let speed = spec
                .speed
                .ok_or_else(|| ResolveError::unsupported(part, "no ISE speed grade"))?;
            ToolOptions::Ise {
                family: spec.family.name(),
                device: device.device,
                package: device.package,
                speed,
            }
        }
        _ => ToolOptions::Vivado {
            part: vivado_part(part, spec.family, shared)?,
        },
    };

    Ok(PackageEntry {
        code: Some(code),
        options,
        shared,
        spi_pins: None,
    })
}

/// Builds the Vivado part name, speed suffix included.
fn vivado_part(
    part: &str,
    family: Family,
    shared: Option<SharedPackage>,
) -> Result<String, ResolveError> {
    match family {
        Family::Artix | Family::Spartan7 => {
            let shared =
                shared.ok_or_else(|| ResolveError::unknown_package(part, "shared package"))?;
            Ok(format!(
                "{}{}{}",
                shared.device,
                shared.package,
                xilinx::DEFAULT_VIVADO_SPEED
            ))
        }
        Family::UltraScale => {
            let entry = xilinx::ultrascale_part(part)
                .ok_or_else(|| ResolveError::unknown_package(part, "UltraScale part"))?;
            Ok(format!("{part}{}", entry.speed_suffix))
        }
        _ => Ok(format!("{part}{}", xilinx::DEFAULT_VIVADO_SPEED)),
    }
}

/// Constraint file prefix for shared-package families.
fn shared_model(family: Family) -> Option<&'static str> {
    match family {
        Family::Artix => Some("xc7a"),
        Family::Spartan7 => Some("xc7s"),
        _ => None,
    }
}
