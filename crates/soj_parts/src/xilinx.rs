//! Xilinx package tables.
//!
//! These tables are hand-curated. Entries are looked up by exact identifier
//! and are deliberately not generalized: similar parts are handled
//! differently across toolchain generations.

use crate::family::Family;

/// A device whose single bitstream is valid for every listed package.
#[derive(Debug)]
pub struct SharedDevice {
    /// Device name without package (e.g. `xc7a35t`).
    pub device: &'static str,
    /// Supported packages; the first is the default build package.
    pub packages: &'static [&'static str],
}

const fn shared(device: &'static str, packages: &'static [&'static str]) -> SharedDevice {
    SharedDevice { device, packages }
}

/// Artix-7 devices and their pin-compatible packages.
pub(crate) const ARTIX_DEVICES: &[SharedDevice] = &[
    shared("xc7a12t", &["cpg238", "csg325"]),
    shared("xc7a15t", &["cpg236", "csg324", "csg325", "ftg256", "fgg484"]),
    shared("xc7a25t", &["cpg238", "csg325"]),
    shared("xc7a35t", &["cpg236", "csg324", "csg325", "ftg256", "fgg484"]),
    shared("xc7a50t", &["cpg236", "csg324", "csg325", "ftg256", "fgg484"]),
    shared("xc7a75t", &["csg324", "ftg256", "fgg484", "fgg676"]),
    shared("xc7a100t", &["csg324", "ftg256", "fgg484", "fgg676"]),
    shared("xc7a200t", &["sbg484", "fbg484", "fbg676", "ffg1156"]),
];

/// Spartan-7 devices and their pin-compatible packages.
pub(crate) const SPARTAN7_DEVICES: &[SharedDevice] = &[
    shared("xc7s6", &["ftgb196", "cpga196", "csga225"]),
    shared("xc7s15", &["ftgb196", "cpga196", "csga225"]),
    shared("xc7s25", &["ftgb196", "csga225", "csga324"]),
    shared("xc7s50", &["ftgb196", "csga324", "fgga484"]),
    shared("xc7s75", &["fgga484", "fgga676"]),
    shared("xc7s100", &["fgga484", "fgga676"]),
];

/// A shared-package device resolved from an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedPackage {
    /// The matched device entry.
    pub device: &'static str,
    /// The package the bitstream is built for.
    pub package: &'static str,
    /// Every package sharing the bitstream.
    pub siblings: &'static [&'static str],
}

/// Resolves an Artix-7 or Spartan-7 identifier against the shared tables.
///
/// Accepts a bare device (`xc7a35t`, built for its first package) or a
/// device followed by one of its packages (`xc7a35tcsg324`).
pub fn shared_package(family: Family, part: &str) -> Option<SharedPackage> {
    let table = match family {
        Family::Artix => ARTIX_DEVICES,
        Family::Spartan7 => SPARTAN7_DEVICES,
        _ => return None,
    };

    table.iter().find_map(|entry| {
        let rest = part.strip_prefix(entry.device)?;
        let package = if rest.is_empty() {
            *entry.packages.first()?
        } else {
            *entry.packages.iter().find(|p| **p == rest)?
        };
        Some(SharedPackage {
            device: entry.device,
            package,
            siblings: entry.packages,
        })
    })
}

/// Full identifier to canonical package code, used to name the constraint file.
pub(crate) const PACKAGE_ALIASES: &[(&str, &str)] = &[
    ("xc3s500evq100", "xc3s_vq100"),
    ("xc6slx9tqg144", "xc6s_tqg144"),
    ("xc6slx9csg324", "xc6s_csg324"),
    ("xc6slx16ftg256", "xc6s_ftg256"),
    ("xc6slx16csg324", "xc6s_csg324"),
    ("xc6slx25csg324", "xc6s_csg324"),
    ("xc6slx25tcsg324", "xc6s_t_csg324"),
    ("xc6slx45csg324", "xc6s_csg324"),
    ("xc6slx45tfgg484", "xc6s_t_fgg484"),
    ("xc6slx100fgg484", "xc6s_fgg484"),
    ("xc6slx150tcsg484", "xc6s_csg484"),
    ("xc6slx150tfgg484", "xc6s_t_fgg484"),
    ("xc6vlx130tff784", "xc6v_ff784"),
    ("xc7k70tfbg484", "xc7k_fbg484"),
    ("xc7k70tfbg676", "xc7k_fbg676"),
    ("xc7k160tffg676", "xc7k_ffg676"),
    ("xc7k325tffg676", "xc7k_ffg676"),
    ("xc7k325tffg900", "xc7k_ffg900"),
    ("xc7k420tffg901", "xc7k_ffg901"),
    ("xc7vx330tffg1157", "xc7v_ffg1157"),
    ("xcku040-ffva1156", "xcku040_ffva1156"),
    ("xcku060-ffva1156", "xcku060_ffva1156"),
    ("xcvu9p-flga2104", "xcvu9p_flga2104"),
    ("xcvu37p-fsvh2892", "xcvu37p_fsvh2892"),
    ("xcku3p-ffva676", "xcku3p_ffva676"),
    ("xcku5p-ffvb676", "xcku5p_ffvb676"),
    ("xcau15p-ffvb676", "xcau15p_ffvb676"),
];

/// Looks up the canonical package code of an identifier.
pub fn package_alias(part: &str) -> Option<&'static str> {
    PACKAGE_ALIASES
        .iter()
        .find(|(name, _)| *name == part)
        .map(|(_, code)| *code)
}

/// Device and package names as ISE wants them, given separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IseDevice {
    /// Full identifier.
    pub part: &'static str,
    /// Bare device (e.g. `xc6slx9`).
    pub device: &'static str,
    /// Bare package (e.g. `tqg144`).
    pub package: &'static str,
}

const fn ise(part: &'static str, device: &'static str, package: &'static str) -> IseDevice {
    IseDevice {
        part,
        device,
        package,
    }
}

const ISE_DEVICES: &[IseDevice] = &[
    ise("xc3s500evq100", "xc3s500e", "vq100"),
    ise("xc6slx9tqg144", "xc6slx9", "tqg144"),
    ise("xc6slx9csg324", "xc6slx9", "csg324"),
    ise("xc6slx16ftg256", "xc6slx16", "ftg256"),
    ise("xc6slx16csg324", "xc6slx16", "csg324"),
    ise("xc6slx25csg324", "xc6slx25", "csg324"),
    ise("xc6slx25tcsg324", "xc6slx25t", "csg324"),
    ise("xc6slx45csg324", "xc6slx45", "csg324"),
    ise("xc6slx45tfgg484", "xc6slx45t", "fgg484"),
    ise("xc6slx100fgg484", "xc6slx100", "fgg484"),
    ise("xc6slx150tcsg484", "xc6slx150t", "csg484"),
    ise("xc6slx150tfgg484", "xc6slx150t", "fgg484"),
    ise("xc6vlx130tff784", "xc6vlx130t", "ff784"),
    ise("xc7k325tffg676", "xc7k325t", "ffg676"),
    ise("xc7k325tffg900", "xc7k325t", "ffg900"),
    ise("xc7k420tffg901", "xc7k420t", "ffg901"),
];

/// Looks up the ISE device/package decomposition of an identifier.
pub fn ise_device(part: &str) -> Option<&'static IseDevice> {
    ISE_DEVICES.iter().find(|d| d.part == part)
}

/// Per-part Vivado overrides for UltraScale devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UltraScalePart {
    /// Full identifier.
    pub part: &'static str,
    /// Suffix appended to form the Vivado part name.
    pub speed_suffix: &'static str,
    /// Board stacks a second configuration flash.
    pub secondary_flash: bool,
}

const fn us(
    part: &'static str,
    speed_suffix: &'static str,
    secondary_flash: bool,
) -> UltraScalePart {
    UltraScalePart {
        part,
        speed_suffix,
        secondary_flash,
    }
}

const ULTRASCALE_PARTS: &[UltraScalePart] = &[
    us("xcvu9p-flga2104", "-1-e", true),
    us("xcku5p-ffvb676", "-1-e", true),
    us("xcku3p-ffva676", "-2-e", false),
    us("xcvu37p-fsvh2892", "-2L-e", false),
    us("xcku040-ffva1156", "-2-e", true),
    us("xcku060-ffva1156", "-2-e", true),
    us("xcau15p-ffvb676", "-2-e", false),
];

/// Looks up the UltraScale overrides of an identifier.
pub fn ultrascale_part(part: &str) -> Option<&'static UltraScalePart> {
    ULTRASCALE_PARTS.iter().find(|p| p.part == part)
}

/// Speed suffix for Vivado parts without a specific override.
pub const DEFAULT_VIVADO_SPEED: &str = "-1";
