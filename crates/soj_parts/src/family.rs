//! Part identifier classification.
//!
//! The first four characters of an identifier (ASCII case-folded) select the
//! silicon family and the vendor toolchain that builds it. Kintex-7 parts are
//! further split by device size: small devices go through Vivado, large ones
//! through ISE. Efinix identifiers carry no fixed prefix and are recognized
//! by shape once every prefix rule has failed.

use serde::Serialize;

use crate::efinix;
use crate::error::ResolveError;

/// Largest Kintex-7 device size still built with Vivado.
const KINTEX7_VIVADO_MAX_SIZE: u32 = 160;

/// Vendor toolchains a plan can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolchainKind {
    /// Xilinx ISE, consumes UCF pin constraints.
    Ise,
    /// Xilinx Vivado, consumes XDC physical constraints.
    Vivado,
    /// Intel Quartus, consumes an SDC timing script.
    Quartus,
    /// Efinix Efinity, consumes a generated ISF interface script.
    Efinity,
}

impl ToolchainKind {
    /// Returns the toolchain name used for selection and configuration keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ise => "ise",
            Self::Vivado => "vivado",
            Self::Quartus => "quartus",
            Self::Efinity => "efinity",
        }
    }
}

impl std::fmt::Display for ToolchainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Silicon product lines with a spiOverJtag build recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Intel Cyclone 10 LP.
    Cyclone10Lp,
    /// Intel Cyclone IV E (and GX).
    CycloneIvE,
    /// Intel Cyclone V.
    CycloneV,
    /// Intel Stratix V.
    StratixV,
    /// Xilinx Artix-7.
    Artix,
    /// Xilinx Virtex-7.
    Virtex7,
    /// Xilinx Kintex-7 up to the Vivado size limit.
    Kintex7,
    /// Xilinx Kintex-7 above the Vivado size limit, built with ISE.
    Kintex7Ise,
    /// Xilinx Spartan-7.
    Spartan7,
    /// Xilinx Spartan-6.
    Spartan6,
    /// Xilinx Spartan-3E.
    Spartan3E,
    /// Xilinx Virtex-6.
    Virtex6,
    /// Xilinx UltraScale and UltraScale+.
    UltraScale,
    /// Efinix Trion.
    Trion,
    /// Efinix Titanium.
    Titanium,
}

impl Family {
    /// Returns the family name as the vendor tool expects it.
    ///
    /// These strings are passed verbatim to the toolchains, so the ISE
    /// spellings ("Kintex7", "Spartan6") differ from the Vivado ones.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cyclone10Lp => "Cyclone 10 LP",
            Self::CycloneIvE => "Cyclone IV E",
            Self::CycloneV => "Cyclone V",
            Self::StratixV => "Stratix V",
            Self::Artix => "Artix",
            Self::Virtex7 => "Virtex 7",
            Self::Kintex7 => "Kintex 7",
            Self::Kintex7Ise => "Kintex7",
            Self::Spartan7 => "Spartan 7",
            Self::Spartan6 => "Spartan6",
            Self::Spartan3E => "Spartan3E",
            Self::Virtex6 => "Virtex6",
            Self::UltraScale => "Xilinx UltraScale",
            Self::Trion => "Trion",
            Self::Titanium => "Titanium",
        }
    }

    /// Returns the preprocessor symbol that selects this family in the HDL.
    pub fn define_name(&self) -> String {
        self.name().to_lowercase().replace(' ', "")
    }

    /// Returns true if one bitstream serves every package of a device.
    pub fn shares_bitstream(&self) -> bool {
        matches!(self, Self::Artix | Self::Spartan7)
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Family {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// The family selected for an identifier, with its toolchain and speed grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilySpec {
    /// Silicon family.
    pub family: Family,
    /// Toolchain that builds this family.
    pub toolchain: ToolchainKind,
    /// Default speed grade (ISE needs it explicitly, e.g. `-3`).
    pub speed: Option<i32>,
}

impl FamilySpec {
    const fn new(family: Family, toolchain: ToolchainKind, speed: Option<i32>) -> Self {
        Self {
            family,
            toolchain,
            speed,
        }
    }
}

/// Classifies a part identifier into its family and toolchain.
///
/// # Errors
///
/// Returns [`ResolveError::UnsupportedDevice`] if no rule matches or if a
/// Kintex-7 identifier carries no numeric device size.
pub fn classify(part: &str) -> Result<FamilySpec, ResolveError> {
    use Family::*;
    use ToolchainKind::*;

    let prefix: String = part.chars().take(4).collect::<String>().to_ascii_lowercase();

    let spec = match prefix.as_str() {
        "10cl" => FamilySpec::new(Cyclone10Lp, Quartus, None),
        "ep4c" => FamilySpec::new(CycloneIvE, Quartus, None),
        p if p.starts_with("5c") => FamilySpec::new(CycloneV, Quartus, None),
        p if p.starts_with("5s") => FamilySpec::new(StratixV, Quartus, None),
        "xc7a" => FamilySpec::new(Artix, Vivado, None),
        "xc7v" => FamilySpec::new(Virtex7, Vivado, None),
        "xc7k" => {
            if kintex7_size(part)? <= KINTEX7_VIVADO_MAX_SIZE {
                FamilySpec::new(Kintex7, Vivado, Some(-2))
            } else {
                FamilySpec::new(Kintex7Ise, Ise, Some(-2))
            }
        }
        "xc7s" => FamilySpec::new(Spartan7, Vivado, None),
        "xc6s" => FamilySpec::new(Spartan6, Ise, Some(-3)),
        "xc3s" => FamilySpec::new(Spartan3E, Ise, Some(-4)),
        "xc6v" => FamilySpec::new(Virtex6, Ise, Some(-1)),
        "xcvu" | "xcku" | "xcau" => FamilySpec::new(UltraScale, Vivado, None),
        _ => match efinix::parse_device(part) {
            Some(device) => FamilySpec::new(device.family, Efinity, None),
            None => {
                return Err(ResolveError::unsupported(
                    part,
                    format!("unknown prefix '{prefix}'"),
                ))
            }
        },
    };

    log::debug!(
        "classified {part} as {} ({})",
        spec.family,
        spec.toolchain
    );
    Ok(spec)
}

/// Extracts the device size of a Kintex-7 identifier (`xc7k325tffg900` → 325).
fn kintex7_size(part: &str) -> Result<u32, ResolveError> {
    let rest = part.get(4..).unwrap_or_default().to_ascii_lowercase();
    let token = rest.split(['t', 'k']).next().unwrap_or_default();
    token.parse().map_err(|_| {
        ResolveError::unsupported(part, format!("invalid Kintex-7 device size '{token}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_artix() {
        let spec = classify("xc7a35tcsg324").unwrap();
        assert_eq!(spec.family, Family::Artix);
        assert_eq!(spec.toolchain, ToolchainKind::Vivado);
        assert_eq!(spec.speed, None);
    }

    #[test]
    fn classify_intel_families() {
        assert_eq!(classify("10cl025256").unwrap().family, Family::Cyclone10Lp);
        assert_eq!(classify("ep4ce2217").unwrap().family, Family::CycloneIvE);
        assert_eq!(classify("5cse423").unwrap().family, Family::CycloneV);
        assert_eq!(classify("5sgsd5").unwrap().family, Family::StratixV);
        assert_eq!(
            classify("10cl025256").unwrap().toolchain,
            ToolchainKind::Quartus
        );
    }

    #[test]
    fn classify_prefix_case_insensitive() {
        let spec = classify("XC6SLX9tqg144").unwrap();
        assert_eq!(spec.family, Family::Spartan6);
        assert_eq!(spec.toolchain, ToolchainKind::Ise);
        assert_eq!(spec.speed, Some(-3));
    }

    #[test]
    fn classify_ise_speed_grades() {
        assert_eq!(classify("xc3s500evq100").unwrap().speed, Some(-4));
        assert_eq!(classify("xc6vlx130tff784").unwrap().speed, Some(-1));
    }

    #[test]
    fn kintex_split_by_size() {
        let small = classify("xc7k160tffg676").unwrap();
        assert_eq!(small.family, Family::Kintex7);
        assert_eq!(small.toolchain, ToolchainKind::Vivado);
        assert_eq!(small.speed, Some(-2));

        let large = classify("xc7k325tffg900").unwrap();
        assert_eq!(large.family, Family::Kintex7Ise);
        assert_eq!(large.toolchain, ToolchainKind::Ise);
        assert_eq!(large.family.name(), "Kintex7");
    }

    #[test]
    fn kintex_without_size_is_unsupported() {
        let err = classify("xc7kabc").unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedDevice { .. }));
        assert!(err.to_string().contains("device size"));
    }

    #[test]
    fn classify_ultrascale() {
        for part in ["xcvu9p-flga2104", "xcku040-ffva1156", "xcau15p-ffvb676"] {
            let spec = classify(part).unwrap();
            assert_eq!(spec.family, Family::UltraScale);
            assert_eq!(spec.toolchain, ToolchainKind::Vivado);
        }
    }

    #[test]
    fn classify_efinix() {
        let trion = classify("t20f256").unwrap();
        assert_eq!(trion.family, Family::Trion);
        assert_eq!(trion.toolchain, ToolchainKind::Efinity);

        let titanium = classify("Ti60F225").unwrap();
        assert_eq!(titanium.family, Family::Titanium);
    }

    #[test]
    fn unknown_prefix_rejected() {
        let err = classify("zzzz1234").unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnsupportedDevice {
                part: "zzzz1234".to_string(),
                reason: "unknown prefix 'zzzz'".to_string(),
            }
        );
    }

    #[test]
    fn short_identifier_rejected() {
        assert!(classify("xc").is_err());
        assert!(classify("").is_err());
    }

    #[test]
    fn classification_is_deterministic() {
        for part in ["xc7a35t", "xc7k420tffg901", "5ce927", "xcku3p-ffva676"] {
            assert_eq!(classify(part).unwrap(), classify(part).unwrap());
        }
    }

    #[test]
    fn define_names() {
        assert_eq!(Family::Cyclone10Lp.define_name(), "cyclone10lp");
        assert_eq!(Family::Kintex7.define_name(), "kintex7");
        assert_eq!(Family::Kintex7Ise.define_name(), "kintex7");
        assert_eq!(Family::UltraScale.define_name(), "xilinxultrascale");
        assert_eq!(Family::Artix.define_name(), "artix");
    }

    #[test]
    fn shared_bitstream_families() {
        assert!(Family::Artix.shares_bitstream());
        assert!(Family::Spartan7.shares_bitstream());
        assert!(!Family::UltraScale.shares_bitstream());
    }
}
