//! Efinix Trion and Titanium identifiers, SPI pinouts and ISF generation.
//!
//! Efinix devices are named `T<size><package>` (Trion) or
//! `Ti<size><package>` (Titanium). The bridge needs the configuration flash
//! pins of the package, which are only tabulated for Trion.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ResolveError;
use crate::family::Family;

/// Timing model passed to Efinity for every device.
pub const TIMING_MODEL: &str = "C2";

static DEVICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(TI?)(\d+)([A-Z]\d+)$").expect("valid device regex"));

/// A decoded Efinix identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EfinixDevice {
    /// Trion or Titanium.
    pub family: Family,
    /// Logic size token (e.g. `20` for T20).
    pub size: u32,
    /// Package code, upper case (e.g. `F256`).
    pub package: String,
}

impl EfinixDevice {
    /// Returns the device name Efinity expects (`T20F256`, `Ti60F225`).
    pub fn part_name(&self) -> String {
        let prefix = match self.family {
            Family::Titanium => "Ti",
            _ => "T",
        };
        format!("{prefix}{}{}", self.size, self.package)
    }
}

/// Decodes an Efinix identifier, case-insensitively.
pub fn parse_device(part: &str) -> Option<EfinixDevice> {
    let upper = part.to_ascii_uppercase();
    let caps = DEVICE_RE.captures(&upper)?;
    let family = if &caps[1] == "TI" {
        Family::Titanium
    } else {
        Family::Trion
    };
    Some(EfinixDevice {
        family,
        size: caps[2].parse().ok()?,
        package: caps[3].to_string(),
    })
}

/// Package balls wired to the configuration flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpiPins {
    /// Flash chip select.
    pub ss_n: &'static str,
    /// Flash clock.
    pub cclk: &'static str,
    /// Data 0 (MOSI in single mode).
    pub cdi0: &'static str,
    /// Data 1 (MISO in single mode).
    pub cdi1: &'static str,
    /// Data 2.
    pub cdi2: &'static str,
    /// Data 3.
    pub cdi3: &'static str,
}

const fn pins(
    ss_n: &'static str,
    cclk: &'static str,
    cdi0: &'static str,
    cdi1: &'static str,
    cdi2: &'static str,
    cdi3: &'static str,
) -> SpiPins {
    SpiPins {
        ss_n,
        cclk,
        cdi0,
        cdi1,
        cdi2,
        cdi3,
    }
}

/// Trion flash pinout per package.
const TRION_PINOUT: &[(&str, SpiPins)] = &[
    // t4/t8
    ("F49", pins("G3", "F3", "F2", "F1", "E2", "D2")),
    ("F81", pins("J4", "H4", "F4", "H3", "J2", "F3")),
    // t13/t20
    ("F169", pins("L1", "K1", "J1", "J2", "F1", "G2")),
    ("F256", pins("P3", "H3", "L3", "N1", "K4", "L2")),
    // t20/t85/t120
    ("F324", pins("P15", "N13", "M13", "N14", "K14", "K18")),
    ("F400", pins("W18", "W19", "Y17", "Y18", "P15", "R17")),
    ("Q100", pins("24", "26", "19", "18", "8", "14")),
    ("Q144", pins("31", "30", "29", "28", "20", "19")),
    ("W80", pins("K3", "K2", "J1", "J2", "F1", "G2")),
];

/// Looks up the flash pins of an Efinix package.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownPackage`] when the family has no pinout
/// table (Titanium) or the package is not listed.
pub fn spi_pins(part: &str, device: &EfinixDevice) -> Result<SpiPins, ResolveError> {
    let table = match device.family {
        Family::Trion => TRION_PINOUT,
        _ => return Err(ResolveError::unknown_package(part, "Efinix pinout")),
    };
    table
        .iter()
        .find(|(pkg, _)| *pkg == device.package)
        .map(|(_, pins)| *pins)
        .ok_or_else(|| ResolveError::unknown_package(part, "Efinix pinout"))
}

/// JTAG user-tap pads routed to the bridge logic.
const JTAG_PADS: &[&str] = &[
    "CAPTURE", "DRCK", "RESET", "RUNTEST", "SEL", "SHIFT", "TCK", "TDI", "TMS", "UPDATE", "TDO",
];

/// Renders the Efinity interface script binding the JTAG tap and flash pins.
pub fn render_isf(pins: &SpiPins) -> String {
    let mut lines: Vec<String> = vec![
        "# Device setting".into(),
        r#"design.set_device_property("1A","VOLTAGE","3.3","IOBANK")"#.into(),
        r#"design.set_device_property("1B","VOLTAGE","3.3","IOBANK")"#.into(),
        r#"design.set_device_property("1C","VOLTAGE","1.1","IOBANK")"#.into(),
        r#"design.set_device_property("2A","VOLTAGE","3.3","IOBANK")"#.into(),
        r#"design.set_device_property("2B","VOLTAGE","3.3","IOBANK")"#.into(),
        String::new(),
        "# ---------- JTAG 1 ---------".into(),
        r#"design.create_block("jtag_soc", block_type="JTAG")"#.into(),
        r#"design.assign_resource("jtag_soc", "JTAG_USER1", "JTAG")"#.into(),
    ];

    for pad in JTAG_PADS {
        lines.push(format!(
            r#"design.set_property("jtag_soc", "{pad}", "jtag_1_{pad}", "JTAG")"#
        ));
    }

    let flash = [
        ("csn", false, pins.ss_n),
        ("sck", false, pins.cclk),
        ("sdi_dq0", false, pins.cdi0),
        ("sdo_dq1", true, pins.cdi1),
    ];
    for (name, input, ball) in flash {
        if input {
            lines.push(format!(r#"design.create_input_gpio("{name}")"#));
        } else {
            lines.push(format!(r#"design.create_output_gpio("{name}")"#));
        }
        lines.push(format!(r#"design.assign_pkg_pin("{name}", "{ball}")"#));
    }

    lines.push(String::new());
    lines.join("\n")
}
