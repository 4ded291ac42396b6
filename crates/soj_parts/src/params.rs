//! Verilog define parameters.
//!
//! The shared HDL selects family-specific logic through a define named after
//! the family. Some UltraScale boards also need the secondary flash path.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::family::{FamilySpec, ToolchainKind};
use crate::xilinx;

/// Name of the secondary-flash define.
pub const SECONDARY_FLASH: &str = "secondaryflash";

/// Parameter data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Integer value.
    Int,
}

/// How a parameter reaches the design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Verilog preprocessor define.
    VlogDefine,
}

/// One design parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Value type.
    pub datatype: DataType,
    /// Delivery mechanism.
    pub paramtype: ParamType,
    /// Human-readable purpose.
    pub description: &'static str,
    /// Value applied when the build does not override it.
    pub default: i64,
}

impl Parameter {
    /// Creates an integer define set to 1.
    pub fn flag(description: &'static str) -> Self {
        Self {
            datatype: DataType::Int,
            paramtype: ParamType::VlogDefine,
            description,
            default: 1,
        }
    }
}

/// Parameter name to definition.
pub type ParameterSet = BTreeMap<String, Parameter>;

/// Builds the parameter set for an identifier.
///
/// Always contains the family define; the secondary-flash define is layered
/// on top for the UltraScale parts that need it.
pub fn build_parameters(part: &str, spec: &FamilySpec) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.insert(spec.family.define_name(), Parameter::flag("fpga family"));

    if spec.toolchain == ToolchainKind::Vivado
        && xilinx::ultrascale_part(part).is_some_and(|p| p.secondary_flash)
    {
        params.insert(SECONDARY_FLASH.to_string(), Parameter::flag("secondary flash"));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::classify;

    fn params_for(part: &str) -> ParameterSet {
        build_parameters(part, &classify(part).unwrap())
    }

    #[test]
    fn family_define_only() {
        let params = params_for("xc7a35tcsg324");
        assert_eq!(params.len(), 1);
        assert_eq!(params["artix"], Parameter::flag("fpga family"));
    }

    #[test]
    fn family_define_is_normalized() {
        assert!(params_for("10cl025256").contains_key("cyclone10lp"));
        assert!(params_for("xc7k420tffg901").contains_key("kintex7"));
        assert!(params_for("xc7k70tfbg484").contains_key("kintex7"));
        assert!(params_for("xcku3p-ffva676").contains_key("xilinxultrascale"));
    }

    #[test]
    fn secondary_flash_is_layered() {
        let params = params_for("xcku040-ffva1156");
        assert_eq!(params.len(), 2);
        assert_eq!(params["xilinxultrascale"].default, 1);
        assert_eq!(params[SECONDARY_FLASH].default, 1);
        assert_eq!(params[SECONDARY_FLASH].description, "secondary flash");
    }

    #[test]
    fn no_secondary_flash_without_flag() {
        assert!(!params_for("xcku3p-ffva676").contains_key(SECONDARY_FLASH));
        assert!(!params_for("xcvu37p-fsvh2892").contains_key(SECONDARY_FLASH));
    }

    #[test]
    fn exactly_one_family_define() {
        for part in ["xc7a35t", "xc6slx9tqg144", "5ce927", "xcvu9p-flga2104", "t8f81"] {
            let spec = classify(part).unwrap();
            let params = build_parameters(part, &spec);
            let family_defines = params
                .iter()
                .filter(|(_, p)| p.description == "fpga family")
                .count();
            assert_eq!(family_defines, 1, "{part}");
            assert!(params.contains_key(&spec.family.define_name()));
        }
    }

    #[test]
    fn serializes_like_a_descriptor() {
        let json = serde_json::to_value(Parameter::flag("fpga family")).unwrap();
        assert_eq!(json["datatype"], "int");
        assert_eq!(json["paramtype"], "vlogdefine");
        assert_eq!(json["default"], 1);
    }
}
