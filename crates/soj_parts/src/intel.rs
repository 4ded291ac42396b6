//! Intel (Altera) device table.

/// Short identifier to the full ordering code Quartus expects.
pub(crate) const QUARTUS_DEVICES: &[(&str, &str)] = &[
    ("10cl016484", "10CL016YU484C8G"),
    ("10cl025256", "10CL025YU256C8G"),
    ("10cl055484", "10CL055YU484C8G"),
    ("ep4cgx15027", "EP4CGX150DF27I7"),
    ("ep4ce11523", "EP4CE115F23C7"),
    ("ep4ce2217", "EP4CE22F17C6"),
    ("ep4ce1523", "EP4CE15F23C8"),
    ("ep4ce1017", "EP4CE10F17C8"),
    ("ep4ce622", "EP4CE6E22C8"),
    ("5ce215", "5CEBA2U15C8"),
    ("5ce223", "5CEFA2F23I7"),
    ("5ce523", "5CEFA5F23I7"),
    ("5ce423", "5CEBA4F23C8"),
    ("5ce927", "5CEBA9F27C7"),
    ("5cse423", "5CSEMA4U23C6"),
    ("5cse623", "5CSEBA6U23I7"),
    ("5sgsd5", "5SGSMD5K2F40I3"),
];

/// Returns the full Quartus device name for a short identifier.
pub fn quartus_device(part: &str) -> Option<&'static str> {
    QUARTUS_DEVICES
        .iter()
        .find(|(name, _)| *name == part)
        .map(|(_, device)| *device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_devices() {
        assert_eq!(quartus_device("10cl025256"), Some("10CL025YU256C8G"));
        assert_eq!(quartus_device("ep4ce622"), Some("EP4CE6E22C8"));
        assert_eq!(quartus_device("5sgsd5"), Some("5SGSMD5K2F40I3"));
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(quartus_device("10CL025256"), None);
        assert_eq!(quartus_device("10cl025"), None);
    }
}
