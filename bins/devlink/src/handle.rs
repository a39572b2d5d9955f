//! `BUS/DEVICE` handle parsing.

use std::fmt;
use std::str::FromStr;

/// A devlink device handle, e.g. `pci/0000:84:00.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevHandle {
    pub bus: String,
    pub device: String,
}

impl FromStr for DevHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((bus, device)) if !bus.is_empty() && !device.is_empty() => Ok(Self {
                bus: bus.to_string(),
                device: device.to_string(),
            }),
            _ => Err(format!("expected BUS/DEVICE (e.g. pci/0000:84:00.0), got '{s}'")),
        }
    }
}

impl fmt::Display for DevHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bus, self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let handle: DevHandle = "pci/0000:84:00.0".parse().unwrap();
        assert_eq!(handle.bus, "pci");
        assert_eq!(handle.device, "0000:84:00.0");
        assert_eq!(handle.to_string(), "pci/0000:84:00.0");
    }

    #[test]
    fn test_parse_keeps_slashes_in_device() {
        let handle: DevHandle = "auxiliary/mlx5_core.eth/0".parse().unwrap();
        assert_eq!(handle.bus, "auxiliary");
        assert_eq!(handle.device, "mlx5_core.eth/0");
    }

    #[test]
    fn test_parse_rejects_bare_device() {
        assert!("0000:84:00.0".parse::<DevHandle>().is_err());
        assert!("pci/".parse::<DevHandle>().is_err());
        assert!("/0000:84:00.0".parse::<DevHandle>().is_err());
    }
}
