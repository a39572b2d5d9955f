//! Devlink device info over generic netlink.
//!
//! The kernel answers `DEVLINK_CMD_INFO_GET` with a flat list of
//! attributes. Version information arrives as `INFO_VERSION_FIXED`,
//! `INFO_VERSION_RUNNING` and `INFO_VERSION_STORED` attributes, each nesting
//! one `INFO_VERSION_NAME` / `INFO_VERSION_VALUE` pair:
//!
//! ```text
//! genlmsghdr (cmd 51, version 1)
//! BUS_NAME        "pci"
//! DEV_NAME        "0000:84:00.0"
//! ...
//! VERSION_FIXED   ┬ VERSION_NAME  "board.id"
//!                 └ VERSION_VALUE "K85585-000"
//! VERSION_RUNNING ┬ VERSION_NAME  "fw.mgmt"
//!                 └ VERSION_VALUE "5.4.5"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use devlink_info::devlink::DevlinkInfoClient;
//!
//! # fn example() -> devlink_info::Result<()> {
//! let client = DevlinkInfoClient::new()?;
//! let info = client.info_by_name("pci", "0000:84:00.0")?;
//! for (key, value) in &info {
//!     println!("{key}: {value}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
#[cfg(test)]
pub(crate) mod fixtures;
mod info;
mod request;

pub use client::DevlinkInfoClient;
pub use info::{InfoMap, parse_info_msg, parse_nested_version};
pub use request::InfoRequest;

/// Generic netlink family name.
pub const DEVLINK_GENL_NAME: &str = "devlink";
/// Generic netlink family version.
pub const DEVLINK_GENL_VERSION: u8 = 1;

/// Key under which the DDP package name is reported.
pub const FW_APP_NAME_KEY: &str = "fw.app.name";
/// Bus name for PCI devices.
pub const PCI_BUS: &str = "pci";

/// Devlink commands.
pub mod devlink_cmd {
    pub const INFO_GET: u8 = 51;
}

/// Devlink attributes used by info requests and replies.
pub mod devlink_attr {
    pub const BUS_NAME: u16 = 1;
    pub const DEV_NAME: u16 = 2;
    pub const INFO_DRIVER_NAME: u16 = 98;
    /// Nested: versions fixed in hardware.
    pub const INFO_VERSION_FIXED: u16 = 100;
    /// Nested: versions currently running.
    pub const INFO_VERSION_RUNNING: u16 = 101;
    /// Nested: versions stored in flash.
    pub const INFO_VERSION_STORED: u16 = 102;
    pub const INFO_VERSION_NAME: u16 = 103;
    pub const INFO_VERSION_VALUE: u16 = 104;
}

/// Which kind of version attribute carried an entry.
///
/// The class is only used to select attributes; it is not kept in the
/// resulting [`InfoMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionClass {
    Fixed,
    Running,
    Stored,
}

impl VersionClass {
    /// Classify a top-level attribute type.
    pub fn from_attr(kind: u16) -> Option<Self> {
        match kind {
            devlink_attr::INFO_VERSION_FIXED => Some(Self::Fixed),
            devlink_attr::INFO_VERSION_RUNNING => Some(Self::Running),
            devlink_attr::INFO_VERSION_STORED => Some(Self::Stored),
            _ => None,
        }
    }
}
