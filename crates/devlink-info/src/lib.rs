//! Devlink device info over generic netlink.
//!
//! This crate asks the kernel's devlink subsystem for a device's
//! firmware/version information (`devlink dev info`) and returns it as a
//! flat key/value map such as `"fw.app.name" -> "ICE OS Default Package"`.
//!
//! The netlink layer is written from scratch on top of a thin socket
//! wrapper: a TLV attribute walker, a message builder and a blocking
//! generic netlink connection that resolves the devlink family.
//!
//! # Example
//!
//! ```rust,no_run
//! use devlink_info::devlink::DevlinkInfoClient;
//!
//! fn main() -> devlink_info::Result<()> {
//!     let client = DevlinkInfoClient::new()?;
//!
//!     let versions = client.info_by_name_and_keys(
//!         "pci",
//!         "0000:84:00.0",
//!         &["fw.mgmt", "fw.mgmt.api"],
//!     )?;
//!     for (key, value) in &versions {
//!         println!("{key} {value}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Decoding is available without a socket, e.g. for captured replies:
//!
//! ```rust,no_run
//! use devlink_info::devlink::parse_info_msg;
//!
//! # fn example(reply: &[u8]) -> devlink_info::Result<()> {
//! let info = parse_info_msg(reply)?;
//! println!("{:?}", info.get("fw.app.name"));
//! # Ok(())
//! # }
//! ```

pub mod devlink;
pub mod netlink;

// Re-export common types at crate root for convenience
pub use devlink::{DevlinkInfoClient, InfoMap};
pub use netlink::{Error, Result};
