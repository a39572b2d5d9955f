//! Generic Netlink (GENL) support.
//!
//! Generic Netlink extends the standard netlink protocol with:
//! - Dynamic family ID allocation (resolved via control family)
//! - Family-specific commands and attributes
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ DevlinkInfoClient                       │
//! │ (request building, reply decoding)      │
//! └────────────────┬────────────────────────┘
//!                  │ GenlTransport
//! ┌────────────────▼────────────────────────┐
//! │ GenlConnection                          │
//! │ (family resolution, request/reply)      │
//! └────────────────┬────────────────────────┘
//!                  │
//! ┌────────────────▼────────────────────────┐
//! │ NetlinkSocket (Protocol::Generic)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use devlink_info::netlink::genl::{GenlConnection, GenlTransport};
//!
//! # fn example() -> devlink_info::Result<()> {
//! let conn = GenlConnection::new()?;
//! let id = conn.family_id("devlink")?;
//! println!("devlink family ID: {}", id);
//! # Ok(())
//! # }
//! ```

mod connection;
mod header;

pub use connection::{FamilyInfo, GenlConnection};
pub use header::{GENL_HDRLEN, GenlMsgHdr};

use super::builder::MessageBuilder;
use super::error::Result;

// Control family constants (fixed, not dynamically assigned)
pub const GENL_ID_CTRL: u16 = 0x10;

/// Control family commands
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlCmd {
    /// Reply to a family lookup.
    NewFamily = 1,
    GetFamily = 3,
}

/// Control family attributes
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlAttr {
    FamilyId = 1,
    FamilyName = 2,
    Version = 3,
}

/// Request/reply transport for generic netlink families.
///
/// This is the seam between message encoding/decoding and the kernel.
/// [`GenlConnection`] is the real implementation; anything that can answer
/// a request with raw reply payloads can stand in for it.
///
/// Implementations must tolerate calls from several threads at once when
/// they are `Sync`.
pub trait GenlTransport {
    /// Resolve a family name to its dynamically assigned ID.
    fn family_id(&self, name: &str) -> Result<u16>;

    /// Send a request and collect the replies.
    ///
    /// Each returned buffer is one reply message with the `nlmsghdr`
    /// stripped, so it starts with the GENL header. The transport stamps
    /// the sequence number and port ID.
    fn execute(&self, request: MessageBuilder) -> Result<Vec<Vec<u8>>>;
}

impl<T: GenlTransport + ?Sized> GenlTransport for &T {
    fn family_id(&self, name: &str) -> Result<u16> {
        (**self).family_id(name)
    }

    fn execute(&self, request: MessageBuilder) -> Result<Vec<Vec<u8>>> {
        (**self).execute(request)
    }
}
