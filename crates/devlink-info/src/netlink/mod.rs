//! Netlink protocol plumbing: attribute codec, message framing and a
//! blocking generic netlink connection.

pub mod attr;
mod builder;
mod error;
pub mod genl;
pub mod message;
mod socket;

pub use attr::{Attr, AttrIter, NlAttr, parse_attrs};
pub use builder::MessageBuilder;
pub use error::{Error, Result};
pub use message::{MessageIter, NLMSG_HDRLEN, NlMsgHdr, NlMsgType};
pub use socket::{NetlinkSocket, Protocol};
