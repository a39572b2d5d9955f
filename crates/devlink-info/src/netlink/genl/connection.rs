//! Generic Netlink connection with family resolution.

use std::sync::Mutex;

use tracing::debug;

use super::header::{GENL_HDRLEN, GenlMsgHdr};
use super::{CtrlAttr, CtrlCmd, GENL_ID_CTRL, GenlTransport};
use crate::netlink::attr::{AttrIter, get};
use crate::netlink::builder::MessageBuilder;
use crate::netlink::error::{Error, Result};
use crate::netlink::message::{MessageIter, NLM_F_ACK, NLM_F_REQUEST, NlMsgError};
use crate::netlink::socket::{NetlinkSocket, Protocol};

/// Information about a Generic Netlink family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyInfo {
    /// Dynamically assigned family ID (used as nlmsg_type).
    pub id: u16,
    /// Family version.
    pub version: u8,
}

/// Generic Netlink connection.
///
/// Resolves family IDs and runs request/reply exchanges on a blocking
/// socket. Family lookups are not cached; every call asks the kernel.
///
/// The connection can be shared between threads. Exchanges are serialized:
/// a request is sent only after the previous one has been answered, so
/// every datagram read belongs to the exchange that reads it.
///
/// # Example
///
/// ```rust,no_run
/// use devlink_info::netlink::genl::GenlConnection;
///
/// # fn example() -> devlink_info::Result<()> {
/// let conn = GenlConnection::new()?;
///
/// if conn.get_family("devlink").is_ok() {
///     println!("devlink is available");
/// }
/// # Ok(())
/// # }
/// ```
pub struct GenlConnection {
    socket: NetlinkSocket,
    /// Held from send until the request is answered.
    exchange_lock: Mutex<()>,
}

impl GenlConnection {
    /// Create a new Generic Netlink connection.
    pub fn new() -> Result<Self> {
        Ok(Self {
            socket: NetlinkSocket::new(Protocol::Generic)?,
            exchange_lock: Mutex::new(()),
        })
    }

    /// Get information about a Generic Netlink family.
    pub fn get_family(&self, name: &str) -> Result<FamilyInfo> {
        let mut builder = MessageBuilder::new(GENL_ID_CTRL, NLM_F_REQUEST | NLM_F_ACK);
        builder.append(&GenlMsgHdr::new(CtrlCmd::GetFamily as u8, 1));
        builder.append_attr_str(CtrlAttr::FamilyName as u16, name)?;

        let replies = self
            .exchange(builder)
            .map_err(|e| family_lookup_error(name, e))?;

        let payload = replies.first().ok_or_else(|| Error::FamilyNotFound {
            name: name.to_string(),
        })?;
        let info = parse_family_reply(payload)?;
        debug!(family = name, id = info.id, version = info.version, "resolved genl family");
        Ok(info)
    }

    /// Send a request and collect reply payloads until the kernel ACKs it.
    fn exchange(&self, mut builder: MessageBuilder) -> Result<Vec<Vec<u8>>> {
        // The lock guards no data, so a poisoned lock is still usable.
        let _guard = self
            .exchange_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let seq = self.socket.next_seq();
        builder.set_seq(seq);
        builder.set_pid(self.socket.pid());

        let msg = builder.finish();
        debug!(seq, len = msg.len(), "sending genl request");
        self.socket.send(&msg)?;

        let mut replies = Vec::new();
        loop {
            let data = self.socket.recv_msg()?;
            if collect_replies(&data, seq, &mut replies)? {
                break;
            }
        }

        debug!(seq, replies = replies.len(), "genl request answered");
        Ok(replies)
    }
}

impl GenlTransport for GenlConnection {
    fn family_id(&self, name: &str) -> Result<u16> {
        Ok(self.get_family(name)?.id)
    }

    fn execute(&self, request: MessageBuilder) -> Result<Vec<Vec<u8>>> {
        self.exchange(request)
    }
}

/// Process one received datagram for the request with sequence number `seq`.
///
/// Reply payloads are appended to `replies`. Returns `true` once the
/// exchange is over (ACK or DONE). Messages carrying another sequence
/// number are skipped. A non-zero `NLMSG_ERROR` becomes [`Error::Kernel`].
fn collect_replies(data: &[u8], seq: u32, replies: &mut Vec<Vec<u8>>) -> Result<bool> {
    for result in MessageIter::new(data) {
        let (header, payload) = result?;

        if header.nlmsg_seq != seq {
            continue;
        }

        if header.is_error() {
            let err = NlMsgError::from_bytes(payload)?;
            if !err.is_ack() {
                return Err(Error::from_errno(err.error));
            }
            return Ok(true);
        }

        if header.is_done() {
            return Ok(true);
        }

        replies.push(payload.to_vec());
    }

    Ok(false)
}

/// Map a failed family lookup: the kernel answers ENOENT for unknown names.
fn family_lookup_error(name: &str, err: Error) -> Error {
    if err.errno() == Some(libc::ENOENT) {
        Error::FamilyNotFound {
            name: name.to_string(),
        }
    } else {
        err.with_context(format!("resolving family {name}"))
    }
}

/// Parse a CTRL_CMD_GETFAMILY reply payload (GENL header included).
fn parse_family_reply(payload: &[u8]) -> Result<FamilyInfo> {
    let header = GenlMsgHdr::from_bytes(payload)?;
    if header.cmd != CtrlCmd::NewFamily as u8 {
        return Err(Error::InvalidMessage(format!(
            "unexpected control command {} in family reply",
            header.cmd
        )));
    }

    let mut id: Option<u16> = None;
    let mut version: u8 = 0;

    for attr in AttrIter::new(&payload[GENL_HDRLEN..]) {
        let attr = attr?;
        match attr.kind {
            t if t == CtrlAttr::FamilyId as u16 => {
                id = Some(get::u16_ne(attr.payload)?);
            }
            t if t == CtrlAttr::Version as u16 => {
                version = get::u32_ne(attr.payload)? as u8;
            }
            _ => {}
        }
    }

    let id = id.ok_or_else(|| Error::InvalidMessage("missing family ID".into()))?;

    Ok(FamilyInfo { id, version })
}
