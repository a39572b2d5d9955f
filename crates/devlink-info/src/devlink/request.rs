//! `DEVLINK_CMD_INFO_GET` request encoding.

use super::{DEVLINK_GENL_NAME, DEVLINK_GENL_VERSION, devlink_attr, devlink_cmd};
use crate::netlink::MessageBuilder;
use crate::netlink::Result;
use crate::netlink::genl::{GenlMsgHdr, GenlTransport};
use crate::netlink::message::{NLM_F_ACK, NLM_F_REQUEST};

/// An info request for one devlink device handle (`bus/device`).
///
/// Empty names are encoded as a lone NUL; whether the handle exists is for
/// the kernel to decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRequest {
    bus: String,
    device: String,
}

impl InfoRequest {
    /// Create a request for the given bus and device names.
    pub fn new(bus: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            bus: bus.into(),
            device: device.into(),
        }
    }

    /// Encode the request for an already resolved devlink family ID.
    ///
    /// Fails with [`Error::InvalidMessage`](crate::Error::InvalidMessage) if a
    /// name is too long to fit in a netlink attribute.
    pub fn build(&self, family_id: u16) -> Result<MessageBuilder> {
        let mut builder = MessageBuilder::new(family_id, NLM_F_REQUEST | NLM_F_ACK);
        builder.append(&GenlMsgHdr::new(devlink_cmd::INFO_GET, DEVLINK_GENL_VERSION));
        builder.append_attr_str(devlink_attr::BUS_NAME, &self.bus)?;
        builder.append_attr_str(devlink_attr::DEV_NAME, &self.device)?;
        Ok(builder)
    }

    /// Resolve the devlink family through `transport` and encode the request.
    ///
    /// Fails with whatever the transport reports if devlink is unavailable.
    pub fn resolve<T: GenlTransport + ?Sized>(&self, transport: &T) -> Result<MessageBuilder> {
        let family_id = transport.family_id(DEVLINK_GENL_NAME)?;
        self.build(family_id)
    }
}
