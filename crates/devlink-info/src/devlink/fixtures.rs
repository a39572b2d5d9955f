//! Captured devlink replies for unit tests.

use super::InfoMap;
use crate::netlink::NLMSG_HDRLEN;
use crate::netlink::{MessageBuilder, Result};
use crate::netlink::genl::GenlMsgHdr;

/// `devlink dev info` reply from an Intel E810-C NIC, nlmsghdr stripped.
pub const E810C_INFO_REPLY: &[u8] = include_bytes!("../../tests/fixtures/e810c_info_reply.bin");

/// The map [`E810C_INFO_REPLY`] decodes to.
pub fn e810c_info() -> InfoMap {
    [
        ("board.id", "K85585-000"),
        ("fw.app", "1.3.24.0"),
        ("fw.app.bundle_id", "0xc0000001"),
        ("fw.app.name", "ICE OS Default Package"),
        ("fw.bundle_id", "0x8000706b"),
        ("fw.mgmt", "5.4.5"),
        ("fw.mgmt.api", "1.7"),
        ("fw.mgmt.build", "0x391f7640"),
        ("fw.netlist", "2.40.2000-3.16.0"),
        ("fw.netlist.build", "0x676a489d"),
        ("fw.psid.api", "2.42"),
        ("fw.undi", "1.2898.0"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Build a GENL payload (header + attributes) with the builder's encoding.
pub fn genl_payload(cmd: u8, attrs: impl FnOnce(&mut MessageBuilder) -> Result<()>) -> Vec<u8> {
    let mut builder = MessageBuilder::new(0, 0);
    builder.append(&GenlMsgHdr::new(cmd, 1));
    attrs(&mut builder).unwrap();
    builder.finish()[NLMSG_HDRLEN..].to_vec()
}

/// Encode one name/value pair the way the kernel nests it.
pub fn version_pair(name: &str, value: &str) -> Vec<u8> {
    nested(|b| {
        b.append_attr_str(super::devlink_attr::INFO_VERSION_NAME, name)?;
        b.append_attr_str(super::devlink_attr::INFO_VERSION_VALUE, value)
    })
}

/// Encode an arbitrary attribute list as a nested payload.
pub fn nested(attrs: impl FnOnce(&mut MessageBuilder) -> Result<()>) -> Vec<u8> {
    let mut builder = MessageBuilder::new(0, 0);
    attrs(&mut builder).unwrap();
    builder.finish()[NLMSG_HDRLEN..].to_vec()
}
