//! Decoding of `DEVLINK_CMD_INFO_GET` replies.

use std::collections::BTreeMap;

use tracing::trace;

use super::{VersionClass, devlink_attr};
use crate::netlink::attr::{get, parse_attrs};
use crate::netlink::{Error, Result};
use crate::netlink::genl::GENL_HDRLEN;

/// Version key (e.g. `fw.mgmt.api`) to value.
pub type InfoMap = BTreeMap<String, String>;

/// Number of attributes nested in every version attribute.
const NESTED_ATTR_NUM: usize = 2;

/// Decode the payload of one version attribute into its (name, value).
///
/// The payload must hold exactly two attributes. The name comes from
/// `INFO_VERSION_NAME`, the value from `INFO_VERSION_VALUE`, in either
/// order; other types are ignored. Both strings have every NUL removed and
/// are trimmed, and neither may end up empty.
pub fn parse_nested_version(payload: &[u8]) -> Result<(String, String)> {
    let attrs = parse_attrs(payload)?;
    if attrs.len() != NESTED_ATTR_NUM {
        return Err(Error::ReadAttributes {
            context: "nested_version",
            detail: "too few attributes in nested structure",
        });
    }

    let mut key = String::new();
    let mut value = String::new();

    for attr in attrs {
        match attr.kind {
            devlink_attr::INFO_VERSION_NAME => key = get::padded_string(attr.payload),
            devlink_attr::INFO_VERSION_VALUE => value = get::padded_string(attr.payload),
            other => trace!(kind = other, "skipping unknown nested version attribute"),
        }
    }

    if key.is_empty() {
        return Err(Error::ReadAttributes {
            context: "nested_version",
            detail: "key not found",
        });
    }

    if value.is_empty() {
        return Err(Error::ReadAttributes {
            context: "nested_version",
            detail: "value not found",
        });
    }

    Ok((key, value))
}

/// Decode a full info reply (GENL header first) into an [`InfoMap`].
///
/// Later entries overwrite earlier ones with the same key. A reply without
/// a single version entry is an error.
pub fn parse_info_msg(msg: &[u8]) -> Result<InfoMap> {
    if msg.len() < GENL_HDRLEN {
        return Err(Error::MessageTooShort {
            expected: GENL_HDRLEN,
            actual: msg.len(),
        });
    }

    let mut info = InfoMap::new();
    for attr in parse_attrs(&msg[GENL_HDRLEN..])? {
        if VersionClass::from_attr(attr.kind).is_none() {
            continue;
        }
        let (key, value) = parse_nested_version(attr.payload)?;
        info.insert(key, value);
    }

    if info.is_empty() {
        return Err(Error::ReadAttributes {
            context: "parse_info",
            detail: "no data found",
        });
    }

    Ok(info)
}
