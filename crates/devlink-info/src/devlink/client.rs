//! High-level devlink info queries.

use tracing::debug;

use super::info::{InfoMap, parse_info_msg};
use super::request::InfoRequest;
use super::{FW_APP_NAME_KEY, PCI_BUS};
use crate::netlink::{Error, Result};
use crate::netlink::genl::{GENL_HDRLEN, GenlConnection, GenlTransport};

/// Devlink info client.
///
/// Every query sends one `DEVLINK_CMD_INFO_GET` request, decodes the first
/// reply and keeps nothing between calls.
///
/// # Example
///
/// ```rust,no_run
/// use devlink_info::devlink::DevlinkInfoClient;
///
/// # fn example() -> devlink_info::Result<()> {
/// let client = DevlinkInfoClient::new()?;
///
/// if client.is_devlink_supported_by_pci_device("0000:84:00.0") {
///     println!("DDP: {}", client.ddp_profile("0000:84:00.0")?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DevlinkInfoClient<T = GenlConnection> {
    transport: T,
}

impl DevlinkInfoClient<GenlConnection> {
    /// Create a client backed by a new generic netlink socket.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(GenlConnection::new()?))
    }
}

impl<T: GenlTransport> DevlinkInfoClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and decode all version info of a device.
    pub fn info_by_name(&self, bus: &str, device: &str) -> Result<InfoMap> {
        let request = InfoRequest::new(bus, device).resolve(&self.transport)?;
        let replies = self.transport.execute(request)?;
        debug!(bus, device, replies = replies.len(), "devlink info reply");

        let first = replies.first().ok_or(Error::MessageTooShort {
            expected: GENL_HDRLEN,
            actual: 0,
        })?;
        parse_info_msg(first)
    }

    /// Fetch the values of `keys`.
    ///
    /// All-or-nothing: the first key missing from the device info fails the
    /// whole call.
    pub fn info_by_name_and_keys<K: AsRef<str>>(
        &self,
        bus: &str,
        device: &str,
        keys: &[K],
    ) -> Result<InfoMap> {
        let data = self.info_by_name(bus, device)?;

        keys.iter()
            .map(|key| {
                let key = key.as_ref();
                match data.get(key) {
                    Some(value) => Ok((key.to_string(), value.clone())),
                    None => Err(Error::KeyNotFound {
                        context: "info_by_name_and_keys",
                        key: key.to_string(),
                    }),
                }
            })
            .collect()
    }

    /// Fetch the value of a single key.
    pub fn info_by_name_and_key(&self, bus: &str, device: &str, key: &str) -> Result<String> {
        let mut info = self.info_by_name_and_keys(bus, device, &[key])?;
        info.remove(key).ok_or_else(|| Error::KeyNotFound {
            context: "info_by_name_and_key",
            key: key.to_string(),
        })
    }

    /// DDP package name (`fw.app.name`) of a PCI device.
    pub fn ddp_profile(&self, device: &str) -> Result<String> {
        self.info_by_name_and_key(PCI_BUS, device, FW_APP_NAME_KEY)
    }

    /// Check whether a device answers devlink info with a DDP package name.
    ///
    /// Never fails: any error means "not supported".
    pub fn is_devlink_supported(&self, bus: &str, device: &str) -> bool {
        match self.info_by_name_and_key(bus, device, FW_APP_NAME_KEY) {
            Ok(_) => true,
            Err(e) => {
                debug!(bus, device, error = %e, "devlink info not supported");
                false
            }
        }
    }

    /// [`is_devlink_supported`](Self::is_devlink_supported) for a PCI device.
    pub fn is_devlink_supported_by_pci_device(&self, device: &str) -> bool {
        self.is_devlink_supported(PCI_BUS, device)
    }
}
