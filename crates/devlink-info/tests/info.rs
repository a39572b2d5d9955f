//! Devlink info queries through the public API.
//!
//! These tests replay a captured kernel reply through a stand-in transport,
//! so they need neither root nor devlink-capable hardware.

use std::sync::Mutex;

use devlink_info::devlink::{DevlinkInfoClient, FW_APP_NAME_KEY, InfoRequest, parse_info_msg};
use devlink_info::netlink::genl::{GENL_HDRLEN, GenlMsgHdr, GenlTransport};
use devlink_info::netlink::{MessageBuilder, NLMSG_HDRLEN, NlMsgHdr, parse_attrs};
use devlink_info::{Error, Result};

/// `devlink dev info pci/0000:84:00.0` on an Intel E810-C, nlmsghdr stripped.
const E810C_INFO_REPLY: &[u8] = include_bytes!("fixtures/e810c_info_reply.bin");

const DEVLINK_FAMILY_ID: u16 = 20;

/// Replays canned replies, keeping every encoded request.
struct Replay {
    replies: Vec<Vec<u8>>,
    sent: Mutex<Vec<Vec<u8>>>,
}

impl Replay {
    fn new(replies: Vec<Vec<u8>>) -> Self {
        Self {
            replies,
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl GenlTransport for Replay {
    fn family_id(&self, name: &str) -> Result<u16> {
        match name {
            "devlink" => Ok(DEVLINK_FAMILY_ID),
            _ => Err(Error::FamilyNotFound { name: name.into() }),
        }
    }

    fn execute(&self, request: MessageBuilder) -> Result<Vec<Vec<u8>>> {
        self.sent.lock().unwrap().push(request.finish());
        Ok(self.replies.clone())
    }
}

/// Lets the kernel answer with an error code, as for an unknown device.
struct Refuse(i32);

impl GenlTransport for Refuse {
    fn family_id(&self, _name: &str) -> Result<u16> {
        Ok(DEVLINK_FAMILY_ID)
    }

    fn execute(&self, _request: MessageBuilder) -> Result<Vec<Vec<u8>>> {
        Err(Error::from_errno(-self.0))
    }
}

fn e810c_client() -> DevlinkInfoClient<Replay> {
    DevlinkInfoClient::with_transport(Replay::new(vec![E810C_INFO_REPLY.to_vec()]))
}

mod decode {
    use super::*;

    #[test]
    fn test_capture_has_twelve_entries() {
        let info = parse_info_msg(E810C_INFO_REPLY).unwrap();
        let keys: Vec<&str> = info.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "board.id",
                "fw.app",
                "fw.app.bundle_id",
                "fw.app.name",
                "fw.bundle_id",
                "fw.mgmt",
                "fw.mgmt.api",
                "fw.mgmt.build",
                "fw.netlist",
                "fw.netlist.build",
                "fw.psid.api",
                "fw.undi",
            ]
        );
        assert_eq!(info["fw.netlist"], "2.40.2000-3.16.0");
        assert_eq!(info["fw.psid.api"], "2.42");
    }

    #[test]
    fn test_capture_header() {
        let hdr = GenlMsgHdr::from_bytes(E810C_INFO_REPLY).unwrap();
        assert_eq!(hdr.cmd, 51);
        assert_eq!(hdr.version, 1);
    }

    #[test]
    fn test_truncated_capture_is_rejected() {
        // Cut inside the last version attribute.
        let cut = &E810C_INFO_REPLY[..E810C_INFO_REPLY.len() - 10];
        assert!(parse_info_msg(cut).unwrap_err().is_message_too_short());
    }
}

mod client {
    use super::*;

    #[test]
    fn test_request_sent_to_devlink_family() {
        let client = e810c_client();
        client.info_by_name("pci", "0000:84:00.0").unwrap();

        let sent = client.transport().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let expected = InfoRequest::new("pci", "0000:84:00.0")
            .build(DEVLINK_FAMILY_ID)
            .unwrap()
            .finish();
        assert_eq!(sent[0], expected);

        let header = NlMsgHdr::from_bytes(&sent[0]).unwrap();
        assert_eq!(header.nlmsg_type, DEVLINK_FAMILY_ID);
        let attrs = parse_attrs(&sent[0][NLMSG_HDRLEN + GENL_HDRLEN..]).unwrap();
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_ddp_profile() {
        assert_eq!(
            e810c_client().ddp_profile("0000:84:00.0").unwrap(),
            "ICE OS Default Package"
        );
    }

    #[test]
    fn test_keys_lookup() {
        let values = e810c_client()
            .info_by_name_and_keys("pci", "0000:84:00.0", &[FW_APP_NAME_KEY, "board.id"])
            .unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values["board.id"], "K85585-000");
    }

    #[test]
    fn test_missing_key_fails_whole_lookup() {
        let keys = vec!["board.id".to_string(), "fw.sriov".to_string()];
        let err = e810c_client()
            .info_by_name_and_keys("pci", "0000:84:00.0", &keys)
            .unwrap_err();
        assert!(err.is_key_not_found());
        assert!(err.to_string().ends_with("fw.sriov"));
    }

    #[test]
    fn test_capability_probe() {
        assert!(e810c_client().is_devlink_supported("pci", "0000:84:00.0"));

        let empty = DevlinkInfoClient::with_transport(Replay::new(Vec::new()));
        assert!(!empty.is_devlink_supported("pci", "0000:84:00.0"));

        let refused = DevlinkInfoClient::with_transport(Refuse(libc::ENODEV));
        assert!(!refused.is_devlink_supported_by_pci_device("0000:84:00.0"));
    }

    #[test]
    fn test_oversized_device_name_fails_locally() {
        let client = e810c_client();
        let device = "a".repeat(65_540);
        let err = client.info_by_name("pci", &device).unwrap_err();
        assert!(matches!(err, Error::InvalidMessage(_)));
        assert!(client.transport().sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_kernel_error_is_returned_as_is() {
        let client = DevlinkInfoClient::with_transport(Refuse(libc::ENODEV));
        let err = client.info_by_name("pci", "0000:ff:00.0").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.errno(), Some(libc::ENODEV));
    }

    #[test]
    fn test_client_over_borrowed_transport() {
        let replay = Replay::new(vec![E810C_INFO_REPLY.to_vec()]);
        let client = DevlinkInfoClient::with_transport(&replay);
        assert_eq!(client.info_by_name("pci", "0000:84:00.0").unwrap().len(), 12);
        assert_eq!(replay.sent.lock().unwrap().len(), 1);
    }
}
