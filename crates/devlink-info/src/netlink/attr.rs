//! Netlink attribute (nlattr) handling.
//!
//! Attributes are TLV records laid out back to back:
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────────────────────┐
//! │ nla_len (u16)│ nla_type(u16)│ payload, padded to 4 bytes   │
//! └──────────────┴──────────────┴──────────────────────────────┘
//! ```
//!
//! [`AttrIter`] is the only decoder in the crate; nested attributes are
//! decoded by running it again over a parent's payload.

use super::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Netlink attribute alignment.
pub const NLA_ALIGNTO: usize = 4;

/// Align a length to NLA_ALIGNTO boundary.
#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

/// Size of the attribute header.
pub const NLA_HDRLEN: usize = 4; // nla_align(size_of::<NlAttr>())

/// Netlink attribute header (mirrors struct nlattr).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NlAttr {
    /// Length including header.
    pub nla_len: u16,
    /// Attribute type.
    pub nla_type: u16,
}

/// Attribute type flags.
pub const NLA_F_NESTED: u16 = 1 << 15;
pub const NLA_F_NET_BYTEORDER: u16 = 1 << 14;
pub const NLA_TYPE_MASK: u16 = !(NLA_F_NESTED | NLA_F_NET_BYTEORDER);

impl NlAttr {
    /// Create a new attribute header.
    ///
    /// Fails if header and payload do not fit the 16-bit length field.
    pub fn new(attr_type: u16, data_len: usize) -> Result<Self> {
        let nla_len = u16::try_from(NLA_HDRLEN + data_len).map_err(|_| {
            Error::InvalidMessage(format!(
                "attribute {attr_type}: {data_len} byte payload exceeds the 16-bit length field"
            ))
        })?;
        Ok(Self {
            nla_len,
            nla_type: attr_type,
        })
    }

    /// Get the attribute type without flags.
    pub fn kind(&self) -> u16 {
        self.nla_type & NLA_TYPE_MASK
    }

    /// Convert to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Parse from bytes. The input need not be aligned.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::read_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| Error::too_short(NLA_HDRLEN, data.len()))
    }
}

/// A decoded attribute: its type code (flags masked off) and payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attr<'a> {
    /// Attribute type without `NLA_F_*` flags.
    pub kind: u16,
    /// Payload bytes, padding excluded.
    pub payload: &'a [u8],
}

/// Iterator over netlink attributes in a buffer.
///
/// Yields an error and then stops if a record is truncated: a non-empty
/// remainder shorter than the header, or a declared length that is smaller
/// than the header or larger than what is left. Padding after a record is
/// skipped; the padding of the final record may be absent.
pub struct AttrIter<'a> {
    data: &'a [u8],
}

impl<'a> AttrIter<'a> {
    /// Create a new attribute iterator.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn fail(&mut self, err: Error) -> Option<Result<Attr<'a>>> {
        self.data = &[];
        Some(Err(err))
    }
}

impl<'a> Iterator for AttrIter<'a> {
    type Item = Result<Attr<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.is_empty() {
            return None;
        }

        let attr = match NlAttr::from_bytes(self.data) {
            Ok(a) => a,
            Err(e) => return self.fail(e),
        };

        let len = attr.nla_len as usize;
        if len < NLA_HDRLEN || len > self.data.len() {
            let remaining = self.data.len();
            return self.fail(Error::too_short(len.max(NLA_HDRLEN), remaining));
        }

        let item = Attr {
            kind: attr.kind(),
            payload: &self.data[NLA_HDRLEN..len],
        };

        // Move to next attribute
        let aligned_len = nla_align(len);
        if aligned_len >= self.data.len() {
            self.data = &[];
        } else {
            self.data = &self.data[aligned_len..];
        }

        Some(Ok(item))
    }
}

/// Decode a whole attribute buffer.
///
/// Pure: the same bytes always produce the same sequence.
pub fn parse_attrs(data: &[u8]) -> Result<Vec<Attr<'_>>> {
    AttrIter::new(data).collect()
}

/// Helper functions for extracting typed values from attribute payloads.
pub mod get {
    use super::*;

    /// Extract a u16 value (native endian).
    pub fn u16_ne(data: &[u8]) -> Result<u16> {
        if data.len() < 2 {
            return Err(Error::too_short(2, data.len()));
        }
        Ok(u16::from_ne_bytes([data[0], data[1]]))
    }

    /// Extract a u32 value (native endian).
    pub fn u32_ne(data: &[u8]) -> Result<u32> {
        if data.len() < 4 {
            return Err(Error::too_short(4, data.len()));
        }
        Ok(u32::from_ne_bytes([data[0], data[1], data[2], data[3]]))
    }

    /// Extract a null-terminated string, stopping at the first NUL.
    pub fn string(data: &[u8]) -> String {
        let len = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        String::from_utf8_lossy(&data[..len]).into_owned()
    }

    /// Extract a fixed-size C string: every NUL is dropped (not just the
    /// terminator) and surrounding whitespace is trimmed.
    pub fn padded_string(data: &[u8]) -> String {
        let bytes: Vec<u8> = data.iter().copied().filter(|&b| b != 0).collect();
        String::from_utf8_lossy(&bytes).trim().to_string()
    }
}
