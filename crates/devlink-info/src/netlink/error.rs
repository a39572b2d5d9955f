//! Error types for netlink and devlink info operations.

use std::io;

/// Result type for netlink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying devlink info.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from socket operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Kernel returned an error code.
    #[error("kernel error: {message} (errno {errno})")]
    Kernel {
        /// The errno value from the kernel.
        errno: i32,
        /// Human-readable error message.
        message: String,
    },

    /// Kernel error with operation context.
    #[error("{operation}: {message} (errno {errno})")]
    KernelWithContext {
        /// The operation that failed.
        operation: String,
        /// The errno value from the kernel.
        errno: i32,
        /// Human-readable error message.
        message: String,
    },

    /// A buffer is shorter than the fixed header it must carry, or an
    /// attribute declares more bytes than remain.
    #[error("message too short: expected {expected} bytes, got {actual}")]
    MessageTooShort {
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// The attribute tree does not have the expected shape.
    #[error("{context} - could not read attributes: {detail}")]
    ReadAttributes {
        /// The operation that detected the problem.
        context: &'static str,
        /// What was wrong.
        detail: &'static str,
    },

    /// A requested key is absent from a parsed info map.
    #[error("{context} - key could not be found: {key}")]
    KeyNotFound {
        /// The operation that performed the lookup.
        context: &'static str,
        /// The missing key.
        key: String,
    },

    /// The device does not report a DDP profile.
    #[error("this device seems not to support DDP: {device}")]
    DdpNotSupported {
        /// The device that was probed.
        device: String,
    },

    /// Generic netlink family is not registered in the kernel.
    #[error("generic netlink family not found: {name}")]
    FamilyNotFound {
        /// The family name.
        name: String,
    },

    /// Invalid message format.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

impl Error {
    /// Create a kernel error from an errno value.
    pub fn from_errno(errno: i32) -> Self {
        let message = io::Error::from_raw_os_error(-errno).to_string();
        Self::Kernel {
            errno: -errno,
            message,
        }
    }

    pub(crate) fn too_short(expected: usize, actual: usize) -> Self {
        Self::MessageTooShort { expected, actual }
    }

    /// Add context to this error.
    ///
    /// Wraps kernel errors with operation context. Other errors are returned unchanged.
    pub fn with_context(self, operation: impl Into<String>) -> Self {
        match self {
            Self::Kernel { errno, message } => Self::KernelWithContext {
                operation: operation.into(),
                errno,
                message,
            },
            other => other,
        }
    }

    /// Check if this is a "not found" error (ENOENT, ENODEV, unknown family, missing key).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Kernel { errno, .. } | Self::KernelWithContext { errno, .. } => {
                matches!(*errno, libc::ENOENT | libc::ENODEV)
            }
            Self::FamilyNotFound { .. } | Self::KeyNotFound { .. } => true,
            _ => false,
        }
    }

    /// Check if a buffer was too short to decode.
    pub fn is_message_too_short(&self) -> bool {
        matches!(self, Self::MessageTooShort { .. })
    }

    /// Check if a requested key was missing from the info map.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// Get the errno value if this is a kernel error.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Kernel { errno, .. } | Self::KernelWithContext { errno, .. } => Some(*errno),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_errno() {
        let err = Error::from_errno(-1); // EPERM
        assert!(matches!(err, Error::Kernel { errno: 1, .. }));
        assert_eq!(err.errno(), Some(1));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_with_context() {
        let err = Error::from_errno(-19).with_context("resolving family devlink"); // ENODEV
        assert!(err.is_not_found());
        assert_eq!(err.errno(), Some(19));
        let msg = err.to_string();
        assert!(msg.contains("resolving family devlink"));
        assert!(msg.contains("No such device"));
    }

    #[test]
    fn test_with_context_leaves_decode_errors_alone() {
        let err = Error::too_short(4, 0).with_context("parse");
        assert!(err.is_message_too_short());
        assert_eq!(err.errno(), None);
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::from_errno(-2).is_not_found());
        assert!(
            Error::FamilyNotFound {
                name: "devlink".into()
            }
            .is_not_found()
        );
        assert!(
            Error::KeyNotFound {
                context: "info_by_name_and_keys",
                key: "fw.undi".into()
            }
            .is_not_found()
        );
        assert!(!Error::too_short(4, 2).is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::ReadAttributes {
            context: "nested_version",
            detail: "key not found",
        };
        assert_eq!(
            err.to_string(),
            "nested_version - could not read attributes: key not found"
        );

        let err = Error::KeyNotFound {
            context: "info_by_name_and_keys",
            key: "fw.psid.api".into(),
        };
        assert_eq!(
            err.to_string(),
            "info_by_name_and_keys - key could not be found: fw.psid.api"
        );

        let err = Error::DdpNotSupported {
            device: "0000:84:00.0".into(),
        };
        assert_eq!(
            err.to_string(),
            "this device seems not to support DDP: 0000:84:00.0"
        );
    }
}
