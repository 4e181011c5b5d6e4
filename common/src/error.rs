use thiserror::Error;

use crate::network::family::IpFamily;

/// Every way the address setup of a session can fail.
///
/// None of these are recoverable inside the pipeline. The driver decides how to
/// report them; [`SessionError::is_usage`] separates user input mistakes (which
/// come with usage text) from network and internal failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("at least one remote addresses should be specified")]
    NoTargets,

    #[error("illegal {what}, -{flag} argument -- {value}")]
    InvalidOption {
        flag: char,
        what: &'static str,
        value: String,
    },

    #[error("illegal number, -{flag} argument {value} < {min}. Use -{force} to force.")]
    NeedsForce {
        flag: char,
        value: String,
        min: String,
        force: &'static str,
    },

    #[error("Can't resolve {label}: {reason}")]
    Resolution { label: String, reason: String },

    #[error("Host {label} doesn't support ipv4 or ipv6")]
    NoUsableFamily { label: String },

    #[error("Mcast address {label} doesn't support ipv4 or ipv6")]
    MulticastNoUsableFamily { label: String },

    #[error("Address {label} looks like loopback. Loopback ping is not supported")]
    Loopback { label: String },

    #[error(
        "Multicast address is ipv{} but host {host} supports only ipv{}",
        .multicast.version(),
        .host_family.version()
    )]
    MulticastFamilyMismatch {
        multicast: IpFamily,
        host: String,
        host_family: IpFamily,
    },

    #[error("Host {host} doesn't support IP version {}", .required.version())]
    HostFamilyMismatch { host: String, required: IpFamily },

    #[error("Given address {label} is not valid multicast address")]
    NotMulticast { label: String },

    #[error("Can't find local address in arguments")]
    LocalAddressNotFound,

    #[error("Internal program error: {0}")]
    Internal(&'static str),
}

impl SessionError {
    /// Errors caused by how the tool was invoked rather than by the network.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::NoTargets | Self::InvalidOption { .. } | Self::NeedsForce { .. }
        )
    }
}
