use std::net::SocketAddr;

use tracing::debug;

use mcping_common::SessionError;
use mcping_common::config::{DEFAULT_MCAST4_ADDR, DEFAULT_MCAST6_ADDR};
use mcping_common::network::family::{IpFamily, NegotiatedFamily};
use mcping_common::resolver::NameResolver;

/// The group every participant sends to and listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulticastAddress {
    /// As given with `-m`, or the default group literal.
    pub label: String,
    pub addr: SocketAddr,
}

impl MulticastAddress {
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

pub fn default_group(family: IpFamily) -> &'static str {
    match family {
        IpFamily::V4 => DEFAULT_MCAST4_ADDR,
        IpFamily::V6 => DEFAULT_MCAST6_ADDR,
    }
}

/// Resolves the group for the session's `family`.
///
/// `family` must already be concrete here; without `-m` there is no way to pick
/// a default group for an unconstrained session.
pub fn resolve_multicast(
    resolver: &dyn NameResolver,
    family: NegotiatedFamily,
    label: Option<&str>,
    port: &str,
) -> Result<MulticastAddress, SessionError> {
    let label = match label {
        Some(label) => label,
        None => {
            let family = family.family().ok_or(SessionError::Internal(
                "no default multicast group for an unconstrained family",
            ))?;
            default_group(family)
        }
    };

    let addr = resolver
        .resolve(label, port, family)?
        .into_iter()
        .find(|addr| family.allows(IpFamily::of(addr)))
        .ok_or(SessionError::Internal(
            "multicast address has no candidate of the session family",
        ))?;

    if !addr.ip().is_multicast() {
        return Err(SessionError::NotMulticast {
            label: label.to_string(),
        });
    }

    debug!("multicast group {label} resolved to {addr}");
    Ok(MulticastAddress {
        label: label.to_string(),
        addr,
    })
}
