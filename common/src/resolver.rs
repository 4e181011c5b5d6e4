//! Collaborators the session pipeline depends on.
//!
//! The pipeline only ever talks to these traits. The system implementations live
//! in `mcping-core`; tests substitute in-memory ones.

use std::net::SocketAddr;

use pnet::datalink::NetworkInterface;

use crate::error::SessionError;
use crate::network::family::NegotiatedFamily;

/// Turns a hostname or literal address into socket addresses.
pub trait NameResolver {
    /// Resolves `label` with `port` attached to every result.
    ///
    /// Only addresses allowed by `hint` are returned, in resolver order and
    /// without duplicates. Fails with [`SessionError::Resolution`] when nothing
    /// usable comes back.
    fn resolve(
        &self,
        label: &str,
        port: &str,
        hint: NegotiatedFamily,
    ) -> Result<Vec<SocketAddr>, SessionError>;
}

/// Lists the network interfaces of this host.
pub trait InterfaceSource {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, SessionError>;
}
