use std::io;
use std::net::SocketAddr;

use dns_lookup::{AddrFamily, AddrInfoHints, SockType, getaddrinfo};
use tracing::trace;

use mcping_common::SessionError;
use mcping_common::network::family::{IpFamily, NegotiatedFamily};
use mcping_common::resolver::NameResolver;

/// Name resolution through the system resolver (`getaddrinfo`).
///
/// The port goes to the resolver verbatim, so service names work. Addresses
/// keep everything the resolver reports, including IPv6 scope ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl NameResolver for SystemResolver {
    fn resolve(
        &self,
        label: &str,
        port: &str,
        hint: NegotiatedFamily,
    ) -> Result<Vec<SocketAddr>, SessionError> {
        let resolution_error = |reason: String| SessionError::Resolution {
            label: label.to_string(),
            reason,
        };

        let addrs = getaddrinfo(Some(label), Some(port), Some(hints(hint)))
            .map_err(|e| resolution_error(io::Error::from(e).to_string()))?
            .map(|info| info.map(|info| info.sockaddr))
            .collect::<io::Result<Vec<SocketAddr>>>()
            .map_err(|e| resolution_error(e.to_string()))?;

        let candidates = to_candidates(addrs, hint);
        trace!("{label} resolved to {candidates:?}");

        if candidates.is_empty() {
            return Err(resolution_error(no_address_reason(hint)));
        }

        Ok(candidates)
    }
}

fn hints(hint: NegotiatedFamily) -> AddrInfoHints {
    let address = match hint.family() {
        Some(IpFamily::V4) => AddrFamily::Inet.into(),
        Some(IpFamily::V6) => AddrFamily::Inet6.into(),
        None => 0,
    };
    AddrInfoHints {
        socktype: SockType::DGram.into(),
        address,
        ..AddrInfoHints::default()
    }
}

/// Keeps only hinted families and drops repeats, in resolver order.
///
/// `getaddrinfo` may report an address once per protocol, so repeats are normal.
fn to_candidates(addrs: Vec<SocketAddr>, hint: NegotiatedFamily) -> Vec<SocketAddr> {
    let mut candidates: Vec<SocketAddr> = Vec::with_capacity(addrs.len());
    for addr in addrs {
        if hint.allows(IpFamily::of(&addr)) && !candidates.contains(&addr) {
            candidates.push(addr);
        }
    }
    candidates
}

fn no_address_reason(hint: NegotiatedFamily) -> String {
    match hint.family() {
        Some(family) => format!("no {family} address associated with name"),
        None => "no address associated with name".to_string(),
    }
}
