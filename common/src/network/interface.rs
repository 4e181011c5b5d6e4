//! # Local Interface Matching
//!
//! The local host must appear among the targets the user typed. This module
//! finds which target that is by comparing resolver candidates against the
//! addresses configured on the host's interfaces.

use std::net::IpAddr;

use pnet::datalink::NetworkInterface;
use tracing::{debug, trace};

use crate::error::SessionError;
use crate::network::family::{IpFamily, NegotiatedFamily};
use crate::network::target::TargetList;
use crate::utils::interface::NetworkInterfaceExtension;

/// A target that turned out to be one of our own interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalMatch {
    /// Position of the matched target in the [`TargetList`].
    pub index: usize,
    pub interface: NetworkInterface,
    /// The interface's own address that equals one of the target's candidates.
    pub ip: IpAddr,
}

impl LocalMatch {
    pub fn family(&self) -> IpFamily {
        IpFamily::of_ip(&self.ip)
    }
}

/// Order in which families are tried. An unconstrained session prefers IPv6.
fn search_order(family: NegotiatedFamily) -> Vec<IpFamily> {
    match family.family() {
        Some(family) => vec![family],
        None => vec![IpFamily::V6, IpFamily::V4],
    }
}

/// Finds the first target whose candidates include an address of a local interface.
///
/// Targets are scanned in list order and candidates in resolver order. With an
/// unconstrained `family`, a match over IPv6 wins over any IPv4 match, and the
/// returned [`LocalMatch::family`] is what the session then commits to.
pub fn find_local_match(
    targets: &TargetList,
    family: NegotiatedFamily,
    interfaces: &[NetworkInterface],
) -> Result<LocalMatch, SessionError> {
    for wanted in search_order(family) {
        for (index, target) in targets.iter().enumerate() {
            let candidates = target
                .candidates()
                .iter()
                .map(|addr| addr.ip())
                .filter(|ip| IpFamily::of_ip(ip) == wanted);

            for ip in candidates {
                if let Some(interface) = find_owner(interfaces, ip) {
                    debug!(
                        "local address {ip} of {} found in arguments as \"{}\"",
                        interface.name,
                        target.label()
                    );
                    return Ok(LocalMatch {
                        index,
                        interface: interface.clone(),
                        ip,
                    });
                }
            }
        }
        trace!("no {wanted} target matches a local interface");
    }

    Err(SessionError::LocalAddressNotFound)
}

fn find_owner(interfaces: &[NetworkInterface], ip: IpAddr) -> Option<&NetworkInterface> {
    interfaces.iter().find(|iface| iface.has_ip(ip))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
