//! The address setup pipeline of one multicast ping session.
//!
//! Stages run strictly one after another, each taking the previous one's output
//! by value:
//!
//! 1. [`collector`] resolves the remote arguments into a deduplicated [`TargetList`].
//! 2. [`negotiate`] picks the IP version every participant can use.
//! 3. The local interface is looked up among the targets, which also settles the
//!    version when nothing else did.
//! 4. [`multicast`] resolves and validates the group address.
//! 5. [`materialize`] reduces every target to one address of that version.
//! 6. [`local`] turns the matched target into the local address.
//!
//! Any failure ends the pipeline; there are no partial sessions.

use std::net::SocketAddr;

use tracing::debug;

use mcping_common::SessionError;
use mcping_common::config::DEFAULT_PORT;
use mcping_common::network::family::{IpFamily, NegotiatedFamily};
use mcping_common::network::interface::find_local_match;
use mcping_common::network::target::TargetList;
use mcping_common::resolver::{InterfaceSource, NameResolver};

pub mod collector;
pub mod local;
pub mod materialize;
pub mod multicast;
pub mod negotiate;

#[cfg(test)]
pub(crate) mod testutil;

pub use local::LocalAddress;
pub use multicast::MulticastAddress;

/// The addressing part of the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    /// Remote hosts in argument order; one of them must be this machine.
    pub targets: Vec<String>,
    /// `-4` / `-6`, otherwise unconstrained.
    pub forced: NegotiatedFamily,
    /// `-m`
    pub multicast: Option<String>,
    /// `-p`, passed to the resolver verbatim.
    pub port: String,
}

impl SessionRequest {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            forced: NegotiatedFamily::Unconstrained,
            multicast: None,
            port: DEFAULT_PORT.to_string(),
        }
    }
}

/// Fully resolved addressing, ready for the ping exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The version everything below uses.
    pub family: IpFamily,
    /// Outcome of negotiation alone, before the local interface settled it.
    pub negotiated: NegotiatedFamily,
    pub local: LocalAddress,
    pub multicast: MulticastAddress,
    /// Session port, taken from the multicast address.
    pub port: u16,
    /// Only one remote host was given and it is this machine.
    pub single_target: bool,
    /// Materialized remote targets. Holds the local entry only in single-target mode.
    pub remotes: TargetList,
}

impl Session {
    pub fn remote_addrs(&self) -> Vec<SocketAddr> {
        self.remotes
            .iter()
            .filter_map(|target| target.resolved_addr())
            .collect()
    }
}

pub fn resolve_session(
    request: &SessionRequest,
    resolver: &dyn NameResolver,
    interfaces: &dyn InterfaceSource,
) -> Result<Session, SessionError> {
    let mut targets = collector::collect_targets(
        resolver,
        request.targets.as_slice(),
        &request.port,
        request.forced,
    )?;

    let negotiated = negotiate::negotiate_family(
        resolver,
        request.forced,
        request.multicast.as_deref(),
        &request.port,
        &targets,
    )?;

    let host_interfaces = interfaces.interfaces()?;
    let local_match = find_local_match(&targets, negotiated, &host_interfaces)?;
    let family = negotiated.family().unwrap_or(local_match.family());
    debug!("session uses {family} (negotiated: {negotiated})");

    let multicast = multicast::resolve_multicast(
        resolver,
        family.into(),
        request.multicast.as_deref(),
        &request.port,
    )?;
    let port = multicast.port();

    materialize::materialize_targets(&mut targets, family.into())?;
    let (local, single_target) = local::extract_local(&mut targets, local_match)?;

    debug!(
        "local address {} on {}, multicast group {}, {} remote(s)",
        local.addr,
        local.interface_name,
        multicast.addr,
        targets.len()
    );

    Ok(Session {
        family,
        negotiated,
        local,
        multicast,
        port,
        single_target,
        remotes: targets,
    })
}
