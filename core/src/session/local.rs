use std::net::SocketAddr;

use tracing::debug;

use mcping_common::SessionError;
use mcping_common::network::family::IpFamily;
use mcping_common::network::interface::LocalMatch;
use mcping_common::network::target::TargetList;
use mcping_common::utils::interface::NetworkInterfaceExtension;

/// This machine's endpoint in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAddress {
    /// The interface address, carrying the port of the matched target.
    pub addr: SocketAddr,
    /// Label of the matched target, as typed.
    pub host_name: String,
    pub interface_name: String,
}

/// Turns the matched target into the [`LocalAddress`] and reports single-target mode.
///
/// When more than one target is left, the matched one is removed from the list.
/// When it is the only target it stays, so the host measures against itself.
/// Expects the list to be materialized already.
pub fn extract_local(
    targets: &mut TargetList,
    local: LocalMatch,
) -> Result<(LocalAddress, bool), SessionError> {
    let target = targets
        .get(local.index)
        .ok_or(SessionError::Internal("local target is not in the list"))?;
    let remote = target
        .resolved_addr()
        .ok_or(SessionError::Internal("local target was not materialized"))?;

    if IpFamily::of(&remote) != local.family() {
        return Err(SessionError::Internal(
            "local interface and local target differ in address family",
        ));
    }

    let local_address = LocalAddress {
        addr: local.interface.socket_addr(local.ip, remote.port()),
        host_name: target.label().to_string(),
        interface_name: local.interface.name.clone(),
    };

    let single_target = targets.len() == 1;
    if !single_target {
        targets.remove(local.index);
        debug!(
            "local address \"{}\" removed from remote list",
            local_address.host_name
        );
    }

    Ok((local_address, single_target))
}
