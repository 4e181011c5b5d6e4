use pnet::datalink::{self, NetworkInterface};

use mcping_common::SessionError;
use mcping_common::resolver::InterfaceSource;

/// Interface enumeration through the OS (`getifaddrs` on unix).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, SessionError> {
        Ok(datalink::interfaces()
            .into_iter()
            .filter(|iface| !iface.ips.is_empty())
            .collect())
    }
}
