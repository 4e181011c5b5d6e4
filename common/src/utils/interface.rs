use std::net::{IpAddr, SocketAddr, SocketAddrV6};

use pnet::datalink::NetworkInterface;

pub trait NetworkInterfaceExtension {
    fn has_ip(&self, ip: IpAddr) -> bool;
    fn socket_addr(&self, ip: IpAddr, port: u16) -> SocketAddr;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn has_ip(&self, ip: IpAddr) -> bool {
        self.ips.iter().any(|net| net.ip() == ip)
    }

    /// Builds a socket address on this interface.
    ///
    /// IPv6 link-local addresses are only meaningful together with the interface,
    /// so they get its index as scope id.
    fn socket_addr(&self, ip: IpAddr, port: u16) -> SocketAddr {
        match ip {
            IpAddr::V6(v6) if v6.is_unicast_link_local() => {
                SocketAddr::V6(SocketAddrV6::new(v6, port, 0, self.index))
            }
            ip => SocketAddr::new(ip, port),
        }
    }
}
