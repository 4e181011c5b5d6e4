use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use mcping_common::SessionError;
use mcping_common::network::family::{IpFamily, NegotiatedFamily};
use mcping_common::resolver::{InterfaceSource, NameResolver};
use pnet::datalink::{MacAddr, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

pub fn ni(name: &str, index: u32, ips: &[IpNetwork], flags: u32) -> NetworkInterface {
    NetworkInterface {
        name: name.into(),
        description: "".into(),
        index,
        mac: Some(MacAddr::new(0x02, 0, 0, 0, 0, index as u8)),
        ips: ips.to_vec(),
        flags,
    }
}

pub fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
    IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
}

pub fn v6(s: &str, p: u8) -> IpNetwork {
    IpNetwork::V6(Ipv6Network::new(s.parse::<Ipv6Addr>().unwrap(), p).unwrap())
}

pub fn sa(s: &str) -> SocketAddr {
    s.parse().unwrap()
}

/// Resolver backed by a fixed host table. Literals resolve to themselves.
#[derive(Default)]
pub struct HostTable {
    hosts: HashMap<String, Vec<IpAddr>>,
}

impl HostTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, label: &str, ips: &[&str]) -> Self {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.hosts.insert(label.to_string(), ips);
        self
    }
}

impl NameResolver for HostTable {
    fn resolve(
        &self,
        label: &str,
        port: &str,
        hint: NegotiatedFamily,
    ) -> Result<Vec<SocketAddr>, SessionError> {
        let port: u16 = port.parse().map_err(|_| SessionError::Resolution {
            label: label.to_string(),
            reason: format!("invalid port {port}"),
        })?;
        let ips = match label.parse::<IpAddr>() {
            Ok(ip) => vec![ip],
            Err(_) => self.hosts.get(label).cloned().unwrap_or_default(),
        };
        let addrs: Vec<SocketAddr> = ips
            .into_iter()
            .filter(|ip| hint.allows(IpFamily::of_ip(ip)))
            .map(|ip| SocketAddr::new(ip, port))
            .collect();
        if addrs.is_empty() {
            return Err(SessionError::Resolution {
                label: label.to_string(),
                reason: "no address associated with name".to_string(),
            });
        }
        Ok(addrs)
    }
}

pub struct Interfaces(pub Vec<NetworkInterface>);

impl InterfaceSource for Interfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, SessionError> {
        Ok(self.0.clone())
    }
}

/*************************************************************
                  Mock interfaces for testing
**************************************************************/

const UP_LOOPBACK: u32 = 0x1 | 0x8 | 0x40;
const UP_BROADCAST_MULTICAST: u32 = 0x1 | 0x2 | 0x40 | 0x1000;

pub fn lo() -> NetworkInterface {
    ni("lo", 1, &[v4(127, 0, 0, 1, 8), v6("::1", 128)], UP_LOOPBACK)
}

/// Dual stack LAN interface: 10.0.0.5/24, 2001:db8:10::5/64 and fe80::5/64.
pub fn enp9s0() -> NetworkInterface {
    ni(
        "enp9s0",
        2,
        &[
            v4(10, 0, 0, 5, 24),
            v6("2001:db8:10::5", 64),
            v6("fe80::5", 64),
        ],
        UP_BROADCAST_MULTICAST,
    )
}

pub fn this_host() -> Interfaces {
    Interfaces(vec![lo(), enp9s0()])
}
