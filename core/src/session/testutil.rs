use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

use mcping_common::SessionError;
use mcping_common::network::family::{IpFamily, NegotiatedFamily};
use mcping_common::resolver::{InterfaceSource, NameResolver};

/// Resolver over a fixed table. Literal addresses resolve to themselves.
#[derive(Debug, Default)]
pub struct StaticResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, label: &str, ips: &[&str]) -> Self {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.hosts.insert(label.to_string(), ips);
        self
    }
}

impl NameResolver for StaticResolver {
    fn resolve(
        &self,
        label: &str,
        port: &str,
        hint: NegotiatedFamily,
    ) -> Result<Vec<SocketAddr>, SessionError> {
        let unresolvable = |reason: &str| SessionError::Resolution {
            label: label.to_string(),
            reason: reason.to_string(),
        };

        let port: u16 = port.parse().map_err(|_| unresolvable("invalid port"))?;
        let ips = match self.hosts.get(label) {
            Some(ips) => ips.clone(),
            None => vec![label.parse().map_err(|_| unresolvable("unknown host"))?],
        };

        let candidates: Vec<SocketAddr> = ips
            .into_iter()
            .filter(|ip| hint.allows(IpFamily::of_ip(ip)))
            .map(|ip| SocketAddr::new(ip, port))
            .collect();

        if candidates.is_empty() {
            return Err(unresolvable("no address for family"));
        }
        Ok(candidates)
    }
}

pub struct StaticInterfaces(pub Vec<NetworkInterface>);

impl StaticInterfaces {
    /// `lo` plus `eth0` carrying 192.168.0.32 and 2001:db8:1::32.
    pub fn host() -> Self {
        Self(vec![
            iface("lo", 1, &["127.0.0.1/8", "::1/128"]),
            iface("eth0", 2, &["192.168.0.32/24", "2001:db8:1::32/64"]),
        ])
    }
}

impl InterfaceSource for StaticInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, SessionError> {
        Ok(self.0.clone())
    }
}

pub fn iface(name: &str, index: u32, nets: &[&str]) -> NetworkInterface {
    NetworkInterface {
        name: name.to_string(),
        description: String::new(),
        index,
        mac: None,
        ips: nets.iter().map(|net| net.parse::<IpNetwork>().unwrap()).collect(),
        flags: 1,
    }
}
