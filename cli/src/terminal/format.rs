use crate::terminal::colors;
use colored::*;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    if is_global_unicast(ipv6_addr) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    if ipv6_addr.is_multicast() {
        return "MC";
    }
    "IPv6"
}

fn is_global_unicast(ipv6_addr: &Ipv6Addr) -> bool {
    let first_byte = ipv6_addr.octets()[0];
    (0x20..=0x3F).contains(&first_byte)
}

/// Short kind label for an address, shown next to it.
pub fn addr_kind(ip: &IpAddr) -> &'static str {
    match ip {
        IpAddr::V4(ipv4_addr) if ipv4_addr.is_multicast() => "MC",
        IpAddr::V4(_) => "IPv4",
        IpAddr::V6(ipv6_addr) => ipv6_to_type_str(ipv6_addr),
    }
}

/// Colors the address by family and the port separately.
pub fn socket_addr(addr: &SocketAddr) -> ColoredString {
    let ip = match addr {
        SocketAddr::V4(v4) => v4.ip().to_string().color(colors::IPV4_ADDR),
        SocketAddr::V6(v6) if v6.scope_id() != 0 => {
            format!("[{}%{}]", v6.ip(), v6.scope_id()).color(colors::IPV6_ADDR)
        }
        SocketAddr::V6(v6) => format!("[{}]", v6.ip()).color(colors::IPV6_ADDR),
    };
    let port = addr.port().to_string().color(colors::PORT);
    format!("{ip}{}{port}", ":".color(colors::SEPARATOR)).normal()
}

pub fn remotes_to_key_value_pair<'a, I>(remotes: I) -> Vec<(String, ColoredString)>
where
    I: IntoIterator<Item = (&'a str, SocketAddr)>,
{
    remotes
        .into_iter()
        .map(|(label, addr)| {
            let value = format!("{} ({})", socket_addr(&addr), label).normal();
            (String::from(addr_kind(&addr.ip())), value)
        })
        .collect()
}
