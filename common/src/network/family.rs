//! # Address Families
//!
//! A session talks over exactly one IP version. These types describe what a
//! resolved label can offer ([`FamilySupport`]) and what the session has committed
//! to ([`NegotiatedFamily`]).

use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// A concrete IP version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    V4,
    V6,
}

impl IpFamily {
    pub fn of(addr: &SocketAddr) -> Self {
        Self::of_ip(&addr.ip())
    }

    pub fn of_ip(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }

    /// The version number as typed on the command line (4 or 6).
    pub fn version(self) -> u8 {
        match self {
            Self::V4 => 4,
            Self::V6 => 6,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::V4 => Self::V6,
            Self::V6 => Self::V4,
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// The IP version the session uses, or [`NegotiatedFamily::Unconstrained`] when
/// nothing has narrowed the choice yet.
///
/// The same type doubles as the resolver hint: a forced `-4`/`-6` is passed down
/// as `V4`/`V6`, otherwise `Unconstrained`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NegotiatedFamily {
    #[default]
    Unconstrained,
    V4,
    V6,
}

impl NegotiatedFamily {
    /// 0 for unconstrained, otherwise 4 or 6.
    pub fn version(self) -> u8 {
        self.family().map_or(0, IpFamily::version)
    }

    pub fn family(self) -> Option<IpFamily> {
        match self {
            Self::Unconstrained => None,
            Self::V4 => Some(IpFamily::V4),
            Self::V6 => Some(IpFamily::V6),
        }
    }

    pub fn is_unconstrained(self) -> bool {
        self == Self::Unconstrained
    }

    /// Whether an address of `family` is acceptable under this constraint.
    pub fn allows(self, family: IpFamily) -> bool {
        self.family().is_none_or(|own| own == family)
    }
}

impl From<IpFamily> for NegotiatedFamily {
    fn from(family: IpFamily) -> Self {
        match family {
            IpFamily::V4 => Self::V4,
            IpFamily::V6 => Self::V6,
        }
    }
}

impl From<FamilySupport> for NegotiatedFamily {
    fn from(support: FamilySupport) -> Self {
        match support {
            FamilySupport::Both => Self::Unconstrained,
            FamilySupport::Only(family) => family.into(),
        }
    }
}

impl fmt::Display for NegotiatedFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family() {
            Some(family) => family.fmt(f),
            None => write!(f, "any"),
        }
    }
}

/// Which IP versions a label's full candidate set covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilySupport {
    Both,
    Only(IpFamily),
}

impl FamilySupport {
    /// Examines every candidate, not just the first one.
    ///
    /// Returns `None` when the set is empty, i.e. the label offers neither family.
    pub fn deep(candidates: &[SocketAddr]) -> Option<Self> {
        let has_v4 = candidates.iter().any(SocketAddr::is_ipv4);
        let has_v6 = candidates.iter().any(SocketAddr::is_ipv6);

        match (has_v4, has_v6) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Only(IpFamily::V4)),
            (false, true) => Some(Self::Only(IpFamily::V6)),
            (false, false) => None,
        }
    }

    /// The single family, if only one is supported.
    pub fn only(self) -> Option<IpFamily> {
        match self {
            Self::Both => None,
            Self::Only(family) => Some(family),
        }
    }

    /// `Both` is compatible with anything.
    pub fn supports(self, family: IpFamily) -> bool {
        self.only().is_none_or(|only| only == family)
    }
}
