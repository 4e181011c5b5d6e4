//! # Session Target Model
//!
//! A [`Target`] is one remote participant as typed by the user. It starts out
//! holding every address the resolver produced for its label and is later
//! collapsed to the single address of the negotiated family.
//!
//! [`TargetList`] keeps targets in argument order and never holds two targets
//! whose candidate sets share an address.

use std::net::SocketAddr;

use crate::error::SessionError;
use crate::network::family::{FamilySupport, IpFamily, NegotiatedFamily};

/// Where a target's addressing currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAddr {
    /// Every address the resolver returned, in resolver order.
    Candidates(Vec<SocketAddr>),
    /// The one address kept for the session's family.
    Resolved(SocketAddr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    label: String,
    addr: TargetAddr,
}

impl Target {
    pub fn new(label: impl Into<String>, candidates: Vec<SocketAddr>) -> Self {
        Self {
            label: label.into(),
            addr: TargetAddr::Candidates(candidates),
        }
    }

    /// The hostname or literal address exactly as the user typed it.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn addr(&self) -> &TargetAddr {
        &self.addr
    }

    /// Resolver candidates, or the single resolved address once materialized.
    pub fn candidates(&self) -> &[SocketAddr] {
        match &self.addr {
            TargetAddr::Candidates(candidates) => candidates,
            TargetAddr::Resolved(addr) => std::slice::from_ref(addr),
        }
    }

    pub fn resolved_addr(&self) -> Option<SocketAddr> {
        match self.addr {
            TargetAddr::Resolved(addr) => Some(addr),
            TargetAddr::Candidates(_) => None,
        }
    }

    pub fn is_materialized(&self) -> bool {
        matches!(self.addr, TargetAddr::Resolved(_))
    }

    /// Deep support of the candidate set. `None` means neither family is offered.
    pub fn support(&self) -> Option<FamilySupport> {
        FamilySupport::deep(self.candidates())
    }

    /// Whether any candidate equals any of `addrs`.
    pub fn shares_address(&self, addrs: &[SocketAddr]) -> bool {
        self.candidates().iter().any(|own| addrs.contains(own))
    }

    /// Keeps the first candidate of `family` and drops the rest.
    ///
    /// With an unconstrained family the first candidate is kept. Calling this
    /// on an already materialized target is a no-op as long as the family still
    /// matches.
    pub fn materialize(&mut self, family: NegotiatedFamily) -> Result<SocketAddr, SessionError> {
        let chosen = self
            .candidates()
            .iter()
            .copied()
            .find(|addr| family.allows(IpFamily::of(addr)))
            .ok_or(SessionError::Internal(
                "no candidate for the negotiated family",
            ))?;

        self.addr = TargetAddr::Resolved(chosen);

        Ok(chosen)
    }
}

/// Ordered targets of one session, insertion order = argument order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<Target>,
}

impl TargetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: Target) {
        self.targets.push(target);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Target> {
        self.targets.iter_mut()
    }

    /// Removes and returns the target at `index`. Indices past it shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<Target> {
        (index < self.targets.len()).then(|| self.targets.remove(index))
    }

    /// Deep duplicate check: true if any existing target shares any address with `addrs`.
    pub fn contains_any(&self, addrs: &[SocketAddr]) -> bool {
        self.targets.iter().any(|target| target.shares_address(addrs))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.targets.iter().map(Target::label).collect()
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

impl IntoIterator for TargetList {
    type Item = Target;
    type IntoIter = std::vec::IntoIter<Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.into_iter()
    }
}

impl FromIterator<Target> for TargetList {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
