//! IP version negotiation.
//!
//! Precedence, first match wins:
//! 1. A version forced with `-4`/`-6`.
//! 2. A multicast group that only exists in one version. Every target must then
//!    support that version.
//! 3. The first target that only supports one version (the pivot). Every other
//!    target must support it too.
//! 4. Otherwise nothing is constrained and the local interface decides later.

use tracing::{debug, trace};

use mcping_common::SessionError;
use mcping_common::network::family::{FamilySupport, IpFamily, NegotiatedFamily};
use mcping_common::network::target::{Target, TargetList};
use mcping_common::resolver::NameResolver;

pub fn negotiate_family(
    resolver: &dyn NameResolver,
    forced: NegotiatedFamily,
    multicast: Option<&str>,
    port: &str,
    targets: &TargetList,
) -> Result<NegotiatedFamily, SessionError> {
    if !forced.is_unconstrained() {
        debug!("user forced ip_ver is {}, using that", forced.version());
        return Ok(forced);
    }

    if let Some(label) = multicast
        && let Some(family) = multicast_only_family(resolver, label, port)?
    {
        debug!("mcast address for {label} supports only ipv{}, using that", family.version());
        require_for_multicast(family, targets)?;
        return Ok(family.into());
    }

    let Some(pivot) = first_single_family(targets)? else {
        debug!("every address supports all IP versions");
        return Ok(NegotiatedFamily::Unconstrained);
    };

    require_for_pivot(pivot, targets)?;
    debug!("every address supports ipv{}", pivot.version());
    Ok(pivot.into())
}

/// `Some` if the group only resolves in one version, `None` if it resolves in both.
fn multicast_only_family(
    resolver: &dyn NameResolver,
    label: &str,
    port: &str,
) -> Result<Option<IpFamily>, SessionError> {
    let candidates = resolver.resolve(label, port, NegotiatedFamily::Unconstrained)?;
    let support = FamilySupport::deep(&candidates).ok_or_else(|| {
        SessionError::MulticastNoUsableFamily {
            label: label.to_string(),
        }
    })?;
    trace!("mcast_ipver for {label} is {}", NegotiatedFamily::from(support).version());
    Ok(support.only())
}

fn target_support(target: &Target) -> Result<FamilySupport, SessionError> {
    let support = target.support().ok_or_else(|| SessionError::NoUsableFamily {
        label: target.label().to_string(),
    })?;
    trace!(
        "ipver for {} is {}",
        target.label(),
        NegotiatedFamily::from(support).version()
    );
    Ok(support)
}

fn require_for_multicast(multicast: IpFamily, targets: &TargetList) -> Result<(), SessionError> {
    for target in targets {
        let support = target_support(target)?;
        if !support.supports(multicast) {
            return Err(SessionError::MulticastFamilyMismatch {
                multicast,
                host: target.label().to_string(),
                host_family: multicast.other(),
            });
        }
    }
    Ok(())
}

fn first_single_family(targets: &TargetList) -> Result<Option<IpFamily>, SessionError> {
    for target in targets {
        if let Some(family) = target_support(target)?.only() {
            return Ok(Some(family));
        }
    }
    Ok(None)
}

fn require_for_pivot(pivot: IpFamily, targets: &TargetList) -> Result<(), SessionError> {
    for target in targets {
        if !target_support(target)?.supports(pivot) {
            return Err(SessionError::HostFamilyMismatch {
                host: target.label().to_string(),
                required: pivot,
            });
        }
    }
    Ok(())
}
