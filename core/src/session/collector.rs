use tracing::debug;

use mcping_common::SessionError;
use mcping_common::network::family::NegotiatedFamily;
use mcping_common::network::target::{Target, TargetList};
use mcping_common::resolver::NameResolver;

/// Resolves every remote argument and builds the session's target list.
///
/// An argument whose addresses overlap with an earlier target is dropped
/// silently; two spellings of the same host count once. Loopback addresses are
/// rejected outright, since a loopback peer cannot take part in multicast.
pub fn collect_targets<S: AsRef<str>>(
    resolver: &dyn NameResolver,
    args: &[S],
    port: &str,
    hint: NegotiatedFamily,
) -> Result<TargetList, SessionError> {
    let mut targets = TargetList::new();

    for arg in args.iter().map(AsRef::as_ref) {
        let candidates = resolver.resolve(arg, port, hint)?;

        if targets.contains_any(&candidates) {
            debug!("address \"{arg}\" is already in list, skipping");
            continue;
        }

        if candidates.iter().any(|addr| addr.ip().is_loopback()) {
            return Err(SessionError::Loopback {
                label: arg.to_string(),
            });
        }

        debug!(
            "new address \"{arg}\" added to list (position {})",
            targets.len()
        );
        targets.push(Target::new(arg, candidates));
    }

    if targets.is_empty() {
        return Err(SessionError::NoTargets);
    }

    Ok(targets)
}
