use tracing::trace;

use mcping_common::SessionError;
use mcping_common::network::family::NegotiatedFamily;
use mcping_common::network::target::TargetList;

/// Collapses every target to the first candidate of `family`.
///
/// Negotiation has already checked that each target supports `family`, so a
/// target without such a candidate means the pipeline is inconsistent.
pub fn materialize_targets(
    targets: &mut TargetList,
    family: NegotiatedFamily,
) -> Result<(), SessionError> {
    for target in targets.iter_mut() {
        let addr = target.materialize(family)?;
        trace!("{} materialized as {addr}", target.label());
    }
    Ok(())
}
