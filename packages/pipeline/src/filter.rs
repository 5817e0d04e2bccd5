//! Filter engine: narrows the raw observation set for one render cycle.

use screwworm_map_surveillance_models::{Observation, ObservationFilter};

/// Returns the observations passing the given filter, in input order.
///
/// Pure and idempotent: the input is never mutated, and filtering an
/// already-filtered set with the same parameters returns an equal set.
/// An empty result is a valid output, not a failure.
#[must_use]
pub fn filter_observations(
    observations: &[Observation],
    filter: &ObservationFilter,
) -> Vec<Observation> {
    observations
        .iter()
        .filter(|o| filter.matches(o))
        .cloned()
        .collect()
}
