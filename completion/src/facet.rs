use itertools::Itertools;

use crate::filter::RetainedItem;
use crate::item::FacetState;
use crate::item::FacetTag;

/// Recompute facet availability against the retained set.
///
/// A facet stays in the list either way (the host renders unavailable
/// facets disabled), so this only flips the `available` flag: set iff
/// some retained candidate still carries the tag. Selection flags pass
/// through untouched.
pub(crate) fn update_facet_availability(
    facets: &[FacetState],
    retained: &[RetainedItem],
) -> Vec<FacetState> {
    let carried: Vec<&FacetTag> = retained
        .iter()
        .flat_map(|r| &r.item.facets)
        .unique()
        .collect();

    facets
        .iter()
        .map(|f| f.clone().with_availability(carried.contains(&&f.tag)))
        .collect()
}
