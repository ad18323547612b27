use crate::range::Range;
use crate::rule::{Property, Rule, DIMENSIONS};
use crate::slicer::slice_dimension;
use crate::store::RuleStore;
use crate::witness::Witness;

/// Result of driving the Cartesian evaluator over a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Every packet in the property's region receives the property's
    /// expected action.
    Holds,
    /// A packet was found that receives a different action; `witness`
    /// identifies one concrete offending packet.
    Fails { witness: Witness },
    /// Verification was stopped early via the cooperative cancel hook.
    /// The witness slot is left unchanged.
    Cancelled,
}

/// Drives the slicer across all five dimensions and, for each slice-tuple in
/// the resulting Cartesian product, asks `store` for the first matching rule.
///
/// `should_cancel` is polled once per slice-tuple; returning `true` aborts
/// the sweep with [`VerifyOutcome::Cancelled`]. Pass `|| false` for
/// unconditional verification.
pub fn verify(
    store: &RuleStore,
    property: &Property,
    mut should_cancel: impl FnMut() -> bool,
) -> VerifyOutcome {
    if property.is_empty_region() {
        return VerifyOutcome::Holds;
    }

    let rules = store.rules();
    let slices: [Vec<Range>; DIMENSIONS] =
        std::array::from_fn(|d| slice_dimension(d, property.ranges[d], rules));

    let mut indices = [0usize; DIMENSIONS];
    loop {
        if should_cancel() {
            return VerifyOutcome::Cancelled;
        }

        let slice_tuple: [Range; DIMENSIONS] =
            std::array::from_fn(|d| slices[d][indices[d]]);

        match store.first_match(&slice_tuple) {
            Some(matched) if matched.action == property.action => {}
            // Either a mismatching rule matched, or no rule covers this
            // slice at all (an incomplete firewall, §7): both are reported
            // as a mismatch against the property's expected action.
            _ => {
                return VerifyOutcome::Fails {
                    witness: Witness::from_slice_tuple(&slice_tuple),
                }
            }
        }

        if !advance(&mut indices, &slices) {
            return VerifyOutcome::Holds;
        }
    }
}

/// Lexicographic odometer over the Cartesian product of `slices`, advancing
/// the least-significant (highest-dimension) index first. Returns `false`
/// once the product is exhausted.
fn advance(indices: &mut [usize; DIMENSIONS], slices: &[Vec<Range>; DIMENSIONS]) -> bool {
    for d in (0..DIMENSIONS).rev() {
        indices[d] += 1;
        if indices[d] < slices[d].len() {
            return true;
        }
        indices[d] = 0;
    }
    false
}
