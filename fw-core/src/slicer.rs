use crate::range::Range;
use crate::rule::Rule;

/// Produces the ordered list of maximal sub-intervals of `property_range`
/// (the property's range on dimension `dimension`) such that within each
/// sub-interval the set of rules whose projection on `dimension` covers it
/// is constant.
///
/// Boundaries are exactly the rule-induced cut points `lo_k` and `hi_k + 1`
/// that fall strictly inside `(property_range.lo, property_range.hi]`. A
/// boundary outside that half-open interval would not subdivide the
/// property's range at all, so including it would only produce an
/// unnecessary (but not incorrect) extra slice; excluding it keeps the
/// slice count proportional to boundaries that actually matter.
///
/// `property_range` must satisfy `lo <= hi`; callers are expected to have
/// already handled the vacuously-true empty-property case (§7 `EmptyProperty`
/// in the design doc) before calling this.
pub fn slice_dimension(
    dimension: usize,
    property_range: Range,
    rules: &[Rule],
) -> Vec<Range> {
    debug_assert!(property_range.is_valid());

    let mut cuts: Vec<u32> = Vec::new();
    for rule in rules {
        let projected = rule.ranges[dimension];

        if projected.lo > property_range.lo && projected.lo <= property_range.hi
        {
            cuts.push(projected.lo);
        }

        if let Some(next) = projected.hi.checked_add(1) {
            if next > property_range.lo && next <= property_range.hi {
                cuts.push(next);
            }
        }
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut slices = Vec::with_capacity(cuts.len() + 1);
    let mut start = property_range.lo;
    for cut in cuts {
        slices.push(Range::new(start, cut - 1));
        start = cut;
    }
    slices.push(Range::new(start, property_range.hi));
    slices
}
