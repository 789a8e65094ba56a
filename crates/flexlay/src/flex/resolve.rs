//! Flexible length resolution (grow and shrink).
//!
//! [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)

use crate::config::FlexResolution;

use super::line::gap_total;

/// What the resolver needs to know about one item on a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexFactors {
    /// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    /// The flex base size.
    pub basis: f32,
    /// flex-grow factor.
    pub grow: f32,
    /// flex-shrink factor.
    pub shrink: f32,
    /// Sum of both main-axis margins.
    pub margin: f32,
    /// Resolved min main size. Only the iterative mode reads it.
    pub min: f32,
    /// Resolved max main size. Only the iterative mode reads it.
    pub max: f32,
}

impl FlexFactors {
    /// An item without margins or min/max constraints.
    #[must_use]
    pub const fn new(basis: f32, grow: f32, shrink: f32) -> Self {
        Self {
            basis,
            grow,
            shrink,
            margin: 0.0,
            min: 0.0,
            max: f32::INFINITY,
        }
    }

    /// Copy with the main-axis margin sum replaced.
    #[must_use]
    pub const fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Copy with min/max main size replaced.
    #[must_use]
    pub const fn with_limits(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// [§ 9.2 step 3E](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    ///
    /// "The hypothetical main size is the item's flex base size clamped
    /// according to its used min and max main sizes."
    #[must_use]
    pub fn hypothetical(&self) -> f32 {
        self.basis.min(self.max).max(self.min)
    }
}

/// Turn each item's basis into a final main size.
///
/// Returns one size per item, in order. The single-pass mode leaves
/// min/max to the caller; the iterative mode honors them.
#[must_use]
pub fn resolve_flexible_lengths(
    items: &[FlexFactors],
    container_main: f32,
    gap: f32,
    mode: FlexResolution,
) -> Vec<f32> {
    if items.is_empty() {
        return Vec::new();
    }
    let margins: f32 = items.iter().map(|item| item.margin).sum();
    let available = container_main - gap_total(gap, items.len()) - margins;
    match mode {
        FlexResolution::SinglePass => resolve_single_pass(items, available),
        FlexResolution::Iterative => resolve_iterative(items, available),
    }
}

/// One proportional distribution of the line's free space.
///
/// # Formulas
///
/// ```text
/// free  = available - Σ basis
/// grow:   size = basis + free * grow / Σ grow                (free ≥ 0)
/// shrink: size = basis + free * (shrink * basis) / Σ (shrink * basis)
/// ```
///
/// When the relevant factor total is zero every item keeps its basis.
fn resolve_single_pass(items: &[FlexFactors], available: f32) -> Vec<f32> {
    let free_space = available - items.iter().map(|item| item.basis).sum::<f32>();

    if free_space >= 0.0 {
        let total_grow: f32 = items.iter().map(|item| item.grow).sum();
        if total_grow == 0.0 {
            return items.iter().map(|item| item.basis).collect();
        }
        items
            .iter()
            .map(|item| free_space.mul_add(item.grow / total_grow, item.basis))
            .collect()
    } else {
        let total_weight: f32 = items.iter().map(|item| item.shrink * item.basis).sum();
        if total_weight == 0.0 {
            return items.iter().map(|item| item.basis).collect();
        }
        items
            .iter()
            .map(|item| {
                let weight = item.shrink * item.basis;
                free_space.mul_add(weight / total_weight, item.basis)
            })
            .collect()
    }
}

/// Resolver bookkeeping for one item during the freeze loop.
#[derive(Debug, Clone, Copy)]
struct ItemState {
    target: f32,
    frozen: bool,
    min_violation: bool,
    max_violation: bool,
}

/// Full iterative freeze-loop algorithm.
///
/// `available` is the line's inner main size with gaps and margins
/// already removed, so sizes below are inner sizes throughout.
fn resolve_iterative(items: &[FlexFactors], available: f32) -> Vec<f32> {
    // STEP 1: "Determine the used flex factor."
    //
    // "If the sum of the outer hypothetical main sizes of all items on the
    // line is less than the flex container's inner main size, use the flex
    // grow factor for the rest of this algorithm; otherwise, use the flex
    // shrink factor."
    let sum_hypothetical: f32 = items.iter().map(FlexFactors::hypothetical).sum();
    let growing = sum_hypothetical < available;
    let factor = |item: &FlexFactors| if growing { item.grow } else { item.shrink };

    // STEP 2: "Size inflexible items."
    //
    // "Freeze, setting its target main size to its hypothetical main size…
    //   - any item that has a flex factor of zero
    //   - if using the flex grow factor: any item that has a flex base size
    //     greater than its hypothetical main size
    //   - if using the flex shrink factor: any item that has a flex base size
    //     less than its hypothetical main size"
    let mut states: Vec<ItemState> = items
        .iter()
        .map(|item| {
            let hypothetical = item.hypothetical();
            let frozen = factor(item) == 0.0
                || (growing && item.basis > hypothetical)
                || (!growing && item.basis < hypothetical);
            ItemState {
                target: if frozen { hypothetical } else { item.basis },
                frozen,
                min_violation: false,
                max_violation: false,
            }
        })
        .collect();

    // STEP 3: "Calculate initial free space."
    let occupied = |states: &[ItemState]| -> f32 {
        items
            .iter()
            .zip(states)
            .map(|(item, state)| if state.frozen { state.target } else { item.basis })
            .sum()
    };
    let initial_free_space = available - occupied(&states);

    // STEP 4: Loop until all items are frozen.
    while states.iter().any(|state| !state.frozen) {
        // 4b. Calculate remaining free space.
        let remaining_free = available - occupied(&states);

        // 4c. "If the sum of the unfrozen flex factors is less than one,
        //      multiply the initial free space by this sum."
        let unfrozen_factor_sum: f32 = items
            .iter()
            .zip(&states)
            .filter(|(_, state)| !state.frozen)
            .map(|(item, _)| factor(item))
            .sum();
        let free_space = if unfrozen_factor_sum > 0.0 && unfrozen_factor_sum < 1.0 {
            let scaled = initial_free_space * unfrozen_factor_sum;
            if scaled.abs() < remaining_free.abs() {
                scaled
            } else {
                remaining_free
            }
        } else {
            remaining_free
        };

        // 4d. Distribute free space.
        if growing {
            // "Find the ratio of the item's flex grow factor to the sum of
            // the flex grow factors of all unfrozen items on the line. Set
            // the item's target main size to its flex base size plus a
            // fraction of the remaining free space proportional to the ratio."
            for (item, state) in items.iter().zip(states.iter_mut()) {
                if !state.frozen {
                    state.target =
                        free_space.mul_add(item.grow / unfrozen_factor_sum, item.basis);
                }
            }
        } else {
            // "For every unfrozen item on the line, multiply its flex shrink
            // factor by its inner flex base size, and note this as its scaled
            // flex shrink factor. [...] Set the item's target main size to its
            // flex base size minus a fraction of the absolute value of the
            // remaining free space proportional to the ratio."
            let scaled_shrink_sum: f32 = items
                .iter()
                .zip(&states)
                .filter(|(_, state)| !state.frozen)
                .map(|(item, _)| item.shrink * item.basis)
                .sum();
            if scaled_shrink_sum > 0.0 {
                for (item, state) in items.iter().zip(states.iter_mut()) {
                    if !state.frozen {
                        let ratio = item.shrink * item.basis / scaled_shrink_sum;
                        state.target = free_space.abs().mul_add(-ratio, item.basis);
                    }
                }
            }
        }

        // 4e. "Fix min/max violations. Clamp each non-frozen item's target
        //      main size by its used min and max main sizes and floor its
        //      content-box size at zero."
        let mut total_violation = 0.0_f32;
        for (item, state) in items.iter().zip(states.iter_mut()) {
            if state.frozen {
                continue;
            }
            let clamped = state.target.min(item.max).max(item.min).max(0.0);
            let violation = clamped - state.target;
            state.min_violation = violation > 0.0;
            state.max_violation = violation < 0.0;
            total_violation += violation;
            state.target = clamped;
        }

        // 4f. "Freeze over-flexed items."
        //
        // "If the total violation is:
        //   - Zero: freeze all items.
        //   - Positive: freeze all the items with min violations.
        //   - Negative: freeze all the items with max violations."
        let mut froze_any = false;
        for state in states.iter_mut().filter(|state| !state.frozen) {
            let freeze = if total_violation.abs() < 0.01 {
                true
            } else if total_violation > 0.0 {
                state.min_violation
            } else {
                state.max_violation
            };
            if freeze {
                state.frozen = true;
                froze_any = true;
            }
        }
        if !froze_any {
            // Rounding left a violation no single item accounts for.
            for state in &mut states {
                state.frozen = true;
            }
        }
    }

    states.into_iter().map(|state| state.target).collect()
}
