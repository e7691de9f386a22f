//! Cumulative weighted category selection.
//!
//! Given an ordered list of `(label, cumulative_upper_bound)` pairs and a
//! uniform draw in [0, 1), the first label whose bound exceeds the draw wins.
//! Ordering is significant: it fixes which category takes a draw that lands
//! exactly on a boundary (the later one, since bounds are exclusive).

/// Pick the first label whose cumulative bound is strictly greater than `draw`.
///
/// The last label acts as the remainder: it is returned when no bound exceeds
/// the draw (floating-point sums of shares can fall just short of 1.0).
///
/// # Panics
/// Panics if `bounds` is empty.
///
/// # Example
/// ```
/// use life_simulator_core_rs::tables::choose_cumulative;
///
/// let bounds = [("graduate", 0.05), ("college", 0.25), ("high_school", 1.0)];
/// assert_eq!(choose_cumulative(&bounds, 0.04), "graduate");
/// assert_eq!(choose_cumulative(&bounds, 0.05), "college");
/// assert_eq!(choose_cumulative(&bounds, 0.25), "high_school");
/// ```
pub fn choose_cumulative<T: Copy>(bounds: &[(T, f64)], draw: f64) -> T {
    assert!(!bounds.is_empty(), "cumulative table must not be empty");
    let fallback = bounds[bounds.len() - 1].0;
    bounds
        .iter()
        .find(|(_, bound)| draw < *bound)
        .map(|(label, _)| *label)
        .unwrap_or(fallback)
}

/// Turn ordered shares into cumulative upper bounds.
///
/// The final bound is forced to 1.0 so the last category always absorbs the
/// remainder.
pub fn cumulative_bounds<T: Copy>(shares: &[(T, f64)]) -> Vec<(T, f64)> {
    let mut running = 0.0;
    let mut out: Vec<(T, f64)> = shares
        .iter()
        .map(|(label, share)| {
            running += share;
            (*label, running)
        })
        .collect();
    if let Some(last) = out.last_mut() {
        last.1 = 1.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_takes_draws_past_last_bound() {
        let bounds = [('a', 0.3), ('b', 0.6)];
        assert_eq!(choose_cumulative(&bounds, 0.95), 'b');
    }

    #[test]
    fn test_zero_share_category_never_chosen() {
        let bounds = cumulative_bounds(&[('a', 0.0), ('b', 0.5), ('c', 0.5)]);
        assert_eq!(choose_cumulative(&bounds, 0.0), 'b');
    }

    #[test]
    fn test_cumulative_bounds_end_at_one() {
        let bounds = cumulative_bounds(&[('a', 0.1), ('b', 0.2), ('c', 0.69999)]);
        assert_eq!(bounds.last().unwrap().1, 1.0);
        assert!((bounds[1].1 - 0.3).abs() < 1e-12);
    }
}
