//! Cumulative-band selection.
//!
//! A weighted table becomes a running-sum array; a uniform draw in `[0, 1)` is
//! scaled by the total and mapped to the first band whose upper edge lies
//! strictly above it. The fortune sampler, the rarity calculator (plain and
//! saisen-adjusted) and the emotion-attribute selector all go through here.

/// Running sum of `weights` in table order.
pub fn running_sum<I>(weights: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut total = 0.0;
    weights
        .into_iter()
        .map(|w| {
            total += w;
            total
        })
        .collect()
}

/// Index of the band that `random_unit` falls into.
///
/// The draw is scaled by the last cumulative entry (the total weight) and the
/// first index with `r < cumulative[i]` wins. When no band matches (a draw of
/// exactly 1.0, or a malformed table) the last index is returned; an empty
/// table yields 0.
pub fn band_index(cumulative: &[f64], random_unit: f64) -> usize {
    let Some(&total) = cumulative.last() else {
        return 0;
    };
    let r = random_unit * total;
    cumulative
        .iter()
        .position(|&edge| r < edge)
        .unwrap_or(cumulative.len() - 1)
}

/// Select the item whose band contains `random_unit`.
///
/// Falls back to the last item if the cumulative array is longer than
/// `items`. Returns `None` only when `items` is empty.
pub fn select_by_cumulative_band<'a, T>(
    cumulative: &[f64],
    items: &'a [T],
    random_unit: f64,
) -> Option<&'a T> {
    items
        .get(band_index(cumulative, random_unit))
        .or_else(|| items.last())
}

/// Pick uniformly from `items`: `floor(random_unit * len)`, clamped to the
/// last index.
pub fn pick_uniform<T>(items: &[T], random_unit: f64) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let last = items.len() - 1;
    let index = ((random_unit * items.len() as f64).floor().max(0.0) as usize).min(last);
    items.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn running_sum_of_fortune_weights() {
        let cumulative = running_sum([16.0, 23.0, 34.0, 12.0, 8.0, 4.0, 3.0]);
        assert_eq!(
            cumulative,
            vec![16.0, 39.0, 73.0, 85.0, 93.0, 97.0, 100.0]
        );
    }

    #[test]
    fn scales_by_total_weight() {
        let cumulative = [16.0, 39.0, 73.0, 85.0, 93.0, 97.0, 100.0];
        assert_eq!(band_index(&cumulative, 0.05), 0);
        assert_eq!(band_index(&cumulative, 0.16), 1);
        assert_eq!(band_index(&cumulative, 0.72), 2);
        assert_eq!(band_index(&cumulative, 0.999), 6);
    }

    #[test]
    fn boundary_belongs_to_next_band() {
        let cumulative = [0.6, 0.9, 0.98, 1.0];
        assert_eq!(band_index(&cumulative, 0.0), 0);
        assert_eq!(band_index(&cumulative, 0.6), 1);
        assert_eq!(band_index(&cumulative, 0.9), 2);
        assert_eq!(band_index(&cumulative, 0.98), 3);
    }

    #[test]
    fn falls_back_to_last_band() {
        let cumulative = [0.6, 0.9, 0.98, 1.0];
        assert_eq!(band_index(&cumulative, 1.0), 3);
        assert_eq!(band_index(&cumulative, 7.5), 3);
        assert_eq!(band_index(&[], 0.5), 0);
    }

    #[test]
    fn select_handles_short_and_empty_items() {
        let cumulative = [1.0, 2.0, 3.0];
        assert_eq!(select_by_cumulative_band(&cumulative, &["a", "b"], 0.99), Some(&"b"));
        let empty: [&str; 0] = [];
        assert_eq!(select_by_cumulative_band(&cumulative, &empty, 0.1), None);
    }

    #[test]
    fn pick_uniform_clamps() {
        let items = ["a", "b", "c", "d", "e"];
        assert_eq!(pick_uniform(&items, 0.0), Some(&"a"));
        assert_eq!(pick_uniform(&items, 0.39), Some(&"b"));
        assert_eq!(pick_uniform(&items, 0.9999), Some(&"e"));
        assert_eq!(pick_uniform(&items, 1.0), Some(&"e"));
        let empty: [&str; 0] = [];
        assert_eq!(pick_uniform(&empty, 0.5), None);
    }

    proptest! {
        #[test]
        fn band_index_always_in_range(
            weights in proptest::collection::vec(1u32..100, 1..12),
            u in 0.0f64..1.0,
        ) {
            let cumulative = running_sum(weights.iter().map(|&w| f64::from(w)));
            let idx = band_index(&cumulative, u);
            prop_assert!(idx < cumulative.len());
        }
    }
}
