//! Arrangement generator - shuffled tile coordinates for a new puzzle.
//!
//! The shuffle walks `i` from `n - 1` down to `1` and swaps slot `i` with a
//! slot `j` drawn uniformly from `[0, i)`. Excluding `j == i` makes this
//! Sattolo's algorithm: the result is always a single `n`-cycle, so no element
//! stays in its original slot when `n >= 2` and the inputs are distinct.

use crate::rng::SimpleRng;

/// Return a derangement of `original`.
///
/// Inputs shorter than two elements are returned unchanged.
///
/// # Examples
///
/// ```
/// use tui_jigsaw_core::arrangement::derangement;
/// use tui_jigsaw_core::SimpleRng;
///
/// let mut rng = SimpleRng::new(7);
/// let shuffled = derangement(&[1, 2, 3, 4], &mut rng);
/// assert!(shuffled.iter().zip([1, 2, 3, 4]).all(|(a, b)| *a != b));
///
/// assert_eq!(derangement(&[9], &mut rng), vec![9]);
/// ```
pub fn derangement<T: Copy>(original: &[T], rng: &mut SimpleRng) -> Vec<T> {
    let mut result = original.to_vec();
    let n = result.len();
    if n < 2 {
        return result;
    }

    for i in (1..n).rev() {
        let j = rng.next_range(i as u32) as usize;
        result.swap(i, j);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    fn grid(columns: u8, rows: u8) -> Vec<Coordinate> {
        (0..rows)
            .flat_map(|y| (0..columns).map(move |x| Coordinate::new(x, y)))
            .collect()
    }

    #[test]
    fn test_empty_and_single_unchanged() {
        let mut rng = SimpleRng::new(1);
        assert!(derangement::<Coordinate>(&[], &mut rng).is_empty());
        let one = [Coordinate::new(0, 0)];
        assert_eq!(derangement(&one, &mut rng), one.to_vec());
    }

    #[test]
    fn test_two_elements_always_swap() {
        for seed in 1..50 {
            let mut rng = SimpleRng::new(seed);
            assert_eq!(derangement(&['a', 'b'], &mut rng), vec!['b', 'a']);
        }
    }

    #[test]
    fn test_no_fixed_points_across_seeds_and_sizes() {
        for (columns, rows) in [(2, 2), (3, 3), (4, 3), (5, 5), (20, 20)] {
            let coords = grid(columns, rows);
            for seed in 1..40 {
                let mut rng = SimpleRng::new(seed);
                let shuffled = derangement(&coords, &mut rng);
                let fixed = coords.iter().zip(&shuffled).filter(|(a, b)| a == b).count();
                assert_eq!(fixed, 0, "seed {seed} grid {columns}x{rows}");
            }
        }
    }

    #[test]
    fn test_result_is_permutation() {
        let coords = grid(4, 4);
        let mut rng = SimpleRng::new(2024);
        let mut shuffled = derangement(&coords, &mut rng);
        shuffled.sort_by_key(|c| c.index(4));
        assert_eq!(shuffled, coords);
    }

    #[test]
    fn test_same_seed_same_arrangement() {
        let coords = grid(3, 3);
        let a = derangement(&coords, &mut SimpleRng::new(5));
        let b = derangement(&coords, &mut SimpleRng::new(5));
        assert_eq!(a, b);
    }
}
