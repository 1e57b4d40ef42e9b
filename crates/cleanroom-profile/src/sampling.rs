use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;

/// Fixed seed for row sampling, so repeated profiles agree.
pub const SAMPLE_SEED: u64 = 42;

/// Draw a deterministic subset of row indices.
///
/// Returns `None` when `row_count` does not exceed `max_rows`, meaning the
/// full table should be used. Indices are returned in ascending order.
pub fn sample_indices(row_count: usize, max_rows: usize, seed: u64) -> Option<Vec<usize>> {
    if row_count <= max_rows {
        return None;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut indices = index::sample(&mut rng, row_count, max_rows).into_vec();
    indices.sort_unstable();
    Some(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_tables_are_not_sampled() {
        assert_eq!(sample_indices(10, 10, SAMPLE_SEED), None);
        assert_eq!(sample_indices(0, 5, SAMPLE_SEED), None);
    }

    #[test]
    fn sampling_is_deterministic_and_bounded() {
        let first = sample_indices(1_000, 100, SAMPLE_SEED).expect("sample");
        let second = sample_indices(1_000, 100, SAMPLE_SEED).expect("sample");
        assert_eq!(first, second);
        assert_eq!(first.len(), 100);
        assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(first.iter().all(|idx| *idx < 1_000));
    }
}
