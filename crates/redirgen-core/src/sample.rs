//! Randomized path sampling.
//!
//! Pure functions over an injected RNG: fixed seed in, fixed paths out.
//! The vocabulary is passed explicitly rather than read from globals so
//! runs are repeatable and independent.

use rand::Rng;

use crate::path::RulePath;
use crate::vocab::Vocabulary;

fn sample_segment<'v, R: Rng>(vocab: &'v Vocabulary, rng: &mut R) -> &'v str {
    vocab.word(rng.random_range(0..vocab.len()))
}

/// Sample a path with uniform depth in `1..=max_depth` and segments drawn
/// i.i.d. uniform from the vocabulary.
pub fn sample_path<R: Rng>(
    vocab: &Vocabulary,
    max_depth: usize,
    rng: &mut R,
) -> RulePath {
    let depth = rng.random_range(1..=max_depth);
    let segments: Vec<&str> = (0..depth).map(|_| sample_segment(vocab, rng)).collect();
    RulePath::from_segments(segments).expect("vocabulary segments are valid")
}

/// Sample a path that shares a prefix with `source`.
///
/// The prefix length is uniform in `1..=source.depth() - 1`; callers must
/// ensure `source` has at least two segments. When the prefix leaves room
/// below `max_depth`, at least one fresh segment is appended, so the result
/// is rarely (but still possibly) equal to an existing path.
pub fn sample_path_with_prefix<R: Rng>(
    vocab: &Vocabulary,
    source: &RulePath,
    max_depth: usize,
    rng: &mut R,
) -> RulePath {
    let source_segments: Vec<&str> = source.segments().collect();
    debug_assert!(source_segments.len() >= 2, "prefix bias needs depth >= 2");

    let prefix_len = rng.random_range(1..source_segments.len());
    let mut segments: Vec<&str> = source_segments[..prefix_len].to_vec();

    if prefix_len < max_depth {
        let fresh = rng.random_range(1..=max_depth - prefix_len);
        segments.extend((0..fresh).map(|_| sample_segment(vocab, rng)));
    }

    RulePath::from_segments(segments).expect("vocabulary segments are valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn vocab() -> Vocabulary {
        Vocabulary::new(["alpha", "beta", "gamma"]).unwrap()
    }

    #[test]
    fn sampled_paths_respect_max_depth() {
        let vocab = vocab();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let path = sample_path(&vocab, 4, &mut rng);
            let depth = path.depth();
            assert!((1..=4).contains(&depth), "depth {depth} out of range");
            for segment in path.segments() {
                assert!(vocab.words().iter().any(|w| w == segment));
            }
        }
    }

    #[test]
    fn sampling_is_deterministic_for_a_fixed_seed() {
        let vocab = vocab();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(sample_path(&vocab, 3, &mut a), sample_path(&vocab, 3, &mut b));
        }
    }

    #[test]
    fn prefix_sampling_shares_a_proper_prefix() {
        let vocab = vocab();
        let mut rng = StdRng::seed_from_u64(11);
        let source = RulePath::parse("/alpha/beta/gamma").unwrap();
        let source_segments: Vec<&str> = source.segments().collect();

        for _ in 0..200 {
            let sampled = sample_path_with_prefix(&vocab, &source, 4, &mut rng);
            let segments: Vec<&str> = sampled.segments().collect();
            assert!(segments.len() <= 4);
            let shared = segments
                .iter()
                .zip(&source_segments)
                .take_while(|(a, b)| a == b)
                .count();
            assert!(shared >= 1, "no shared prefix in {sampled}");
        }
    }

    #[test]
    fn prefix_at_max_depth_appends_nothing() {
        let vocab = vocab();
        let mut rng = StdRng::seed_from_u64(3);
        let source = RulePath::parse("/alpha/beta/gamma").unwrap();
        // max_depth 1: every prefix of length >= 1 already fills the budget.
        for _ in 0..50 {
            let sampled = sample_path_with_prefix(&vocab, &source, 1, &mut rng);
            assert!(sampled.depth() < source.depth());
        }
    }
}
