//! This library provides an exhaustive all pairs search (or *similarity self-join*)
//! on binary sketches in the Hamming space.
//! Which pairs are joined is decided by a caller-supplied predicate,
//! and results always come out in the order of insertion.
#![deny(missing_docs)]

pub mod simple_join;
pub mod sketch;

pub use simple_join::SimpleJoiner;
pub use sketch::Sketch;

/// Converts a Hamming distance between sketches of type `S` into
/// a similarity percentage in `[0, 100]`.
///
/// # Examples
///
/// ```
/// use all_pairs_hamming::similarity_percent;
///
/// assert_eq!(similarity_percent::<u64>(0), 100.);
/// assert_eq!(similarity_percent::<u64>(16), 75.);
/// assert_eq!(similarity_percent::<u64>(64), 0.);
/// ```
pub fn similarity_percent<S>(dist: usize) -> f64
where
    S: Sketch,
{
    let dim = S::dim() as f64;
    ((1. - dist as f64 / dim) * 100.).clamp(0., 100.)
}
