//! An exhaustive approach of all-pair search on binary sketches.
use anyhow::{anyhow, Result};
use rayon::prelude::*;

use crate::sketch::Sketch;

/// A joined pair of the left-side id, the right-side id, and their Hamming distance.
pub type Joined = (usize, usize, usize);

/// An exhaustive approach of all-pair search on binary sketches.
///
/// Every pair `(i, j)` with `i < j` is a candidate, visited in the order of
/// insertion, so that `i` is always the earlier-added sketch.
pub struct SimpleJoiner<S> {
    sketches: Vec<S>,
    shows_progress: bool,
}

impl<S> Default for SimpleJoiner<S>
where
    S: Sketch,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SimpleJoiner<S>
where
    S: Sketch,
{
    /// Creates an empty instance.
    pub const fn new() -> Self {
        Self {
            sketches: vec![],
            shows_progress: false,
        }
    }

    /// Logs the progress?
    pub const fn shows_progress(mut self, yes: bool) -> Self {
        self.shows_progress = yes;
        self
    }

    /// Appends a sketch, whose id is the number of sketches stored before.
    pub fn add(&mut self, sketch: S) {
        self.sketches.push(sketch);
    }

    /// Finds all pairs accepted by `accept`, returning triplets of
    /// the left-side id, the right-side id, and their Hamming distance.
    pub fn all_pairs<F>(&self, accept: F) -> Vec<Joined>
    where
        F: Fn(usize, usize) -> bool,
    {
        self.join(usize::MAX, accept)
    }

    /// Finds all pairs accepted by `accept` whose normalized Hamming distance
    /// is within `radius`.
    ///
    /// # Errors
    ///
    /// An error is returned if `radius` is not in `[0, 1]`.
    pub fn similar_pairs<F>(&self, radius: f64, accept: F) -> Result<Vec<Joined>>
    where
        F: Fn(usize, usize) -> bool,
    {
        let bound = Self::hamradius(radius)?;
        Ok(self.join(bound, accept))
    }

    /// Parallel version of [`Self::all_pairs()`], producing the same results in the same order.
    pub fn all_pairs_in_parallel<F>(&self, accept: F) -> Vec<Joined>
    where
        F: Fn(usize, usize) -> bool + Sync,
    {
        self.join_in_parallel(usize::MAX, accept)
    }

    /// Parallel version of [`Self::similar_pairs()`], producing the same results in the same order.
    ///
    /// # Errors
    ///
    /// An error is returned if `radius` is not in `[0, 1]`.
    pub fn similar_pairs_in_parallel<F>(&self, radius: f64, accept: F) -> Result<Vec<Joined>>
    where
        F: Fn(usize, usize) -> bool + Sync,
    {
        let bound = Self::hamradius(radius)?;
        Ok(self.join_in_parallel(bound, accept))
    }

    /// Gets the number of stored sketches.
    pub fn num_sketches(&self) -> usize {
        self.sketches.len()
    }

    /// Gets the number of candidate pairs, i.e., `n*(n-1)/2`.
    pub fn num_candidates(&self) -> usize {
        let n = self.num_sketches();
        n * n.saturating_sub(1) / 2
    }

    /// Gets the `i`-th sketch.
    pub fn sketch(&self, i: usize) -> Option<S> {
        self.sketches.get(i).copied()
    }

    /// Gets the memory usage in bytes.
    pub fn memory_in_bytes(&self) -> usize {
        self.num_sketches() * std::mem::size_of::<S>()
    }

    fn hamradius(radius: f64) -> Result<usize> {
        if !(0. ..=1.).contains(&radius) {
            return Err(anyhow!("The search radius must be in [0,1], but got {radius}."));
        }
        Ok((S::dim() as f64 * radius) as usize)
    }

    fn join<F>(&self, bound: usize, accept: F) -> Vec<Joined>
    where
        F: Fn(usize, usize) -> bool,
    {
        if self.shows_progress {
            log::info!(
                "[SimpleJoiner::join] #dimensions={}, #candidates={}",
                S::dim(),
                self.num_candidates()
            );
        }
        let mut matched = vec![];
        for i in 0..self.sketches.len() {
            if self.shows_progress && (i + 1) % 10000 == 0 {
                log::info!(
                    "[SimpleJoiner::join] Processed {}/{}...",
                    i + 1,
                    self.sketches.len()
                );
            }
            self.join_row(i, bound, &accept, &mut matched);
        }
        if self.shows_progress {
            log::info!("[SimpleJoiner::join] #matched={}", matched.len());
        }
        matched
    }

    fn join_in_parallel<F>(&self, bound: usize, accept: F) -> Vec<Joined>
    where
        F: Fn(usize, usize) -> bool + Sync,
    {
        if self.shows_progress {
            log::info!(
                "[SimpleJoiner::join_in_parallel] #dimensions={}, #candidates={}",
                S::dim(),
                self.num_candidates()
            );
        }
        // Rows are collected in the order of ids,
        // so the concatenation equals the sequential result.
        let rows: Vec<Vec<Joined>> = (0..self.sketches.len())
            .into_par_iter()
            .map(|i| {
                let mut row = vec![];
                self.join_row(i, bound, &accept, &mut row);
                row
            })
            .collect();
        let matched = rows.concat();
        if self.shows_progress {
            log::info!("[SimpleJoiner::join_in_parallel] #matched={}", matched.len());
        }
        matched
    }

    fn join_row<F>(&self, i: usize, bound: usize, accept: &F, matched: &mut Vec<Joined>)
    where
        F: Fn(usize, usize) -> bool,
    {
        let x = self.sketches[i];
        for (j, &y) in self.sketches.iter().enumerate().skip(i + 1) {
            if !accept(i, j) {
                continue;
            }
            let dist = x.hamdist(y);
            if dist <= bound {
                matched.push((i, j, dist));
            }
        }
    }
}
