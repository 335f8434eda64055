// SPDX-License-Identifier: Apache-2.0

//! N-ary partition engine
//!
//! A generalization of binary search. Each round splits the live interval
//! `[first, last)` with `N` probes, asks a [`Probe`] which of the probed
//! elements order before the target value, and narrows the interval to the
//! sub-range between the last "before" probe and the first "not before" probe.
//! With a monotone predicate the answer is always a prefix of the probes, so
//! the popcount of the mask is the split point.
//!
//! The probe strategies below are the four ways a round turns its `N` element
//! references into that mask.
//!
//! ## Performance notes
//! - A round costs one mask evaluation; with `N = LANES` that is one batch compare.
//! - The interval shrinks by a factor of about `N + 1` per round, so the round
//!   count is `log_{N+1}(len)` against `log_2(len)` for binary search.
//! - Probe positions are computed without `len * (i + 1)` overflow.

use crate::compare::{Compare, CompareAdapter};
use crate::constants::{MASK_BITS, MAX_GROUP_KEYS, MAX_PARTITION_WIDTH};
use crate::lanes::Lane;
use crate::project::{BatchProjection, Projection, ProjectionAdapter};

/// Computes the comparison mask for one round.
///
/// Bit `i` must be set exactly when `probes[i]` orders before the search value.
pub trait Probe<E> {
    fn mask(&self, probes: &[&E]) -> u32;
}

/// Lower bound of `range` under `probe`, using `N` probes per round.
///
/// Returns the first index whose element does not order before the value, or
/// `range.len()` when every element does.
#[inline]
pub fn search<E, P, const N: usize>(range: &[E], probe: &P) -> usize
where
    P: Probe<E>,
{
    const { assert!(N >= 1 && N <= MAX_PARTITION_WIDTH, "partition width must be in 1..=32") };
    let valid = u32::MAX >> (MASK_BITS - N);

    let mut first = 0;
    let mut last = range.len();
    while first != last {
        let positions = probe_positions::<N>(first, last);
        let probes: [&E; N] = positions.map(|at| &range[at]);

        let mask = probe.mask(&probes) & valid;
        debug_assert!(
            is_prefix_mask(mask),
            "comparison mask {mask:#b} is not a prefix; range not partitioned by the comparator"
        );

        let count = mask.count_ones() as usize;
        if count > 0 {
            first = positions[count - 1] + 1;
        }
        if count < N {
            last = positions[count];
        }
    }
    first
}

/// Positions `first + (i + 1) * len / (N + 1)` for `i` in `0..N`.
///
/// `len = q * (N + 1) + r`, so each position is `first + (i + 1) * q + (i + 1) * r / (N + 1)`
/// with `r <= N`, and no intermediate product exceeds `len` by more than `N * N`.
#[inline]
pub fn probe_positions<const N: usize>(first: usize, last: usize) -> [usize; N] {
    debug_assert!(first < last);
    let len = last - first;
    let quot = len / (N + 1);
    let rem = len % (N + 1);
    std::array::from_fn(|i| first + quot * (i + 1) + rem * (i + 1) / (N + 1))
}

/// True when the set bits of `mask` are exactly bits `0..popcount`.
#[inline]
pub fn is_prefix_mask(mask: u32) -> bool {
    mask & mask.wrapping_add(1) == 0
}

// =============================================================================
// PROBE STRATEGIES
// =============================================================================

/// Elements compared against the value as they are.
pub struct DirectProbe<'a, E, C> {
    value: &'a E,
    compare: CompareAdapter<'a, C>,
}

impl<'a, E, C> DirectProbe<'a, E, C> {
    #[inline]
    pub fn new(value: &'a E, compare: &'a C) -> Self {
        Self {
            value,
            compare: CompareAdapter::new(compare),
        }
    }
}

impl<'a, E, C> Probe<E> for DirectProbe<'a, E, C>
where
    C: Compare<E>,
{
    #[inline]
    fn mask(&self, probes: &[&E]) -> u32 {
        let mut mask = 0u32;
        for (i, element) in probes.iter().enumerate() {
            mask |= (self.compare.scalar(*element, self.value) as u32) << i;
        }
        mask
    }
}

/// One projection and one comparator call per probe.
pub struct ScalarProbe<'a, K, C, P> {
    value: &'a K,
    compare: CompareAdapter<'a, C>,
    projection: ProjectionAdapter<'a, P>,
}

impl<'a, K, C, P> ScalarProbe<'a, K, C, P> {
    #[inline]
    pub fn new(value: &'a K, compare: &'a C, projection: &'a P) -> Self {
        Self {
            value,
            compare: CompareAdapter::new(compare),
            projection: ProjectionAdapter::new(projection),
        }
    }
}

impl<'a, E, K, C, P> Probe<E> for ScalarProbe<'a, K, C, P>
where
    C: Compare<K>,
    P: Projection<E, K>,
{
    #[inline]
    fn mask(&self, probes: &[&E]) -> u32 {
        let mut mask = 0u32;
        for (i, element) in probes.iter().enumerate() {
            let key = self.projection.one(*element);
            mask |= (self.compare.scalar(&key, self.value) as u32) << i;
        }
        mask
    }
}

/// Probes projected one by one into a key buffer, compared as a lane group.
pub struct GroupProbe<'a, K, C, P> {
    value: &'a K,
    compare: CompareAdapter<'a, C>,
    projection: ProjectionAdapter<'a, P>,
}

impl<'a, K, C, P> GroupProbe<'a, K, C, P> {
    #[inline]
    pub fn new(value: &'a K, compare: &'a C, projection: &'a P) -> Self {
        Self {
            value,
            compare: CompareAdapter::new(compare),
            projection: ProjectionAdapter::new(projection),
        }
    }
}

impl<'a, E, K, C, P> Probe<E> for GroupProbe<'a, K, C, P>
where
    K: Lane,
    C: Compare<K>,
    P: Projection<E, K>,
{
    #[inline]
    fn mask(&self, probes: &[&E]) -> u32 {
        let mut buffer = [K::ZERO; MAX_GROUP_KEYS];
        let keys = &mut buffer[..probes.len()];
        self.projection.each(probes, keys);
        self.compare.group(keys, self.value)
    }
}

/// Probes gathered into one batch, projected and compared once.
pub struct PackedProbe<'a, K, C, P> {
    value: &'a K,
    compare: CompareAdapter<'a, C>,
    projection: ProjectionAdapter<'a, P>,
}

impl<'a, K, C, P> PackedProbe<'a, K, C, P> {
    #[inline]
    pub fn new(value: &'a K, compare: &'a C, projection: &'a P) -> Self {
        Self {
            value,
            compare: CompareAdapter::new(compare),
            projection: ProjectionAdapter::new(projection),
        }
    }
}

impl<'a, E, K, C, P> Probe<E> for PackedProbe<'a, K, C, P>
where
    E: Lane,
    K: Lane,
    C: Compare<K>,
    P: BatchProjection<E, K>,
{
    #[inline]
    fn mask(&self, probes: &[&E]) -> u32 {
        let keys = self.projection.packed::<E, K>(probes);
        self.compare.batch(&keys, self.value)
    }
}
