// SPDX-License-Identifier: Apache-2.0

//! Comparator adapter
//!
//! A comparator is a strict "less" relation over keys. [`Compare`] is the scalar
//! form; its provided [`Compare::compare_lanes`] hook lifts it to a batch of lanes.
//! The four canonical relations ([`Less`], [`LessEqual`], [`Greater`],
//! [`GreaterEqual`]) carry a [`Relation`] tag and resolve to the native lane
//! comparison. [`NativeCompare`] pairs a scalar closure with a user batch closure.
//! Every other comparator falls back to one scalar call per lane.
//!
//! [`CompareAdapter`] exposes the three invocation shapes the engine needs:
//! scalar × scalar, batch × scalar and key group × scalar. For the same inputs
//! all three agree bit for bit with the plain scalar relation.

use crate::constants::MAX_GROUP_KEYS;
pub use crate::lanes::Relation;
use crate::lanes::Lane;

/// A strict ordering relation over `K`.
pub trait Compare<K> {
    /// Canonical relation this comparator implements, if any.
    const RELATION: Option<Relation> = None;

    /// True when [`Compare::compare_lanes`] does not go lane by lane.
    const NATIVE: bool = Self::RELATION.is_some();

    /// Returns true when `lhs` orders before `rhs`.
    fn compare(&self, lhs: &K, rhs: &K) -> bool;

    /// Lane-wise comparison, bit `i` of the result is `compare(lhs[i], rhs[i])`.
    #[inline]
    fn compare_lanes(&self, lhs: &<K as Lane>::Batch, rhs: &<K as Lane>::Batch) -> u32
    where
        K: Lane,
    {
        match Self::RELATION {
            Some(relation) => K::cmp(relation, lhs, rhs),
            None => per_lane_mask::<K, Self>(self, lhs, rhs),
        }
    }
}

/// Fallback lifting: extract each lane and apply the scalar relation.
#[inline]
pub fn per_lane_mask<K, C>(compare: &C, lhs: &K::Batch, rhs: &K::Batch) -> u32
where
    K: Lane,
    C: Compare<K> + ?Sized,
{
    let mut mask = 0u32;
    for lane in 0..K::LANES {
        let bit = compare.compare(&K::lane(lhs, lane), &K::lane(rhs, lane));
        mask |= (bit as u32) << lane;
    }
    mask
}

macro_rules! canonical_relation {
    ($(#[$doc:meta])* $name:ident, $relation:ident, $op:tt) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl<K: PartialOrd> Compare<K> for $name {
            const RELATION: Option<Relation> = Some(Relation::$relation);

            #[inline]
            fn compare(&self, lhs: &K, rhs: &K) -> bool {
                lhs $op rhs
            }
        }
    };
}

canonical_relation!(
    /// `lhs < rhs`, the default ordering.
    Less, Less, <
);
canonical_relation!(
    /// `lhs <= rhs`.
    LessEqual, LessEqual, <=
);
canonical_relation!(
    /// `lhs > rhs`, for ranges sorted in descending order.
    Greater, Greater, >
);
canonical_relation!(
    /// `lhs >= rhs`.
    GreaterEqual, GreaterEqual, >=
);

impl<K, F> Compare<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> bool {
        self(lhs, rhs)
    }
}

/// A comparator with a hand-written batch form.
///
/// `scalar` answers single comparisons; `batch` must return a mask with bit `i`
/// equal to `scalar(lhs[i], rhs[i])`.
#[derive(Debug, Clone, Copy)]
pub struct NativeCompare<S, B> {
    scalar: S,
    batch: B,
}

impl<S, B> NativeCompare<S, B> {
    #[inline]
    pub fn new(scalar: S, batch: B) -> Self {
        Self { scalar, batch }
    }
}

/// Shorthand for [`NativeCompare::new`].
#[inline]
pub fn native_compare<S, B>(scalar: S, batch: B) -> NativeCompare<S, B> {
    NativeCompare::new(scalar, batch)
}

impl<K, S, B> Compare<K> for NativeCompare<S, B>
where
    K: Lane,
    S: Fn(&K, &K) -> bool,
    B: Fn(&K::Batch, &K::Batch) -> u32,
{
    const NATIVE: bool = true;

    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> bool {
        (self.scalar)(lhs, rhs)
    }

    #[inline]
    fn compare_lanes(&self, lhs: &K::Batch, rhs: &K::Batch) -> u32
    where
        K: Lane,
    {
        (self.batch)(lhs, rhs)
    }
}

/// Lifts a comparator to the shapes the partition engine probes with.
pub struct CompareAdapter<'c, C> {
    compare: &'c C,
}

impl<'c, C> Clone for CompareAdapter<'c, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'c, C> Copy for CompareAdapter<'c, C> {}

impl<'c, C> CompareAdapter<'c, C> {
    #[inline]
    pub fn new(compare: &'c C) -> Self {
        Self { compare }
    }

    /// Scalar × scalar pass-through.
    #[inline]
    pub fn scalar<K>(&self, key: &K, value: &K) -> bool
    where
        C: Compare<K>,
    {
        self.compare.compare(key, value)
    }

    /// Batch × scalar: every lane of `keys` against `value`.
    #[inline]
    pub fn batch<K: Lane>(&self, keys: &K::Batch, value: &K) -> u32
    where
        C: Compare<K>,
    {
        self.compare.compare_lanes(keys, &K::splat(*value))
    }

    /// Scalar × scalar for a run of keys, bit `i` for `keys[i]`.
    #[inline]
    pub fn each<K>(&self, keys: &[K], value: &K) -> u32
    where
        C: Compare<K>,
    {
        debug_assert!(
            keys.len() <= MAX_GROUP_KEYS,
            "key group of {} exceeds the {}-bit mask",
            keys.len(),
            MAX_GROUP_KEYS
        );
        let mut mask = 0u32;
        for (i, key) in keys.iter().enumerate() {
            mask |= (self.compare.compare(key, value) as u32) << i;
        }
        mask
    }

    /// Group × scalar.
    ///
    /// The group is cut into chunks of `K::LANES`. A full chunk goes through the
    /// batch path when the comparator is native, anything else (fallback
    /// comparators, the trailing partial chunk) is compared key by key. Each
    /// chunk's bits are shifted to the chunk's offset in the group.
    pub fn group<K: Lane>(&self, keys: &[K], value: &K) -> u32
    where
        C: Compare<K>,
    {
        debug_assert!(
            keys.len() <= MAX_GROUP_KEYS,
            "key group of {} exceeds the {}-bit mask",
            keys.len(),
            MAX_GROUP_KEYS
        );
        let mut mask = 0u32;
        for (chunk_index, chunk) in keys.chunks(K::LANES).enumerate() {
            let offset = chunk_index * K::LANES;
            let bits = if <C as Compare<K>>::NATIVE && chunk.len() == K::LANES {
                self.batch(&K::gather(chunk), value)
            } else {
                self.each(chunk, value)
            };
            mask |= bits << offset;
        }
        mask
    }
}
