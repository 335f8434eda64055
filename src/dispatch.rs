// SPDX-License-Identifier: Apache-2.0

//! # Lower bound dispatch
//!
//! Public entry points. Every function here returns the lower bound of `value`
//! in `range`: the first position whose key does not order before `value`
//! under the comparator, or `range.len()` if there is none. They differ only
//! in how a round of the partition engine is evaluated.
//!
//! The accelerated entry point picks its partition width and probe strategy from
//! the projection and key types through [`Accelerate`]. The choice is fixed at
//! monomorphization; nothing branches on it at runtime.
//!
//! | projection            | key                     | width  | probe    |
//! |-----------------------|-------------------------|--------|----------|
//! | [`Identity`]          | `f32`, `i32`            | 8      | packed   |
//! | [`Identity`]          | `f64`                   | 4      | packed   |
//! | [`Identity`]          | other [`SearchKey`]s    | 1      | direct   |
//! | [`NativeProjection`]  | lane to lane            | native | packed   |
//! | [`Lanewise`]          | lane key                | native | group    |
//! | `Fn(&E) -> K`         | any                     | 1      | scalar   |
//!
//! ## Performance notes
//! Entry points are `#[inline]` so the comparator and projection closures are
//! monomorphized into the search loop. None of them allocate.

use log::{debug, trace};

use crate::compare::{Compare, Less};
use crate::engine::{self, DirectProbe, GroupProbe, PackedProbe, ScalarProbe};
use crate::lanes::Lane;
use crate::project::{Identity, Lanewise, NativeProjection, Projection};
use crate::types::{ProbeKind, Result, SearchError, SearchPlan};

// =============================================================================
//  KEY AND PROJECTION CAPABILITIES
// =============================================================================

/// A key type the identity projection knows how to search.
///
/// Lane types override both methods to search with packed batches at their
/// native width. Every other key keeps the direct width-1 defaults; implement
/// this trait with an empty body to make a custom key usable with [`Identity`].
pub trait SearchKey: Sized {
    fn identity_plan<C: Compare<Self>>() -> SearchPlan {
        SearchPlan::new(1, ProbeKind::Direct, false)
    }

    fn identity_lower_bound<C: Compare<Self>>(range: &[Self], value: &Self, compare: &C) -> usize {
        engine::search::<Self, _, 1>(range, &DirectProbe::new(value, compare))
    }
}

macro_rules! impl_lane_search_key {
    ($($scalar:ty),* $(,)?) => {
        $(
            impl SearchKey for $scalar {
                #[inline]
                fn identity_plan<C: Compare<Self>>() -> SearchPlan {
                    SearchPlan::new(
                        <$scalar as Lane>::LANES,
                        ProbeKind::Packed,
                        <C as Compare<$scalar>>::NATIVE,
                    )
                }

                #[inline]
                fn identity_lower_bound<C: Compare<Self>>(
                    range: &[Self],
                    value: &Self,
                    compare: &C,
                ) -> usize {
                    <$scalar as Lane>::partition_search(
                        range,
                        &PackedProbe::new(value, compare, &Identity),
                    )
                }
            }
        )*
    };
}

impl_lane_search_key!(f32, i32, f64);

macro_rules! impl_direct_search_key {
    ($($key:ty),* $(,)?) => {
        $(impl SearchKey for $key {})*
    };
}

impl_direct_search_key!(
    u8, u16, u32, u64, u128, usize, i8, i16, i64, i128, isize, bool, char, String,
);

impl SearchKey for &str {}

/// How a projection is searched with by [`lower_bound_accelerated`].
pub trait Accelerate<E, K> {
    /// The strategy this projection is searched with under comparator `C`.
    fn plan<C: Compare<K>>(&self) -> SearchPlan;

    fn lower_bound_with<C: Compare<K>>(&self, range: &[E], value: &K, compare: &C) -> usize;
}

impl<E, K, F> Accelerate<E, K> for F
where
    F: Fn(&E) -> K,
{
    #[inline]
    fn plan<C: Compare<K>>(&self) -> SearchPlan {
        SearchPlan::scalar()
    }

    #[inline]
    fn lower_bound_with<C: Compare<K>>(&self, range: &[E], value: &K, compare: &C) -> usize {
        engine::search::<E, _, 1>(range, &ScalarProbe::new(value, compare, self))
    }
}

impl<E: SearchKey> Accelerate<E, E> for Identity {
    #[inline]
    fn plan<C: Compare<E>>(&self) -> SearchPlan {
        E::identity_plan::<C>()
    }

    #[inline]
    fn lower_bound_with<C: Compare<E>>(&self, range: &[E], value: &E, compare: &C) -> usize {
        E::identity_lower_bound(range, value, compare)
    }
}

impl<E, K, S, B> Accelerate<E, K> for NativeProjection<S, B>
where
    E: Lane,
    K: Lane,
    S: Fn(&E) -> K,
    B: Fn(&E::Batch) -> K::Batch,
{
    #[inline]
    fn plan<C: Compare<K>>(&self) -> SearchPlan {
        SearchPlan::new(E::LANES, ProbeKind::Packed, <C as Compare<K>>::NATIVE)
    }

    #[inline]
    fn lower_bound_with<C: Compare<K>>(&self, range: &[E], value: &K, compare: &C) -> usize {
        const {
            assert!(
                E::LANES == K::LANES,
                "a packed projection must map a batch onto a batch of the same width"
            )
        };
        E::partition_search(range, &PackedProbe::new(value, compare, self))
    }
}

impl<E, K, P> Accelerate<E, K> for Lanewise<P>
where
    K: Lane,
    P: Projection<E, K>,
{
    #[inline]
    fn plan<C: Compare<K>>(&self) -> SearchPlan {
        SearchPlan::new(K::LANES, ProbeKind::Group, <C as Compare<K>>::NATIVE)
    }

    #[inline]
    fn lower_bound_with<C: Compare<K>>(&self, range: &[E], value: &K, compare: &C) -> usize {
        K::partition_search(range, &GroupProbe::new(value, compare, &self.0))
    }
}

// =============================================================================
//  CORE ENTRY POINTS
// =============================================================================

/// Lower bound under `<`.
///
/// ```
/// assert_eq!(narysearch::lower_bound(&[1, 2, 4, 5, 6], &3), 2);
/// ```
#[inline]
pub fn lower_bound<T: PartialOrd>(range: &[T], value: &T) -> usize {
    trace!("LOWER_BOUND DISPATCH: range.len()={}", range.len());
    engine::search::<T, _, 1>(range, &DirectProbe::new(value, &Less))
}

/// Lower bound under a caller-supplied comparator.
#[inline]
pub fn lower_bound_by<T, C>(range: &[T], value: &T, compare: &C) -> usize
where
    C: Compare<T>,
{
    trace!("LOWER_BOUND_BY DISPATCH: range.len()={}", range.len());
    engine::search::<T, _, 1>(range, &DirectProbe::new(value, compare))
}

/// Lower bound of `value` among the projected keys of `range`.
#[inline]
pub fn lower_bound_by_key<E, K, C, P>(range: &[E], value: &K, compare: &C, projection: &P) -> usize
where
    C: Compare<K>,
    P: Projection<E, K>,
{
    trace!("LOWER_BOUND_BY_KEY DISPATCH: range.len()={}", range.len());
    engine::search::<E, _, 1>(range, &ScalarProbe::new(value, compare, projection))
}

/// Same result as [`lower_bound_by_key`], with the partition width and probe
/// strategy selected from the projection and key types.
#[inline]
pub fn lower_bound_accelerated<E, K, C, P>(
    range: &[E],
    value: &K,
    compare: &C,
    projection: &P,
) -> usize
where
    C: Compare<K>,
    P: Accelerate<E, K>,
{
    trace!(
        "LOWER_BOUND_ACCELERATED DISPATCH: range.len()={}, plan={:?}",
        range.len(),
        projection.plan::<C>()
    );
    projection.lower_bound_with(range, value, compare)
}

/// The plan [`lower_bound_accelerated`] would run for these arguments.
///
/// Takes the same arguments so every type parameter is inferred; only the types
/// matter, the range is not inspected.
#[inline]
pub fn plan_accelerated<E, K, C, P>(
    _range: &[E],
    _value: &K,
    _compare: &C,
    projection: &P,
) -> SearchPlan
where
    C: Compare<K>,
    P: Accelerate<E, K>,
{
    projection.plan::<C>()
}

// =============================================================================
//  EXPLICIT WIDTH
// =============================================================================

/// The partition engine at a fixed width `N` with scalar probes.
#[inline]
pub fn lower_bound_n<const N: usize, E, K, C, P>(
    range: &[E],
    value: &K,
    compare: &C,
    projection: &P,
) -> usize
where
    C: Compare<K>,
    P: Projection<E, K>,
{
    engine::search::<E, _, N>(range, &ScalarProbe::new(value, compare, projection))
}

/// [`lower_bound_n`] with the width chosen at runtime.
///
/// # Errors
/// [`SearchError::UnsupportedWidth`] unless `width` is one of
/// [`SUPPORTED_RUNTIME_WIDTHS`](crate::constants::SUPPORTED_RUNTIME_WIDTHS).
pub fn lower_bound_with_width<E, K, C, P>(
    range: &[E],
    value: &K,
    compare: &C,
    projection: &P,
    width: usize,
) -> Result<usize>
where
    C: Compare<K>,
    P: Projection<E, K>,
{
    trace!(
        "LOWER_BOUND_WITH_WIDTH DISPATCH: range.len()={}, width={}",
        range.len(),
        width
    );
    match width {
        1 => Ok(lower_bound_n::<1, _, _, _, _>(range, value, compare, projection)),
        2 => Ok(lower_bound_n::<2, _, _, _, _>(range, value, compare, projection)),
        4 => Ok(lower_bound_n::<4, _, _, _, _>(range, value, compare, projection)),
        8 => Ok(lower_bound_n::<8, _, _, _, _>(range, value, compare, projection)),
        16 => Ok(lower_bound_n::<16, _, _, _, _>(range, value, compare, projection)),
        32 => Ok(lower_bound_n::<32, _, _, _, _>(range, value, compare, projection)),
        _ => {
            debug!("lower_bound_with_width: rejecting partition width {}", width);
            Err(SearchError::UnsupportedWidth(width))
        }
    }
}

// =============================================================================
//  TWO-POINTER FORMS
// =============================================================================

/// Classic binary search over a slice.
#[inline]
pub fn binary_lower_bound<T, C>(range: &[T], value: &T, compare: &C) -> usize
where
    C: Compare<T>,
{
    let mut first = 0;
    let mut len = range.len();
    while len > 0 {
        let half = len / 2;
        let mid = first + half;
        if compare.compare(&range[mid], value) {
            first = mid + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    first
}

/// Binary search over positions `first..last` of any random-access sequence.
///
/// `at(i)` yields the key at position `i`; it is only called with
/// `first <= i < last`. Returns a position in `first..=last`.
///
/// ```
/// use std::collections::VecDeque;
/// use narysearch::{lower_bound_indexed, Less};
///
/// let keys: VecDeque<i32> = [1, 2, 4, 5, 6].into_iter().collect();
/// assert_eq!(lower_bound_indexed(0, keys.len(), &3, &Less, |i| keys[i]), 2);
/// ```
#[inline]
pub fn lower_bound_indexed<K, C, F>(first: usize, last: usize, value: &K, compare: &C, mut at: F) -> usize
where
    C: Compare<K>,
    F: FnMut(usize) -> K,
{
    debug_assert!(first <= last);
    let mut first = first;
    let mut len = last - first;
    while len > 0 {
        let half = len / 2;
        let mid = first + half;
        if compare.compare(&at(mid), value) {
            first = mid + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    first
}
