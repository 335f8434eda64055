// SPDX-License-Identifier: Apache-2.0

//! Lane traits
//!
//! [`Lane`] describes a scalar type that can be packed into a 256-bit batch:
//! how wide the batch is, how to broadcast and gather it, how to read a lane
//! back, and the four ordered comparisons that collapse a batch compare into a
//! bitmask. Supporting another scalar type means adding one `Lane` impl; the
//! adapters and the engine only talk to this trait.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arch::active as kernels;
use crate::constants::{LANES_F32, LANES_F64, LANES_I32};
use crate::engine::{self, Probe};

/// One of the four canonical ordering relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Relation {
    /// Evaluates the relation on one pair of scalars.
    #[inline]
    pub fn holds<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            Relation::Less => lhs < rhs,
            Relation::LessEqual => lhs <= rhs,
            Relation::Greater => lhs > rhs,
            Relation::GreaterEqual => lhs >= rhs,
        }
    }
}

/// A batch of `W` scalars, aligned for a 256-bit load.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(32))]
pub struct Lanes<T, const W: usize>(pub [T; W]);

impl<T: Copy, const W: usize> Lanes<T, W> {
    /// Applies `f` to every lane.
    #[inline]
    pub fn map<U: Copy>(self, f: impl FnMut(T) -> U) -> Lanes<U, W> {
        Lanes(self.0.map(f))
    }

    #[inline]
    pub fn as_array(&self) -> &[T; W] {
        &self.0
    }
}

pub type F32x8 = Lanes<f32, LANES_F32>;
pub type I32x8 = Lanes<i32, LANES_I32>;
pub type F64x4 = Lanes<f64, LANES_F64>;

/// A scalar type with a native batch form.
pub trait Lane: Copy + PartialOrd + fmt::Debug + 'static {
    /// Number of lanes in [`Lane::Batch`].
    const LANES: usize;

    /// Filler for key buffers; never observed by a comparison.
    const ZERO: Self;

    type Batch: Copy + fmt::Debug;

    /// Broadcasts `value` into every lane.
    fn splat(value: Self) -> Self::Batch;

    /// Builds a batch from exactly `LANES` scalars, lane 0 first.
    ///
    /// # Panics
    /// If `lanes.len() != Self::LANES`.
    fn gather(lanes: &[Self]) -> Self::Batch;

    /// Reads lane `index` (runtime index).
    fn lane(batch: &Self::Batch, index: usize) -> Self;

    /// Reads lane `IDX`, checked at compile time.
    #[inline]
    fn extract<const IDX: usize>(batch: &Self::Batch) -> Self {
        const { assert!(IDX < Self::LANES, "lane index out of range") };
        Self::lane(batch, IDX)
    }

    fn cmp_lt(lhs: &Self::Batch, rhs: &Self::Batch) -> u32;
    fn cmp_le(lhs: &Self::Batch, rhs: &Self::Batch) -> u32;
    fn cmp_gt(lhs: &Self::Batch, rhs: &Self::Batch) -> u32;
    fn cmp_ge(lhs: &Self::Batch, rhs: &Self::Batch) -> u32;

    /// Batch comparison for a relation known at the call site.
    #[inline]
    fn cmp(relation: Relation, lhs: &Self::Batch, rhs: &Self::Batch) -> u32 {
        match relation {
            Relation::Less => Self::cmp_lt(lhs, rhs),
            Relation::LessEqual => Self::cmp_le(lhs, rhs),
            Relation::Greater => Self::cmp_gt(lhs, rhs),
            Relation::GreaterEqual => Self::cmp_ge(lhs, rhs),
        }
    }

    /// Runs the partition engine with `LANES` probes per round.
    fn partition_search<E, P: Probe<E>>(range: &[E], probe: &P) -> usize;
}

macro_rules! impl_lane {
    ($scalar:ty, $lanes:expr, $zero:expr, $batch:ty, $kernel:ident) => {
        impl Lane for $scalar {
            const LANES: usize = $lanes;
            const ZERO: Self = $zero;

            type Batch = $batch;

            #[inline]
            fn splat(value: Self) -> $batch {
                Lanes([value; $lanes])
            }

            #[inline]
            fn gather(lanes: &[Self]) -> $batch {
                let mut out = [$zero; $lanes];
                out.copy_from_slice(lanes);
                Lanes(out)
            }

            #[inline]
            fn lane(batch: &$batch, index: usize) -> Self {
                batch.0[index]
            }

            #[inline]
            fn cmp_lt(lhs: &$batch, rhs: &$batch) -> u32 {
                kernels::$kernel(lhs, rhs, Relation::Less)
            }

            #[inline]
            fn cmp_le(lhs: &$batch, rhs: &$batch) -> u32 {
                kernels::$kernel(lhs, rhs, Relation::LessEqual)
            }

            #[inline]
            fn cmp_gt(lhs: &$batch, rhs: &$batch) -> u32 {
                kernels::$kernel(lhs, rhs, Relation::Greater)
            }

            #[inline]
            fn cmp_ge(lhs: &$batch, rhs: &$batch) -> u32 {
                kernels::$kernel(lhs, rhs, Relation::GreaterEqual)
            }

            #[inline]
            fn partition_search<E, P: Probe<E>>(range: &[E], probe: &P) -> usize {
                engine::search::<E, P, { $lanes }>(range, probe)
            }
        }
    };
}

impl_lane!(f32, LANES_F32, 0.0, F32x8, cmp_f32x8);
impl_lane!(i32, LANES_I32, 0, I32x8, cmp_i32x8);
impl_lane!(f64, LANES_F64, 0.0, F64x4, cmp_f64x4);
