// SPDX-License-Identifier: Apache-2.0

//! Lane comparison kernels
//!
//! Ordered comparisons of two 256-bit batches, collapsed into one bit per lane.
//! Every kernel family exposes the same three functions (`cmp_f32x8`, `cmp_i32x8`,
//! `cmp_f64x4`) so the lane traits can bind to whichever family the build selects
//! through [`active`].
//!
//! - **AVX2** when the crate is compiled with `target_feature = "avx2"`
//! - **NEON** on aarch64 (part of the baseline ISA)
//! - **Portable** everywhere else, or when `disable-simd` is enabled
//!
//! The selection is made at compile time. Float kernels use ordered predicates,
//! a NaN lane compares false under every relation.

// Some clippy lints are noisy for low-level SIMD code; we opt out at the module level.
#![allow(unsafe_op_in_unsafe_fn)]

use crate::lanes::{F32x8, F64x4, I32x8, Lanes, Relation};

// =============================================================================
// ACTIVE BACKEND
// =============================================================================

#[cfg(all(
  target_arch = "x86_64",
  target_feature = "avx2",
  not(feature = "disable-simd")
))]
pub use self::avx2 as active;

#[cfg(all(target_arch = "aarch64", not(feature = "disable-simd")))]
pub use self::neon as active;

#[cfg(not(any(
  all(
    target_arch = "x86_64",
    target_feature = "avx2",
    not(feature = "disable-simd")
  ),
  all(target_arch = "aarch64", not(feature = "disable-simd"))
)))]
pub use self::portable as active;

// =============================================================================
// PORTABLE KERNELS
// =============================================================================

/// Scalar loop kernels, also the reference the SIMD kernels are tested against.
pub mod portable {
  use super::*;

  #[inline]
  fn mask<T: PartialOrd, const W: usize>(
    lhs: &Lanes<T, W>,
    rhs: &Lanes<T, W>,
    relation: Relation,
  ) -> u32 {
    let mut bits = 0u32;
    for lane in 0..W {
      bits |= (relation.holds(&lhs.0[lane], &rhs.0[lane]) as u32) << lane;
    }
    bits
  }

  #[inline]
  pub fn cmp_f32x8(lhs: &F32x8, rhs: &F32x8, relation: Relation) -> u32 {
    mask(lhs, rhs, relation)
  }

  #[inline]
  pub fn cmp_i32x8(lhs: &I32x8, rhs: &I32x8, relation: Relation) -> u32 {
    mask(lhs, rhs, relation)
  }

  #[inline]
  pub fn cmp_f64x4(lhs: &F64x4, rhs: &F64x4, relation: Relation) -> u32 {
    mask(lhs, rhs, relation)
  }
}

// =============================================================================
// AVX2 KERNELS
// =============================================================================

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub mod avx2 {
  use super::*;

  use std::arch::x86_64::{
    __m256i, _CMP_GE_OQ, _CMP_GT_OQ, _CMP_LE_OQ, _CMP_LT_OQ, _mm256_castsi256_ps,
    _mm256_cmp_pd, _mm256_cmp_ps, _mm256_cmpgt_epi32, _mm256_load_pd, _mm256_load_ps,
    _mm256_load_si256, _mm256_movemask_pd, _mm256_movemask_ps,
  };

  const LANE_MASK_8: u32 = 0xFF;

  #[inline]
  pub fn cmp_f32x8(lhs: &F32x8, rhs: &F32x8, relation: Relation) -> u32 {
    // SAFETY: avx2 is enabled for the whole build and `Lanes` is 32-byte aligned.
    unsafe {
      let a = _mm256_load_ps(lhs.0.as_ptr());
      let b = _mm256_load_ps(rhs.0.as_ptr());
      let cmp = match relation {
        Relation::Less => _mm256_cmp_ps(a, b, _CMP_LT_OQ),
        Relation::LessEqual => _mm256_cmp_ps(a, b, _CMP_LE_OQ),
        Relation::Greater => _mm256_cmp_ps(a, b, _CMP_GT_OQ),
        Relation::GreaterEqual => _mm256_cmp_ps(a, b, _CMP_GE_OQ),
      };
      _mm256_movemask_ps(cmp) as u32
    }
  }

  #[inline]
  pub fn cmp_i32x8(lhs: &I32x8, rhs: &I32x8, relation: Relation) -> u32 {
    // SAFETY: avx2 is enabled for the whole build and `Lanes` is 32-byte aligned.
    unsafe {
      let a = _mm256_load_si256(lhs.0.as_ptr() as *const __m256i);
      let b = _mm256_load_si256(rhs.0.as_ptr() as *const __m256i);

      // AVX2 only has signed greater-than; the other relations are derived from it.
      // Integers have no unordered lanes, so le/ge are exact complements of gt/lt.
      let lt = _mm256_movemask_ps(_mm256_castsi256_ps(_mm256_cmpgt_epi32(b, a))) as u32;
      let gt = _mm256_movemask_ps(_mm256_castsi256_ps(_mm256_cmpgt_epi32(a, b))) as u32;
      match relation {
        Relation::Less => lt,
        Relation::LessEqual => !gt & LANE_MASK_8,
        Relation::Greater => gt,
        Relation::GreaterEqual => !lt & LANE_MASK_8,
      }
    }
  }

  #[inline]
  pub fn cmp_f64x4(lhs: &F64x4, rhs: &F64x4, relation: Relation) -> u32 {
    // SAFETY: avx2 is enabled for the whole build and `Lanes` is 32-byte aligned.
    unsafe {
      let a = _mm256_load_pd(lhs.0.as_ptr());
      let b = _mm256_load_pd(rhs.0.as_ptr());
      let cmp = match relation {
        Relation::Less => _mm256_cmp_pd(a, b, _CMP_LT_OQ),
        Relation::LessEqual => _mm256_cmp_pd(a, b, _CMP_LE_OQ),
        Relation::Greater => _mm256_cmp_pd(a, b, _CMP_GT_OQ),
        Relation::GreaterEqual => _mm256_cmp_pd(a, b, _CMP_GE_OQ),
      };
      _mm256_movemask_pd(cmp) as u32
    }
  }
}

// =============================================================================
// NEON KERNELS
// =============================================================================

/// A 256-bit batch is handled as two 128-bit halves.
#[cfg(target_arch = "aarch64")]
pub mod neon {
  use super::*;

  use std::arch::aarch64::{
    float32x4_t, float64x2_t, int32x4_t, uint32x4_t, uint64x2_t, vaddvq_u32, vaddvq_u64,
    vandq_u32, vandq_u64, vcgeq_f32, vcgeq_f64, vcgeq_s32, vcgtq_f32, vcgtq_f64, vcgtq_s32,
    vcleq_f32, vcleq_f64, vcleq_s32, vcltq_f32, vcltq_f64, vcltq_s32, vld1q_f32, vld1q_f64,
    vld1q_s32, vld1q_u32, vld1q_u64,
  };

  // Per-lane weights: AND with the all-ones compare result, then a horizontal add
  // packs the lanes into a movemask-style integer.
  const LANE_BITS_U32: [u32; 4] = [1, 2, 4, 8];
  const LANE_BITS_U64: [u64; 2] = [1, 2];

  #[inline]
  unsafe fn movemask_u32x4(cmp: uint32x4_t) -> u32 {
    vaddvq_u32(vandq_u32(cmp, vld1q_u32(LANE_BITS_U32.as_ptr())))
  }

  #[inline]
  unsafe fn movemask_u64x2(cmp: uint64x2_t) -> u32 {
    vaddvq_u64(vandq_u64(cmp, vld1q_u64(LANE_BITS_U64.as_ptr()))) as u32
  }

  #[inline]
  unsafe fn cmp_f32x4(a: float32x4_t, b: float32x4_t, relation: Relation) -> uint32x4_t {
    match relation {
      Relation::Less => vcltq_f32(a, b),
      Relation::LessEqual => vcleq_f32(a, b),
      Relation::Greater => vcgtq_f32(a, b),
      Relation::GreaterEqual => vcgeq_f32(a, b),
    }
  }

  #[inline]
  unsafe fn cmp_s32x4(a: int32x4_t, b: int32x4_t, relation: Relation) -> uint32x4_t {
    match relation {
      Relation::Less => vcltq_s32(a, b),
      Relation::LessEqual => vcleq_s32(a, b),
      Relation::Greater => vcgtq_s32(a, b),
      Relation::GreaterEqual => vcgeq_s32(a, b),
    }
  }

  #[inline]
  unsafe fn cmp_f64x2(a: float64x2_t, b: float64x2_t, relation: Relation) -> uint64x2_t {
    match relation {
      Relation::Less => vcltq_f64(a, b),
      Relation::LessEqual => vcleq_f64(a, b),
      Relation::Greater => vcgtq_f64(a, b),
      Relation::GreaterEqual => vcgeq_f64(a, b),
    }
  }

  #[inline]
  pub fn cmp_f32x8(lhs: &F32x8, rhs: &F32x8, relation: Relation) -> u32 {
    // SAFETY: NEON is baseline on aarch64; both loads stay inside the 8-lane arrays.
    unsafe {
      let (a, b) = (lhs.0.as_ptr(), rhs.0.as_ptr());
      let lo = movemask_u32x4(cmp_f32x4(vld1q_f32(a), vld1q_f32(b), relation));
      let hi = movemask_u32x4(cmp_f32x4(vld1q_f32(a.add(4)), vld1q_f32(b.add(4)), relation));
      lo | (hi << 4)
    }
  }

  #[inline]
  pub fn cmp_i32x8(lhs: &I32x8, rhs: &I32x8, relation: Relation) -> u32 {
    // SAFETY: NEON is baseline on aarch64; both loads stay inside the 8-lane arrays.
    unsafe {
      let (a, b) = (lhs.0.as_ptr(), rhs.0.as_ptr());
      let lo = movemask_u32x4(cmp_s32x4(vld1q_s32(a), vld1q_s32(b), relation));
      let hi = movemask_u32x4(cmp_s32x4(vld1q_s32(a.add(4)), vld1q_s32(b.add(4)), relation));
      lo | (hi << 4)
    }
  }

  #[inline]
  pub fn cmp_f64x4(lhs: &F64x4, rhs: &F64x4, relation: Relation) -> u32 {
    // SAFETY: NEON is baseline on aarch64; both loads stay inside the 4-lane arrays.
    unsafe {
      let (a, b) = (lhs.0.as_ptr(), rhs.0.as_ptr());
      let lo = movemask_u64x2(cmp_f64x2(vld1q_f64(a), vld1q_f64(b), relation));
      let hi = movemask_u64x2(cmp_f64x2(vld1q_f64(a.add(2)), vld1q_f64(b.add(2)), relation));
      lo | (hi << 2)
    }
  }
}
