// SPDX-License-Identifier: Apache-2.0

//! narysearch
//!
//! Lower bound search over sorted ranges with an n-ary partition engine. Each
//! round probes `N` points at once and compares them in one batched operation,
//! so a search finishes in `log_{N+1}(len)` rounds instead of `log_2(len)`.
//!
//! - Partition engine generic over the number of probes per round
//! - Lane traits for `f32`, `i32` and `f64` with AVX2, NEON and portable kernels
//! - Comparator and projection adapters that lift scalar closures to batches
//! - Compile-time strategy selection from the projection and key types
//!
//! ## Hardware support
//! - **AVX2** when compiled with `target_feature = "avx2"` (e.g. `-C target-cpu=native`)
//! - **NEON** on aarch64
//! - **Portable** kernels everywhere else, or with the `disable-simd` feature
//!
//! ## Usage
//!
//! ```rust
//! use narysearch::{lower_bound, lower_bound_accelerated, lower_bound_by_key, Identity, Less};
//!
//! let keys = [1.0f32, 2.0, 4.0, 5.0, 6.0];
//! assert_eq!(lower_bound(&keys, &3.0), 2);
//!
//! // Eight probes per round, compared as one batch.
//! assert_eq!(lower_bound_accelerated(&keys, &3.0, &Less, &Identity), 2);
//!
//! // Search records by a projected key.
//! let rows = [(1, "a"), (3, "b"), (3, "c"), (9, "d")];
//! let at = lower_bound_by_key(&rows, &3, &Less, &|row: &(i32, &str)| row.0);
//! assert_eq!(at, 1);
//! ```

#![allow(clippy::missing_safety_doc)]

pub mod arch;
pub mod compare;
pub mod constants;
pub mod dispatch;
pub mod engine;
pub mod lanes;
pub mod project;
pub mod types;

pub use types::*;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
#[path = "tests/compare_tests.rs"]
mod compare_tests;
#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod dispatch_tests;
#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod engine_tests;
#[cfg(test)]
#[path = "tests/lanes_tests.rs"]
mod lanes_tests;

pub use compare::{
    native_compare, Compare, CompareAdapter, Greater, GreaterEqual, Less, LessEqual,
    NativeCompare, Relation,
};
pub use dispatch::{
    binary_lower_bound, lower_bound, lower_bound_accelerated, lower_bound_by, lower_bound_by_key,
    lower_bound_indexed, lower_bound_n, lower_bound_with_width, plan_accelerated, Accelerate,
    SearchKey,
};
pub use engine::Probe;
pub use lanes::{Lane, Lanes, F32x8, F64x4, I32x8};
pub use project::{
    native_projection, BatchProjection, Identity, Lanewise, NativeProjection, Projection,
    ProjectionAdapter,
};
