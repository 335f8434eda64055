// SPDX-License-Identifier: Apache-2.0

//! Common constants used across implementations
//!
//! This module centralizes lane counts and the limits shared by the engine,
//! the adapters and the dispatch layer.

// =============================================================================
// SIMD Lane Counts (256-bit batches)
// =============================================================================

// Batches are modelled on a 256-bit register on every target. NEON splits a batch
// into two 128-bit halves, the portable backend loops over the lanes.
pub const LANES_F32: usize = 8; // 256/32 = 8 f32 elements
pub const LANES_I32: usize = 8; // 256/32 = 8 i32 elements
pub const LANES_F64: usize = 4; // 256/64 = 4 f64 elements

/// Alignment of a batch in bytes, matching an aligned 256-bit load.
pub const BATCH_ALIGN: usize = 32;

// =============================================================================
// Mask Limits
// =============================================================================

/// Width of the comparison mask in bits.
pub const MASK_BITS: usize = u32::BITS as usize;

/// Largest group of keys the comparator adapter folds into one mask.
pub const MAX_GROUP_KEYS: usize = MASK_BITS;

/// Largest partition width the engine accepts.
pub const MAX_PARTITION_WIDTH: usize = MASK_BITS;

/// Widths accepted by the runtime-width entry point.
pub const SUPPORTED_RUNTIME_WIDTHS: [usize; 6] = [1, 2, 4, 8, 16, 32];
