// SPDX-License-Identifier: Apache-2.0

/// Test-only helpers.
///
/// Library code never installs a logger; tests that want `trace!` output from the
/// dispatch layer can route it through their own harness.
pub fn config_test_logger() {}

/// Number of keys in `range` that order before `value`: the lower bound any
/// correct search must return on a partitioned range.
pub fn reference_lower_bound<E, K>(
    range: &[E],
    value: &K,
    before: impl Fn(&K, &K) -> bool,
    key: impl Fn(&E) -> K,
) -> usize {
    range.iter().filter(|e| before(&key(e), value)).count()
}

/// Sorted keys with runs of duplicates, from a small deterministic generator.
pub fn sorted_i32(len: usize, seed: u64) -> Vec<i32> {
    let mut state = seed | 1;
    let mut out: Vec<i32> = (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % (len as u64 * 2 + 1)) as i32 - len as i32
        })
        .collect();
    out.sort_unstable();
    out
}

pub fn sorted_f32(len: usize, seed: u64) -> Vec<f32> {
    sorted_i32(len, seed).into_iter().map(|v| v as f32 * 0.5).collect()
}

pub fn sorted_f64(len: usize, seed: u64) -> Vec<f64> {
    sorted_i32(len, seed).into_iter().map(|v| v as f64 * 0.25).collect()
}
