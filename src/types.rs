// SPDX-License-Identifier: Apache-2.0

// types.rs for narysearch
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Unsupported partition width: {0} (supported: 1, 2, 4, 8, 16, 32)")]
    UnsupportedWidth(usize),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Kernel family the lane comparisons were compiled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    Avx2,
    Neon,
    Portable,
}

impl Backend {
    /// The backend selected for this build.
    #[inline]
    pub const fn active() -> Self {
        if cfg!(all(
            target_arch = "x86_64",
            target_feature = "avx2",
            not(feature = "disable-simd")
        )) {
            Backend::Avx2
        } else if cfg!(all(target_arch = "aarch64", not(feature = "disable-simd"))) {
            Backend::Neon
        } else {
            Backend::Portable
        }
    }
}

/// How the probes of one round are turned into a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeKind {
    /// Elements compared against the value directly, no projection.
    Direct,
    /// One projection and one comparator call per probe.
    Scalar,
    /// Probes projected one by one into a key group, group compared in lane chunks.
    Group,
    /// Probes gathered into one batch, projected and compared once.
    Packed,
}

/// Strategy the dispatch layer settled on for a call site.
///
/// Purely descriptive: the choice itself is made by the type system, this is what
/// gets logged and what callers can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPlan {
    pub width: usize,
    pub probe: ProbeKind,
    pub native_compare: bool,
    pub backend: Backend,
}

impl SearchPlan {
    #[inline]
    pub fn new(width: usize, probe: ProbeKind, native_compare: bool) -> Self {
        Self {
            width,
            probe,
            native_compare,
            backend: Backend::active(),
        }
    }

    #[inline]
    pub fn scalar() -> Self {
        Self::new(1, ProbeKind::Scalar, false)
    }

    /// True when a round does its work as batched lane operations.
    #[inline]
    pub fn is_batched(&self) -> bool {
        self.width > 1 && matches!(self.probe, ProbeKind::Group | ProbeKind::Packed)
    }
}
