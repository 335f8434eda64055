// SPDX-License-Identifier: Apache-2.0

//! Projection adapter
//!
//! A projection maps a range element to the key the comparator sees. Plain
//! closures `Fn(&E) -> K` are projections. [`Identity`] returns the element
//! itself and [`NativeProjection`] pairs a scalar closure with a batch closure
//! that maps a whole batch of elements to a batch of keys in one call.
//! [`Lanewise`] marks a scalar projection whose keys are lane types, so the
//! engine may probe at the key's native width and compare the projected keys as
//! a group.
//!
//! [`ProjectionAdapter`] turns the probe references of one round into keys:
//! one at a time, into a key buffer, or as a packed batch.

use crate::lanes::Lane;

/// Maps an element of type `E` to a key of type `K`.
pub trait Projection<E, K> {
    fn project(&self, element: &E) -> K;
}

impl<E, K, F> Projection<E, K> for F
where
    F: Fn(&E) -> K,
{
    #[inline]
    fn project(&self, element: &E) -> K {
        self(element)
    }
}

/// A projection that can also map a whole batch at once.
pub trait BatchProjection<E: Lane, K: Lane>: Projection<E, K> {
    /// Lane `i` of the result must equal `project(batch[i])`.
    fn project_batch(&self, batch: &E::Batch) -> K::Batch;
}

/// The element is its own key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Identity;

impl<E: Clone> Projection<E, E> for Identity {
    #[inline]
    fn project(&self, element: &E) -> E {
        element.clone()
    }
}

impl<E: Lane> BatchProjection<E, E> for Identity {
    #[inline]
    fn project_batch(&self, batch: &E::Batch) -> E::Batch {
        *batch
    }
}

/// A projection with a hand-written batch form.
#[derive(Debug, Clone, Copy)]
pub struct NativeProjection<S, B> {
    scalar: S,
    batch: B,
}

impl<S, B> NativeProjection<S, B> {
    #[inline]
    pub fn new(scalar: S, batch: B) -> Self {
        Self { scalar, batch }
    }
}

/// Shorthand for [`NativeProjection::new`].
#[inline]
pub fn native_projection<S, B>(scalar: S, batch: B) -> NativeProjection<S, B> {
    NativeProjection::new(scalar, batch)
}

impl<E, K, S, B> Projection<E, K> for NativeProjection<S, B>
where
    E: Lane,
    K: Lane,
    S: Fn(&E) -> K,
    B: Fn(&E::Batch) -> K::Batch,
{
    #[inline]
    fn project(&self, element: &E) -> K {
        (self.scalar)(element)
    }
}

impl<E, K, S, B> BatchProjection<E, K> for NativeProjection<S, B>
where
    E: Lane,
    K: Lane,
    S: Fn(&E) -> K,
    B: Fn(&E::Batch) -> K::Batch,
{
    #[inline]
    fn project_batch(&self, batch: &E::Batch) -> K::Batch {
        (self.batch)(batch)
    }
}

/// A scalar projection onto lane keys, probed at the key's native width.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lanewise<P>(pub P);

impl<E, K, P> Projection<E, K> for Lanewise<P>
where
    P: Projection<E, K>,
{
    #[inline]
    fn project(&self, element: &E) -> K {
        self.0.project(element)
    }
}

/// Turns the probes of one round into keys.
pub struct ProjectionAdapter<'p, P> {
    projection: &'p P,
}

impl<'p, P> Clone for ProjectionAdapter<'p, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'p, P> Copy for ProjectionAdapter<'p, P> {}

impl<'p, P> ProjectionAdapter<'p, P> {
    #[inline]
    pub fn new(projection: &'p P) -> Self {
        Self { projection }
    }

    #[inline]
    pub fn one<E, K>(&self, element: &E) -> K
    where
        P: Projection<E, K>,
    {
        self.projection.project(element)
    }

    /// Projects `probes[i]` into `keys[i]`.
    #[inline]
    pub fn each<E, K>(&self, probes: &[&E], keys: &mut [K])
    where
        P: Projection<E, K>,
    {
        debug_assert_eq!(probes.len(), keys.len());
        for (slot, element) in keys.iter_mut().zip(probes) {
            *slot = self.projection.project(element);
        }
    }

    /// Gathers `E::LANES` probed elements into a batch and projects it.
    #[inline]
    pub fn packed<E, K>(&self, probes: &[&E]) -> K::Batch
    where
        E: Lane,
        K: Lane,
        P: BatchProjection<E, K>,
    {
        debug_assert_eq!(probes.len(), E::LANES, "packed probe count must match the lane count");
        let mut elements = [E::ZERO; crate::constants::MAX_GROUP_KEYS];
        for (slot, element) in elements.iter_mut().zip(probes) {
            *slot = **element;
        }
        self.projection.project_batch(&E::gather(&elements[..E::LANES]))
    }
}
