//! Thunks and built-in visitors of the visit dispatcher.
//!
//! For a visitor `V` and an alternative list `(A0, ..., An)`, the dispatch
//! table is the array `[visit_thunk::<V, A0>, ..., visit_thunk::<V, An>]`. It
//! is written out once per arity by the impls in the `alternatives` module,
//! so selecting the thunk for the live alternative is a single array index.
//! Each thunk reinterprets the slot as its own alternative and forwards it to
//! the visitor.
//!
//! The visitors defined here are used by [`RawVariant`] to implement
//! [`Clone`], [`PartialEq`] and [`Debug`](core::fmt::Debug) through the same
//! tables.
//!
//! [`RawVariant`]: crate::variant::RawVariant

use core::{marker::PhantomData, ptr::NonNull};

use crate::{
    slot::AlignedSlot,
    util::Erased,
    visit::{Visit, VisitMut, Visitor},
};

/// Entry of a shared dispatch table for the visitor `V`.
pub(crate) type VisitFn<V> = unsafe fn(&mut V, NonNull<Erased>) -> <V as Visitor>::Output;

/// Entry of a mutable dispatch table for the visitor `V`.
pub(crate) type VisitMutFn<V> = unsafe fn(&mut V, NonNull<Erased>) -> <V as Visitor>::Output;

/// Visits the `T` pointed to by `value` with `visitor`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `value` points to a live, initialized `T`, valid for shared access for
///    the duration of the call.
pub(crate) unsafe fn visit_thunk<V: Visit<T>, T>(visitor: &mut V, value: NonNull<Erased>) -> V::Output {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &T = unsafe { value.cast::<T>().as_ref() };
    <V as Visit<T>>::visit(visitor, value)
}

/// Visits the `T` pointed to by `value` mutably with `visitor`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `value` points to a live, initialized `T`, valid for exclusive access
///    for the duration of the call.
pub(crate) unsafe fn visit_mut_thunk<V: VisitMut<T>, T>(
    visitor: &mut V,
    value: NonNull<Erased>,
) -> V::Output {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &mut T = unsafe { value.cast::<T>().as_mut() };
    <V as VisitMut<T>>::visit_mut(visitor, value)
}

/// Visitor producing a new [`AlignedSlot`] that holds a clone of the visited
/// alternative.
///
/// Copying a container is expressed as visiting its live alternative with a
/// `Cloner` and storing the result under the same index.
pub struct Cloner<S> {
    /// Marker for the layout of the produced slot
    _layout: PhantomData<fn() -> S>,
}

impl<S> Cloner<S> {
    /// Creates a new cloner producing slots of layout `S`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            _layout: PhantomData,
        }
    }
}

impl<S> Default for Cloner<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Visitor for Cloner<S> {
    type Output = AlignedSlot<S>;
}

impl<S, T: Clone> Visit<T> for Cloner<S> {
    #[inline]
    fn visit(&mut self, value: &T) -> AlignedSlot<S> {
        AlignedSlot::new(value.clone())
    }
}

/// Visitor comparing the visited alternative with the value stored in another
/// slot.
pub struct Comparer<'a, S> {
    /// Slot holding the right-hand side of the comparison
    other: &'a AlignedSlot<S>,
}

impl<'a, S> Comparer<'a, S> {
    /// Creates a comparer against the value stored in `other`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. Every call to [`Visit::visit`] on the returned comparer passes a
    ///    value of the same type as the live value stored in `other`. Visiting
    ///    a container whose active alternative is at the same index as that of
    ///    `other` fulfills this.
    #[inline]
    pub unsafe fn new(other: &'a AlignedSlot<S>) -> Self {
        Self { other }
    }
}

impl<S> Visitor for Comparer<'_, S> {
    type Output = bool;
}

impl<S, T: PartialEq> Visit<T> for Comparer<'_, S> {
    #[inline]
    fn visit(&mut self, value: &T) -> bool {
        // SAFETY: `Comparer::new` requires that `other` holds a live `T`
        // whenever a `T` is visited.
        let other: &T = unsafe { self.other.assume_ref::<T>() };
        value == other
    }
}

/// Visitor formatting the visited alternative with its
/// [`Debug`](core::fmt::Debug) implementation.
pub struct Debugger<'a, 'b> {
    /// The formatter to write to
    formatter: &'a mut core::fmt::Formatter<'b>,
}

impl<'a, 'b> Debugger<'a, 'b> {
    /// Creates a visitor writing to `formatter`.
    #[inline]
    pub fn new(formatter: &'a mut core::fmt::Formatter<'b>) -> Self {
        Self { formatter }
    }
}

impl Visitor for Debugger<'_, '_> {
    type Output = core::fmt::Result;
}

impl<T: core::fmt::Debug> Visit<T> for Debugger<'_, '_> {
    #[inline]
    fn visit(&mut self, value: &T) -> core::fmt::Result {
        core::fmt::Debug::fmt(value, self.formatter)
    }
}
