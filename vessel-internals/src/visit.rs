//! Visitors that operate on whichever alternative of a tagged container is
//! live.
//!
//! A visitor is a type with one [`Visitor::Output`] and one [`Visit<T>`] (or
//! [`VisitMut<T>`]) implementation per alternative it can handle. Because the
//! output type belongs to the visitor rather than to the individual
//! implementations, every alternative necessarily produces the same result
//! type.
//!
//! Whether a visitor handles *every* alternative of a list `L` is expressed by
//! [`VisitAll<L>`] and [`VisitAllMut<L>`]. These are implemented automatically
//! and are checked when the visit call is compiled, so a visitor that misses an
//! alternative is rejected before the program runs.
//!
//! # Examples
//!
//! ```
//! use vessel_internals::visit::{Visit, Visitor};
//!
//! struct Describe;
//!
//! impl Visitor for Describe {
//!     type Output = &'static str;
//! }
//!
//! impl Visit<i32> for Describe {
//!     fn visit(&mut self, _value: &i32) -> &'static str {
//!         "an integer"
//!     }
//! }
//!
//! impl Visit<String> for Describe {
//!     fn visit(&mut self, _value: &String) -> &'static str {
//!         "a string"
//!     }
//! }
//!
//! assert_eq!(Describe.visit(&5i32), "an integer");
//! ```

use core::ptr::NonNull;

use crate::{util::Erased, variant::Alternatives};

/// Common part of every visitor: the single result type of all its visits.
pub trait Visitor {
    /// The value produced by visiting any alternative.
    type Output;
}

/// Visits a shared reference to a value of type `T`.
pub trait Visit<T>: Visitor {
    /// Visits `value`.
    fn visit(&mut self, value: &T) -> Self::Output;
}

/// Visits a mutable reference to a value of type `T`.
pub trait VisitMut<T>: Visitor {
    /// Visits `value`, which may be modified in place.
    fn visit_mut(&mut self, value: &mut T) -> Self::Output;
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    type Output = V::Output;
}

impl<T, V: Visit<T> + ?Sized> Visit<T> for &mut V {
    #[inline]
    fn visit(&mut self, value: &T) -> Self::Output {
        (**self).visit(value)
    }
}

impl<T, V: VisitMut<T> + ?Sized> VisitMut<T> for &mut V {
    #[inline]
    fn visit_mut(&mut self, value: &mut T) -> Self::Output {
        (**self).visit_mut(value)
    }
}

/// A visitor implementing [`Visit<T>`] for every alternative `T` of `L`.
///
/// This trait is implemented automatically for every such visitor and every
/// supported alternative list. Manual impls must uphold the contract below.
///
/// # Safety
///
/// [`visit_at`](VisitAll::visit_at) must call [`Visit::visit`] with the
/// alternative of `L` at position `index`, and nothing else.
pub unsafe trait VisitAll<L: Alternatives>: Visitor {
    /// Looks up the thunk of alternative `index` in the dispatch table of
    /// this visitor and `L`, and invokes it on `value`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `index < L::LEN`
    /// 2. `value` points to a live, initialized value of the alternative of
    ///    `L` at position `index`, valid for shared access for the duration of
    ///    the call.
    #[doc(hidden)]
    unsafe fn visit_at(&mut self, index: usize, value: NonNull<Erased>) -> Self::Output;
}

/// A visitor implementing [`VisitMut<T>`] for every alternative `T` of `L`.
///
/// This trait is implemented automatically for every such visitor and every
/// supported alternative list. Manual impls must uphold the contract below.
///
/// # Safety
///
/// [`visit_at_mut`](VisitAllMut::visit_at_mut) must call
/// [`VisitMut::visit_mut`] with the alternative of `L` at position `index`,
/// and nothing else.
pub unsafe trait VisitAllMut<L: Alternatives>: Visitor {
    /// Looks up the thunk of alternative `index` in the mutable dispatch table
    /// of this visitor and `L`, and invokes it on `value`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `index < L::LEN`
    /// 2. `value` points to a live, initialized value of the alternative of
    ///    `L` at position `index`, valid for exclusive access for the duration
    ///    of the call.
    #[doc(hidden)]
    unsafe fn visit_at_mut(&mut self, index: usize, value: NonNull<Erased>) -> Self::Output;
}
