//! Vtable for type-erased value operations.
//!
//! This module contains the [`AnyVtable`] which enables identifying, cloning
//! and dropping a boxed value when its concrete type `T` has been erased.
//!
//! This module encapsulates the fields of [`AnyVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameter must match the actual value type
//! stored in the [`AnyData`]**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`AnyVtable::new`], which pairs the function pointers with
//! a specific type `T` at compile time.

use alloc::boxed::Box;
use core::ptr::NonNull;

use crate::{
    any::{
        data::AnyData,
        raw::{RawAny, RawAnyRef},
    },
    tag::TypeTag,
    util::Erased,
};

/// Vtable for type-erased value operations.
///
/// # Safety Invariant
///
/// The fields `drop` and `clone` are guaranteed to point to the functions
/// defined below instantiated with the value type `T` that was used to create
/// this [`AnyVtable`], and `tag` is the [`TypeTag`] of that same `T`.
pub(crate) struct AnyVtable {
    /// Identity of the value type that was used to create this
    /// [`AnyVtable`].
    tag: &'static TypeTag,
    /// Drops the [`Box<AnyData<T>>`] instance pointed to by this pointer.
    drop: unsafe fn(NonNull<AnyData<Erased>>),
    /// Allocates a new [`AnyData<T>`] holding a clone of the value.
    clone: unsafe fn(RawAnyRef<'_>) -> RawAny,
}

impl AnyVtable {
    /// Creates a new [`AnyVtable`] for the value type `T`.
    pub(super) const fn new<T: Clone + 'static>() -> &'static Self {
        const {
            &Self {
                tag: TypeTag::of::<T>(),
                drop: drop::<T>,
                clone: clone::<T>,
            }
        }
    }

    /// Gets the [`TypeTag`] of the value type that was used to create this
    /// [`AnyVtable`].
    #[inline]
    pub(super) fn tag(&self) -> &'static TypeTag {
        self.tag
    }

    /// Drops the `Box<AnyData<T>>` instance pointed to by this pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The pointer comes from [`Box<AnyData<T>>`] via [`Box::into_raw`]
    /// 2. This [`AnyVtable`] must be a vtable for the value type stored in the
    ///    [`AnyData`].
    /// 3. This method drops the [`Box<AnyData<T>>`], so the caller must ensure
    ///    that the pointer has not previously been dropped, that it is able to
    ///    transfer ownership of the pointer, and that it will not use the
    ///    pointer after calling this method.
    #[inline]
    pub(super) unsafe fn drop(&self, ptr: NonNull<AnyData<Erased>>) {
        // SAFETY: We know that `self.drop` points to the function `drop::<T>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe {
            (self.drop)(ptr);
        }
    }

    /// Clones the value behind `ptr` into a freshly allocated [`RawAny`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`AnyVtable`] must be a vtable for the value type stored in the
    ///    [`RawAnyRef`].
    #[inline]
    pub(super) unsafe fn clone(&self, ptr: RawAnyRef<'_>) -> RawAny {
        // SAFETY: We know that `self.clone` points to the function
        // `clone::<T>` below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.clone)(ptr) }
    }
}

/// Drops the [`Box<AnyData<T>>`] instance pointed to by this pointer.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The pointer comes from [`Box<AnyData<T>>`] via [`Box::into_raw`]
/// 2. The value type `T` matches the actual value type stored in the
///    [`AnyData`]
/// 3. This method drops the [`Box<AnyData<T>>`], so the caller must ensure
///    that the pointer has not previously been dropped, that it is able to
///    transfer ownership of the pointer, and that it will not use the pointer
///    after calling this method.
unsafe fn drop<T: 'static>(ptr: NonNull<AnyData<Erased>>) {
    let ptr: NonNull<AnyData<T>> = ptr.cast();
    let ptr = ptr.as_ptr();
    // SAFETY: Our pointer has the correct type as guaranteed by the caller,
    // and it came from a call to `Box::into_raw` as also guaranteed by our
    // caller.
    let boxed = unsafe { Box::from_raw(ptr) };
    core::mem::drop(boxed);
}

/// Clones the stored value into a new allocation.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in the [`AnyData`]
unsafe fn clone<T: Clone + 'static>(ptr: RawAnyRef<'_>) -> RawAny {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &T = unsafe { ptr.value_downcast_unchecked::<T>() };
    RawAny::new(value.clone())
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::any::TypeId;

    use super::*;

    #[test]
    fn test_any_vtable_eq() {
        let vtable1 = AnyVtable::new::<i32>();
        let vtable2 = AnyVtable::new::<i32>();

        // Both should be the exact same static instance
        assert!(core::ptr::eq(vtable1, vtable2));
    }

    #[test]
    fn test_any_vtable_tag() {
        assert_eq!(AnyVtable::new::<i32>().tag().type_id(), TypeId::of::<i32>());
        assert_eq!(
            AnyVtable::new::<String>().tag().type_id(),
            TypeId::of::<String>()
        );
    }
}
