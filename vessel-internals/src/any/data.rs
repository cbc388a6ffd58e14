//! This module encapsulates the fields of the [`AnyData`]. Since this is the
//! only place they are visible, the [`AnyVtable`] is guaranteed to always be
//! in sync with the type of the stored value. They are in sync when created
//! and the API offers no way to change the [`AnyVtable`] or the value type
//! afterwards.

use alloc::boxed::Box;
use core::ptr::NonNull;

use crate::{
    any::{
        raw::{RawAny, RawAnyMut, RawAnyRef},
        vtable::AnyVtable,
    },
    util::Erased,
};

/// Boxed value prefixed with the vtable describing its type.
///
/// This struct uses `#[repr(C)]` so the vtable can be read through a pointer
/// to `AnyData<Erased>` without knowing the concrete value type `T`.
#[repr(C)]
pub(super) struct AnyData<T: 'static> {
    /// The vtable of this value
    vtable: &'static AnyVtable,
    /// The stored value
    value: T,
}

impl<T: Clone + 'static> AnyData<T> {
    /// Creates a new [`AnyData`] holding `value`, paired with the vtable
    /// for `T`.
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Self {
            vtable: AnyVtable::new::<T>(),
            value,
        }
    }
}

impl<'a> RawAnyRef<'a> {
    /// Returns a reference to the [`AnyVtable`] of the [`AnyData`] instance.
    #[inline]
    pub(super) fn vtable(self) -> &'static AnyVtable {
        let ptr = self.as_ptr();
        // SAFETY: We don't know the actual inner value type, but we do know
        // that it points to an instance of `AnyData<T>` for some specific `T`.
        // Since `AnyData<T>` is `#[repr(C)]`, that means that it's safe to
        // create pointers to the fields before the actual value.
        //
        // We need to take care to avoid creating an actual reference to the
        // `AnyData` itself though, as that would still be undefined behavior
        // since we don't have the right type.
        let vtable_ptr: *const &'static AnyVtable = unsafe { &raw const (*ptr).vtable };

        // SAFETY: Dereferencing the pointer and getting out the `&'static
        // AnyVtable` is valid for the same reasons
        unsafe { *vtable_ptr }
    }

    /// Accesses the stored value as a reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`AnyData`].
    #[inline]
    pub unsafe fn value_downcast_unchecked<T: 'static>(self) -> &'a T {
        // SAFETY:
        // 1. Guaranteed by the caller
        let this = unsafe { self.cast_inner::<T>() };
        &this.value
    }
}

impl<'a> RawAnyMut<'a> {
    /// Accesses the stored value as a mutable reference to the specified
    /// type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`AnyData`].
    #[inline]
    pub unsafe fn value_downcast_unchecked<T: 'static>(self) -> &'a mut T {
        // SAFETY:
        // 1. Guaranteed by the caller
        let this = unsafe { self.cast_inner::<T>() };
        &mut this.value
    }
}

impl RawAny {
    /// Consumes the [`RawAny`], frees its allocation and returns the stored
    /// value.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`AnyData`].
    pub unsafe fn into_value<T: 'static>(self) -> T {
        debug_assert!(self.as_ref().vtable().tag().is::<T>());

        let ptr: NonNull<AnyData<Erased>> = self.into_non_null();
        let ptr: NonNull<AnyData<T>> = ptr.cast::<AnyData<T>>();
        let ptr: *mut AnyData<T> = ptr.as_ptr();

        // SAFETY: The pointer was created by `Box::into_raw` in `RawAny::new`
        // and ownership was released by `into_non_null` above. The type `T`
        // matches the stored type as guaranteed by the caller.
        let boxed: Box<AnyData<T>> = unsafe { Box::from_raw(ptr) };
        boxed.value
    }
}
