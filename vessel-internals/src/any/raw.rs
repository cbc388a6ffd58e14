//! Type-erased value pointer types.
//!
//! This module encapsulates the `ptr` field of [`RawAny`], [`RawAnyRef`] and
//! [`RawAnyMut`], ensuring it is only visible within this module. This
//! visibility restriction guarantees the safety invariant: **the pointer always
//! comes from `Box<AnyData<T>>`**.
//!
//! # Safety Invariant
//!
//! Since the `ptr` field can only be set via [`RawAny::new`] (which creates it
//! from `Box::into_raw`), and cannot be modified afterward, the pointer
//! provenance remains valid throughout the value's lifetime.
//!
//! The [`RawAny::drop`] implementation relies on this invariant to safely
//! reconstruct the `Box` and deallocate the memory.
//!
//! # Type Erasure
//!
//! The concrete type parameter `T` is erased by casting to `AnyData<Erased>`.
//! The vtable stored within the `AnyData` provides the runtime type information
//! needed to identify, clone and drop the value.

use alloc::boxed::Box;
use core::{any::TypeId, ptr::NonNull};

use crate::{any::data::AnyData, tag::TypeTag, util::Erased};

/// A pointer to an [`AnyData`] that is guaranteed to point to an initialized
/// instance of an [`AnyData<T>`] for some specific `T`, though we do not know
/// which actual `T` it is.
///
/// However, the pointer is allowed to transition into a non-initialized state
/// inside the [`RawAny::drop`] method.
///
/// The pointer is guaranteed to have been created using [`Box::into_raw`].
///
/// We cannot use a [`Box<AnyData<T>>`] directly, because that does not allow
/// us to type-erase the `T`.
#[repr(transparent)]
pub struct RawAny {
    /// Pointer to the inner value data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<AnyData<T>>` for some
    ///    `T` using `Box::into_raw`.
    /// 2. The pointer will point to the same `AnyData<T>` for the entire
    ///    lifetime of this object.
    /// 3. The pointee is properly initialized for the entire lifetime of this
    ///    object, except during the execution of the `Drop` implementation.
    ptr: NonNull<AnyData<Erased>>,
}

impl RawAny {
    /// Creates a new [`RawAny`] holding `value`.
    ///
    /// The returned holder owns a fresh heap allocation tagged with the vtable
    /// of `T`.
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + 'static,
    {
        let ptr = Box::new(AnyData::new(value));
        let ptr: *mut AnyData<T> = Box::into_raw(ptr);
        let ptr: *mut AnyData<Erased> = ptr.cast::<AnyData<Erased>>();

        // SAFETY: `Box::into_raw` returns a non-null pointer
        let ptr: NonNull<AnyData<Erased>> = unsafe { NonNull::new_unchecked(ptr) };

        Self { ptr }
    }

    /// Consumes the [`RawAny`] without dropping the value and returns the
    /// inner pointer.
    #[inline]
    pub(super) fn into_non_null(self) -> NonNull<AnyData<Erased>> {
        let ptr = self.ptr;
        core::mem::forget(self);
        ptr
    }

    /// Returns a reference to the [`AnyData`] instance.
    #[inline]
    pub fn as_ref(&self) -> RawAnyRef<'_> {
        RawAnyRef {
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }

    /// Returns a mutable reference to the [`AnyData`] instance.
    #[inline]
    pub fn as_mut(&mut self) -> RawAnyMut<'_> {
        RawAnyMut {
            // SAFETY:
            // 1. Guaranteed by the invariants on `RawAny`
            // 2. We are creating the `RawAnyMut` here, and we are not changing
            //    the pointer
            // 3. `RawAny` uniquely owns its allocation and we hold `&mut self`
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }
}

impl core::ops::Drop for RawAny {
    #[inline]
    fn drop(&mut self) {
        let vtable = self.as_ref().vtable();

        // SAFETY:
        // 1. The pointer comes from `Box::into_raw` (guaranteed by
        //    `RawAny::new`)
        // 2. The vtable returned by `self.as_ref().vtable()` is guaranteed to
        //    match the data in the `AnyData`.
        // 3. The pointer is initialized and has not been previously freed as
        //    guaranteed by the invariants on this type. We are correctly
        //    transferring ownership here and the pointer is not used
        //    afterwards, as we are in the drop function.
        unsafe {
            vtable.drop(self.ptr);
        }
    }
}

impl Clone for RawAny {
    #[inline]
    fn clone(&self) -> Self {
        let this = self.as_ref();
        let vtable = this.vtable();

        // SAFETY:
        // 1. The vtable returned by `this.vtable()` is guaranteed to match the
        //    data in the `AnyData`.
        unsafe { vtable.clone(this) }
    }
}

/// A lifetime-bound pointer to an [`AnyData`] that is guaranteed to point to
/// an initialized instance of an [`AnyData<T>`] for some specific `T`, though
/// we do not know which actual `T` it is.
///
/// We cannot use a [`&'a AnyData<T>`] directly, because that would require us
/// to know the actual type of the value, which we do not.
///
/// [`&'a AnyData<T>`]: AnyData
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct RawAnyRef<'a> {
    /// Pointer to the inner value data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<AnyData<T>>` for some
    ///    `T` using `Box::into_raw`.
    /// 2. The pointer will point to the same `AnyData<T>` for the entire
    ///    lifetime of this object.
    ptr: NonNull<AnyData<Erased>>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a AnyData<Erased>`
    _marker: core::marker::PhantomData<&'a AnyData<Erased>>,
}

impl<'a> RawAnyRef<'a> {
    /// Casts the [`RawAnyRef`] to an [`AnyData<T>`] reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`AnyData`].
    #[inline]
    pub(super) unsafe fn cast_inner<T>(self) -> &'a AnyData<T> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.vtable().tag().type_id(), TypeId::of::<T>());

        let this = self.ptr.cast::<AnyData<T>>();
        // SAFETY: Converting the NonNull pointer to a reference is sound
        // because:
        // - The pointer is non-null, properly aligned, and dereferenceable
        //   (guaranteed by RawAnyRef's type invariants)
        // - The pointee is properly initialized (RawAnyRef's doc comment
        //   guarantees it points to an initialized AnyData<T> for some T)
        // - The type `T` matches the actual value type (guaranteed by caller)
        // - Shared access is allowed
        // - The reference lifetime 'a is valid (tied to RawAnyRef<'a>'s
        //   lifetime)
        unsafe { this.as_ref() }
    }

    /// Returns a raw pointer to the [`AnyData`] instance.
    #[inline]
    pub(super) fn as_ptr(self) -> *const AnyData<Erased> {
        self.ptr.as_ptr()
    }

    /// Returns the [`TypeTag`] of the stored value.
    #[inline]
    pub fn value_tag(self) -> &'static TypeTag {
        self.vtable().tag()
    }

    /// Returns the [`TypeId`] of the stored value.
    #[inline]
    pub fn value_type_id(self) -> TypeId {
        self.vtable().tag().type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored value.
    #[inline]
    pub fn value_type_name(self) -> &'static str {
        self.vtable().tag().type_name()
    }
}

/// A mutable lifetime-bound pointer to an [`AnyData`] that is guaranteed to
/// point to an initialized instance of an [`AnyData<T>`] for some specific
/// `T`, though we do not know which actual `T` it is.
///
/// We cannot use a [`&'a mut AnyData<T>`] directly, because that would require
/// us to know the actual type of the value, which we do not.
///
/// [`&'a mut AnyData<T>`]: AnyData
#[repr(transparent)]
pub struct RawAnyMut<'a> {
    /// Pointer to the inner value data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<AnyData<T>>` for some
    ///    `T` using `Box::into_raw`.
    /// 2. The pointer will point to the same `AnyData<T>` for the entire
    ///    lifetime of this object.
    /// 3. This pointer is valid for exclusive mutable access to the `AnyData`
    ///    with the same semantics as a `&'a mut AnyData<T>`.
    ptr: NonNull<AnyData<Erased>>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a mut AnyData<Erased>`
    _marker: core::marker::PhantomData<&'a mut AnyData<Erased>>,
}

impl<'a> RawAnyMut<'a> {
    /// Casts the [`RawAnyMut`] to a mutable [`AnyData<T>`] reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`AnyData`]
    #[inline]
    pub(super) unsafe fn cast_inner<T>(self) -> &'a mut AnyData<T> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.as_ref().value_type_id(), TypeId::of::<T>());

        let mut this = self.ptr.cast::<AnyData<T>>();

        // SAFETY: Converting the NonNull pointer to a mutable reference is
        // sound because:
        // - The pointer is non-null, properly aligned, and dereferenceable
        //   (guaranteed by RawAnyMut's type invariants)
        // - The pointee is properly initialized (RawAnyMut's doc comment
        //   guarantees it points to an initialized AnyData<T> for some T)
        // - The type `T` matches the actual value type (guaranteed by caller)
        // - Exclusive access is guaranteed
        // - The reference lifetime 'a is valid (tied to RawAnyMut<'a>'s
        //   lifetime)
        unsafe { this.as_mut() }
    }

    /// Reborrows the mutable reference to the [`AnyData`] with a shorter
    /// lifetime.
    #[inline]
    pub fn reborrow<'b>(&'b mut self) -> RawAnyMut<'b> {
        RawAnyMut {
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }

    /// Returns a reference to the [`AnyData`] instance.
    #[inline]
    pub fn as_ref(&self) -> RawAnyRef<'_> {
        RawAnyRef {
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }
}
