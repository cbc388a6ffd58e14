//! Raw storage shared by a fixed set of types.
//!
//! [`AlignedSlot<S>`] is uninitialized memory with the size and alignment of
//! a *layout type* `S`. For a tagged container, `S` is a chain of
//! [`Overlay`] unions, one field per alternative, so the compiler itself
//! computes the maximum size and alignment of all alternatives.
//!
//! The slot performs no bookkeeping. It does not know whether it currently
//! holds a value, or of which type; that is tracked by its owner, typically a
//! [`RawVariant`].
//!
//! [`RawVariant`]: crate::variant::RawVariant

use core::{
    mem::{ManuallyDrop, MaybeUninit},
    ptr::NonNull,
};

use crate::util::Erased;

/// A union of `A` and `B` used only for its layout.
///
/// All fields of a `#[repr(C)]` union start at offset zero, and the union is
/// as large and as aligned as its largest and most aligned field. Nesting
/// overlays, as in `Overlay<A, Overlay<B, Overlay<C, ()>>>`, yields a type
/// whose layout fits each of `A`, `B` and `C` at offset zero.
#[repr(C)]
#[allow(dead_code, reason = "the fields are never read, only the layout is used")]
pub union Overlay<A, B> {
    /// Storage for the first type
    head: ManuallyDrop<A>,
    /// Storage for the remaining types
    tail: ManuallyDrop<B>,
}

/// Returns `true` if a value of type `T` can be stored at offset zero of a
/// value of type `S`.
#[inline]
pub const fn fits<T, S>() -> bool {
    size_of::<T>() <= size_of::<S>() && align_of::<T>() <= align_of::<S>()
}

/// Possibly uninitialized storage large and aligned enough for any type that
/// [`fits`] in the layout type `S`.
///
/// Values are placed at offset zero. Whether the slot currently holds a value,
/// and of which type, is entirely up to the owner of the slot: the slot never
/// drops anything by itself.
#[repr(transparent)]
pub struct AlignedSlot<S> {
    /// The storage itself
    bytes: MaybeUninit<S>,
}

impl<S> AlignedSlot<S> {
    /// Creates an uninitialized slot.
    #[inline]
    pub const fn uninit() -> Self {
        Self {
            bytes: MaybeUninit::uninit(),
        }
    }

    /// Creates a slot that holds `value`.
    ///
    /// The caller takes over the responsibility of eventually dropping the
    /// value as a `T`; otherwise it is leaked.
    #[inline]
    pub fn new<T>(value: T) -> Self {
        let mut this = Self::uninit();
        this.write(value);
        this
    }

    /// Moves `value` into the slot, without dropping any value that may
    /// already be stored there.
    ///
    /// Instantiating this method with a `T` that does not [`fit`](fits) in
    /// `S` fails to compile.
    #[inline]
    pub fn write<T>(&mut self, value: T) {
        const {
            assert!(fits::<T, S>(), "the type does not fit in the slot layout");
        }
        let ptr: *mut T = self.bytes.as_mut_ptr().cast::<T>();
        // SAFETY: The pointer is derived from a live `&mut MaybeUninit<S>`, so
        // it is valid for writes of `size_of::<S>()` bytes and aligned to
        // `align_of::<S>()`. The `const` assertion above guarantees that both
        // are at least as large as those of `T`.
        unsafe { ptr.write(value) };
    }

    /// Returns a pointer to the start of the slot.
    #[inline]
    pub fn as_ptr(&self) -> NonNull<Erased> {
        NonNull::from(&self.bytes).cast::<Erased>()
    }

    /// Returns a mutable pointer to the start of the slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> NonNull<Erased> {
        NonNull::from(&mut self.bytes).cast::<Erased>()
    }

    /// Reinterprets the slot as a reference to a `T`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The slot holds an initialized value of type `T` that has not been
    ///    dropped or moved out.
    #[inline]
    pub unsafe fn assume_ref<T>(&self) -> &T {
        // SAFETY:
        // 1. The pointer is valid and aligned for `T` because `T` was written
        //    into this slot, and the slot holds a live `T` as guaranteed by
        //    the caller. The borrow is tied to `&self`.
        unsafe { self.as_ptr().cast::<T>().as_ref() }
    }

    /// Reinterprets the slot as a mutable reference to a `T`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The slot holds an initialized value of type `T` that has not been
    ///    dropped or moved out.
    #[inline]
    pub unsafe fn assume_mut<T>(&mut self) -> &mut T {
        // SAFETY:
        // 1. As in `assume_ref`, with exclusivity following from `&mut self`.
        unsafe { self.as_mut_ptr().cast::<T>().as_mut() }
    }

    /// Moves the stored `T` out of the slot, leaving it logically
    /// uninitialized.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The slot holds an initialized value of type `T`.
    /// 2. The value is not used, read or dropped through the slot afterwards.
    #[inline]
    pub unsafe fn assume_read<T>(&self) -> T {
        // SAFETY:
        // 1. The pointer is valid, aligned and initialized for `T` as
        //    guaranteed by the caller.
        // 2. Ownership of the value moves to the return value, and the caller
        //    guarantees no further use through the slot.
        unsafe { self.as_ptr().cast::<T>().read() }
    }
}
