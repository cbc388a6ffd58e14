//! Per-alternative dispatch entries.
//!
//! Every alternative list has one `'static` table of [`AlternativeEntry`]
//! values, stored in [`Alternatives::ENTRIES`] in declaration order. The entry
//! at position `i` holds the operations a container needs without knowing
//! which alternative is live: the name of the type, and how to drop it in
//! place.
//!
//! [`Alternatives::ENTRIES`]: crate::variant::Alternatives::ENTRIES

use core::ptr::NonNull;

use crate::util::Erased;

/// Operations bound to one alternative of a tagged container.
///
/// # Safety Invariant
///
/// The fields `type_name` and `drop_in_place` point to the functions
/// instantiated with the same type `T` that was passed to
/// [`AlternativeEntry::of`].
#[derive(Clone, Copy)]
pub struct AlternativeEntry {
    /// Gets the [`core::any::type_name`] of the alternative.
    type_name: fn() -> &'static str,
    /// Drops a value of the alternative in place.
    drop_in_place: unsafe fn(NonNull<Erased>),
}

impl AlternativeEntry {
    /// Creates the entry for the alternative type `T`.
    #[inline]
    pub const fn of<T>() -> Self {
        Self {
            type_name: core::any::type_name::<T>,
            drop_in_place: drop_in_place::<T>,
        }
    }

    /// Gets the [`core::any::type_name`] of the alternative.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Drops the value pointed to by `ptr` in place.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live, initialized value of the type this entry was
    ///    created for, valid for exclusive access.
    /// 2. The value is not used or dropped again afterwards.
    #[inline]
    pub unsafe fn drop_in_place(&self, ptr: NonNull<Erased>) {
        // SAFETY: `self.drop_in_place` points to `drop_in_place::<T>` below for
        // the type `T` of this entry. Its requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.drop_in_place)(ptr) }
    }
}

impl core::fmt::Debug for AlternativeEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("AlternativeEntry")
            .field(&self.type_name())
            .finish()
    }
}

/// Drops the `T` pointed to by `ptr` in place.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to a live, initialized `T`, valid for exclusive access.
/// 2. The value is not used or dropped again afterwards.
unsafe fn drop_in_place<T>(ptr: NonNull<Erased>) {
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. Guaranteed by the caller
    unsafe { ptr.cast::<T>().drop_in_place() }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, string::String};
    use core::mem::ManuallyDrop;

    use super::*;

    #[test]
    fn test_entry_type_name() {
        assert_eq!(AlternativeEntry::of::<u16>().type_name(), "u16");
        assert!(
            AlternativeEntry::of::<String>()
                .type_name()
                .ends_with("String")
        );
    }

    #[test]
    fn test_entry_drop_in_place() {
        let shared = Rc::new(());
        let mut value = ManuallyDrop::new(Rc::clone(&shared));
        assert_eq!(Rc::strong_count(&shared), 2);

        let entry = AlternativeEntry::of::<Rc<()>>();
        // SAFETY: `value` holds a live `Rc<()>` that is never touched again.
        unsafe { entry.drop_in_place(NonNull::from(&mut *value).cast::<Erased>()) };
        assert_eq!(Rc::strong_count(&shared), 1);
    }
}
