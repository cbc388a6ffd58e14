//! Alternative lists and the compile-time mapping from types to indices.
//!
//! An alternative list is a tuple `(A0, A1, ..., An)` of up to 12 types. For
//! each supported arity this module implements:
//!
//! - [`Alternatives`], giving the layout type, the first alternative, the
//!   length and the table of [`AlternativeEntry`] values
//! - [`Includes`] with the position marker `At<k>`, for every position `k`
//! - [`VisitAll`] and [`VisitAllMut`] for every visitor handling all
//!   alternatives, each containing the dispatch table of thunks
//!
//! The position marker [`At`] makes the impls of [`Includes`] distinct even
//! when two alternatives have the same type. In that case the compiler cannot
//! infer the position from the type alone, and the caller has to name it.

use core::ptr::NonNull;

use crate::{
    slot::Overlay,
    util::Erased,
    variant::{
        dispatch::{VisitFn, VisitMutFn, visit_mut_thunk, visit_thunk},
        entry::AlternativeEntry,
    },
    visit::{Visit, VisitAll, VisitAllMut, VisitMut},
};

/// Private module preventing implementations of [`Alternatives`] outside of
/// this crate.
mod sealed {
    /// Implemented for the supported tuples only.
    pub trait Sealed {}
}

/// A closed list of alternative types, written as a tuple.
///
/// This trait is sealed and implemented for tuples with 1 to 12 elements.
///
/// # Safety
///
/// Implementations must guarantee that:
///
/// 1. Every alternative fits at offset zero of [`Layout`](Self::Layout).
/// 2. [`ENTRIES`](Self::ENTRIES) has exactly [`LEN`](Self::LEN) entries, and
///    the entry at position `k` was created for the alternative at position
///    `k`.
/// 3. [`First`](Self::First) is the alternative at position 0.
pub unsafe trait Alternatives: sealed::Sealed {
    /// Type whose size and alignment are the maxima over all alternatives.
    type Layout;

    /// The alternative at position 0.
    type First;

    /// Number of alternatives.
    const LEN: usize;

    /// One dispatch entry per alternative, in declaration order.
    const ENTRIES: &'static [AlternativeEntry];
}

/// Zero-sized marker naming the alternative at position `N`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct At<const N: usize>;

/// Implemented by an alternative list that has `T` as the alternative named by
/// the position marker `I`.
///
/// Calls are written with `I` left for inference, as in `holds::<T, _>()`.
/// The compiler picks the one position at which `T` occurs; naming a type that
/// is not in the list is a compile error.
///
/// # Safety
///
/// [`INDEX`](Self::INDEX) must be the position at which `T` occurs in the
/// list. Implementations are provided for every position of every supported
/// tuple; other implementations must uphold the same guarantee.
pub unsafe trait Includes<T, I>: Alternatives {
    /// Position of `T` in the list.
    const INDEX: usize;
}

/// Expands to the nested [`Overlay`] union covering all listed types.
macro_rules! overlay {
    () => { () };
    ($head:ident $(, $rest:ident)*) => {
        Overlay<$head, overlay!($($rest),*)>
    };
}

/// Implements the alternative-list traits for one tuple arity.
macro_rules! alternatives {
    (@includes $all:tt; $($T:ident @ $idx:literal),+) => {
        $( alternatives!(@include $all; $T @ $idx); )+
    };
    (@include [$($All:ident),+]; $T:ident @ $idx:literal) => {
        // SAFETY: `$T` is the element of the tuple at position `$idx`.
        unsafe impl<$($All),+> Includes<$T, At<$idx>> for ($($All,)+) {
            const INDEX: usize = $idx;
        }
    };
    (@first $first:ident $(, $rest:ident)*) => { $first };
    ($len:literal; $($T:ident @ $idx:literal),+) => {
        impl<$($T),+> sealed::Sealed for ($($T,)+) {}

        // SAFETY:
        // 1. `Layout` has one `Overlay` field for every element of the tuple.
        // 2. `ENTRIES` lists one entry per element, in declaration order.
        // 3. `First` is the first element of the tuple.
        unsafe impl<$($T),+> Alternatives for ($($T,)+) {
            type Layout = overlay!($($T),+);
            type First = alternatives!(@first $($T),+);
            const LEN: usize = $len;
            const ENTRIES: &'static [AlternativeEntry] = &[$(AlternativeEntry::of::<$T>()),+];
        }

        alternatives!(@includes [$($T),+]; $($T @ $idx),+);

        // SAFETY: The table holds the thunk of each alternative at the position
        // of that alternative.
        unsafe impl<V, $($T),+> VisitAll<($($T,)+)> for V
        where
            $(V: Visit<$T>,)+
        {
            #[inline]
            unsafe fn visit_at(&mut self, index: usize, value: NonNull<Erased>) -> Self::Output {
                let table: [VisitFn<V>; $len] = [$(visit_thunk::<V, $T>),+];
                // SAFETY: `index` selects the thunk of the alternative that
                // `value` points to, as guaranteed by the caller.
                unsafe { table[index](self, value) }
            }
        }

        // SAFETY: The table holds the thunk of each alternative at the position
        // of that alternative.
        unsafe impl<V, $($T),+> VisitAllMut<($($T,)+)> for V
        where
            $(V: VisitMut<$T>,)+
        {
            #[inline]
            unsafe fn visit_at_mut(&mut self, index: usize, value: NonNull<Erased>) -> Self::Output {
                let table: [VisitMutFn<V>; $len] = [$(visit_mut_thunk::<V, $T>),+];
                // SAFETY: `index` selects the thunk of the alternative that
                // `value` points to, as guaranteed by the caller.
                unsafe { table[index](self, value) }
            }
        }
    };
}

alternatives!(1; A0 @ 0);
alternatives!(2; A0 @ 0, A1 @ 1);
alternatives!(3; A0 @ 0, A1 @ 1, A2 @ 2);
alternatives!(4; A0 @ 0, A1 @ 1, A2 @ 2, A3 @ 3);
alternatives!(5; A0 @ 0, A1 @ 1, A2 @ 2, A3 @ 3, A4 @ 4);
alternatives!(6; A0 @ 0, A1 @ 1, A2 @ 2, A3 @ 3, A4 @ 4, A5 @ 5);
alternatives!(7; A0 @ 0, A1 @ 1, A2 @ 2, A3 @ 3, A4 @ 4, A5 @ 5, A6 @ 6);
alternatives!(8; A0 @ 0, A1 @ 1, A2 @ 2, A3 @ 3, A4 @ 4, A5 @ 5, A6 @ 6, A7 @ 7);
alternatives!(9; A0 @ 0, A1 @ 1, A2 @ 2, A3 @ 3, A4 @ 4, A5 @ 5, A6 @ 6, A7 @ 7, A8 @ 8);
alternatives!(10; A0 @ 0, A1 @ 1, A2 @ 2, A3 @ 3, A4 @ 4, A5 @ 5, A6 @ 6, A7 @ 7, A8 @ 8, A9 @ 9);
alternatives!(11; A0 @ 0, A1 @ 1, A2 @ 2, A3 @ 3, A4 @ 4, A5 @ 5, A6 @ 6, A7 @ 7, A8 @ 8, A9 @ 9, A10 @ 10);
alternatives!(12; A0 @ 0, A1 @ 1, A2 @ 2, A3 @ 3, A4 @ 4, A5 @ 5, A6 @ 6, A7 @ 7, A8 @ 8, A9 @ 9, A10 @ 10, A11 @ 11);

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::mem::{align_of, size_of};

    use super::*;

    fn index_of<L: Includes<T, I>, T, I>() -> usize {
        <L as Includes<T, I>>::INDEX
    }

    #[test]
    fn test_indices() {
        type L = (i32, String, f64);
        assert_eq!(index_of::<L, i32, _>(), 0);
        assert_eq!(index_of::<L, String, _>(), 1);
        assert_eq!(index_of::<L, f64, _>(), 2);
        assert_eq!(<L as Alternatives>::LEN, 3);
    }

    #[test]
    fn test_repeated_alternative_needs_position() {
        type L = (u8, u8, u16);
        assert_eq!(index_of::<L, u8, At<0>>(), 0);
        assert_eq!(index_of::<L, u8, At<1>>(), 1);
        assert_eq!(index_of::<L, u16, _>(), 2);
    }

    #[test]
    fn test_layout_is_max_of_alternatives() {
        type L = (u8, [u16; 5], u64);
        type Layout = <L as Alternatives>::Layout;
        assert_eq!(size_of::<Layout>(), 16);
        assert_eq!(align_of::<Layout>(), align_of::<u64>());

        type Single = <(u32,) as Alternatives>::Layout;
        assert_eq!(size_of::<Single>(), 4);
    }

    #[test]
    fn test_entries_in_declaration_order() {
        let entries = <(bool, String, char) as Alternatives>::ENTRIES;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].type_name(), "bool");
        assert!(entries[1].type_name().ends_with("String"));
        assert_eq!(entries[2].type_name(), "char");
    }

    #[test]
    fn test_largest_arity() {
        type L = (u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u16);
        assert_eq!(<L as Alternatives>::LEN, 12);
        assert_eq!(index_of::<L, u16, _>(), 11);
        assert_eq!(<L as Alternatives>::ENTRIES.len(), 12);
    }
}
