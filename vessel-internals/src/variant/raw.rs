//! The raw tagged container.
//!
//! This module encapsulates the `slot` and `index` fields of [`RawVariant`],
//! ensuring they are only visible within this module. This visibility
//! restriction guarantees the safety invariant: **the slot always holds a live
//! value of the alternative at position `index`**.
//!
//! # Safety Invariant
//!
//! Both fields are written together, by [`RawVariant::new`], and are never
//! changed independently afterwards. Operations that change the alternative
//! build a whole new container and move it into place.
//!
//! The [`Drop`] implementation relies on this invariant to look up the right
//! [`AlternativeEntry`] and drop the live value exactly once.
//!
//! [`AlternativeEntry`]: crate::variant::AlternativeEntry

use core::{marker::PhantomData, mem::ManuallyDrop};

use crate::{
    slot::AlignedSlot,
    variant::{
        alternatives::{Alternatives, At, Includes},
        dispatch::{Cloner, Comparer, Debugger},
    },
    visit::{VisitAll, VisitAllMut},
};

/// Storage for exactly one value out of the closed list of alternatives `L`.
///
/// The container is as large as its largest alternative plus the index, and
/// never allocates. It is [`Send`] or [`Sync`] exactly when every alternative
/// is.
pub struct RawVariant<L: Alternatives> {
    /// Storage for the live alternative
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The slot holds an initialized value of the alternative of `L` at
    ///    position `index`, except during the execution of the `Drop`
    ///    implementation.
    slot: AlignedSlot<L::Layout>,

    /// Position of the live alternative
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. `index < L::LEN`
    index: usize,

    /// Marker tying the container to its alternatives for auto traits and
    /// drop checking
    _marker: PhantomData<L>,
}

impl<L: Alternatives> RawVariant<L> {
    /// Creates a container holding `value` as the alternative named by `I`.
    #[inline]
    pub fn new<T, I>(value: T) -> Self
    where
        L: Includes<T, I>,
    {
        Self {
            slot: AlignedSlot::new(value),
            index: <L as Includes<T, I>>::INDEX,
            _marker: PhantomData,
        }
    }

    /// Returns the position of `T` in `L`.
    #[inline]
    pub const fn index_of<T, I>() -> usize
    where
        L: Includes<T, I>,
    {
        <L as Includes<T, I>>::INDEX
    }

    /// Returns the position of the live alternative.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if the live alternative is the one named by `T` and
    /// `I`.
    #[inline]
    pub fn holds<T, I>(&self) -> bool
    where
        L: Includes<T, I>,
    {
        self.index == <L as Includes<T, I>>::INDEX
    }

    /// Returns the [`core::any::type_name`] of the live alternative.
    #[inline]
    pub fn active_type_name(&self) -> &'static str {
        L::ENTRIES[self.index].type_name()
    }

    /// Returns a reference to the live value if it is a `T`.
    #[inline]
    pub fn get<T, I>(&self) -> Option<&T>
    where
        L: Includes<T, I>,
    {
        if self.holds::<T, I>() {
            // SAFETY: The live alternative is at the index of `T`, so the slot
            // holds a live `T` by the invariants of this type.
            Some(unsafe { self.slot.assume_ref::<T>() })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the live value if it is a `T`.
    #[inline]
    pub fn get_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L: Includes<T, I>,
    {
        if self.holds::<T, I>() {
            // SAFETY: The live alternative is at the index of `T`, so the slot
            // holds a live `T` by the invariants of this type. Modifying the
            // value through the reference cannot change its type.
            Some(unsafe { self.slot.assume_mut::<T>() })
        } else {
            None
        }
    }

    /// Drops the live value and stores `value` in its place.
    ///
    /// If the old value panics while being dropped, the container still ends
    /// up holding `value`.
    #[inline]
    pub fn set<T, I>(&mut self, value: T)
    where
        L: Includes<T, I>,
    {
        *self = Self::new(value);
    }

    /// Stores `value` and returns the previous container.
    #[inline]
    pub fn replace<T, I>(&mut self, value: T) -> Self
    where
        L: Includes<T, I>,
    {
        core::mem::replace(self, Self::new(value))
    }

    /// Moves the live value out if it is a `T`, otherwise returns the
    /// container unchanged.
    #[inline]
    pub fn into_inner<T, I>(self) -> Result<T, Self>
    where
        L: Includes<T, I>,
    {
        if !self.holds::<T, I>() {
            return Err(self);
        }
        let this = ManuallyDrop::new(self);
        // SAFETY:
        // 1. The slot holds a live `T`, checked above.
        // 2. `this` is never dropped, so the value is not dropped again
        //    through the slot.
        Ok(unsafe { this.slot.assume_read::<T>() })
    }

    /// Calls `visitor` with a reference to the live value.
    ///
    /// The bound `V: VisitAll<L>` requires an implementation of
    /// [`Visit<T>`](crate::visit::Visit) for every alternative `T`, so a
    /// visitor that misses one is rejected at compile time.
    #[inline]
    pub fn visit<V>(&self, mut visitor: V) -> V::Output
    where
        V: VisitAll<L>,
    {
        // SAFETY:
        // 1. `self.index < L::LEN` by the invariants of this type.
        // 2. The slot holds a live value of the alternative at `self.index`,
        //    borrowed for the duration of the call through `&self`.
        unsafe { visitor.visit_at(self.index, self.slot.as_ptr()) }
    }

    /// Calls `visitor` with a mutable reference to the live value.
    #[inline]
    pub fn visit_mut<V>(&mut self, mut visitor: V) -> V::Output
    where
        V: VisitAllMut<L>,
    {
        let index = self.index;
        // SAFETY:
        // 1. `index < L::LEN` by the invariants of this type.
        // 2. The slot holds a live value of the alternative at `index`,
        //    exclusively borrowed for the duration of the call through
        //    `&mut self`.
        unsafe { visitor.visit_at_mut(index, self.slot.as_mut_ptr()) }
    }
}

impl<L: Alternatives> Drop for RawVariant<L> {
    #[inline]
    fn drop(&mut self) {
        let entry = &L::ENTRIES[self.index];
        // SAFETY:
        // 1. The slot holds a live value of the alternative at `self.index`,
        //    and `entry` was created for that alternative.
        // 2. The value is not used afterwards, as we are in the drop function.
        unsafe { entry.drop_in_place(self.slot.as_mut_ptr()) }
    }
}

impl<L> Clone for RawVariant<L>
where
    L: Alternatives,
    Cloner<L::Layout>: VisitAll<L, Output = AlignedSlot<L::Layout>>,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            slot: self.visit(Cloner::new()),
            index: self.index,
            _marker: PhantomData,
        }
    }
}

impl<L> PartialEq for RawVariant<L>
where
    L: Alternatives,
    for<'a> Comparer<'a, L::Layout>: VisitAll<L, Output = bool>,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.index != other.index {
            return false;
        }
        // SAFETY: `self` is only visited at `self.index`, which equals the
        // index of the live alternative in `other.slot`.
        let comparer = unsafe { Comparer::new(&other.slot) };
        self.visit(comparer)
    }
}

impl<L> core::fmt::Debug for RawVariant<L>
where
    L: Alternatives,
    for<'a, 'b> Debugger<'a, 'b>: VisitAll<L, Output = core::fmt::Result>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.visit(Debugger::new(f))
    }
}

impl<L> Default for RawVariant<L>
where
    L: Alternatives + Includes<<L as Alternatives>::First, At<0>>,
    L::First: Default,
{
    #[inline]
    fn default() -> Self {
        Self::new::<L::First, At<0>>(Default::default())
    }
}
