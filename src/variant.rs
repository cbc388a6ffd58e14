//! The closed-set tagged container.
//!
//! A [`Variant<L>`] holds exactly one value whose type is one of the
//! alternatives listed in the tuple `L`, such as `Variant<(i32, String)>`.
//! The value is stored inline, in storage as large and as aligned as the
//! largest alternative, next to the index of the live alternative.
//!
//! Which types are alternatives is checked when the program is compiled:
//! storing or requesting a type that is not in `L` is a compile error, and so
//! is visiting with a visitor that does not handle every alternative.
//!
//! # Examples
//!
//! ```
//! use vessel::Variant;
//!
//! let mut value: Variant<(i32, String)> = Variant::default();
//! value.set(String::from("hi"));
//! assert!(value.holds::<String, _>());
//! assert_eq!(value.get::<String, _>().unwrap(), "hi");
//!
//! value.set(5i32);
//! assert!(value.holds::<i32, _>());
//! assert!(value.get::<String, _>().is_err());
//! ```
//!
//! Types outside of the alternative list are rejected:
//!
//! ```compile_fail
//! use vessel::Variant;
//!
//! let mut value: Variant<(i32, String)> = Variant::default();
//! value.set(1.5f64);
//! ```
//!
//! # Repeated alternatives
//!
//! The same type may appear more than once in `L`. The operations that select
//! an alternative by its type then need the position spelled out through the
//! [`At`] marker, as the type alone is ambiguous:
//!
//! ```
//! use vessel::{At, Variant};
//!
//! let mut value: Variant<(u8, u8)> = Variant::new::<u8, At<1>>(3);
//! assert_eq!(value.index(), 1);
//! assert!(value.get::<u8, At<0>>().is_err());
//!
//! value.set::<u8, At<0>>(4);
//! assert_eq!(value.get::<u8, At<0>>(), Ok(&4));
//! ```
//!
//! # Thread safety
//!
//! A [`Variant<L>`] is [`Send`] or [`Sync`] exactly when all alternatives are.
//! It has no internal synchronization: `&mut` methods require exclusive
//! access as usual, and sharing one between threads for mutation requires an
//! external lock.

use vessel_internals::{
    RawVariant,
    slot::AlignedSlot,
    variant::{Alternatives, At, Cloner, Comparer, Debugger, Includes},
    visit::{VisitAll, VisitAllMut},
};

use crate::{error::BadVariantAccess, trace};

/// Storage for exactly one value out of the closed list of alternatives `L`.
///
/// `L` is a tuple of 1 to 12 types. The container is as large as its largest
/// alternative plus the index, and never allocates by itself.
pub struct Variant<L: Alternatives> {
    /// The container holding the live alternative
    raw: RawVariant<L>,
}

impl<L: Alternatives> Variant<L> {
    /// Number of alternatives in `L`.
    pub const LEN: usize = L::LEN;

    /// Creates a container holding `value`.
    ///
    /// The position marker `I` is inferred unless `T` occurs more than once
    /// in `L`.
    #[inline]
    pub fn new<T, I>(value: T) -> Self
    where
        L: Includes<T, I>,
    {
        let raw = RawVariant::new::<T, I>(value);
        trace::variant_stored(raw.index(), None, raw.active_type_name());
        Self { raw }
    }

    /// Returns the position of `T` in `L`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vessel::Variant;
    ///
    /// type Value = Variant<(i32, String, f64)>;
    /// assert_eq!(Value::index_of::<String, _>(), 1);
    /// assert_eq!(Value::index_of::<f64, _>(), 2);
    /// ```
    #[inline]
    pub const fn index_of<T, I>() -> usize
    where
        L: Includes<T, I>,
    {
        RawVariant::<L>::index_of::<T, I>()
    }

    /// Returns the 0-based position of the live alternative.
    #[inline]
    pub fn index(&self) -> usize {
        self.raw.index()
    }

    /// Returns `true` if the live alternative is `T`.
    #[inline]
    pub fn holds<T, I>(&self) -> bool
    where
        L: Includes<T, I>,
    {
        self.raw.holds::<T, I>()
    }

    /// Returns the [`core::any::type_name`] of the live alternative.
    #[inline]
    pub fn active_type_name(&self) -> &'static str {
        self.raw.active_type_name()
    }

    /// Returns a reference to the live value if it is a `T`.
    #[inline]
    pub fn try_get<T, I>(&self) -> Option<&T>
    where
        L: Includes<T, I>,
    {
        self.raw.get::<T, I>()
    }

    /// Returns a mutable reference to the live value if it is a `T`.
    #[inline]
    pub fn try_get_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L: Includes<T, I>,
    {
        self.raw.get_mut::<T, I>()
    }

    /// Returns a reference to the live value, or a [`BadVariantAccess`] if
    /// the live alternative is not `T`.
    #[inline]
    pub fn get<T, I>(&self) -> Result<&T, BadVariantAccess>
    where
        L: Includes<T, I>,
    {
        let error = self.access_error::<T, I>();
        self.raw.get::<T, I>().ok_or_else(|| {
            trace::variant_access_failed(&error);
            error
        })
    }

    /// Returns a mutable reference to the live value, or a
    /// [`BadVariantAccess`] if the live alternative is not `T`.
    #[inline]
    pub fn get_mut<T, I>(&mut self) -> Result<&mut T, BadVariantAccess>
    where
        L: Includes<T, I>,
    {
        let error = self.access_error::<T, I>();
        self.raw.get_mut::<T, I>().ok_or_else(|| {
            trace::variant_access_failed(&error);
            error
        })
    }

    /// Drops the live value and stores `value` in its place.
    ///
    /// The index switches to the position of `T`. If dropping the old value
    /// panics, the container still ends up holding `value`.
    #[inline]
    pub fn set<T, I>(&mut self, value: T)
    where
        L: Includes<T, I>,
    {
        let previous = self.raw.index();
        self.raw.set::<T, I>(value);
        trace::variant_stored(self.raw.index(), Some(previous), self.raw.active_type_name());
    }

    /// Stores `value` and returns the container that was replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use vessel::Variant;
    ///
    /// let mut value: Variant<(i32, String)> = Variant::new(String::from("old"));
    /// let previous = value.replace(7i32);
    /// assert_eq!(previous.get::<String, _>().unwrap(), "old");
    /// assert_eq!(value.get::<i32, _>(), Ok(&7));
    /// ```
    #[inline]
    pub fn replace<T, I>(&mut self, value: T) -> Self
    where
        L: Includes<T, I>,
    {
        let raw = self.raw.replace::<T, I>(value);
        trace::variant_stored(self.raw.index(), Some(raw.index()), self.raw.active_type_name());
        Self { raw }
    }

    /// Moves the live value out if it is a `T`, otherwise returns the
    /// container unchanged.
    #[inline]
    pub fn into_inner<T, I>(self) -> Result<T, Self>
    where
        L: Includes<T, I>,
    {
        self.raw.into_inner::<T, I>().map_err(|raw| Self { raw })
    }

    /// Calls `visitor` with a reference to the live value and returns its
    /// output.
    ///
    /// The visitor is routed through a table with one entry per alternative,
    /// indexed by [`index`](Self::index), so only the implementation for the
    /// live alternative runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use vessel::{Variant, Visit, Visitor};
    ///
    /// struct Describe;
    ///
    /// impl Visitor for Describe {
    ///     type Output = String;
    /// }
    ///
    /// impl Visit<i32> for Describe {
    ///     fn visit(&mut self, value: &i32) -> String {
    ///         format!("int {value}")
    ///     }
    /// }
    ///
    /// impl Visit<String> for Describe {
    ///     fn visit(&mut self, value: &String) -> String {
    ///         format!("string {value:?}")
    ///     }
    /// }
    ///
    /// let value: Variant<(i32, String)> = Variant::new(42i32);
    /// assert_eq!(value.visit(Describe), "int 42");
    /// ```
    ///
    /// A visitor that does not handle every alternative is rejected:
    ///
    /// ```compile_fail
    /// use vessel::{Variant, Visit, Visitor};
    ///
    /// struct OnlyInts;
    ///
    /// impl Visitor for OnlyInts {
    ///     type Output = ();
    /// }
    ///
    /// impl Visit<i32> for OnlyInts {
    ///     fn visit(&mut self, _value: &i32) {}
    /// }
    ///
    /// let value: Variant<(i32, String)> = Variant::new(42i32);
    /// value.visit(OnlyInts);
    /// ```
    #[inline]
    pub fn visit<V>(&self, visitor: V) -> V::Output
    where
        V: VisitAll<L>,
    {
        self.raw.visit(visitor)
    }

    /// Calls `visitor` with a mutable reference to the live value and returns
    /// its output.
    ///
    /// The visitor may modify the value in place, but cannot change which
    /// alternative is live.
    #[inline]
    pub fn visit_mut<V>(&mut self, visitor: V) -> V::Output
    where
        V: VisitAllMut<L>,
    {
        self.raw.visit_mut(visitor)
    }

    /// Builds the error describing a request for `T` against this container.
    fn access_error<T, I>(&self) -> BadVariantAccess
    where
        L: Includes<T, I>,
    {
        BadVariantAccess::new(Self::index_of::<T, I>(), self.index(), L::LEN)
    }
}

impl<L> Default for Variant<L>
where
    L: Alternatives + Includes<<L as Alternatives>::First, At<0>>,
    L::First: Default,
{
    /// Creates a container holding the default value of the first
    /// alternative.
    #[inline]
    fn default() -> Self {
        Self::new::<L::First, At<0>>(Default::default())
    }
}

impl<L> Clone for Variant<L>
where
    L: Alternatives,
    Cloner<L::Layout>: VisitAll<L, Output = AlignedSlot<L::Layout>>,
{
    /// Creates a container holding a clone of the live value, at the same
    /// index.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<L> PartialEq for Variant<L>
where
    L: Alternatives,
    for<'a> Comparer<'a, L::Layout>: VisitAll<L, Output = bool>,
{
    /// Two containers are equal if the same alternative is live in both and
    /// the live values are equal.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<L> core::fmt::Debug for Variant<L>
where
    L: Alternatives,
    for<'a, 'b> Debugger<'a, 'b>: VisitAll<L, Output = core::fmt::Result>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Variant")
            .field("index", &self.raw.index())
            .field("value", &self.raw)
            .finish()
    }
}
