//! The type-erased value holder.
//!
//! An [`AnyValue`] owns at most one value of any `'static + Clone` type. The
//! concrete type is forgotten when the value is stored and can only be
//! recovered by naming it exactly: there is no conversion between related
//! types, and no matching of a type against a trait it implements.
//!
//! # Examples
//!
//! ```
//! use vessel::AnyValue;
//!
//! let mut value = AnyValue::new(42i32);
//! assert_eq!(value.get::<i32>(), Ok(42));
//! assert!(value.get::<i64>().is_err());
//!
//! value.set(String::from("now a string"));
//! assert_eq!(value.get_ref::<String>().unwrap(), "now a string");
//! assert_eq!(value.try_get::<i32>(), None);
//! ```
//!
//! # Thread safety
//!
//! An [`AnyValue`] may hold a value of any type, including types that are
//! neither [`Send`] nor [`Sync`], so it is neither of them itself. Sharing a
//! holder between threads requires wrapping it in a type providing the
//! synchronization.

use vessel_internals::RawAny;

use crate::{error::BadAnyAccess, trace, type_identity::TypeIdentity};

/// A holder for at most one value of an arbitrary `'static + Clone` type.
///
/// Cloning an [`AnyValue`] deep-copies the held value into a new allocation.
/// Moving one is an ordinary Rust move; [`AnyValue::take`] moves the value out
/// while leaving an empty, reusable holder behind.
///
/// The holder is one pointer wide, and empty holders do not allocate.
#[derive(Clone, Default)]
pub struct AnyValue {
    /// The owned allocation, or `None` when the holder is empty
    raw: Option<RawAny>,
}

impl AnyValue {
    /// Creates a holder storing `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vessel::AnyValue;
    ///
    /// let value = AnyValue::new(vec![1, 2, 3]);
    /// assert!(value.is::<Vec<i32>>());
    /// ```
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + 'static,
    {
        trace::any_stored(core::any::type_name::<T>());
        Self {
            raw: Some(RawAny::new(value)),
        }
    }

    /// Creates an empty holder.
    #[inline]
    pub const fn empty() -> Self {
        Self { raw: None }
    }

    /// Returns `true` if the holder stores a value.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.raw.is_some()
    }

    /// Returns the identity of the stored type, or [`TypeIdentity::none`] if
    /// the holder is empty.
    #[inline]
    pub fn type_identity(&self) -> TypeIdentity {
        match &self.raw {
            Some(raw) => TypeIdentity::from_tag(raw.as_ref().value_tag()),
            None => TypeIdentity::none(),
        }
    }

    /// Returns the [`core::any::type_name`] of the stored type, or `None` if
    /// the holder is empty.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        self.raw.as_ref().map(|raw| raw.as_ref().value_type_name())
    }

    /// Returns `true` if the holder stores a value of exactly the type `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.raw
            .as_ref()
            .is_some_and(|raw| raw.as_ref().value_tag().is::<T>())
    }

    /// Returns a reference to the stored value if it is a `T`.
    #[inline]
    pub fn try_get<T: 'static>(&self) -> Option<&T> {
        let raw = self.raw.as_ref()?.as_ref();
        if raw.value_tag().is::<T>() {
            // SAFETY: The stored type was just checked to be `T`.
            Some(unsafe { raw.value_downcast_unchecked::<T>() })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the stored value if it is a `T`.
    #[inline]
    pub fn try_get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        let raw = self.raw.as_mut()?;
        if raw.as_ref().value_tag().is::<T>() {
            // SAFETY: The stored type was just checked to be `T`.
            Some(unsafe { raw.as_mut().value_downcast_unchecked::<T>() })
        } else {
            None
        }
    }

    /// Returns a reference to the stored value, or a [`BadAnyAccess`] if it
    /// is not a `T`.
    #[inline]
    pub fn get_ref<T: 'static>(&self) -> Result<&T, BadAnyAccess> {
        let error = self.access_error::<T>();
        self.try_get::<T>().ok_or_else(|| {
            trace::any_access_failed(&error);
            error
        })
    }

    /// Returns a mutable reference to the stored value, or a
    /// [`BadAnyAccess`] if it is not a `T`.
    #[inline]
    pub fn get_mut<T: 'static>(&mut self) -> Result<&mut T, BadAnyAccess> {
        let error = self.access_error::<T>();
        self.try_get_mut::<T>().ok_or_else(|| {
            trace::any_access_failed(&error);
            error
        })
    }

    /// Returns a copy of the stored value, or a [`BadAnyAccess`] if it is not
    /// a `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vessel::AnyValue;
    ///
    /// let value = AnyValue::new(String::from("hi"));
    /// assert_eq!(value.get::<String>().unwrap(), "hi");
    ///
    /// let error = value.get::<&str>().unwrap_err();
    /// assert_eq!(error.found(), Some("alloc::string::String"));
    /// ```
    #[inline]
    pub fn get<T: Clone + 'static>(&self) -> Result<T, BadAnyAccess> {
        self.get_ref::<T>().cloned()
    }

    /// Drops the stored value, if any, and stores `value` instead.
    #[inline]
    pub fn set<T>(&mut self, value: T)
    where
        T: Clone + 'static,
    {
        *self = Self::new(value);
    }

    /// Drops the stored value, if any, leaving the holder empty.
    #[inline]
    pub fn reset(&mut self) {
        self.raw = None;
    }

    /// Moves the stored value into a new holder, leaving this one empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use vessel::AnyValue;
    ///
    /// let mut source = AnyValue::new(1u8);
    /// let target = source.take();
    /// assert!(!source.has_value());
    /// assert_eq!(target.get::<u8>(), Ok(1));
    ///
    /// source.set(2u8);
    /// assert_eq!(source.get::<u8>(), Ok(2));
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            raw: self.raw.take(),
        }
    }

    /// Moves the stored value out if it is a `T`, otherwise returns the
    /// holder unchanged.
    #[inline]
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        match self.raw {
            Some(raw) if raw.as_ref().value_tag().is::<T>() => {
                // SAFETY: The stored type was just checked to be `T`.
                Ok(unsafe { raw.into_value::<T>() })
            }
            raw => Err(Self { raw }),
        }
    }

    /// Builds the error describing a request for `T` against this holder.
    fn access_error<T: 'static>(&self) -> BadAnyAccess {
        BadAnyAccess::new(core::any::type_name::<T>(), self.type_name())
    }
}

impl core::fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.type_name() {
            Some(name) => f.debug_tuple("AnyValue").field(&name).finish(),
            None => f.write_str("AnyValue(<empty>)"),
        }
    }
}
