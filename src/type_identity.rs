//! Comparable identity tokens for the type stored in an
//! [`AnyValue`](crate::AnyValue).

use core::any::TypeId;

use vessel_internals::tag::TypeTag;

/// An opaque token identifying the type held by an [`AnyValue`], or the
/// absence of a value.
///
/// Two tokens are equal exactly when they identify the same type, or when
/// both come from empty holders. Tokens can be compared against the identity
/// of a known type with [`TypeIdentity::of`].
///
/// # Examples
///
/// ```
/// use vessel::{AnyValue, TypeIdentity};
///
/// let value = AnyValue::new(String::from("hi"));
/// assert_eq!(value.type_identity(), TypeIdentity::of::<String>());
/// assert_ne!(value.type_identity(), TypeIdentity::of::<&str>());
/// assert_eq!(AnyValue::empty().type_identity(), TypeIdentity::none());
/// ```
///
/// [`AnyValue`]: crate::AnyValue
#[derive(Clone, Copy)]
pub struct TypeIdentity {
    /// Tag of the identified type, or `None` for "no type"
    tag: Option<&'static TypeTag>,
}

impl TypeIdentity {
    /// Returns the identity of the type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::from_tag(TypeTag::of::<T>())
    }

    /// Returns the identity reported by an empty holder.
    #[inline]
    pub const fn none() -> Self {
        Self { tag: None }
    }

    /// Creates the identity of the type described by `tag`.
    #[inline]
    pub(crate) fn from_tag(tag: &'static TypeTag) -> Self {
        Self { tag: Some(tag) }
    }

    /// Returns `true` if this is the identity of an empty holder.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.tag.is_none()
    }

    /// Returns `true` if this is the identity of the type `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.tag.is_some_and(|tag| tag.is::<T>())
    }

    /// Returns the [`TypeId`] of the identified type, or `None` for an empty
    /// holder.
    #[inline]
    pub fn type_id(&self) -> Option<TypeId> {
        self.tag.map(TypeTag::type_id)
    }

    /// Returns the [`core::any::type_name`] of the identified type, or `None`
    /// for an empty holder.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        self.tag.map(TypeTag::type_name)
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeIdentity {}

impl core::hash::Hash for TypeIdentity {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl core::fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.type_name() {
            Some(name) => f.debug_tuple("TypeIdentity").field(&name).finish(),
            None => f.write_str("TypeIdentity(<none>)"),
        }
    }
}
