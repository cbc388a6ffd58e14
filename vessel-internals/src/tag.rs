//! Static identity records for concrete types.
//!
//! A [`TypeTag`] is the smallest piece of per-type metadata: how to obtain the
//! [`TypeId`] and the [`core::any::type_name`] of one specific type. Tags are
//! created as `&'static` references inside a `const` block, so every call to
//! [`TypeTag::of`] with the same type yields an equal tag.

use core::any::TypeId;

/// Identity record of a single `'static` type.
///
/// Two tags describe the same type exactly when their [`TypeId`]s are equal.
/// Address equality of the `&'static TypeTag` references is not guaranteed,
/// since the compiler may duplicate constants across codegen units.
#[derive(Clone, Copy)]
pub struct TypeTag {
    /// Gets the [`TypeId`] of the type that was used to create this
    /// [`TypeTag`].
    type_id: fn() -> TypeId,
    /// Gets the name of the type that was used to create this [`TypeTag`].
    type_name: fn() -> &'static str,
}

impl TypeTag {
    /// Returns the tag of the type `T`.
    #[inline]
    pub const fn of<T: ?Sized + 'static>() -> &'static Self {
        const {
            &Self {
                type_id: TypeId::of::<T>,
                type_name: core::any::type_name::<T>,
            }
        }
    }

    /// Gets the [`TypeId`] of the type that was used to create this
    /// [`TypeTag`].
    #[inline]
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the type that was used to create
    /// this [`TypeTag`].
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Returns `true` if this tag was created for the type `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeTag {}

impl core::hash::Hash for TypeTag {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl core::fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("TypeTag").field(&self.type_name()).finish()
    }
}
