//! Errors returned by failed typed accesses.
//!
//! Both containers report a mismatch between the requested type and the
//! stored one through a small [`Copy`] error value. A failed access never
//! changes the container it was made on, so callers can recover by simply
//! trying another type or by inspecting the error.

/// A typed access to an [`AnyValue`](crate::AnyValue) named a type different
/// from the stored one, or the holder was empty.
///
/// # Examples
///
/// ```
/// use vessel::AnyValue;
///
/// let value = AnyValue::new(7u8);
/// let error = value.get::<u16>().unwrap_err();
/// assert_eq!(error.requested(), "u16");
/// assert_eq!(error.found(), Some("u8"));
/// assert_eq!(
///     error.to_string(),
///     "bad any access: requested `u16`, but the holder contains `u8`"
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BadAnyAccess {
    /// Name of the type that was requested
    requested: &'static str,
    /// Name of the stored type, or `None` if the holder was empty
    found: Option<&'static str>,
}

impl BadAnyAccess {
    /// Creates an error for a request of `requested` against a holder storing
    /// `found`.
    pub(crate) fn new(requested: &'static str, found: Option<&'static str>) -> Self {
        Self { requested, found }
    }

    /// Returns the [`core::any::type_name`] of the requested type.
    pub fn requested(&self) -> &'static str {
        self.requested
    }

    /// Returns the [`core::any::type_name`] of the stored type, or `None` if
    /// the holder was empty.
    pub fn found(&self) -> Option<&'static str> {
        self.found
    }
}

impl core::fmt::Debug for BadAnyAccess {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BadAnyAccess")
            .field("requested", &self.requested)
            .field("found", &self.found)
            .finish()
    }
}

impl core::fmt::Display for BadAnyAccess {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.found {
            Some(found) => write!(
                f,
                "bad any access: requested `{}`, but the holder contains `{found}`",
                self.requested
            ),
            None => write!(
                f,
                "bad any access: requested `{}`, but the holder is empty",
                self.requested
            ),
        }
    }
}

impl core::error::Error for BadAnyAccess {}

/// A typed access to a [`Variant`](crate::Variant) named an alternative that
/// is not the live one.
///
/// # Examples
///
/// ```
/// use vessel::Variant;
///
/// let value: Variant<(i32, String)> = Variant::new(5i32);
/// let error = value.get::<String, _>().unwrap_err();
/// assert_eq!(error.requested(), 1);
/// assert_eq!(error.active(), 0);
/// assert_eq!(
///     error.to_string(),
///     "bad variant access: requested alternative 1, but alternative 0 of 2 is active"
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BadVariantAccess {
    /// Index of the requested alternative
    requested: usize,
    /// Index of the live alternative
    active: usize,
    /// Number of alternatives
    len: usize,
}

impl BadVariantAccess {
    /// Creates an error for a request of alternative `requested` while
    /// `active` out of `len` alternatives is live.
    pub(crate) fn new(requested: usize, active: usize, len: usize) -> Self {
        Self {
            requested,
            active,
            len,
        }
    }

    /// Returns the index of the requested alternative.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Returns the index of the alternative that was live.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Returns the number of alternatives of the container.
    pub fn alternative_count(&self) -> usize {
        self.len
    }
}

impl core::fmt::Debug for BadVariantAccess {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BadVariantAccess")
            .field("requested", &self.requested)
            .field("active", &self.active)
            .field("len", &self.len)
            .finish()
    }
}

impl core::fmt::Display for BadVariantAccess {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "bad variant access: requested alternative {}, but alternative {} of {} is active",
            self.requested, self.active, self.len
        )
    }
}

impl core::error::Error for BadVariantAccess {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_bad_any_access_display() {
        let error = BadAnyAccess::new("u32", None);
        assert_eq!(
            error.to_string(),
            "bad any access: requested `u32`, but the holder is empty"
        );
        assert_eq!(error.found(), None);
    }

    #[test]
    fn test_bad_variant_access_fields() {
        let error = BadVariantAccess::new(2, 0, 3);
        assert_eq!(error.requested(), 2);
        assert_eq!(error.active(), 0);
        assert_eq!(error.alternative_count(), 3);
        assert_eq!(
            error,
            BadVariantAccess {
                requested: 2,
                active: 0,
                len: 3
            }
        );
    }

    #[test]
    fn test_errors_are_errors() {
        static_assertions::assert_impl_all!(BadAnyAccess: core::error::Error, Copy, Send, Sync);
        static_assertions::assert_impl_all!(BadVariantAccess: core::error::Error, Copy, Send, Sync);
    }
}
