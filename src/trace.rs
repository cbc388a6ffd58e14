//! Trace events emitted by the containers.
//!
//! With the `tracing` feature enabled, failed typed accesses and stores are
//! reported as [`tracing`] events at the `TRACE` level under the `vessel`
//! target. Without the feature, every function here is empty and compiles
//! away.

use crate::error::{BadAnyAccess, BadVariantAccess};

/// Reports a failed typed access to an [`AnyValue`](crate::AnyValue).
#[inline]
pub(crate) fn any_access_failed(error: &BadAnyAccess) {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "vessel",
        requested = error.requested(),
        found = error.found().unwrap_or("<empty>"),
        "any value access failed"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = error;
}

/// Reports that a value of type `type_name` was stored in an
/// [`AnyValue`](crate::AnyValue).
#[inline]
pub(crate) fn any_stored(type_name: &'static str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(target: "vessel", type_name, "any value stored");
    #[cfg(not(feature = "tracing"))]
    let _ = type_name;
}

/// Reports a failed typed access to a [`Variant`](crate::Variant).
#[inline]
pub(crate) fn variant_access_failed(error: &BadVariantAccess) {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "vessel",
        requested = error.requested(),
        active = error.active(),
        alternatives = error.alternative_count(),
        "variant access failed"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = error;
}

/// Reports that alternative `index` of a [`Variant`](crate::Variant) was
/// stored, replacing alternative `previous` if the container already existed.
#[inline]
pub(crate) fn variant_stored(index: usize, previous: Option<usize>, type_name: &'static str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(target: "vessel", index, previous, type_name, "variant alternative stored");
    #[cfg(not(feature = "tracing"))]
    let _ = (index, previous, type_name);
}
