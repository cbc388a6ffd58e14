//! Internal utility types.

/// Marker type used when type-erasing stored values.
///
/// This zero-sized type serves as a placeholder in generic type parameters
/// when the actual concrete type has been erased. For example,
/// `AnyData<Erased>` represents a boxed value whose concrete type is unknown
/// at the current scope, and `NonNull<Erased>` points at the live alternative
/// of a tagged container without saying which one it is.
#[derive(Clone, Copy)]
pub struct Erased;
