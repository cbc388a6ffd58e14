//! Commonly used items for convenient importing.
//!
//! # Usage
//!
//! ```rust
//! use vessel::prelude::*;
//!
//! let value: Variant<(bool, AnyValue)> = Variant::new(AnyValue::new(1u8));
//! assert_eq!(value.get::<AnyValue, _>().unwrap().get::<u8>(), Ok(1));
//! ```
//!
//! # What's Included
//!
//! - **[`AnyValue`]** and **[`Variant`]**: The two containers
//! - **[`BadAnyAccess`]** and **[`BadVariantAccess`]**: Their access errors
//! - **[`Visitor`]**, **[`Visit`]** and **[`VisitMut`]**: For writing visitors
//! - **[`At`]**: Position marker for lists with repeated alternatives

pub use crate::{
    AnyValue, At, BadAnyAccess, BadVariantAccess, Variant, Visit, VisitMut, Visitor,
};
