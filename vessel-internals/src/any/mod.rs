//! Module containing the type-erased single-value holder

mod data;
mod raw;
mod vtable;

pub use self::raw::{RawAny, RawAnyMut, RawAnyRef};
