//! Module containing the closed-set tagged container

mod alternatives;
mod dispatch;
mod entry;
mod raw;

pub use self::{
    alternatives::{Alternatives, At, Includes},
    dispatch::{Cloner, Comparer, Debugger},
    entry::AlternativeEntry,
    raw::RawVariant,
};
