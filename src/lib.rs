#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Extra checks on nightly
#![cfg_attr(nightly_extra_checks, feature(rustdoc_missing_doc_code_examples))]
#![cfg_attr(nightly_extra_checks, forbid(rustdoc::missing_doc_code_examples))]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Two generic value containers: a holder for a value of any type, and a
//! tagged container for a value out of a fixed list of types.
//!
//! ## Overview
//!
//! - [`AnyValue`] stores at most one value of any `'static + Clone` type. The
//!   type is forgotten when the value is stored, and the value can only be
//!   recovered by naming its exact type. Every holder can report a comparable
//!   [`TypeIdentity`] for the type it stores.
//! - [`Variant<L>`] stores exactly one value of one of the alternatives in the
//!   tuple `L`. The value lives inline and is reached either by naming its
//!   type, or by *visiting* it with a [`Visitor`] that handles every
//!   alternative.
//!
//! Requesting the wrong type is reported through [`BadAnyAccess`] and
//! [`BadVariantAccess`]. Neither failure changes the container.
//!
//! ## Quick Example
//!
//! ```
//! use vessel::prelude::*;
//!
//! let mut any = AnyValue::new(42i32);
//! assert_eq!(any.get::<i32>(), Ok(42));
//! any.set(String::from("text"));
//! assert!(any.get::<i32>().is_err());
//!
//! let mut variant: Variant<(i32, String)> = Variant::default();
//! variant.set(String::from("hi"));
//! assert_eq!(variant.index(), 1);
//! assert_eq!(variant.get::<String, _>().unwrap(), "hi");
//! ```
//!
//! ## Visiting
//!
//! A visitor implements [`Visitor`] once, fixing the [`Output`] of every
//! visit, and [`Visit<T>`] (or [`VisitMut<T>`]) for each alternative `T`:
//!
//! ```
//! use vessel::prelude::*;
//!
//! struct Size;
//!
//! impl Visitor for Size {
//!     type Output = usize;
//! }
//!
//! impl Visit<u64> for Size {
//!     fn visit(&mut self, _value: &u64) -> usize {
//!         8
//!     }
//! }
//!
//! impl Visit<String> for Size {
//!     fn visit(&mut self, value: &String) -> usize {
//!         value.len()
//!     }
//! }
//!
//! let value: Variant<(u64, String)> = Variant::new(String::from("abc"));
//! assert_eq!(value.visit(Size), 3);
//! ```
//!
//! For every visitor and alternative list, the container keeps one table of
//! functions, one per alternative. A visit is a single lookup in that table
//! using the index of the live alternative.
//!
//! ## Features
//!
//! - `tracing`: emits [`tracing`] events at the `TRACE` level when a typed
//!   access fails and when a value is stored.
//! - `std`: enables the `std` feature of [`tracing`] when both are on. The
//!   crate itself is `no_std` with `alloc` either way.
//!
//! For implementation details, see the [`vessel-internals`] crate.
//!
//! [`vessel-internals`]: vessel_internals
//! [`Output`]: Visitor::Output
//! [`tracing`]: https://docs.rs/tracing

extern crate alloc;

mod any_value;
mod error;
pub mod prelude;
mod trace;
mod type_identity;
mod variant;

pub use vessel_internals::{
    variant::{Alternatives, At, Includes},
    visit::{Visit, VisitAll, VisitAllMut, VisitMut, Visitor},
};

pub use self::{
    any_value::AnyValue,
    error::{BadAnyAccess, BadVariantAccess},
    type_identity::TypeIdentity,
    variant::Variant,
};
