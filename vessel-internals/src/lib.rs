#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`vessel`].
//!
//! # Overview
//!
//! This crate contains the low-level storage and unsafe dispatch machinery
//! behind the two containers of the [`vessel`] crate: the type-erased value
//! holder and the closed-set tagged container.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`vessel`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`tag`]**: [`TypeTag`], a `'static` identity record for a concrete type.
//! - **[`any`]**: Type-erased single-value storage
//!   - [`RawAny`]: Owned value behind a [`Box`]-allocated `#[repr(C)]` header
//!   - [`RawAnyRef`]/[`RawAnyMut`]: Borrowed references (shared/mutable)
//!   - `AnyVtable`: Identity, drop and clone function pointers
//! - **[`slot`]**: [`AlignedSlot`] and the [`Overlay`] union used to compute
//!   the size and alignment of the largest of a set of types.
//! - **[`variant`]**: The closed-set tagged container
//!   - [`Alternatives`]: Implemented for tuples of up to 12 types
//!   - [`Includes`]: Compile-time mapping from an alternative to its index
//!   - [`RawVariant`]: One [`AlignedSlot`] plus the active index
//! - **[`visit`]**: The visitor traits that the dispatch tables call into.
//!
//! # Safety Strategy
//!
//! Both containers forget the concrete type of the value they store and later
//! recover it from a piece of metadata: the vtable pointer stored in front of a
//! boxed value, or the active index into a per-list table of thunks. All
//! soundness arguments reduce to keeping that metadata in sync with the bytes.
//!
//! This crate does so through:
//!
//! - **Module-based encapsulation**: The fields holding pointers, vtables and
//!   indices are private to the module that writes them, so every place that
//!   can break the pairing is in one file
//! - **Tables built from types, not values**: Vtables and dispatch tables are
//!   produced by generic code instantiated with the exact stored type, and the
//!   index of an alternative is a constant of the [`Includes`] impl
//! - **Documented unsafe contracts**: Each unsafe function specifies exactly
//!   when it can be called
//!
//! [`vessel`]: https://docs.rs/vessel/latest/vessel/
//! [`TypeTag`]: tag::TypeTag
//! [`AlignedSlot`]: slot::AlignedSlot
//! [`Overlay`]: slot::Overlay
//! [`Alternatives`]: variant::Alternatives
//! [`Includes`]: variant::Includes
//! [`Box`]: alloc::boxed::Box

extern crate alloc;

mod any;
pub mod slot;
pub mod tag;
mod util;
pub mod variant;
pub mod visit;

pub use any::{RawAny, RawAnyMut, RawAnyRef};
pub use variant::RawVariant;
