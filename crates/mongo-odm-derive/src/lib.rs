// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Attribute Quick Reference
//!
//! ## Struct-Level `#[entity(...)]`
//!
//! ```rust,ignore
//! #[derive(Model, Default)]
//! #[entity(
//!     collection = "orders",   // Optional: default collection for repositories
//!     database = "shop",       // Optional: default database
//!     rename_all = "camelCase" // Optional: document key case
//! )]
//! pub struct Order { /* ... */ }
//! ```
//!
//! The attribute itself is the entity marker. Without it the struct still
//! implements `Model`, but converts by passthrough.
//!
//! ## Field-Level Attributes
//!
//! ```rust,ignore
//! pub struct Order {
//!     #[id]                                  // Identifier, stored under `_id`
//!     pub id: Option<ObjectId>,
//!
//!     #[field]                               // Kind inferred: int
//!     pub total: i64,
//!
//!     #[field(type = "string", name = "ref")] // Explicit kind and key
//!     pub reference: String,
//!
//!     #[embed_one]                           // Single embedded entity
//!     pub customer: Option<Customer>,
//!
//!     #[embed_many]                          // Ordered embedded entities
//!     pub lines: Vec<Line>,
//!
//!     pub scratch: String                    // Not persisted
//! }
//! ```
//!
//! # Generated Code
//!
//! | Item | Purpose |
//! |------|---------|
//! | `impl Model` | Static `EntitySchema` built once per type |
//! | `impl EntityObject` | Name-keyed field accessors used by the converter |

mod model;

use proc_macro::TokenStream;

/// Derive macro for object-document mapping.
///
/// Generates `mongo_odm::Model` and `mongo_odm::EntityObject`
/// implementations. The struct must also implement `Default`.
///
/// # Struct Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `collection = "..."` | Default collection |
/// | `database = "..."` | Default database |
/// | `embedded` | Embed-only entity; cannot declare a collection |
/// | `rename_all = "..."` | `camelCase`, `snake_case`, `PascalCase`, `kebab-case`, `SCREAMING_SNAKE_CASE` |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[id]` | Identifier field (`ObjectId` or `Option<ObjectId>`) |
/// | `#[field(type = "...", name = "...", options(...))]` | Scalar field |
/// | `#[embed_one(target = Type, name = "...")]` | `T` or `Option<T>` of another model |
/// | `#[embed_many(target = Type, name = "...")]` | `Vec<T>` of another model |
///
/// Prefer `Option<ObjectId>` for `#[id]`: `None` is written as a freshly
/// generated id. `ObjectId::default()` is itself a fresh id, so a bare
/// `ObjectId` field already holds one after `T::default()`.
#[proc_macro_derive(Model, attributes(entity, id, field, embed_one, embed_many))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive(input)
}
