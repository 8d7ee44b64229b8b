// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! model.rs (orchestrator)
//! │
//! ├── parse/        → Attribute parsing (ModelDef, FieldDef, ScalarKind)
//! │
//! ├── schema.rs     → impl Model with a static EntitySchema
//! └── accessors.rs  → impl EntityObject (field / set_field / conventional_id)
//! ```
//!
//! # Generated Code
//!
//! For a model like:
//!
//! ```rust,ignore
//! #[derive(Model, Default)]
//! #[entity(collection = "people")]
//! pub struct Person {
//!     #[id]
//!     pub id: Option<ObjectId>,
//!     #[field]
//!     pub age: i64,
//! }
//! ```
//!
//! The macro generates:
//!
//! ```rust,ignore
//! impl ::mongo_odm::Model for Person {
//!     fn schema() -> &'static ::mongo_odm::EntitySchema {
//!         static SCHEMA: ::mongo_odm::EntitySchema = ::mongo_odm::EntitySchema::entity(
//!             "Person",
//!             &[
//!                 ::mongo_odm::FieldDecl::mapped("id", ::mongo_odm::FieldDescriptor::identifier()),
//!                 ::mongo_odm::FieldDecl::mapped(
//!                     "age",
//!                     ::mongo_odm::FieldDescriptor::new(::mongo_odm::FieldKind::Int)
//!                 ),
//!             ]
//!         )
//!         .in_collection("people");
//!         &SCHEMA
//!     }
//! }
//!
//! impl ::mongo_odm::EntityObject for Person { /* field, set_field */ }
//! ```

mod accessors;
pub mod parse;
mod schema;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::ModelDef;

/// Main entry point for the Model derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ModelDef::from_derive_input(&input) {
        Ok(model) => generate(&model).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(model: &ModelDef) -> proc_macro2::TokenStream {
    let schema = schema::generate(model);
    let accessors = accessors::generate(model);

    quote! {
        #schema
        #accessors
    }
}
