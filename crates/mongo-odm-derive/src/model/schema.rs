// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Model` generation.
//!
//! The schema is a function-local `static`, so it is built at compile time
//! and shared by every call. Kinds are emitted as concrete
//! `FieldKind` variants because the tag parser is not `const`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldDef, Mapping, ModelDef};

/// Generate the `Model` implementation.
pub fn generate(model: &ModelDef) -> TokenStream {
    let ident = &model.ident;
    let name = model.name();
    let decls = model.fields.iter().map(|field| field_decl(model, field));

    let constructor = if model.entity {
        quote! { entity }
    } else {
        quote! { unmapped }
    };
    let collection = model
        .collection
        .as_ref()
        .map(|c| quote! { .in_collection(#c) });
    let database = model.database.as_ref().map(|d| quote! { .in_database(#d) });

    quote! {
        impl ::mongo_odm::Model for #ident {
            fn schema() -> &'static ::mongo_odm::EntitySchema {
                static SCHEMA: ::mongo_odm::EntitySchema =
                    ::mongo_odm::EntitySchema::#constructor(#name, &[#(#decls),*])
                        #collection
                        #database;
                &SCHEMA
            }
        }
    }
}

fn field_decl(model: &ModelDef, field: &FieldDef) -> TokenStream {
    let name = field.name();
    let Some(mapping) = &field.mapping else {
        return quote! { ::mongo_odm::FieldDecl::unmapped(#name) };
    };

    let descriptor = match mapping {
        Mapping::Id => quote! { ::mongo_odm::FieldDescriptor::identifier() },
        Mapping::Scalar(kind) => {
            let kind = kind.tokens();
            quote! { ::mongo_odm::FieldDescriptor::new(#kind) }
        }
        Mapping::EmbedOne {
            target, ..
        } => quote! {
            ::mongo_odm::FieldDescriptor::embed_one(::mongo_odm::EntityRef::of::<#target>())
        },
        Mapping::EmbedMany {
            target
        } => quote! {
            ::mongo_odm::FieldDescriptor::embed_many(::mongo_odm::EntityRef::of::<#target>())
        }
    };
    let named = model
        .document_name(field)
        .map(|key| quote! { .named(#key) });
    let options = (!field.options.is_empty()).then(|| {
        let pairs = field.options.iter().map(|(k, v)| quote! { (#k, #v) });
        quote! { .with_options(&[#(#pairs),*]) }
    });

    quote! {
        ::mongo_odm::FieldDecl::mapped(#name, #descriptor #named #options)
    }
}
