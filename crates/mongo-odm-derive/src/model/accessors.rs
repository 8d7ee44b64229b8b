// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl EntityObject` generation.
//!
//! | Mapping | `field` | `set_field` |
//! |---------|---------|-------------|
//! | id, scalar | `FieldType::to_field_ref` | `FieldType::from_field_value` |
//! | `embed_one` on `T` | `FieldRef::One` | `into_one`, zero value on null |
//! | `embed_one` on `Option<T>` | `FieldRef::One` or `Null` | `into_one` |
//! | `embed_many` | `FieldRef::Many` | `into_many` |
//!
//! Unmapped fields are not reachable through the accessors.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldDef, Mapping, ModelDef, ScalarKind};

/// Generate the `EntityObject` implementation.
pub fn generate(model: &ModelDef) -> TokenStream {
    let ident = &model.ident;
    let mapped: Vec<_> = model.fields.iter().filter(|f| f.is_mapped()).collect();
    let reads = mapped.iter().map(|field| read_arm(field));
    let set_field = set_field(&mapped);
    let conventional_id = conventional_id(model);

    quote! {
        impl ::mongo_odm::EntityObject for #ident {
            fn model_schema(&self) -> &'static ::mongo_odm::EntitySchema {
                <Self as ::mongo_odm::Model>::schema()
            }

            fn field(&self, name: &str) -> ::core::option::Option<::mongo_odm::FieldRef<'_>> {
                match name {
                    #(#reads,)*
                    _ => ::core::option::Option::None
                }
            }

            #set_field

            #conventional_id
        }
    }
}

fn read_arm(field: &FieldDef) -> TokenStream {
    let name = field.name();
    let ident = &field.ident;
    let read = match &field.mapping {
        Some(Mapping::EmbedOne {
            optional: false, ..
        }) => quote! { ::mongo_odm::FieldRef::One(&self.#ident) },
        Some(Mapping::EmbedOne {
            optional: true, ..
        }) => quote! {
            match &self.#ident {
                ::core::option::Option::Some(inner) => ::mongo_odm::FieldRef::One(inner),
                ::core::option::Option::None => ::mongo_odm::FieldRef::Null
            }
        },
        Some(Mapping::EmbedMany {
            ..
        }) => quote! {
            ::mongo_odm::FieldRef::Many(
                self.#ident
                    .iter()
                    .map(|item| item as &dyn ::mongo_odm::EntityObject)
                    .collect()
            )
        },
        _ => quote! { ::mongo_odm::FieldType::to_field_ref(&self.#ident) }
    };
    quote! { #name => ::core::option::Option::Some(#read) }
}

fn set_field(mapped: &[&FieldDef]) -> TokenStream {
    if mapped.is_empty() {
        return quote! {
            fn set_field(
                &mut self,
                name: &str,
                _value: ::mongo_odm::FieldValue
            ) -> ::core::result::Result<(), ::mongo_odm::FieldError> {
                ::core::result::Result::Err(::mongo_odm::FieldError::UnknownField(name.to_string()))
            }
        };
    }

    let writes = mapped.iter().map(|field| {
        let name = field.name();
        let ident = &field.ident;
        let write = match &field.mapping {
            Some(Mapping::EmbedOne {
                target,
                optional: false
            }) => quote! { value.into_one::<#target>()?.unwrap_or_default() },
            Some(Mapping::EmbedOne {
                target,
                optional: true
            }) => quote! { value.into_one::<#target>()? },
            Some(Mapping::EmbedMany {
                target
            }) => quote! { value.into_many::<#target>()? },
            _ => quote! { ::mongo_odm::FieldType::from_field_value(value)? }
        };
        quote! { #name => self.#ident = #write }
    });

    quote! {
        fn set_field(
            &mut self,
            name: &str,
            value: ::mongo_odm::FieldValue
        ) -> ::core::result::Result<(), ::mongo_odm::FieldError> {
            match name {
                #(#writes,)*
                _ => {
                    return ::core::result::Result::Err(
                        ::mongo_odm::FieldError::UnknownField(name.to_string())
                    );
                }
            }
            ::core::result::Result::Ok(())
        }
    }
}

/// `conventional_id` for types without `#[id]` that hold an `_id` field of
/// identifier type.
fn conventional_id(model: &ModelDef) -> Option<TokenStream> {
    if model.id_field().is_some() {
        return None;
    }
    let field = model.fields.iter().find(|f| {
        f.name() == "_id" && ScalarKind::infer(&f.ty) == Some(ScalarKind::Identifier)
    })?;
    let ident = &field.ident;
    Some(quote! {
        fn conventional_id(&self) -> ::core::option::Option<::mongo_odm::ObjectId> {
            match ::mongo_odm::FieldType::to_field_ref(&self.#ident) {
                ::mongo_odm::FieldRef::Id(id) => ::core::option::Option::Some(id),
                _ => ::core::option::Option::None
            }
        }
    })
}
