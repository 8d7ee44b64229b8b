// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core types and runtime for mongo-odm.
//!
//! This crate holds everything `#[derive(Model)]` output talks to. It can
//! also be used on its own with hand-written model implementations.
//!
//! # Overview
//!
//! | Layer | Items |
//! |-------|-------|
//! | Values | [`Value`], [`Document`], [`ObjectId`], [`document!`] |
//! | Descriptors | [`FieldDescriptor`], [`FieldKind`], [`EntitySchema`] |
//! | Models | [`Model`], [`EntityObject`], [`FieldType`] |
//! | Metadata | [`MetadataResolver`], [`EntityMetadata`] |
//! | Coercion | [`coerce`] |
//! | Conversion | [`Converter`], [`Hydrated`], [`Dehydrated`] |
//! | Persistence | [`DocumentStore`], [`MemoryStore`], [`Repository`], [`DocumentManager`] |
//! | Configuration | [`OdmConfig`], [`ConfigLoader`] |
//!
//! # Data flow
//!
//! ```text
//! EntitySchema ──MetadataResolver──▶ EntityMetadata (cached per type)
//!                                         │
//! Document ◀──────── Converter ───────────┤──▶ coerce::to_field / to_document
//!    │                                    │
//!    └──── DocumentStore ◀── Repository ──┘
//! ```
//!
//! # Usage
//!
//! Most users should depend on `mongo-odm`, which re-exports this crate
//! together with the derive macro.
//!
//! ```rust,ignore
//! use mongo_odm_core::prelude::*;
//!
//! let converter = Converter::new();
//! let hydrated = converter.document_to_entity::<Person>(document! { "age" => "34" })?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coerce;
pub mod config;
pub mod converter;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod metadata;
pub mod model;
pub mod object_id;
pub mod prelude;
pub mod repository;
pub mod store;
pub mod value;

#[cfg(test)]
mod fixtures;

/// Re-export async_trait for store implementations.
pub use async_trait::async_trait;

pub use crate::{
    config::{ConfigError, ConfigLoader, ConverterConfig, OdmConfig},
    converter::{Converter, Dehydrated, Hydrated},
    descriptor::{EntityRef, EntitySchema, FieldDecl, FieldDescriptor, FieldKind, ID_FIELD},
    document::Document,
    error::{CoerceError, ConvertError, FieldError, MetadataError},
    metadata::{EntityMetadata, FieldMetadata, MetadataResolver},
    model::{EntityObject, FieldRef, FieldType, FieldValue, Model},
    object_id::{ObjectId, ObjectIdError},
    repository::{Cursor, DocumentManager, Repository, RepositoryError},
    store::{
        DocumentStore, FindOptions, MemoryStore, Namespace, SortDirection, StoreError, WriteCounts
    },
    value::Value
};
