// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field descriptors and static entity schemas.
//!
//! Every type usable with the converter exposes a static [`EntitySchema`]:
//! the list of its declared fields, each with an optional
//! [`FieldDescriptor`]. Fields without a descriptor are not persisted.
//!
//! ```text
//! EntitySchema
//! ├── name: "Order"
//! ├── entity: true               (entity-level marker)
//! ├── collection: Some("orders")
//! └── fields
//!     ├── FieldDecl { name: "id",       descriptor: identifier        }
//!     ├── FieldDecl { name: "customer", descriptor: embedOne<Customer> }
//!     └── FieldDecl { name: "cache",    descriptor: None              }
//! ```
//!
//! Schemas are plain `static` data, normally emitted by `#[derive(Model)]`
//! but writable by hand:
//!
//! ```rust,ignore
//! static SCHEMA: EntitySchema = EntitySchema::entity("Tag", &[
//!     FieldDecl::mapped("id", FieldDescriptor::identifier()),
//!     FieldDecl::mapped("label", FieldDescriptor::new(FieldKind::String)),
//! ]);
//! ```

use std::{any::TypeId, fmt};

use crate::model::{EntityObject, Model};

/// Document field name used for identifiers.
pub const ID_FIELD: &str = "_id";

/// Semantic type of a persisted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// UTF-8 text.
    String,
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// List of raw values.
    Array,
    /// Local date/time, stored as a UTC timestamp.
    Date,
    /// Primary key.
    Identifier,
    /// Single embedded entity.
    EmbedOne,
    /// List of embedded entities.
    EmbedMany,
    /// Stored verbatim.
    Raw,
    /// Unrecognised type tag; stored verbatim.
    Other(&'static str)
}

impl FieldKind {
    /// Map a declared type tag to a kind.
    ///
    /// Unknown tags become [`FieldKind::Other`].
    ///
    /// ```rust
    /// use mongo_odm_core::FieldKind;
    ///
    /// assert_eq!(FieldKind::from_tag("int"), FieldKind::Int);
    /// assert_eq!(FieldKind::from_tag("money"), FieldKind::Other("money"));
    /// ```
    pub fn from_tag(tag: &'static str) -> Self {
        match tag {
            "string" => Self::String,
            "bool" | "boolean" => Self::Bool,
            "int" | "integer" => Self::Int,
            "float" | "double" => Self::Float,
            "array" => Self::Array,
            "date" => Self::Date,
            "id" | "identifier" => Self::Identifier,
            "embedOne" => Self::EmbedOne,
            "embedMany" => Self::EmbedMany,
            "raw" => Self::Raw,
            other => Self::Other(other)
        }
    }

    /// Canonical tag of this kind.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Array => "array",
            Self::Date => "date",
            Self::Identifier => "id",
            Self::EmbedOne => "embedOne",
            Self::EmbedMany => "embedMany",
            Self::Raw => "raw",
            Self::Other(tag) => tag
        }
    }

    /// Check for `embedOne` / `embedMany`.
    pub const fn is_embedded(&self) -> bool {
        matches!(self, Self::EmbedOne | Self::EmbedMany)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Reference to another model type, used as an embed target.
///
/// Holds function pointers only, so it can live in `static` schemas and
/// refer to types that embed each other.
#[derive(Clone, Copy)]
pub struct EntityRef {
    schema:      fn() -> &'static EntitySchema,
    type_id:     fn() -> TypeId,
    instantiate: fn() -> Box<dyn EntityObject>
}

fn instantiate<T: Model>() -> Box<dyn EntityObject> {
    Box::new(T::default())
}

impl EntityRef {
    /// Reference `T`.
    pub const fn of<T: Model>() -> Self {
        Self {
            schema:      T::schema,
            type_id:     TypeId::of::<T>,
            instantiate: instantiate::<T>
        }
    }

    /// Static schema of the target.
    pub fn schema(&self) -> &'static EntitySchema {
        (self.schema)()
    }

    /// Type identity of the target.
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Fresh zero-valued instance of the target.
    pub fn instantiate(&self) -> Box<dyn EntityObject> {
        (self.instantiate)()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for EntityRef {}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityRef").field(&self.schema().name).finish()
    }
}

/// Persistence metadata for one field.
///
/// Immutable; built with `const` constructors so it can sit in a static
/// schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Semantic type.
    pub kind:          FieldKind,
    /// Primary key flag.
    pub identifier:    bool,
    /// Target type for `embedOne` / `embedMany`.
    pub embed_target:  Option<EntityRef>,
    /// Document key override. Ignored for identifiers, which always map to
    /// `_id`.
    pub document_name: Option<&'static str>,
    /// Raw `key = value` options, carried verbatim.
    pub options:       &'static [(&'static str, &'static str)]
}

impl FieldDescriptor {
    /// Descriptor of the given kind with no options.
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            identifier: false,
            embed_target: None,
            document_name: None,
            options: &[]
        }
    }

    /// Primary key descriptor.
    pub const fn identifier() -> Self {
        Self {
            identifier: true,
            ..Self::new(FieldKind::Identifier)
        }
    }

    /// Single embedded `target`.
    pub const fn embed_one(target: EntityRef) -> Self {
        Self {
            embed_target: Some(target),
            ..Self::new(FieldKind::EmbedOne)
        }
    }

    /// List of embedded `target`.
    pub const fn embed_many(target: EntityRef) -> Self {
        Self {
            embed_target: Some(target),
            ..Self::new(FieldKind::EmbedMany)
        }
    }

    /// Override the document key.
    #[must_use]
    pub const fn named(self, name: &'static str) -> Self {
        Self {
            document_name: Some(name),
            ..self
        }
    }

    /// Attach raw options.
    #[must_use]
    pub const fn with_options(self, options: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            options,
            ..self
        }
    }

    /// Document key for a field called `field_name`.
    ///
    /// `_id` for identifiers, else the override, else the field name.
    pub fn document_name<'a>(&self, field_name: &'a str) -> &'a str {
        if self.identifier {
            return ID_FIELD;
        }
        self.document_name.unwrap_or(field_name)
    }

    /// Look up a raw option.
    pub fn option(&self, key: &str) -> Option<&'static str> {
        self.options
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// One declared field of a model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    /// Rust field name.
    pub name:       &'static str,
    /// Persistence metadata; `None` means "not persisted".
    pub descriptor: Option<FieldDescriptor>
}

impl FieldDecl {
    /// Persisted field.
    pub const fn mapped(name: &'static str, descriptor: FieldDescriptor) -> Self {
        Self {
            name,
            descriptor: Some(descriptor)
        }
    }

    /// Declared field without persistence metadata.
    pub const fn unmapped(name: &'static str) -> Self {
        Self {
            name,
            descriptor: None
        }
    }
}

/// Static description of a model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    /// Type name.
    pub name:       &'static str,
    /// Entity-level marker. Types without it convert by passthrough.
    pub entity:     bool,
    /// Default collection.
    pub collection: Option<&'static str>,
    /// Default database.
    pub database:   Option<&'static str>,
    /// Declared instance fields in declaration order.
    pub fields:     &'static [FieldDecl]
}

impl EntitySchema {
    /// Schema of a mapped entity.
    pub const fn entity(name: &'static str, fields: &'static [FieldDecl]) -> Self {
        Self {
            name,
            entity: true,
            collection: None,
            database: None,
            fields
        }
    }

    /// Schema of a type without the entity marker.
    pub const fn unmapped(name: &'static str, fields: &'static [FieldDecl]) -> Self {
        Self {
            name,
            entity: false,
            collection: None,
            database: None,
            fields
        }
    }

    /// Set the default collection.
    #[must_use]
    pub const fn in_collection(self, collection: &'static str) -> Self {
        Self {
            collection: Some(collection),
            ..self
        }
    }

    /// Set the default database.
    #[must_use]
    pub const fn in_database(self, database: &'static str) -> Self {
        Self {
            database: Some(database),
            ..self
        }
    }
}
