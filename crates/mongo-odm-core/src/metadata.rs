// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Metadata resolution.
//!
//! [`MetadataResolver`] turns a model's static [`EntitySchema`] into an
//! [`EntityMetadata`]: the ordered list of persisted fields with their
//! document keys, plus the identifier field. Resolution validates the schema
//! and every embed target reachable from it, then caches the result per type
//! for the life of the resolver.
//!
//! # Validation
//!
//! | Check | Error |
//! |-------|-------|
//! | entity-level marker present | [`MetadataError::NotAnEntityType`] |
//! | at most one identifier | [`MetadataError::AmbiguousIdentifier`] |
//! | identifier has kind `id` | [`MetadataError::InvalidIdentifier`] |
//! | embed kinds name a target | [`MetadataError::MissingEmbedTarget`] |
//! | document keys unique | [`MetadataError::DuplicateDocumentField`] |
//! | embed graph acyclic | [`MetadataError::CyclicEmbedding`] |
//! | embed targets resolve | [`MetadataError::Embedded`] |
//!
//! # Concurrency
//!
//! The cache is a [`DashMap`]. Two threads resolving the same type at once
//! both compute the (identical) metadata and the first insert wins. No map
//! guard is held while embed targets are resolved.

use std::{
    any::{Any, TypeId},
    sync::{Arc, OnceLock}
};

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::{
    descriptor::{EntityRef, EntitySchema, FieldDescriptor, FieldKind},
    error::MetadataError,
    model::{EntityObject, Model}
};

/// One persisted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Rust field name.
    pub name:          &'static str,
    /// Document key.
    pub document_name: &'static str,
    /// Declared descriptor.
    pub descriptor:    FieldDescriptor
}

impl FieldMetadata {
    /// Semantic type.
    pub const fn kind(&self) -> FieldKind {
        self.descriptor.kind
    }

    /// Check for the identifier field.
    pub const fn is_identifier(&self) -> bool {
        self.descriptor.identifier
    }
}

/// Resolved metadata of one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMetadata {
    name:       &'static str,
    collection: Option<&'static str>,
    database:   Option<&'static str>,
    fields:     Vec<FieldMetadata>,
    identifier: Option<usize>
}

impl EntityMetadata {
    /// Type name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared default collection.
    pub const fn collection(&self) -> Option<&'static str> {
        self.collection
    }

    /// Declared default database.
    pub const fn database(&self) -> Option<&'static str> {
        self.database
    }

    /// Persisted fields in declaration order.
    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }

    /// The identifier field, if the type declares one.
    pub fn identifier(&self) -> Option<&FieldMetadata> {
        self.identifier.map(|index| &self.fields[index])
    }

    /// Look up a persisted field by Rust name.
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a persisted field by document key.
    pub fn field_by_document_name(&self, document_name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.document_name == document_name)
    }

    /// Build and validate metadata from a schema, without looking at embed
    /// targets.
    ///
    /// # Errors
    ///
    /// Any local [`MetadataError`]; see the module table.
    pub fn from_schema(schema: &'static EntitySchema) -> Result<Self, MetadataError> {
        if !schema.entity {
            return Err(MetadataError::NotAnEntityType {
                entity: schema.name
            });
        }

        // Every identifier maps to `_id`; count them before key clashes are checked.
        let identifiers: Vec<&'static str> = schema
            .fields
            .iter()
            .filter(|decl| decl.descriptor.as_ref().is_some_and(|d| d.identifier))
            .map(|decl| decl.name)
            .collect();
        if identifiers.len() > 1 {
            return Err(MetadataError::AmbiguousIdentifier {
                entity: schema.name,
                fields: identifiers
            });
        }

        let mut fields: Vec<FieldMetadata> = Vec::with_capacity(schema.fields.len());
        for decl in schema.fields {
            let Some(descriptor) = decl.descriptor else {
                continue;
            };
            if descriptor.identifier && descriptor.kind != FieldKind::Identifier {
                return Err(MetadataError::InvalidIdentifier {
                    entity: schema.name,
                    field:  decl.name,
                    kind:   descriptor.kind
                });
            }
            if descriptor.kind.is_embedded() && descriptor.embed_target.is_none() {
                return Err(MetadataError::MissingEmbedTarget {
                    entity: schema.name,
                    field:  decl.name
                });
            }
            let document_name = descriptor.document_name(decl.name);
            if fields.iter().any(|f| f.document_name == document_name) {
                return Err(MetadataError::DuplicateDocumentField {
                    entity: schema.name,
                    name:   document_name.to_string()
                });
            }
            fields.push(FieldMetadata {
                name: decl.name,
                document_name,
                descriptor
            });
        }

        Ok(Self {
            name: schema.name,
            collection: schema.collection,
            database: schema.database,
            identifier: fields.iter().position(FieldMetadata::is_identifier),
            fields
        })
    }
}

/// Resolves and caches [`EntityMetadata`] per type.
#[derive(Debug, Default)]
pub struct MetadataResolver {
    cache: DashMap<TypeId, Arc<EntityMetadata>>
}

impl MetadataResolver {
    /// Resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide resolver.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<MetadataResolver>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Resolve metadata of `T`.
    ///
    /// # Errors
    ///
    /// [`MetadataError`] when `T` or any embed target reachable from it is
    /// misconfigured. `NotAnEntityType` for `T` itself signals passthrough.
    pub fn resolve<T: Model>(&self) -> Result<Arc<EntityMetadata>, MetadataError> {
        self.resolve_ref(EntityRef::of::<T>())
    }

    /// Resolve metadata of a referenced type.
    ///
    /// # Errors
    ///
    /// See [`MetadataResolver::resolve`].
    pub fn resolve_ref(&self, target: EntityRef) -> Result<Arc<EntityMetadata>, MetadataError> {
        self.resolve_root(target.type_id(), target.schema())
    }

    /// Resolve metadata of the concrete type behind a model object.
    ///
    /// # Errors
    ///
    /// See [`MetadataResolver::resolve`].
    pub fn resolve_object(
        &self,
        entity: &dyn EntityObject
    ) -> Result<Arc<EntityMetadata>, MetadataError> {
        let any: &dyn Any = entity;
        self.resolve_root(any.type_id(), entity.model_schema())
    }

    /// Check whether `T` carries the entity marker.
    pub fn is_entity<T: Model>(&self) -> bool {
        T::schema().entity
    }

    /// Number of cached types.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.cache.clear();
    }

    fn resolve_root(
        &self,
        type_id: TypeId,
        schema: &'static EntitySchema
    ) -> Result<Arc<EntityMetadata>, MetadataError> {
        let mut stack = Vec::new();
        let result = self.resolve_in(type_id, schema, &mut stack);
        if let Err(err) = &result {
            if err.is_not_entity() {
                debug!(entity = schema.name, "type has no entity marker");
            } else {
                warn!(entity = schema.name, error = %err, "entity metadata is invalid");
            }
        }
        result
    }

    fn resolve_in(
        &self,
        type_id: TypeId,
        schema: &'static EntitySchema,
        stack: &mut Vec<(TypeId, &'static str)>
    ) -> Result<Arc<EntityMetadata>, MetadataError> {
        if let Some(hit) = self.cache.get(&type_id) {
            return Ok(Arc::clone(hit.value()));
        }

        if let Some(start) = stack.iter().position(|(id, _)| *id == type_id) {
            let mut path: Vec<&'static str> = stack[start..].iter().map(|(_, name)| *name).collect();
            path.push(schema.name);
            return Err(MetadataError::CyclicEmbedding {
                path
            });
        }

        let metadata = EntityMetadata::from_schema(schema)?;

        stack.push((type_id, schema.name));
        for field in metadata.fields.iter().filter(|f| f.kind().is_embedded()) {
            let Some(embedded) = field.descriptor.embed_target else {
                continue;
            };
            let resolved = self.resolve_in(embedded.type_id(), embedded.schema(), stack);
            resolved.map_err(|source| match source {
                cyclic @ MetadataError::CyclicEmbedding { .. } => cyclic,
                other => MetadataError::Embedded {
                    entity: schema.name,
                    field:  field.name,
                    source: Box::new(other)
                }
            })?;
        }
        stack.pop();

        debug!(
            entity = schema.name,
            fields = metadata.fields.len(),
            "resolved entity metadata"
        );
        let entry = self
            .cache
            .entry(type_id)
            .or_insert_with(|| Arc::new(metadata));
        Ok(Arc::clone(entry.value()))
    }
}
