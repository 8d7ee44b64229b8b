// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Document ↔ entity conversion.
//!
//! The [`Converter`] walks an entity's resolved field plan and coerces each
//! value, recursing through the embedded kinds.
//!
//! ```text
//! Document ──document_to_entity──▶ resolve T ──▶ per field: to_field ──▶ set_field
//!                                      │                 │
//!                                      │                 └─ embedOne/embedMany
//!                                      │                    recurse (depth + 1)
//!                                      └─ not an entity: Hydrated::Unmapped
//!
//! Entity ───entity_to_document───▶ resolve T ──▶ per field: field ──▶ to_document
//!                                      └─ not an entity: Dehydrated::Unmapped
//! ```
//!
//! Only the root type may lack the entity marker. An embed target without
//! it, or any coercion failure, fails the whole call.

use std::{any::Any, sync::Arc};

use tracing::{debug, trace};

use crate::{
    coerce::{self, Embedder},
    config::ConverterConfig,
    descriptor::EntityRef,
    document::Document,
    error::{CoerceError, ConvertError, FieldError, MetadataError},
    metadata::{EntityMetadata, MetadataResolver},
    model::{EntityObject, FieldRef, FieldValue, Model},
    object_id::ObjectId,
    value::Value
};

/// Result of [`Converter::document_to_entity`].
#[derive(Debug, Clone, PartialEq)]
pub enum Hydrated<T> {
    /// The document was mapped onto a fresh `T`.
    Entity(T),
    /// `T` is not an entity; the document is returned as is.
    Unmapped(Document)
}

impl<T> Hydrated<T> {
    /// Take the entity, if one was built.
    pub fn entity(self) -> Option<T> {
        match self {
            Self::Entity(entity) => Some(entity),
            Self::Unmapped(_) => None
        }
    }

    /// Take the untouched document, if the type was not an entity.
    pub fn into_document(self) -> Option<Document> {
        match self {
            Self::Entity(_) => None,
            Self::Unmapped(document) => Some(document)
        }
    }

    /// Check whether an entity was built.
    pub const fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }
}

/// Result of [`Converter::entity_to_document`].
#[derive(Debug, Clone, PartialEq)]
pub enum Dehydrated<'a, T> {
    /// The entity's persisted fields.
    Document(Document),
    /// `T` is not an entity; the value is returned as is.
    Unmapped(&'a T)
}

impl<'a, T> Dehydrated<'a, T> {
    /// Take the produced document.
    pub fn document(self) -> Option<Document> {
        match self {
            Self::Document(document) => Some(document),
            Self::Unmapped(_) => None
        }
    }

    /// Take the untouched value.
    pub const fn unmapped(&self) -> Option<&'a T> {
        match self {
            Self::Document(_) => None,
            Self::Unmapped(value) => Some(*value)
        }
    }
}

/// Metadata-driven converter.
///
/// Cheap to clone and safe to share between threads.
///
/// # Example
///
/// ```rust,ignore
/// let converter = Converter::new();
/// let person: Person = converter
///     .document_to_entity::<Person>(document! { "name" => "Ann", "age" => "34" })?
///     .entity()
///     .unwrap();
/// assert_eq!(person.age, 34);
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    resolver: Arc<MetadataResolver>,
    config:   ConverterConfig
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Converter on the process-wide resolver with default settings.
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// Converter on the process-wide resolver.
    pub fn with_config(config: ConverterConfig) -> Self {
        Self::with_resolver(MetadataResolver::global(), config)
    }

    /// Converter on its own resolver.
    pub fn with_resolver(resolver: Arc<MetadataResolver>, config: ConverterConfig) -> Self {
        Self {
            resolver,
            config
        }
    }

    /// Metadata resolver in use.
    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    /// Settings in use.
    pub const fn config(&self) -> ConverterConfig {
        self.config
    }

    /// Map a document onto a fresh `T`.
    ///
    /// Keys without a matching persisted field are ignored; persisted fields
    /// missing from the document keep their zero value.
    ///
    /// # Errors
    ///
    /// [`ConvertError`] when `T` or an embed target is misconfigured, or a
    /// value cannot be coerced.
    pub fn document_to_entity<T: Model>(
        &self,
        document: Document
    ) -> Result<Hydrated<T>, ConvertError> {
        let Some(metadata) = self.root_metadata(T::schema().name, self.resolver.resolve::<T>())?
        else {
            return Ok(Hydrated::Unmapped(document));
        };
        debug!(
            entity = metadata.name(),
            keys = document.len(),
            "document to entity"
        );
        let mut entity = T::default();
        self.walk().fill(&mut entity, &metadata, document)?;
        Ok(Hydrated::Entity(entity))
    }

    /// Lazily map a sequence of documents.
    ///
    /// Each document is converted only when the iterator reaches it.
    pub fn document_iter<T, I>(
        &self,
        documents: I
    ) -> impl Iterator<Item = Result<Hydrated<T>, ConvertError>>
    where
        T: Model,
        I: IntoIterator<Item = Document>
    {
        documents
            .into_iter()
            .map(move |document| self.document_to_entity::<T>(document))
    }

    /// Build the document holding `entity`'s persisted fields.
    ///
    /// A null identifier is written as a freshly generated one.
    ///
    /// # Errors
    ///
    /// [`ConvertError`] when `T` or an embed target is misconfigured, or a
    /// value cannot be coerced.
    pub fn entity_to_document<'a, T: Model>(
        &self,
        entity: &'a T
    ) -> Result<Dehydrated<'a, T>, ConvertError> {
        let Some(metadata) = self.root_metadata(T::schema().name, self.resolver.resolve::<T>())?
        else {
            return Ok(Dehydrated::Unmapped(entity));
        };
        debug!(
            entity = metadata.name(),
            fields = metadata.fields().len(),
            "entity to document"
        );
        self.walk().build(entity, &metadata).map(Dehydrated::Document)
    }

    /// Read the identifier of `entity`.
    ///
    /// Entities answer from their identifier field (none if they declare
    /// none); other types answer from their conventional `_id` field.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Metadata`] when the type is misconfigured.
    pub fn get_id(&self, entity: &dyn EntityObject) -> Result<Option<ObjectId>, ConvertError> {
        let Some(metadata) = self.root_metadata(
            entity.model_schema().name,
            self.resolver.resolve_object(entity)
        )?
        else {
            return Ok(entity.conventional_id());
        };
        let id = metadata
            .identifier()
            .and_then(|field| entity.field(field.name))
            .and_then(|value| match value {
                FieldRef::Id(id) => Some(id),
                FieldRef::Raw(Value::ObjectId(id)) => Some(*id),
                _ => None
            });
        Ok(id)
    }

    /// Write `id` into `entity`'s identifier field.
    ///
    /// Returns `false` for types that are not entities or have no
    /// identifier field.
    ///
    /// # Errors
    ///
    /// [`ConvertError`] when the type is misconfigured or its identifier
    /// field rejects the value.
    pub fn set_id(&self, entity: &mut dyn EntityObject, id: ObjectId) -> Result<bool, ConvertError> {
        let Some(metadata) = self.root_metadata(
            entity.model_schema().name,
            self.resolver.resolve_object(entity)
        )?
        else {
            return Ok(false);
        };
        let Some(field) = metadata.identifier() else {
            return Ok(false);
        };
        entity
            .set_field(field.name, FieldValue::Id(id))
            .map_err(|source| ConvertError::Field {
                entity: metadata.name(),
                field: field.name,
                source
            })?;
        Ok(true)
    }

    fn root_metadata(
        &self,
        name: &'static str,
        resolved: Result<Arc<EntityMetadata>, MetadataError>
    ) -> Result<Option<Arc<EntityMetadata>>, ConvertError> {
        match resolved {
            Ok(metadata) => Ok(Some(metadata)),
            Err(err) if err.is_not_entity() => {
                debug!(entity = name, "not an entity, passing through");
                Ok(None)
            }
            Err(err) => Err(err.into())
        }
    }

    fn walk(&self) -> Walk<'_> {
        Walk {
            converter: self,
            depth:     0
        }
    }
}

/// One level of a conversion; tracks embedding depth.
struct Walk<'c> {
    converter: &'c Converter,
    depth:     usize
}

impl Walk<'_> {
    fn descend(&self, entity: &'static str) -> Result<Self, ConvertError> {
        let depth = self.depth + 1;
        let max = self.converter.config.max_embed_depth;
        if depth > max {
            return Err(ConvertError::CyclicEmbedding {
                entity,
                depth,
                max
            });
        }
        Ok(Walk {
            converter: self.converter,
            depth
        })
    }

    fn fill(
        &self,
        entity: &mut dyn EntityObject,
        metadata: &EntityMetadata,
        mut document: Document
    ) -> Result<(), ConvertError> {
        for field in metadata.fields() {
            trace!(
                entity = metadata.name(),
                field = field.name,
                kind = %field.kind(),
                "hydrating field"
            );
            let value = document.remove(field.document_name).unwrap_or_default();
            let value = coerce::to_field(value, &field.descriptor, self)
                .map_err(|err| attribute(metadata.name(), field.name, err))?;
            entity
                .set_field(field.name, value)
                .map_err(|source| ConvertError::Field {
                    entity: metadata.name(),
                    field: field.name,
                    source
                })?;
        }
        Ok(())
    }

    fn build(
        &self,
        entity: &dyn EntityObject,
        metadata: &EntityMetadata
    ) -> Result<Document, ConvertError> {
        let mut document = Document::with_capacity(metadata.fields().len());
        for field in metadata.fields() {
            trace!(
                entity = metadata.name(),
                field = field.name,
                kind = %field.kind(),
                "dehydrating field"
            );
            let current = entity.field(field.name).ok_or_else(|| ConvertError::Field {
                entity: metadata.name(),
                field:  field.name,
                source: FieldError::UnknownField(field.name.to_string())
            })?;
            let value = coerce::to_document(current, &field.descriptor, self)
                .map_err(|err| attribute(metadata.name(), field.name, err))?;
            document.insert(field.document_name, value);
        }
        Ok(document)
    }
}

/// Attach entity and field names to a coercion failure. Failures from
/// nested entities already carry their own names.
fn attribute(entity: &'static str, field: &'static str, err: CoerceError) -> ConvertError {
    match err {
        CoerceError::Embedded(inner) => *inner,
        source => ConvertError::InvalidFieldValue {
            entity,
            field,
            source
        }
    }
}

impl Embedder for Walk<'_> {
    fn hydrate(
        &self,
        target: EntityRef,
        document: Document
    ) -> Result<Box<dyn EntityObject>, ConvertError> {
        let walk = self.descend(target.schema().name)?;
        let metadata = self.converter.resolver.resolve_ref(target)?;
        let mut entity = target.instantiate();
        walk.fill(entity.as_mut(), &metadata, document)?;
        Ok(entity)
    }

    fn dehydrate(&self, entity: &dyn EntityObject) -> Result<Document, ConvertError> {
        let walk = self.descend(entity.model_schema().name)?;
        let metadata = self.converter.resolver.resolve_object(entity)?;
        walk.build(entity, &metadata)
    }
}

/// Check whether a boxed model holds a `T`.
pub fn is_instance<T: Model>(entity: &dyn EntityObject) -> bool {
    let any: &dyn Any = entity;
    any.is::<T>()
}
