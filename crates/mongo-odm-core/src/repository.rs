// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed repositories over a [`DocumentStore`].
//!
//! A [`Repository`] binds one model type to one [`Namespace`] and runs every
//! read through the [`Converter`]. It has two modes:
//!
//! | Mode | Reads yield | Writes accept |
//! |------|-------------|---------------|
//! | hydrated (default) | [`Hydrated::Entity`] | entities, converted to documents |
//! | raw (`hydrate(false)`) | [`Hydrated::Unmapped`] | documents, `_id` padded when missing |
//!
//! A repository over a type without the entity marker is always raw.
//!
//! # Example
//!
//! ```rust,ignore
//! let manager = DocumentManager::new(MemoryStore::new(), "shop");
//! let orders = manager.repository::<Order>()?;
//!
//! let mut order = Order::default();
//! orders.insert_one(&mut order).await?;
//! assert!(order.id.is_some());
//!
//! let found = orders.find_one_by_id(order.id.unwrap()).await?;
//! ```

mod cursor;
mod manager;

use std::{marker::PhantomData, sync::Arc};

use thiserror::Error;
use tracing::debug;

pub use self::{cursor::Cursor, manager::DocumentManager};
use crate::{
    converter::{Converter, Dehydrated, Hydrated},
    descriptor::ID_FIELD,
    document::Document,
    error::ConvertError,
    model::Model,
    object_id::ObjectId,
    store::{DocumentStore, FindOptions, Namespace, StoreError},
    value::Value
};

/// Repository operation failed.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Conversion between entity and document failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// The store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A raw-mode write was given something that is not a document.
    #[error("`{entity}` is written raw but is not a document")]
    NotADocument {
        /// Type name.
        entity: &'static str
    },

    /// No collection was given and the type declares none.
    #[error("`{entity}` declares no collection")]
    MissingCollection {
        /// Type name.
        entity: &'static str
    }
}

/// CRUD access to one collection, typed by `T`.
pub struct Repository<T, S> {
    store:     Arc<S>,
    namespace: Namespace,
    converter: Converter,
    hydrate:   bool,
    _entity:   PhantomData<fn() -> T>
}

impl<T, S> Clone for Repository<T, S> {
    fn clone(&self) -> Self {
        Self {
            store:     Arc::clone(&self.store),
            namespace: self.namespace.clone(),
            converter: self.converter.clone(),
            hydrate:   self.hydrate,
            _entity:   PhantomData
        }
    }
}

impl<T, S> std::fmt::Debug for Repository<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("namespace", &self.namespace)
            .field("hydrate", &self.hydrate)
            .finish_non_exhaustive()
    }
}

impl<T: Model, S: DocumentStore> Repository<T, S> {
    /// Repository over `namespace`, hydrated by default.
    pub fn new(store: Arc<S>, namespace: Namespace, converter: Converter) -> Self {
        Self {
            store,
            namespace,
            converter,
            hydrate: true,
            _entity: PhantomData
        }
    }

    /// Switch between hydrated and raw mode.
    ///
    /// Hydration only takes effect for entity types.
    #[must_use]
    pub fn hydrate(mut self, hydrate: bool) -> Self {
        self.hydrate = hydrate;
        self
    }

    /// Check whether reads and writes go through the converter.
    pub fn is_hydrated(&self) -> bool {
        self.hydrate && T::schema().entity
    }

    /// Namespace this repository works on.
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        self.namespace.collection()
    }

    /// Count documents matching `filter`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Store`] from the backend.
    pub async fn count(&self, filter: &Document) -> Result<u64, RepositoryError> {
        let count = self.store.count(&self.namespace, filter).await?;
        debug!(namespace = %self.namespace, count, "count");
        Ok(count)
    }

    /// Find the document whose `_id` is `id`.
    ///
    /// # Errors
    ///
    /// See [`Repository::find_one`].
    pub async fn find_one_by_id(&self, id: ObjectId) -> Result<Option<Hydrated<T>>, RepositoryError> {
        let mut filter = Document::new();
        filter.insert(ID_FIELD, id);
        self.find_one(&filter).await
    }

    /// Find the first document matching `filter`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError`] from the backend or from hydration.
    pub async fn find_one(&self, filter: &Document) -> Result<Option<Hydrated<T>>, RepositoryError> {
        let mut cursor = self.find_many(filter, FindOptions::new().limit(1)).await?;
        Ok(cursor.next().transpose()?)
    }

    /// Find every document matching `filter`.
    ///
    /// Documents are fetched eagerly and hydrated one by one as the cursor
    /// is advanced.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Store`] from the backend.
    pub async fn find_many(
        &self,
        filter: &Document,
        options: FindOptions
    ) -> Result<Cursor<T>, RepositoryError> {
        let documents = self.store.find(&self.namespace, filter, &options).await?;
        debug!(namespace = %self.namespace, found = documents.len(), "find");
        Ok(Cursor::new(
            documents,
            self.converter.clone(),
            self.is_hydrated()
        ))
    }

    /// Insert one entity.
    ///
    /// In hydrated mode the stored identifier is written back to the entity.
    ///
    /// # Errors
    ///
    /// [`RepositoryError`] from conversion or from the backend.
    pub async fn insert_one(&self, entity: &mut T) -> Result<u64, RepositoryError> {
        self.insert_many(std::slice::from_mut(entity)).await
    }

    /// Insert several entities in one batch.
    ///
    /// In hydrated mode the stored identifiers are written back.
    ///
    /// # Errors
    ///
    /// [`RepositoryError`] from conversion or from the backend.
    pub async fn insert_many(&self, entities: &mut [T]) -> Result<u64, RepositoryError> {
        let documents = entities
            .iter()
            .map(|entity| self.document_of(entity))
            .collect::<Result<Vec<_>, _>>()?;
        let ids: Vec<Option<ObjectId>> = documents.iter().map(Document::object_id).collect();

        let inserted = self.store.insert_many(&self.namespace, documents).await?;
        debug!(namespace = %self.namespace, inserted, "insert");

        if inserted > 0 && self.is_hydrated() {
            for (entity, id) in entities.iter_mut().zip(ids) {
                if let Some(id) = id {
                    self.converter.set_id(entity, id)?;
                }
            }
        }
        Ok(inserted)
    }

    /// Replace the stored document that has the entity's `_id`.
    ///
    /// Returns the modified count.
    ///
    /// # Errors
    ///
    /// [`RepositoryError`] from conversion or from the backend.
    pub async fn update_one(&self, entity: &T) -> Result<u64, RepositoryError> {
        let document = self.document_of(entity)?;
        let counts = self.store.replace_one(&self.namespace, document, false).await?;
        debug!(namespace = %self.namespace, modified = counts.modified, "update");
        Ok(counts.modified)
    }

    /// Replace several entities; returns the total modified count.
    ///
    /// # Errors
    ///
    /// See [`Repository::update_one`].
    pub async fn update_many(&self, entities: &[T]) -> Result<u64, RepositoryError> {
        let mut modified = 0;
        for entity in entities {
            modified += self.update_one(entity).await?;
        }
        Ok(modified)
    }

    /// Replace the entity if it is stored, insert it otherwise.
    ///
    /// Returns modified plus inserted.
    ///
    /// # Errors
    ///
    /// [`RepositoryError`] from conversion or from the backend.
    pub async fn upsert_one(&self, entity: &mut T) -> Result<u64, RepositoryError> {
        let document = self.document_of(entity)?;
        let Some(id) = document.object_id() else {
            return self.insert_one(entity).await;
        };

        let counts = self.store.replace_one(&self.namespace, document, true).await?;
        debug!(
            namespace = %self.namespace,
            modified = counts.modified,
            inserted = counts.inserted,
            "upsert"
        );
        if counts.inserted > 0 && self.is_hydrated() {
            self.converter.set_id(entity, id)?;
        }
        Ok(counts.affected())
    }

    /// Upsert several entities; returns the total affected count.
    ///
    /// # Errors
    ///
    /// See [`Repository::upsert_one`].
    pub async fn upsert_many(&self, entities: &mut [T]) -> Result<u64, RepositoryError> {
        let mut affected = 0;
        for entity in entities.iter_mut() {
            affected += self.upsert_one(entity).await?;
        }
        Ok(affected)
    }

    /// Merge `fields` into every document matching `filter`.
    ///
    /// Returns the modified count.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Store`] from the backend.
    pub async fn update_fields(
        &self,
        filter: &Document,
        fields: &Document
    ) -> Result<u64, RepositoryError> {
        let modified = self
            .store
            .update_many(&self.namespace, filter, fields)
            .await?;
        debug!(namespace = %self.namespace, modified, "update fields");
        Ok(modified)
    }

    /// Delete the stored document of `entity`.
    ///
    /// An entity without identifier deletes nothing.
    ///
    /// # Errors
    ///
    /// [`RepositoryError`] from conversion or from the backend.
    pub async fn delete_one(&self, entity: &T) -> Result<u64, RepositoryError> {
        let id = if self.is_hydrated() {
            self.converter.get_id(entity)?
        } else {
            entity.conventional_id()
        };
        let Some(id) = id else {
            debug!(namespace = %self.namespace, "delete without identifier");
            return Ok(0);
        };
        let mut filter = Document::new();
        filter.insert(ID_FIELD, id);
        self.delete_many(&filter).await
    }

    /// Delete every document matching `filter`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Store`] from the backend.
    pub async fn delete_many(&self, filter: &Document) -> Result<u64, RepositoryError> {
        let deleted = self.store.delete_many(&self.namespace, filter).await?;
        debug!(namespace = %self.namespace, deleted, "delete");
        Ok(deleted)
    }

    /// Distinct values of `key` among documents matching `filter`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Store`] from the backend.
    pub async fn distinct(&self, key: &str, filter: &Document) -> Result<Vec<Value>, RepositoryError> {
        Ok(self.store.distinct(&self.namespace, key, filter).await?)
    }

    fn document_of(&self, entity: &T) -> Result<Document, RepositoryError> {
        if self.is_hydrated()
            && let Dehydrated::Document(document) = self.converter.entity_to_document(entity)?
        {
            return Ok(document);
        }

        let mut document = entity
            .as_document()
            .cloned()
            .ok_or(RepositoryError::NotADocument {
                entity: T::schema().name
            })?;
        if !document.contains_key(ID_FIELD) {
            document.insert(ID_FIELD, ObjectId::new());
        }
        Ok(document)
    }
}
