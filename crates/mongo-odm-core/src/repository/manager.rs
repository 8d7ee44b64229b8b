// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::{Repository, RepositoryError};
use crate::{
    config::OdmConfig,
    converter::Converter,
    model::Model,
    store::{DocumentStore, Namespace}
};

/// Entry point handing out repositories over one store.
///
/// All repositories share the store and one [`Converter`], so metadata is
/// resolved once per type.
pub struct DocumentManager<S> {
    store:     Arc<S>,
    database:  String,
    converter: Converter
}

impl<S> Clone for DocumentManager<S> {
    fn clone(&self) -> Self {
        Self {
            store:     Arc::clone(&self.store),
            database:  self.database.clone(),
            converter: self.converter.clone()
        }
    }
}

impl<S> std::fmt::Debug for DocumentManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentManager")
            .field("database", &self.database)
            .field("converter", &self.converter.config())
            .finish_non_exhaustive()
    }
}

impl<S: DocumentStore> DocumentManager<S> {
    /// Manager over `store`, defaulting to `database`.
    pub fn new(store: S, database: impl Into<String>) -> Self {
        Self::shared(Arc::new(store), database)
    }

    /// Manager over an already shared store.
    pub fn shared(store: Arc<S>, database: impl Into<String>) -> Self {
        Self {
            store,
            database: database.into(),
            converter: Converter::new()
        }
    }

    /// Manager configured from an [`OdmConfig`].
    pub fn from_config(store: S, config: &OdmConfig) -> Self {
        Self::new(store, config.database.clone())
            .with_converter(Converter::with_config(config.converter))
    }

    /// Replace the shared converter.
    #[must_use]
    pub fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Default database.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Shared converter.
    pub const fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Repository over the collection `T` declares.
    ///
    /// A database declared on `T` wins over the manager's default.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::MissingCollection`] when `T` declares none.
    pub fn repository<T: Model>(&self) -> Result<Repository<T, S>, RepositoryError> {
        let schema = T::schema();
        let collection = schema
            .collection
            .ok_or(RepositoryError::MissingCollection {
                entity: schema.name
            })?;
        Ok(self.repository_in::<T>(collection))
    }

    /// Repository over an explicit collection.
    pub fn repository_in<T: Model>(&self, collection: impl Into<String>) -> Repository<T, S> {
        let database = T::schema().database.unwrap_or(self.database.as_str());
        Repository::new(
            Arc::clone(&self.store),
            Namespace::new(database, collection),
            self.converter.clone()
        )
    }
}
