// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Document store abstraction.
//!
//! Repositories never talk to a database directly. They go through a
//! [`DocumentStore`], which receives plain [`Document`]s and equality
//! filters. Query semantics (ordering, matching, atomicity) belong to the
//! store.
//!
//! # Overview
//!
//! - [`Namespace`] - database and collection pair
//! - [`FindOptions`] - sort, skip and limit for reads
//! - [`WriteCounts`] - what a replace or upsert did
//! - [`MemoryStore`] - in-process store for tests and prototypes

mod memory;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub use self::memory::MemoryStore;
use crate::{document::Document, value::Value};

/// Where a collection lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    database:   String,
    collection: String
}

impl Namespace {
    /// Pair a database with a collection.
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database:   database.into(),
            collection: collection.into()
        }
    }

    /// Database name.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

/// Read options.
///
/// `sort` maps keys to `1` (ascending) or `-1` (descending), applied in key
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    /// Sort specification.
    pub sort:  Option<Document>,
    /// Number of matches to skip.
    pub skip:  Option<u64>,
    /// Maximum number of documents to return.
    pub limit: Option<u64>
}

impl FindOptions {
    /// Options that change nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by `key`; repeated calls add tie-breakers.
    #[must_use]
    pub fn sort_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort
            .get_or_insert_with(Document::new)
            .insert(key, direction.as_value());
        self
    }

    /// Skip the first `skip` matches.
    #[must_use]
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Return at most `limit` documents.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Sort direction for ordered reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,

    /// Largest first.
    Desc
}

impl SortDirection {
    /// Value used in a sort document.
    pub const fn as_value(&self) -> Value {
        match self {
            Self::Asc => Value::Int(1),
            Self::Desc => Value::Int(-1)
        }
    }

    /// Read a direction back from a sort document value.
    ///
    /// Negative numbers mean descending; anything else ascending.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Int(i) if *i < 0 => Self::Desc,
            Value::Float(f) if *f < 0.0 => Self::Desc,
            _ => Self::Asc
        }
    }
}

/// Result of a replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteCounts {
    /// Documents matched by the filter.
    pub matched:  u64,
    /// Documents whose content changed.
    pub modified: u64,
    /// Documents inserted by an upsert.
    pub inserted: u64
}

impl WriteCounts {
    /// Modified plus inserted.
    pub const fn affected(&self) -> u64 {
        self.modified + self.inserted
    }
}

/// Store operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A document with the same `_id` already exists.
    #[error("duplicate `_id` {id} in {namespace}")]
    DuplicateKey {
        /// Rendered namespace.
        namespace: String,
        /// Rendered identifier.
        id:        String
    },

    /// A replace was given a document without `_id`.
    #[error("document for {namespace} has no `_id`")]
    MissingId {
        /// Rendered namespace.
        namespace: String
    },

    /// Backend-specific failure.
    #[error("store backend error: {0}")]
    Backend(String)
}

/// Persistence backend used by repositories.
///
/// Filters are equality documents: a document matches when every filter
/// key holds an equal value (a missing key equals null).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Count matching documents.
    async fn count(&self, namespace: &Namespace, filter: &Document) -> Result<u64, StoreError>;

    /// Fetch matching documents.
    async fn find(
        &self,
        namespace: &Namespace,
        filter: &Document,
        options: &FindOptions
    ) -> Result<Vec<Document>, StoreError>;

    /// Distinct values of `key` among matching documents, first-seen order.
    async fn distinct(
        &self,
        namespace: &Namespace,
        key: &str,
        filter: &Document
    ) -> Result<Vec<Value>, StoreError>;

    /// Insert documents; returns the inserted count.
    ///
    /// Documents without `_id` get a generated one.
    async fn insert_many(
        &self,
        namespace: &Namespace,
        documents: Vec<Document>
    ) -> Result<u64, StoreError>;

    /// Replace the document with the same `_id`, inserting it when `upsert`
    /// is set and nothing matches.
    async fn replace_one(
        &self,
        namespace: &Namespace,
        document: Document,
        upsert: bool
    ) -> Result<WriteCounts, StoreError>;

    /// Merge `fields` into every matching document; returns the modified
    /// count.
    async fn update_many(
        &self,
        namespace: &Namespace,
        filter: &Document,
        fields: &Document
    ) -> Result<u64, StoreError>;

    /// Delete matching documents; returns the deleted count.
    async fn delete_many(&self, namespace: &Namespace, filter: &Document)
    -> Result<u64, StoreError>;
}
