// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-process [`DocumentStore`].
//!
//! Collections are vectors of documents kept in insertion order behind a
//! [`tokio::sync::RwLock`]. Reads clone out of the lock; writes hold it for
//! the whole operation, so each call is atomic.
//!
//! Sorting follows the usual document-database type order:
//!
//! ```text
//! null < numbers < string < document < array < binary < objectId < bool < date
//! ```

use std::{cmp::Ordering, collections::HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{DocumentStore, FindOptions, Namespace, SortDirection, StoreError, WriteCounts};
use crate::{descriptor::ID_FIELD, document::Document, object_id::ObjectId, value::Value};

/// Store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Namespace, Vec<Document>>>
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the namespaces holding at least one document.
    pub async fn namespaces(&self) -> Vec<Namespace> {
        let collections = self.collections.read().await;
        let mut names: Vec<_> = collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(ns, _)| ns.clone())
            .collect();
        names.sort_by_key(ToString::to_string);
        names
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn count(&self, namespace: &Namespace, filter: &Document) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        let count = collections
            .get(namespace)
            .map_or(0, |docs| docs.iter().filter(|d| d.matches(filter)).count());
        Ok(count as u64)
    }

    async fn find(
        &self,
        namespace: &Namespace,
        filter: &Document,
        options: &FindOptions
    ) -> Result<Vec<Document>, StoreError> {
        let mut found: Vec<Document> = {
            let collections = self.collections.read().await;
            collections
                .get(namespace)
                .map(|docs| docs.iter().filter(|d| d.matches(filter)).cloned().collect())
                .unwrap_or_default()
        };

        if let Some(sort) = &options.sort {
            found.sort_by(|a, b| compare_documents(a, b, sort));
        }
        let skip = options.skip.map_or(0, saturate);
        let limit = options.limit.map_or(usize::MAX, saturate);
        Ok(found.into_iter().skip(skip).take(limit).collect())
    }

    async fn distinct(
        &self,
        namespace: &Namespace,
        key: &str,
        filter: &Document
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let mut values: Vec<Value> = Vec::new();
        let matching = collections
            .get(namespace)
            .into_iter()
            .flatten()
            .filter(|d| d.matches(filter));
        for doc in matching {
            let candidates = match doc.get(key) {
                None => continue,
                Some(Value::Array(items)) => items.clone(),
                Some(value) => vec![value.clone()]
            };
            for candidate in candidates {
                if !values.contains(&candidate) {
                    values.push(candidate);
                }
            }
        }
        Ok(values)
    }

    async fn insert_many(
        &self,
        namespace: &Namespace,
        documents: Vec<Document>
    ) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(namespace.clone()).or_default();

        let mut batch = Vec::with_capacity(documents.len());
        for mut document in documents {
            if !document.contains_key(ID_FIELD) {
                document.insert(ID_FIELD, ObjectId::new());
            }
            let id = document.get(ID_FIELD).cloned().unwrap_or_default();
            let taken = docs
                .iter()
                .chain(batch.iter())
                .any(|d: &Document| d.get(ID_FIELD) == Some(&id));
            if taken {
                return Err(StoreError::DuplicateKey {
                    namespace: namespace.to_string(),
                    id:        id.to_string()
                });
            }
            batch.push(document);
        }

        let inserted = batch.len() as u64;
        docs.extend(batch);
        debug!(namespace = %namespace, inserted, "memory store insert");
        Ok(inserted)
    }

    async fn replace_one(
        &self,
        namespace: &Namespace,
        document: Document,
        upsert: bool
    ) -> Result<WriteCounts, StoreError> {
        let Some(id) = document.get(ID_FIELD).cloned() else {
            return Err(StoreError::MissingId {
                namespace: namespace.to_string()
            });
        };

        let mut collections = self.collections.write().await;
        let docs = collections.entry(namespace.clone()).or_default();
        let counts = match docs.iter_mut().find(|d| d.get(ID_FIELD) == Some(&id)) {
            Some(existing) => {
                let modified = u64::from(*existing != document);
                *existing = document;
                WriteCounts {
                    matched: 1,
                    modified,
                    inserted: 0
                }
            }
            None if upsert => {
                docs.push(document);
                WriteCounts {
                    inserted: 1,
                    ..WriteCounts::default()
                }
            }
            None => WriteCounts::default()
        };
        debug!(
            namespace = %namespace,
            matched = counts.matched,
            modified = counts.modified,
            inserted = counts.inserted,
            "memory store replace"
        );
        Ok(counts)
    }

    async fn update_many(
        &self,
        namespace: &Namespace,
        filter: &Document,
        fields: &Document
    ) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(namespace) else {
            return Ok(0);
        };

        let mut modified = 0;
        for doc in docs.iter_mut().filter(|d| d.matches(filter)) {
            let mut changed = false;
            for (key, value) in fields {
                if doc.get(key) != Some(value) {
                    doc.insert(key, value.clone());
                    changed = true;
                }
            }
            modified += u64::from(changed);
        }
        debug!(namespace = %namespace, modified, "memory store update");
        Ok(modified)
    }

    async fn delete_many(
        &self,
        namespace: &Namespace,
        filter: &Document
    ) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(namespace) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|d| !d.matches(filter));
        let deleted = (before - docs.len()) as u64;
        debug!(namespace = %namespace, deleted, "memory store delete");
        Ok(deleted)
    }
}

fn saturate(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

fn compare_documents(a: &Document, b: &Document, sort: &Document) -> Ordering {
    for (key, direction) in sort {
        let null = Value::Null;
        let left = a.get(key).unwrap_or(&null);
        let right = b.get(key).unwrap_or(&null);
        let ordering = match SortDirection::from_value(direction) {
            SortDirection::Asc => compare_values(left, right),
            SortDirection::Desc => compare_values(right, left)
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Int(_) | Value::Float(_) => 1,
        Value::String(_) => 2,
        Value::Document(_) => 3,
        Value::Array(_) => 4,
        Value::Binary(_) => 5,
        Value::ObjectId(_) => 6,
        Value::Bool(_) => 7,
        Value::DateTime(_) => 8
    }
}

/// Total order over values used for sorting.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Int(x), Value::Float(y)) => (*x as f64).total_cmp(y),
        (Value::Float(x), Value::Int(y)) => x.total_cmp(&(*y as f64)),
        (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::ObjectId(x), Value::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
        (Value::Binary(x), Value::Binary(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y)
            .map(|(l, r)| compare_values(l, r))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Document(x), Value::Document(y)) => {
            x.to_json().to_string().cmp(&y.to_json().to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b))
    }
}
