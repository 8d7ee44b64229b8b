// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::{marker::PhantomData, vec};

use crate::{
    converter::{Converter, Hydrated},
    document::Document,
    error::ConvertError,
    model::Model
};

/// Lazily hydrating iterator over fetched documents.
///
/// A document is converted only when the cursor reaches it, so a bad
/// document fails that step without affecting the ones before it.
pub struct Cursor<T> {
    documents: vec::IntoIter<Document>,
    converter: Converter,
    hydrate:   bool,
    _entity:   PhantomData<fn() -> T>
}

impl<T> Cursor<T> {
    pub(super) fn new(documents: Vec<Document>, converter: Converter, hydrate: bool) -> Self {
        Self {
            documents: documents.into_iter(),
            converter,
            hydrate,
            _entity: PhantomData
        }
    }

    /// Documents not yet yielded.
    pub fn remaining(&self) -> usize {
        self.documents.len()
    }
}

impl<T: Model> Cursor<T> {
    /// Collect the remaining items, stopping at the first error.
    ///
    /// # Errors
    ///
    /// The first [`ConvertError`] met.
    pub fn try_collect(self) -> Result<Vec<Hydrated<T>>, ConvertError> {
        self.collect()
    }

    /// Collect the remaining entities, dropping raw documents.
    ///
    /// # Errors
    ///
    /// The first [`ConvertError`] met.
    pub fn entities(self) -> Result<Vec<T>, ConvertError> {
        let mut entities = Vec::with_capacity(self.remaining());
        for item in self {
            if let Some(entity) = item?.entity() {
                entities.push(entity);
            }
        }
        Ok(entities)
    }
}

impl<T: Model> Iterator for Cursor<T> {
    type Item = Result<Hydrated<T>, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.documents.next()?;
        if !self.hydrate {
            return Some(Ok(Hydrated::Unmapped(document)));
        }
        Some(self.converter.document_to_entity::<T>(document))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.documents.size_hint()
    }
}

impl<T: Model> ExactSizeIterator for Cursor<T> {}

impl<T> std::fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("remaining", &self.documents.len())
            .field("hydrate", &self.hydrate)
            .finish()
    }
}
