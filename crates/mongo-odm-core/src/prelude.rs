// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mongo_odm_core::prelude::*;
//! ```

pub use crate::{
    Converter, ConvertError, Document, DocumentManager, DocumentStore, EntityObject, FindOptions,
    Hydrated, MemoryStore, Model, Namespace, ObjectId, OdmConfig, Repository, RepositoryError,
    SortDirection, Value, async_trait, document
};
