// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for metadata resolution, coercion and conversion.
//!
//! ```text
//! ConvertError
//! ├── Metadata(MetadataError)      resolve-time configuration problems
//! │   ├── NotAnEntityType          (root: recovered as passthrough)
//! │   ├── AmbiguousIdentifier
//! │   ├── InvalidIdentifier
//! │   ├── MissingEmbedTarget
//! │   ├── DuplicateDocumentField
//! │   ├── CyclicEmbedding          type-level embed cycle
//! │   └── Embedded                 failure inside an embed target
//! ├── InvalidFieldValue(CoerceError)
//! ├── Field(FieldError)            accessor rejected a value
//! └── CyclicEmbedding              runtime depth bound exceeded
//! ```

use thiserror::Error;

use crate::descriptor::FieldKind;

/// Entity metadata could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The type carries no entity-level marker.
    #[error("`{entity}` is not an entity type")]
    NotAnEntityType {
        /// Type name.
        entity: &'static str
    },

    /// More than one field is flagged as identifier.
    #[error("`{entity}` declares more than one identifier: {fields:?}")]
    AmbiguousIdentifier {
        /// Type name.
        entity: &'static str,
        /// Offending fields.
        fields: Vec<&'static str>
    },

    /// An identifier field has a kind other than `identifier`.
    #[error("identifier `{entity}.{field}` must have kind `id`, found `{kind}`")]
    InvalidIdentifier {
        /// Type name.
        entity: &'static str,
        /// Field name.
        field:  &'static str,
        /// Declared kind.
        kind:   FieldKind
    },

    /// `embedOne` / `embedMany` without a target type.
    #[error("embedded field `{entity}.{field}` has no target type")]
    MissingEmbedTarget {
        /// Type name.
        entity: &'static str,
        /// Field name.
        field:  &'static str
    },

    /// Two fields map to the same document key.
    #[error("`{entity}` maps more than one field to document key `{name}`")]
    DuplicateDocumentField {
        /// Type name.
        entity: &'static str,
        /// Document key.
        name:   String
    },

    /// Embed targets form a cycle.
    #[error("cyclic embedding: {}", .path.join(" -> "))]
    CyclicEmbedding {
        /// Type names along the cycle, first repeated at the end.
        path: Vec<&'static str>
    },

    /// An embed target failed to resolve.
    #[error("embedded field `{entity}.{field}`: {source}")]
    Embedded {
        /// Type name.
        entity: &'static str,
        /// Field name.
        field:  &'static str,
        /// Failure of the target.
        #[source]
        source: Box<MetadataError>
    }
}

impl MetadataError {
    /// Check for [`MetadataError::NotAnEntityType`].
    pub const fn is_not_entity(&self) -> bool {
        matches!(self, Self::NotAnEntityType { .. })
    }
}

/// A single value could not be coerced to or from its declared kind.
#[derive(Debug, Error)]
pub enum CoerceError {
    /// The value has no well-defined conversion.
    #[error("cannot convert {found} to `{expected}`: {reason}")]
    Invalid {
        /// Declared kind.
        expected: FieldKind,
        /// Type of the offending value.
        found:    &'static str,
        /// What went wrong.
        reason:   String
    },

    /// An embedded kind reached the coercer without a target.
    #[error("field of kind `{0}` has no embed target")]
    MissingTarget(FieldKind),

    /// Conversion of an embedded entity failed.
    #[error(transparent)]
    Embedded(Box<ConvertError>)
}

impl CoerceError {
    /// Shorthand for [`CoerceError::Invalid`].
    pub fn invalid(expected: FieldKind, found: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            expected,
            found,
            reason: reason.into()
        }
    }
}

/// A model accessor rejected a field name or value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// No declared field with this name.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// The value has the wrong shape for the Rust field type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected shape.
        expected: &'static str,
        /// Shape received.
        found:    &'static str
    },

    /// The value does not fit the Rust field type.
    #[error("{value} is out of range for {target}")]
    OutOfRange {
        /// Rust type name.
        target: &'static str,
        /// Offending value.
        value:  String
    }
}

impl FieldError {
    /// Shorthand for [`FieldError::TypeMismatch`].
    pub const fn mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            expected,
            found
        }
    }
}

/// Document/entity conversion failed.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Metadata of an entity involved in the call is invalid.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// A field value could not be coerced.
    #[error("invalid value for `{entity}.{field}`: {source}")]
    InvalidFieldValue {
        /// Type name.
        entity: &'static str,
        /// Field name.
        field:  &'static str,
        /// Coercion failure.
        #[source]
        source: CoerceError
    },

    /// A model accessor rejected a coerced value.
    #[error("cannot assign `{entity}.{field}`: {source}")]
    Field {
        /// Type name.
        entity: &'static str,
        /// Field name.
        field:  &'static str,
        /// Accessor failure.
        #[source]
        source: FieldError
    },

    /// Embedding went deeper than the configured bound.
    #[error("cyclic embedding: `{entity}` reached depth {depth} (max {max})")]
    CyclicEmbedding {
        /// Type being converted when the bound was hit.
        entity: &'static str,
        /// Depth reached.
        depth:  usize,
        /// Configured maximum.
        max:    usize
    }
}

impl ConvertError {
    /// Check for a cyclic embedding, at resolve time or at run time.
    pub const fn is_cyclic(&self) -> bool {
        matches!(
            self,
            Self::CyclicEmbedding { .. } | Self::Metadata(MetadataError::CyclicEmbedding { .. })
        )
    }

    /// Check for an invalid field value.
    pub const fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidFieldValue { .. })
    }
}
