// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Document identifiers.
//!
//! An [`ObjectId`] is a 12-byte, time-ordered identifier rendered as 24
//! lowercase hex characters.
//!
//! # Layout
//!
//! ```text
//! ┌───────────────────────────┬───────────────────────────┐
//! │ bytes 0..6                │ bytes 6..12               │
//! │ unix milliseconds (BE)    │ random                    │
//! └───────────────────────────┴───────────────────────────┘
//! ```
//!
//! Both halves are taken from a UUIDv7, so generation needs no shared
//! counter and is safe from any thread.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Length of an identifier in bytes.
pub const OBJECT_ID_LEN: usize = 12;

/// Time-ordered document identifier.
///
/// # Example
///
/// ```rust
/// use mongo_odm_core::ObjectId;
///
/// let id = ObjectId::new();
/// let parsed: ObjectId = id.to_hex().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        let uuid = Uuid::now_v7();
        let raw = uuid.as_bytes();
        let mut bytes = [0u8; OBJECT_ID_LEN];
        bytes[..6].copy_from_slice(&raw[..6]);
        bytes[6..].copy_from_slice(&raw[10..]);
        Self(bytes)
    }

    /// Build an identifier from raw bytes.
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub const fn bytes(&self) -> [u8; OBJECT_ID_LEN] {
        self.0
    }

    /// Creation time in unix milliseconds.
    pub fn timestamp_millis(&self) -> u64 {
        self.0[..6]
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
    }

    /// Lowercase 24 character hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the 24 character hex form.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectIdError`] when the input is not exactly 24 hex digits.
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        if s.len() != OBJECT_ID_LEN * 2 {
            return Err(ObjectIdError::Length(s.len()));
        }
        let mut bytes = [0u8; OBJECT_ID_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ObjectIdError::Hex(s.to_string()))?;
        Ok(Self(bytes))
    }
}

/// A fresh identifier, not a fixed zero value.
///
/// A model whose `#[id]` field is a bare `ObjectId` therefore gets an id
/// from `T::default()` already; use `Option<ObjectId>` to have the id
/// assigned when the entity is first written.
impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Failure to parse an [`ObjectId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectIdError {
    /// Input has the wrong number of characters.
    #[error("object id must be 24 hex characters, got {0}")]
    Length(usize),

    /// Input contains a non-hex character.
    #[error("object id `{0}` is not valid hex")]
    Hex(String)
}
