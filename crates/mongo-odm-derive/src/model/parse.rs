// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Model derive.
//!
//! # Module Structure
//!
//! ```text
//! parse/
//! ├── entity.rs  - ModelDef and the struct-level #[entity(...)] attribute
//! ├── field.rs   - FieldDef and the #[id] / #[field] / #[embed_*] attributes
//! ├── kind.rs    - Type tags and kind inference from Rust types
//! └── tests.rs   - Unit tests
//! ```

mod entity;
mod field;
mod kind;

pub use entity::ModelDef;
pub use field::{FieldDef, Mapping};
pub use kind::ScalarKind;
