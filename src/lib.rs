// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Quick Navigation
//!
//! - **Derive Macro**: [`Model`](macro@Model)
//! - **Conversion**: [`Converter`]
//! - **Persistence**: [`DocumentManager`], [`Repository`], [`DocumentStore`]
//! - **Configuration**: [`OdmConfig`], [`ConfigLoader`]
//! - **Common imports**: [`prelude`]

pub use mongo_odm_core::*;
pub use mongo_odm_derive::Model;

/// Convenient re-exports for common usage, including the derive macro.
///
/// ```rust,ignore
/// use mongo_odm::prelude::*;
/// ```
pub mod prelude {
    pub use mongo_odm_core::prelude::*;
    pub use mongo_odm_derive::Model;
}
