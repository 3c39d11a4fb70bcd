// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod projection;
pub mod schema;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

pub use error::{ManifestError, Result};
pub use projection::{Manifest, ManifestRenderer, ManifestRequest};
pub use schema::{ManifestSchema, SchemaRegistry};
