// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Built-in schema descriptions for the VictoriaMetrics operator resources.

pub mod common;
pub mod vlogs;
pub mod vmprobe;
pub mod vmstaticscrape;

use crate::schema::ManifestSchema;

pub fn builtin_schemas() -> Vec<ManifestSchema> {
    vec![vlogs::schema(), vmprobe::schema(), vmstaticscrape::schema()]
}
