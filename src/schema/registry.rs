// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lookup of manifest schema descriptions by kind or data source name

use crate::error::{ManifestError, Result};
use crate::schema::ManifestSchema;
use crate::types;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Immutable once built; share it behind an `Arc` between concurrent renders
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Keyed by data source name, which is unique per group/kind/version
    schemas: BTreeMap<String, Arc<ManifestSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the VictoriaMetrics operator kinds
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for schema in types::builtin_schemas() {
            registry.register(schema)?;
        }
        Ok(registry)
    }

    /// Add or replace a schema description after checking it
    pub fn register(&mut self, schema: ManifestSchema) -> Result<()> {
        schema.check()?;
        let key = schema.data_source_name();
        if self.schemas.contains_key(&key) {
            warn!("Replacing schema description for {}", key);
        }
        debug!("Registered {} as {}", schema.kind, key);
        self.schemas.insert(key, Arc::new(schema));
        Ok(())
    }

    /// Load every `*.yaml`/`*.yml` description in a directory, returning how many were added
    #[instrument(skip(self))]
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "yaml" || e == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            let schema = read_schema_file(path)?;
            info!("Loaded schema description for {} from {}", schema.kind, path.display());
            self.register(schema)?;
        }

        Ok(paths.len())
    }

    /// Find a schema by data source name, kind, or `apiVersion/kind`.
    /// A bare kind registered under several groups or versions matches nothing.
    pub fn get(&self, key: &str) -> Option<Arc<ManifestSchema>> {
        self.lookup(key).ok().flatten()
    }

    /// Like [`SchemaRegistry::get`], failing with `UnknownKind` or `AmbiguousKind`
    pub fn resolve(&self, key: &str) -> Result<Arc<ManifestSchema>> {
        self.lookup(key)?
            .ok_or_else(|| ManifestError::UnknownKind(key.to_string()))
    }

    fn lookup(&self, key: &str) -> Result<Option<Arc<ManifestSchema>>> {
        if let Some(schema) = self.schemas.get(key) {
            return Ok(Some(schema.clone()));
        }

        if let Some((api_version, kind)) = key.rsplit_once('/') {
            return Ok(self
                .schemas
                .values()
                .find(|s| s.kind == kind && s.api_version() == api_version)
                .cloned());
        }

        let mut matches = self.schemas.values().filter(|s| s.kind == key);
        match (matches.next(), matches.next()) {
            (Some(_), Some(_)) => Err(ManifestError::AmbiguousKind(key.to_string())),
            (schema, _) => Ok(schema.cloned()),
        }
    }

    pub fn data_source_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn read_schema_file(path: &Path) -> Result<ManifestSchema> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ManifestError::SchemaFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
