// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Config-to-manifest projection: validate, rename, stamp constants, serialize.

use crate::error::{ManifestError, Result, ValidationErrors};
use crate::schema::{Field, FieldType, ManifestSchema, SchemaRegistry};
use crate::validation::validate_fields;
use futures::future::join_all;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::DynamicObject;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Configuration supplied for one data source read, keyed in snake_case
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ManifestRequest {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub spec: Value,
}

impl ManifestRequest {
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            metadata: serde_json::json!({ "name": name, "namespace": namespace }),
            spec: Value::Null,
        }
    }

    pub fn with_spec(mut self, spec: Value) -> Self {
        self.spec = spec;
        self
    }

    pub fn with_labels(self, labels: BTreeMap<String, String>) -> Self {
        self.with_metadata_map("labels", labels)
    }

    pub fn with_annotations(self, annotations: BTreeMap<String, String>) -> Self {
        self.with_metadata_map("annotations", annotations)
    }

    fn with_metadata_map(mut self, key: &str, values: BTreeMap<String, String>) -> Self {
        if !self.metadata.is_object() {
            self.metadata = Value::Object(Map::new());
        }
        if let Some(metadata) = self.metadata.as_object_mut() {
            let values = values.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
            metadata.insert(key.to_string(), Value::Object(values));
        }
        self
    }

    /// The whole configuration tree as validated against a schema
    fn tree(&self) -> Value {
        let mut root = Map::new();
        if !self.metadata.is_null() {
            root.insert("metadata".to_string(), self.metadata.clone());
        }
        if !self.spec.is_null() {
            root.insert("spec".to_string(), self.spec.clone());
        }
        Value::Object(root)
    }
}

/// The result of a data source read
#[derive(Clone, Debug)]
pub struct Manifest {
    /// `namespace/name`, only for kinds that derive an id
    pub id: Option<String>,
    /// The echoed structured object with `apiVersion` and `kind` stamped in
    pub object: DynamicObject,
    pub yaml: String,
}

impl Manifest {
    pub fn api_version(&self) -> &str {
        self.object
            .types
            .as_ref()
            .map(|t| t.api_version.as_str())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        self.object
            .types
            .as_ref()
            .map(|t| t.kind.as_str())
            .unwrap_or_default()
    }

    pub fn spec(&self) -> Option<&Value> {
        self.object.data.get("spec")
    }
}

/// Project a validated configuration tree onto the manifest layout, renaming keys
pub fn project_fields(fields: &[Field], value: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    let Some(object) = value.as_object() else {
        return out;
    };

    for field in fields {
        match object.get(&field.name) {
            None | Some(Value::Null) => continue,
            Some(value) => {
                out.insert(field.target.clone(), project_value(&field.field_type, value));
            }
        }
    }

    out
}

fn project_value(field_type: &FieldType, value: &Value) -> Value {
    match (field_type, value) {
        (FieldType::Object { fields }, _) => Value::Object(project_fields(fields, value)),
        (FieldType::ListOfObject { fields }, Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| Value::Object(project_fields(fields, item)))
                .collect(),
        ),
        (FieldType::Dynamic, _) => strip_nulls(value),
        _ => value.clone(),
    }
}

/// Copy a pass-through value, dropping null object entries at any depth
fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
        _ => value.clone(),
    }
}

/// Renders manifests for any kind known to its registry
#[derive(Debug, Clone)]
pub struct ManifestRenderer {
    registry: Arc<SchemaRegistry>,
}

impl ManifestRenderer {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Render one request for the kind named by `key` (kind or data source name)
    pub fn render(&self, key: &str, request: &ManifestRequest) -> Result<Manifest> {
        let schema = self.registry.resolve(key)?;
        render(&schema, request)
    }

    /// Render independent requests concurrently, returning results in input order
    pub async fn render_batch(&self, requests: Vec<(String, ManifestRequest)>) -> Vec<Result<Manifest>> {
        info!("Rendering {} manifests", requests.len());

        let tasks = requests.into_iter().map(|(key, request)| {
            let renderer = self.clone();
            tokio::task::spawn_blocking(move || renderer.render(&key, &request))
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => Err(ManifestError::Task(e.to_string())),
            })
            .collect()
    }
}

/// Read a manifest data source: validate, project, stamp constants and serialize
#[instrument(skip(schema, request), fields(kind = %schema.kind))]
pub fn render(schema: &ManifestSchema, request: &ManifestRequest) -> Result<Manifest> {
    let root_fields = schema.root_fields();
    let tree = request.tree();

    let mut errors = ValidationErrors::default();
    validate_fields(&root_fields, &tree, "", &mut errors);
    if !errors.is_empty() {
        debug!("Rejected configuration with {} errors", errors.0.len());
    }
    errors.into_result()?;

    let mut projected = project_fields(&root_fields, &tree);
    let metadata: ObjectMeta = match projected.remove("metadata") {
        Some(metadata) => serde_json::from_value(metadata)
            .map_err(|e| ManifestError::Projection(format!("metadata: {e}")))?,
        None => ObjectMeta::default(),
    };

    let resource = schema.api_resource();
    let name = metadata.name.clone().unwrap_or_default();
    let mut object = DynamicObject::new(&name, &resource);
    object.metadata = metadata;
    object.data = Value::Object(projected);

    let id = schema.derive_id.then(|| match &object.metadata.namespace {
        Some(namespace) => format!("{namespace}/{name}"),
        None => name.clone(),
    });

    let yaml = serde_yaml::to_string(&object).map_err(ManifestError::Serialization)?;
    debug!("Rendered {} {}", schema.kind, name);

    Ok(Manifest { id, object, yaml })
}
