// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Declarative descriptions of manifest kinds.
//!
//! A [`ManifestSchema`] carries everything needed to validate a configuration
//! tree and project it into a Kubernetes manifest: the fixed group, version and
//! kind, and a tree of [`Field`]s with an explicit input key to output key
//! mapping. Descriptions are plain data and can be loaded from YAML.

pub mod json_schema;
pub mod registry;

pub use json_schema::input_schema;
pub use registry::SchemaRegistry;

use crate::constants::data_source;
use crate::error::{ManifestError, Result};
use kube::api::ApiResource;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Description of one manifest kind
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSchema {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub namespaced: bool,
    /// Emit an `id` of the form `namespace/name` alongside the manifest
    #[serde(default)]
    pub derive_id: bool,
    #[serde(default)]
    pub spec_required: bool,
    #[serde(default)]
    pub spec: Vec<Field>,
}

fn default_true() -> bool {
    true
}

/// One attribute of a configuration tree
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Key in the configuration tree (snake_case)
    pub name: String,
    /// Key in the rendered manifest (the CRD's own field name)
    pub target: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldType {
    String,
    Bool,
    Integer,
    Number,
    MapOfString,
    ListOfString,
    MapOfListOfString,
    Object { fields: Vec<Field> },
    ListOfObject { fields: Vec<Field> },
    /// Any value, passed through untouched (int-or-string, preserve-unknown-fields)
    Dynamic,
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Bool => "bool",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::MapOfString => "map of string",
            FieldType::ListOfString => "list of string",
            FieldType::MapOfListOfString => "map of list of string",
            FieldType::Object { .. } => "object",
            FieldType::ListOfObject { .. } => "list of object",
            FieldType::Dynamic => "dynamic",
        }
    }

    /// Nested fields of object-like types
    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            FieldType::Object { fields } | FieldType::ListOfObject { fields } => Some(fields),
            _ => None,
        }
    }

    fn is_string_like(&self) -> bool {
        matches!(self, FieldType::String | FieldType::ListOfString)
    }

    fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Number)
    }

    fn is_string_map(&self) -> bool {
        matches!(self, FieldType::MapOfString)
    }
}

/// Validation rule attached to a field
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Rule {
    OneOf { values: Vec<String> },
    MinLength { min: usize },
    MinItems { min: usize },
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    ResourceName,
    NamespaceName,
    Labels,
    Annotations,
}

impl Field {
    fn new(name: &str, target: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            target: target.to_string(),
            field_type,
            required: false,
            description: None,
            rules: Vec::new(),
        }
    }

    pub fn string(name: &str, target: &str) -> Self {
        Self::new(name, target, FieldType::String)
    }

    pub fn bool(name: &str, target: &str) -> Self {
        Self::new(name, target, FieldType::Bool)
    }

    pub fn integer(name: &str, target: &str) -> Self {
        Self::new(name, target, FieldType::Integer)
    }

    pub fn number(name: &str, target: &str) -> Self {
        Self::new(name, target, FieldType::Number)
    }

    pub fn map_of_string(name: &str, target: &str) -> Self {
        Self::new(name, target, FieldType::MapOfString)
    }

    pub fn list_of_string(name: &str, target: &str) -> Self {
        Self::new(name, target, FieldType::ListOfString)
    }

    pub fn map_of_list_of_string(name: &str, target: &str) -> Self {
        Self::new(name, target, FieldType::MapOfListOfString)
    }

    pub fn object(name: &str, target: &str, fields: Vec<Field>) -> Self {
        Self::new(name, target, FieldType::Object { fields })
    }

    pub fn list_of_object(name: &str, target: &str, fields: Vec<Field>) -> Self {
        Self::new(name, target, FieldType::ListOfObject { fields })
    }

    pub fn dynamic(name: &str, target: &str) -> Self {
        Self::new(name, target, FieldType::Dynamic)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn one_of(self, values: &[&str]) -> Self {
        self.rule(Rule::OneOf {
            values: values.iter().map(|v| v.to_string()).collect(),
        })
    }

    pub fn min_length(self, min: usize) -> Self {
        self.rule(Rule::MinLength { min })
    }

    pub fn min_items(self, min: usize) -> Self {
        self.rule(Rule::MinItems { min })
    }

    pub fn range(self, min: Option<i64>, max: Option<i64>) -> Self {
        self.rule(Rule::Range { min, max })
    }

    fn check(&self, path: &str) -> Result<()> {
        if self.name.is_empty() || self.target.is_empty() {
            return Err(ManifestError::InvalidSchema(format!(
                "{path}: field name and target must not be empty"
            )));
        }

        for rule in &self.rules {
            let valid = match rule {
                Rule::OneOf { values } => self.field_type.is_string_like() && !values.is_empty(),
                Rule::MinLength { .. } => self.field_type.is_string_like(),
                Rule::MinItems { .. } => matches!(
                    self.field_type,
                    FieldType::ListOfString | FieldType::ListOfObject { .. }
                ),
                Rule::Range { min, max } => {
                    self.field_type.is_numeric()
                        && match (min, max) {
                            (Some(lo), Some(hi)) => lo <= hi,
                            _ => true,
                        }
                }
                Rule::ResourceName | Rule::NamespaceName => self.field_type == FieldType::String,
                Rule::Labels | Rule::Annotations => self.field_type.is_string_map(),
            };
            if !valid {
                return Err(ManifestError::InvalidSchema(format!(
                    "{path}: rule {rule:?} does not apply to a {} field",
                    self.field_type.name()
                )));
            }
        }

        if let Some(fields) = self.field_type.fields() {
            if fields.is_empty() {
                return Err(ManifestError::InvalidSchema(format!(
                    "{path}: {} field declares no nested fields",
                    self.field_type.name()
                )));
            }
            check_fields(fields, path)?;
        }

        Ok(())
    }
}

/// Check one level of fields: unique input names, unique output keys, valid nesting
fn check_fields(fields: &[Field], parent: &str) -> Result<()> {
    let mut names = HashSet::new();
    let mut targets = HashSet::new();

    for field in fields {
        let path = format!("{parent}.{}", field.name);
        if !names.insert(field.name.as_str()) {
            return Err(ManifestError::InvalidSchema(format!(
                "{path}: duplicate input name"
            )));
        }
        if !targets.insert(field.target.as_str()) {
            return Err(ManifestError::InvalidSchema(format!(
                "{path}: duplicate output key '{}'",
                field.target
            )));
        }
        field.check(&path)?;
    }

    Ok(())
}

impl ManifestSchema {
    pub fn new(group: &str, version: &str, kind: &str, plural: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
            plural: plural.to_string(),
            description: None,
            namespaced: true,
            derive_id: false,
            spec_required: false,
            spec: Vec::new(),
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn cluster_scoped(mut self) -> Self {
        self.namespaced = false;
        self
    }

    pub fn with_derived_id(mut self) -> Self {
        self.derive_id = true;
        self
    }

    pub fn with_spec(mut self, fields: Vec<Field>, required: bool) -> Self {
        self.spec = fields;
        self.spec_required = required;
        self
    }

    /// The fixed `apiVersion` stamped into every manifest of this kind
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Name of the Terraform data source exposing this kind
    pub fn data_source_name(&self) -> String {
        let mut segments = vec![data_source::PREFIX.to_string()];
        if !self.group.is_empty() {
            segments.push(self.group.replace(['.', '-'], "_"));
        }
        segments.push(self.kind.to_lowercase());
        segments.push(self.version.clone());
        segments.push(data_source::SUFFIX.to_string());
        segments.join("_")
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: self.api_version(),
            kind: self.kind.clone(),
            plural: self.plural.clone(),
        }
    }

    /// The metadata block shared by every manifest kind
    pub fn metadata_fields(&self) -> Vec<Field> {
        let mut namespace = Field::string("namespace", "namespace")
            .describe("Namespace defines the space within which each name must be unique.")
            .rule(Rule::NamespaceName);
        if self.namespaced {
            namespace = namespace.required();
        }

        vec![
            Field::string("name", "name")
                .required()
                .describe("Unique identifier for this object within its namespace.")
                .rule(Rule::ResourceName),
            namespace,
            Field::map_of_string("labels", "labels")
                .describe("Map of string keys and values that can be used to organize and categorize objects.")
                .rule(Rule::Labels),
            Field::map_of_string("annotations", "annotations")
                .describe("Unstructured key value map stored with a resource that may be set by external tools.")
                .rule(Rule::Annotations),
        ]
    }

    /// The full configuration tree: `metadata` plus `spec`
    pub fn root_fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::object("metadata", "metadata", self.metadata_fields())
            .required()
            .describe("Data that helps uniquely identify the object.")];

        if !self.spec.is_empty() {
            let mut spec = Field::object("spec", "spec", self.spec.clone());
            if let Some(description) = &self.description {
                spec = spec.describe(description);
            }
            if self.spec_required {
                spec = spec.required();
            }
            fields.push(spec);
        }

        fields
    }

    /// Reject descriptions whose field tree cannot be projected unambiguously
    pub fn check(&self) -> Result<()> {
        if self.version.is_empty() || self.kind.is_empty() || self.plural.is_empty() {
            return Err(ManifestError::InvalidSchema(format!(
                "'{}': version, kind and plural must not be empty",
                self.kind
            )));
        }
        check_fields(&self.spec, "spec")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_schema(spec: Vec<Field>) -> ManifestSchema {
        ManifestSchema::new("example.com", "v1", "Widget", "widgets").with_spec(spec, false)
    }

    #[test]
    fn test_api_version_with_group() {
        let schema = make_schema(vec![]);
        assert_eq!(schema.api_version(), "example.com/v1");
    }

    #[test]
    fn test_api_version_core_group() {
        let schema = ManifestSchema::new("", "v1", "ConfigMap", "configmaps");
        assert_eq!(schema.api_version(), "v1");
    }

    #[test]
    fn test_data_source_name() {
        let schema = ManifestSchema::new(
            "operator.victoriametrics.com",
            "v1beta1",
            "VMStaticScrape",
            "vmstaticscrapes",
        );
        assert_eq!(
            schema.data_source_name(),
            "k8s_operator_victoriametrics_com_vmstaticscrape_v1beta1_manifest"
        );
    }

    #[test]
    fn test_data_source_name_core_group() {
        let schema = ManifestSchema::new("", "v1", "ConfigMap", "configmaps");
        assert_eq!(schema.data_source_name(), "k8s_configmap_v1_manifest");
    }

    #[test]
    fn test_namespace_required_only_when_namespaced() {
        let namespaced = make_schema(vec![]);
        assert!(namespaced.metadata_fields()[1].required);

        let cluster = make_schema(vec![]).cluster_scoped();
        assert!(!cluster.metadata_fields()[1].required);
    }

    #[test]
    fn test_root_fields_omit_empty_spec() {
        let schema = make_schema(vec![]);
        let root = schema.root_fields();
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].name, "metadata");
    }

    #[test]
    fn test_check_accepts_valid_schema() {
        let schema = make_schema(vec![
            Field::string("scheme", "scheme").one_of(&["http", "https"]),
            Field::object("tls_config", "tlsConfig", vec![Field::string("ca_file", "caFile")]),
        ]);
        assert!(schema.check().is_ok());
    }

    #[test]
    fn test_check_rejects_duplicate_target() {
        let schema = make_schema(vec![
            Field::string("job_name", "jobName"),
            Field::string("job", "jobName"),
        ]);
        let err = schema.check().unwrap_err();
        assert!(err.to_string().contains("duplicate output key 'jobName'"));
    }

    #[test]
    fn test_check_rejects_duplicate_name() {
        let schema = make_schema(vec![
            Field::string("port", "port"),
            Field::integer("port", "portNumber"),
        ]);
        assert!(schema.check().is_err());
    }

    #[test]
    fn test_check_rejects_enum_on_bool() {
        let schema = make_schema(vec![Field::bool("enabled", "enabled").one_of(&["true"])]);
        assert!(matches!(schema.check(), Err(ManifestError::InvalidSchema(_))));
    }

    #[test]
    fn test_check_rejects_empty_object() {
        let schema = make_schema(vec![Field::object("image", "image", vec![])]);
        assert!(schema.check().is_err());
    }

    #[test]
    fn test_check_rejects_inverted_range() {
        let schema = make_schema(vec![Field::integer("port", "port").range(Some(10), Some(1))]);
        assert!(schema.check().is_err());
    }

    #[test]
    fn test_check_nested_duplicates() {
        let schema = make_schema(vec![Field::list_of_object(
            "endpoints",
            "endpoints",
            vec![Field::string("a", "x"), Field::string("b", "x")],
        )]);
        let err = schema.check().unwrap_err();
        assert!(err.to_string().contains("spec.endpoints.b"));
    }

    #[test]
    fn test_schema_description_from_yaml() {
        let yaml = r#"
group: example.com
version: v1
kind: Widget
plural: widgets
deriveId: true
specRequired: true
spec:
  - name: size_bytes
    target: sizeBytes
    required: true
    type:
      kind: integer
    rules:
      - rule: range
        min: 0
  - name: mode
    target: mode
    type:
      kind: string
    rules:
      - rule: oneOf
        values: [fast, slow]
  - name: selector
    target: selector
    type:
      kind: object
      fields:
        - name: match_labels
          target: matchLabels
          type:
            kind: mapOfString
"#;
        let schema: ManifestSchema = serde_yaml::from_str(yaml).unwrap();

        assert!(schema.namespaced);
        assert!(schema.derive_id);
        assert!(schema.spec_required);
        assert_eq!(schema.spec.len(), 3);
        assert_eq!(schema.spec[0].field_type, FieldType::Integer);
        assert_eq!(
            schema.spec[0].rules,
            vec![Rule::Range {
                min: Some(0),
                max: None
            }]
        );
        assert_eq!(
            schema.spec[2].field_type.fields().map(|f| f[0].target.as_str()),
            Some("matchLabels")
        );
        assert!(schema.check().is_ok());
    }
}
