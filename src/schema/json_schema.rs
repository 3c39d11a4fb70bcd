// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Renders a manifest description as the JSON Schema of its configuration tree.

use crate::schema::{Field, FieldType, ManifestSchema, Rule};
use schemars::schema::{
    ArrayValidation, InstanceType, Metadata, NumberValidation, ObjectValidation, RootSchema,
    Schema, SchemaObject, SingleOrVec, StringValidation,
};
use serde_json::Value;

/// JSON Schema describing the configuration a data source accepts
pub fn input_schema(schema: &ManifestSchema) -> RootSchema {
    let mut root = object_schema(&schema.root_fields());
    root.metadata = Some(Box::new(Metadata {
        title: Some(schema.data_source_name()),
        description: Some(format!(
            "Creates a {} manifest ({}).",
            schema.kind,
            schema.api_version()
        )),
        ..Default::default()
    }));

    RootSchema {
        meta_schema: Some("http://json-schema.org/draft-07/schema#".to_string()),
        schema: root,
        ..Default::default()
    }
}

fn typed(instance_type: InstanceType) -> SchemaObject {
    SchemaObject {
        instance_type: Some(SingleOrVec::Single(Box::new(instance_type))),
        ..Default::default()
    }
}

fn array_of(items: SchemaObject) -> SchemaObject {
    let mut schema = typed(InstanceType::Array);
    schema.array = Some(Box::new(ArrayValidation {
        items: Some(SingleOrVec::Single(Box::new(Schema::Object(items)))),
        ..Default::default()
    }));
    schema
}

fn map_of(values: SchemaObject) -> SchemaObject {
    let mut schema = typed(InstanceType::Object);
    schema.object = Some(Box::new(ObjectValidation {
        additional_properties: Some(Box::new(Schema::Object(values))),
        ..Default::default()
    }));
    schema
}

fn object_schema(fields: &[Field]) -> SchemaObject {
    let mut validation = ObjectValidation {
        additional_properties: Some(Box::new(Schema::Bool(false))),
        ..Default::default()
    };

    for field in fields {
        validation
            .properties
            .insert(field.name.clone(), Schema::Object(field_schema(field)));
        if field.required {
            validation.required.insert(field.name.clone());
        }
    }

    let mut schema = typed(InstanceType::Object);
    schema.object = Some(Box::new(validation));
    schema
}

fn field_schema(field: &Field) -> SchemaObject {
    let mut schema = match &field.field_type {
        FieldType::String => typed(InstanceType::String),
        FieldType::Bool => typed(InstanceType::Boolean),
        FieldType::Integer => typed(InstanceType::Integer),
        FieldType::Number => typed(InstanceType::Number),
        FieldType::MapOfString => map_of(typed(InstanceType::String)),
        FieldType::ListOfString => array_of(typed(InstanceType::String)),
        FieldType::MapOfListOfString => map_of(array_of(typed(InstanceType::String))),
        FieldType::Object { fields } => object_schema(fields),
        FieldType::ListOfObject { fields } => array_of(object_schema(fields)),
        FieldType::Dynamic => SchemaObject::default(),
    };

    for rule in &field.rules {
        apply_rule(&mut schema, rule);
    }

    if field.description.is_some() {
        schema.metadata = Some(Box::new(Metadata {
            description: field.description.clone(),
            ..Default::default()
        }));
    }

    schema
}

fn apply_rule(schema: &mut SchemaObject, rule: &Rule) {
    // list-of-string rules apply to the items
    if let Some(SingleOrVec::Single(items)) = schema.array.as_mut().and_then(|a| a.items.as_mut()) {
        if let (Schema::Object(items), Rule::OneOf { .. } | Rule::MinLength { .. }) =
            (items.as_mut(), rule)
        {
            return apply_rule(items, rule);
        }
    }

    match rule {
        Rule::OneOf { values } => {
            schema.enum_values = Some(values.iter().cloned().map(Value::String).collect());
        }
        Rule::MinLength { min } => {
            schema.string().min_length = Some(*min as u32);
        }
        Rule::MinItems { min } => {
            schema.array().min_items = Some(*min as u32);
        }
        Rule::Range { min, max } => {
            let number: &mut NumberValidation = schema.number();
            number.minimum = min.map(|v| v as f64);
            number.maximum = max.map(|v| v as f64);
        }
        Rule::ResourceName | Rule::NamespaceName => {
            let string: &mut StringValidation = schema.string();
            string.min_length = Some(1);
            string.max_length = Some(if matches!(rule, Rule::ResourceName) {
                crate::constants::limits::DNS1123_SUBDOMAIN_MAX_LEN as u32
            } else {
                crate::constants::limits::DNS1123_LABEL_MAX_LEN as u32
            });
        }
        Rule::Labels | Rule::Annotations => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaRegistry;
    use crate::constants::kinds;

    fn make_schema_json(kind: &str) -> Value {
        let registry = SchemaRegistry::builtin().unwrap();
        let schema = registry.resolve(kind).unwrap();
        serde_json::to_value(input_schema(&schema)).unwrap()
    }

    #[test]
    fn test_root_requires_metadata() {
        let json = make_schema_json(kinds::VLOGS);
        assert_eq!(
            json["title"],
            "k8s_operator_victoriametrics_com_vlogs_v1beta1_manifest"
        );
        let required = json["required"].as_array().unwrap();
        assert!(required.contains(&Value::from("metadata")));
        assert!(required.contains(&Value::from("spec")));
        assert_eq!(json["additionalProperties"], false);
    }

    #[test]
    fn test_required_spec_field_listed() {
        let json = make_schema_json(kinds::VLOGS);
        let spec_required = json["properties"]["spec"]["required"].as_array().unwrap();
        assert!(spec_required.contains(&Value::from("retention_period")));
    }

    #[test]
    fn test_enum_rendered() {
        let json = make_schema_json(kinds::VMPROBE);
        let scheme = &json["properties"]["spec"]["properties"]["vm_prober_spec"]["properties"]["scheme"];
        assert_eq!(scheme["enum"], serde_json::json!(["http", "https"]));
    }

    #[test]
    fn test_list_of_object_items() {
        let json = make_schema_json(kinds::VMSTATICSCRAPE);
        let endpoints = &json["properties"]["spec"]["properties"]["target_endpoints"];
        assert_eq!(endpoints["type"], "array");
        assert_eq!(endpoints["items"]["type"], "object");
        assert!(endpoints["items"]["properties"]["targets"].is_object());
    }

    #[test]
    fn test_metadata_name_bounds() {
        let json = make_schema_json(kinds::VMPROBE);
        let name = &json["properties"]["metadata"]["properties"]["name"];
        assert_eq!(name["minLength"], 1);
        assert_eq!(name["maxLength"], 253);
        assert!(name["description"].is_string());
    }
}
