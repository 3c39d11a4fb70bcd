// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation: Kubernetes metadata syntax and schema conformance.

use crate::constants::limits;
use crate::error::ValidationErrors;
use crate::schema::{Field, FieldType, Rule};
use serde_json::{Map, Value};

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// DNS-1123 label: lowercase alphanumerics and '-', starting and ending alphanumeric
pub fn is_dns1123_label(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= limits::DNS1123_LABEL_MAX_LEN
        && value.starts_with(is_lower_alnum)
        && value.ends_with(is_lower_alnum)
        && value.chars().all(|c| is_lower_alnum(c) || c == '-')
}

/// DNS-1123 subdomain: dot-separated DNS-1123 labels, at most 253 characters
pub fn is_dns1123_subdomain(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= limits::DNS1123_SUBDOMAIN_MAX_LEN
        && value.split('.').all(|part| {
            !part.is_empty()
                && part.starts_with(is_lower_alnum)
                && part.ends_with(is_lower_alnum)
                && part.chars().all(|c| is_lower_alnum(c) || c == '-')
        })
}

fn is_name_segment(value: &str, max_len: usize) -> bool {
    let alnum = |c: char| c.is_ascii_alphanumeric();
    !value.is_empty()
        && value.len() <= max_len
        && value.starts_with(alnum)
        && value.ends_with(alnum)
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Qualified name as used for label and annotation keys: `[prefix/]name`
pub fn is_qualified_name(key: &str) -> bool {
    match key.split_once('/') {
        Some((prefix, name)) => {
            is_dns1123_subdomain(prefix) && is_name_segment(name, limits::QUALIFIED_NAME_MAX_LEN)
        }
        None => is_name_segment(key, limits::QUALIFIED_NAME_MAX_LEN),
    }
}

/// Label values may be empty; otherwise they follow the name segment syntax
pub fn is_label_value(value: &str) -> bool {
    value.is_empty() || is_name_segment(value, limits::LABEL_VALUE_MAX_LEN)
}

/// Validate a configuration tree against a list of fields, collecting every problem
pub fn validate_fields(fields: &[Field], value: &Value, path: &str, errors: &mut ValidationErrors) {
    let Some(object) = value.as_object() else {
        errors.push(path, "must be an object");
        return;
    };

    for key in object.keys() {
        if !fields.iter().any(|f| &f.name == key) {
            errors.push(join(path, key), "unsupported attribute");
        }
    }

    for field in fields {
        let field_path = join(path, &field.name);
        match object.get(&field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    errors.push(field_path, "is required");
                }
            }
            Some(value) => validate_field(field, value, &field_path, errors),
        }
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn validate_field(field: &Field, value: &Value, path: &str, errors: &mut ValidationErrors) {
    let type_ok = match &field.field_type {
        FieldType::String => value.is_string(),
        FieldType::Bool => value.is_boolean(),
        FieldType::Integer => value.is_i64() || value.is_u64(),
        FieldType::Number => value.is_number(),
        FieldType::MapOfString => value
            .as_object()
            .is_some_and(|m| m.values().all(Value::is_string)),
        FieldType::ListOfString => value
            .as_array()
            .is_some_and(|a| a.iter().all(Value::is_string)),
        FieldType::MapOfListOfString => value.as_object().is_some_and(|m| {
            m.values()
                .all(|v| v.as_array().is_some_and(|a| a.iter().all(Value::is_string)))
        }),
        FieldType::Object { fields } => {
            // reports its own "must be an object" error
            validate_fields(fields, value, path, errors);
            true
        }
        FieldType::ListOfObject { fields } => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    validate_fields(fields, item, &format!("{path}[{index}]"), errors);
                }
                true
            }
            None => false,
        },
        FieldType::Dynamic => true,
    };

    if !type_ok {
        errors.push(path, format!("must be a {}", field.field_type.name()));
        return;
    }

    check_rules(field, value, path, errors);
}

fn check_rules(field: &Field, value: &Value, path: &str, errors: &mut ValidationErrors) {
    for rule in &field.rules {
        match rule {
            Rule::OneOf { values } => {
                for s in string_values(value) {
                    if !values.iter().any(|v| v == s) {
                        errors.push(
                            path,
                            format!("value '{}' must be one of: {}", s, values.join(", ")),
                        );
                    }
                }
            }
            Rule::MinLength { min } => {
                for s in string_values(value) {
                    if s.chars().count() < *min {
                        errors.push(path, format!("must be at least {min} characters long"));
                    }
                }
            }
            Rule::MinItems { min } => {
                if value.as_array().is_some_and(|a| a.len() < *min) {
                    errors.push(path, format!("must contain at least {min} items"));
                }
            }
            Rule::Range { min, max } => check_range(value, *min, *max, path, errors),
            Rule::ResourceName => {
                if value.as_str().is_some_and(|s| !is_dns1123_subdomain(s)) {
                    errors.push(
                        path,
                        "must consist of lower case alphanumeric characters, '-' or '.', \
                         and must start and end with an alphanumeric character",
                    );
                }
            }
            Rule::NamespaceName => {
                if value.as_str().is_some_and(|s| !is_dns1123_label(s)) {
                    errors.push(
                        path,
                        "must consist of lower case alphanumeric characters or '-', \
                         and must start and end with an alphanumeric character",
                    );
                }
            }
            Rule::Labels => {
                if let Some(map) = value.as_object() {
                    check_labels(map, path, errors);
                }
            }
            Rule::Annotations => {
                if let Some(map) = value.as_object() {
                    check_annotations(map, path, errors);
                }
            }
        }
    }
}

fn string_values(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn check_range(value: &Value, min: Option<i64>, max: Option<i64>, path: &str, errors: &mut ValidationErrors) {
    let Some(n) = value.as_f64() else {
        return;
    };
    if let Some(lo) = min {
        if n < lo as f64 {
            errors.push(path, format!("must be at least {lo}"));
        }
    }
    if let Some(hi) = max {
        if n > hi as f64 {
            errors.push(path, format!("must be at most {hi}"));
        }
    }
}

fn check_labels(labels: &Map<String, Value>, path: &str, errors: &mut ValidationErrors) {
    for (key, value) in labels {
        if !is_qualified_name(key) {
            errors.push(path, format!("invalid label key '{key}'"));
        }
        if value.as_str().is_some_and(|v| !is_label_value(v)) {
            errors.push(path, format!("invalid value for label '{key}'"));
        }
    }
}

fn check_annotations(annotations: &Map<String, Value>, path: &str, errors: &mut ValidationErrors) {
    let mut total = 0;
    for (key, value) in annotations {
        if !is_qualified_name(key) {
            errors.push(path, format!("invalid annotation key '{key}'"));
        }
        total += key.len() + value.as_str().map_or(0, str::len);
    }
    if total > limits::ANNOTATIONS_TOTAL_MAX_SIZE {
        errors.push(
            path,
            format!(
                "total size of annotations must not exceed {} bytes",
                limits::ANNOTATIONS_TOTAL_MAX_SIZE
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(fields: &[Field], value: Value) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        validate_fields(fields, &value, "spec", &mut errors);
        errors
    }

    #[test]
    fn test_dns1123_label() {
        assert!(is_dns1123_label("monitoring"));
        assert!(is_dns1123_label("a-1"));
        assert!(!is_dns1123_label(""));
        assert!(!is_dns1123_label("-monitoring"));
        assert!(!is_dns1123_label("Monitoring"));
        assert!(!is_dns1123_label("a.b"));
        assert!(!is_dns1123_label(&"a".repeat(64)));
    }

    #[test]
    fn test_dns1123_subdomain() {
        assert!(is_dns1123_subdomain("vlogs"));
        assert!(is_dns1123_subdomain("my.vlogs-1"));
        assert!(!is_dns1123_subdomain("my..vlogs"));
        assert!(!is_dns1123_subdomain("my_vlogs"));
        assert!(!is_dns1123_subdomain("vlogs."));
        assert!(!is_dns1123_subdomain(&"a".repeat(254)));
    }

    #[test]
    fn test_qualified_name() {
        assert!(is_qualified_name("app"));
        assert!(is_qualified_name("app.kubernetes.io/name"));
        assert!(is_qualified_name("My_Label.x"));
        assert!(!is_qualified_name(""));
        assert!(!is_qualified_name("/name"));
        assert!(!is_qualified_name("Example.COM/name"));
        assert!(!is_qualified_name("bad key"));
        assert!(!is_qualified_name("-app"));
        assert!(!is_qualified_name("a/b/c"));
    }

    #[test]
    fn test_label_value() {
        assert!(is_label_value(""));
        assert!(is_label_value("v1.2_3"));
        assert!(!is_label_value("has space"));
        assert!(!is_label_value(&"x".repeat(64)));
    }

    #[test]
    fn test_required_field_missing() {
        let fields = vec![Field::string("retention_period", "retentionPeriod").required()];
        let errors = validate(&fields, json!({}));
        assert!(errors.has_path("spec.retention_period"));
    }

    #[test]
    fn test_null_counts_as_unset() {
        let fields = vec![Field::string("retention_period", "retentionPeriod").required()];
        let errors = validate(&fields, json!({ "retention_period": null }));
        assert!(errors.has_path("spec.retention_period"));

        let optional = vec![Field::string("log_level", "logLevel")];
        assert!(validate(&optional, json!({ "log_level": null })).is_empty());
    }

    #[test]
    fn test_unsupported_attribute() {
        let fields = vec![Field::string("job_name", "jobName")];
        let errors = validate(&fields, json!({ "jobName": "x" }));
        assert!(errors.has_path("spec.jobName"));
    }

    #[test]
    fn test_type_mismatch() {
        let fields = vec![
            Field::integer("replica_count", "replicaCount"),
            Field::bool("host_network", "hostNetwork"),
            Field::map_of_string("node_selector", "nodeSelector"),
        ];
        let errors = validate(
            &fields,
            json!({ "replica_count": 1.5, "host_network": "yes", "node_selector": { "a": 1 } }),
        );
        assert_eq!(errors.0.len(), 3);
    }

    #[test]
    fn test_enum_rejects_unknown_value() {
        let fields = vec![Field::string("scheme", "scheme").one_of(&["http", "https"])];
        assert!(validate(&fields, json!({ "scheme": "https" })).is_empty());

        let errors = validate(&fields, json!({ "scheme": "ftp" }));
        assert_eq!(
            errors.0[0].message,
            "value 'ftp' must be one of: http, https"
        );
    }

    #[test]
    fn test_enum_on_list_checks_every_item() {
        let fields = vec![Field::list_of_string("modes", "modes").one_of(&["a", "b"])];
        let errors = validate(&fields, json!({ "modes": ["a", "c", "d"] }));
        assert_eq!(errors.0.len(), 2);
    }

    #[test]
    fn test_min_length_and_min_items() {
        let fields = vec![
            Field::string("url", "url").min_length(1),
            Field::list_of_string("targets", "targets").min_items(1),
        ];
        let errors = validate(&fields, json!({ "url": "", "targets": [] }));
        assert!(errors.has_path("spec.url"));
        assert!(errors.has_path("spec.targets"));
    }

    #[test]
    fn test_range() {
        let fields = vec![Field::integer("port", "port").range(Some(1), Some(65535))];
        assert!(validate(&fields, json!({ "port": 8080 })).is_empty());
        assert!(validate(&fields, json!({ "port": 0 })).has_path("spec.port"));
        assert!(validate(&fields, json!({ "port": 70000 })).has_path("spec.port"));
    }

    #[test]
    fn test_nested_list_paths() {
        let fields = vec![Field::list_of_object(
            "target_endpoints",
            "targetEndpoints",
            vec![Field::string("scheme", "scheme").one_of(&["http", "https"])],
        )];
        let errors = validate(
            &fields,
            json!({ "target_endpoints": [{ "scheme": "http" }, { "scheme": "udp" }] }),
        );
        assert!(errors.has_path("spec.target_endpoints[1].scheme"));
        assert_eq!(errors.0.len(), 1);
    }

    #[test]
    fn test_dynamic_accepts_anything() {
        let fields = vec![Field::dynamic("affinity", "affinity")];
        assert!(validate(&fields, json!({ "affinity": { "anything": [1, "two"] } })).is_empty());
    }

    #[test]
    fn test_label_rule() {
        let fields = vec![Field::map_of_string("labels", "labels").rule(Rule::Labels)];
        assert!(validate(&fields, json!({ "labels": { "app.kubernetes.io/name": "vlogs" } })).is_empty());

        let errors = validate(&fields, json!({ "labels": { "bad key!": "x" } }));
        assert_eq!(errors.0[0].message, "invalid label key 'bad key!'");
    }

    #[test]
    fn test_annotation_size_limit() {
        let fields = vec![Field::map_of_string("annotations", "annotations").rule(Rule::Annotations)];
        let big = "x".repeat(limits::ANNOTATIONS_TOTAL_MAX_SIZE);
        let errors = validate(&fields, json!({ "annotations": { "note": big } }));
        assert!(errors.has_path("spec.annotations"));
    }

    #[test]
    fn test_collects_all_errors() {
        let fields = vec![
            Field::string("a", "a").required(),
            Field::string("b", "b").one_of(&["x"]),
        ];
        let errors = validate(&fields, json!({ "b": "y", "c": true }));
        assert_eq!(errors.0.len(), 3);
    }
}
