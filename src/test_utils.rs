// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: request builders for the built-in kinds.

use crate::projection::{ManifestRenderer, ManifestRequest};
use crate::schema::SchemaRegistry;
use serde_json::{json, Value};
use std::sync::Arc;

/// Renderer over the built-in registry
pub fn make_renderer() -> ManifestRenderer {
    ManifestRenderer::new(Arc::new(SchemaRegistry::builtin().unwrap()))
}

/// Parse rendered YAML back into a JSON tree for comparisons
pub fn yaml_tree(yaml: &str) -> Value {
    serde_yaml::from_str(yaml).unwrap()
}

pub fn make_vlogs_request(name: &str, namespace: &str) -> ManifestRequest {
    ManifestRequest::new(name, namespace).with_spec(json!({
        "retention_period": "14d",
        "log_level": "WARN",
        "replica_count": 1,
        "image": {
            "repository": "victoriametrics/victoria-logs",
            "tag": "v1.3.2-victorialogs",
            "pull_policy": "IfNotPresent"
        },
        "extra_args": { "search.maxQueryDuration": "1m" },
        "storage": {
            "access_modes": ["ReadWriteOnce"],
            "resources": { "requests": { "storage": "20Gi" } },
            "storage_class_name": "standard"
        },
        "pod_metadata": { "labels": { "team": "observability" } }
    }))
}

pub fn make_vmprobe_request(name: &str, namespace: &str) -> ManifestRequest {
    ManifestRequest::new(name, namespace).with_spec(json!({
        "job_name": "blackbox",
        "module": "http_2xx",
        "interval": "30s",
        "vm_prober_spec": {
            "url": "blackbox-exporter.monitoring.svc:9115",
            "scheme": "http",
            "path": "/probe"
        },
        "targets": {
            "static_config": {
                "targets": ["https://example.com"],
                "labels": { "env": "prod" }
            }
        },
        "params": { "module": ["http_2xx"] }
    }))
}

pub fn make_static_scrape_request(name: &str, namespace: &str) -> ManifestRequest {
    ManifestRequest::new(name, namespace).with_spec(json!({
        "job_name": "node",
        "sample_limit": 10000,
        "target_endpoints": [{
            "targets": ["10.0.0.1:9100", "10.0.0.2:9100"],
            "labels": { "env": "prod" },
            "scheme": "https",
            "path": "/metrics",
            "port": 9100,
            "proxy_url": "http://proxy:3128",
            "relabel_configs": [{
                "source_labels": ["__address__"],
                "target_label": "instance",
                "regex": "(.*):9100"
            }],
            "tls_config": { "insecure_skip_verify": true }
        }]
    }))
}
