// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// API group and version of the VictoriaMetrics operator resources
pub mod victoriametrics {
    pub const GROUP: &str = "operator.victoriametrics.com";
    pub const VERSION: &str = "v1beta1";
}

/// Kind names of the built-in manifest data sources
pub mod kinds {
    pub const VLOGS: &str = "VLogs";
    pub const VMPROBE: &str = "VMProbe";
    pub const VMSTATICSCRAPE: &str = "VMStaticScrape";
}

/// Terraform data source naming: `k8s_<group>_<kind>_<version>_manifest`
pub mod data_source {
    pub const PREFIX: &str = "k8s";
    pub const SUFFIX: &str = "manifest";
}

/// Kubernetes object metadata syntax limits
pub mod limits {
    /// DNS-1123 subdomain, used for object names and label key prefixes
    pub const DNS1123_SUBDOMAIN_MAX_LEN: usize = 253;
    /// DNS-1123 label, used for namespaces
    pub const DNS1123_LABEL_MAX_LEN: usize = 63;
    /// Name part of a qualified label or annotation key
    pub const QUALIFIED_NAME_MAX_LEN: usize = 63;
    pub const LABEL_VALUE_MAX_LEN: usize = 63;
    /// Total size of all annotation keys and values
    pub const ANNOTATIONS_TOTAL_MAX_SIZE: usize = 256 * 1024;
}

/// Environment variables read by the binary
pub mod env {
    pub const SCHEMA_DIR: &str = "MANIFEST_SCHEMA_DIR";
    pub const INPUT: &str = "MANIFEST_INPUT";
    pub const DESCRIBE: &str = "MANIFEST_DESCRIBE";
}
