// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{kinds, victoriametrics};
use crate::schema::{Field, ManifestSchema};
use crate::types::common::{endpoint_auth_fields, label_selector, namespace_selector, relabel_configs, SCHEMES};

/// VMProbe: blackbox-style probing of static targets or ingresses
pub fn schema() -> ManifestSchema {
    ManifestSchema::new(victoriametrics::GROUP, victoriametrics::VERSION, kinds::VMPROBE, "vmprobes")
        .describe("VMProbeSpec contains specification parameters for a Probe.")
        .with_derived_id()
        .with_spec(spec_fields(), true)
}

fn prober_spec() -> Field {
    Field::object(
        "vm_prober_spec",
        "vmProberSpec",
        vec![
            Field::string("path", "path").describe("Path to collect metrics from. Defaults to /probe."),
            Field::string("scheme", "scheme")
                .one_of(SCHEMES)
                .describe("HTTP scheme to use for scraping. Defaults to http."),
            Field::string("url", "url")
                .required()
                .min_length(1)
                .describe("Mandatory URL of the prober."),
        ],
    )
    .required()
    .describe("Specification for the prober to use for probing targets. The prober.URL parameter is required. Targets cannot be probed if left empty.")
}

fn targets() -> Field {
    Field::object(
        "targets",
        "targets",
        vec![
            Field::object(
                "ingress",
                "ingress",
                vec![
                    namespace_selector(),
                    relabel_configs(
                        "relabeling_configs",
                        "relabelingConfigs",
                        "RelabelConfigs to apply to samples during service discovery.",
                    ),
                    label_selector("selector", "selector", "Select Ingress objects by labels."),
                ],
            )
            .describe("Ingress defines the set of dynamically discovered ingress objects which hosts are considered for probing."),
            Field::object(
                "static_config",
                "staticConfig",
                vec![
                    Field::map_of_string("labels", "labels")
                        .describe("Labels assigned to all metrics scraped from the targets."),
                    relabel_configs(
                        "relabeling_configs",
                        "relabelingConfigs",
                        "More relabeling can be done when the target is defined by an ingress object.",
                    ),
                    Field::list_of_string("targets", "targets")
                        .required()
                        .describe("Targets is a list of URLs to probe using the configured prober."),
                ],
            )
            .describe("StaticConfig defines static targets which is considers for probing."),
        ],
    )
    .describe("Targets defines a set of static and/or dynamically discovered targets to be probed using the prober.")
}

fn spec_fields() -> Vec<Field> {
    let mut fields = vec![
        Field::string("job_name", "jobName").describe("The job name assigned to scraped metrics by default."),
        Field::string("module", "module")
            .describe("The module to use for probing specifying how to probe the target. Example module configuring in the blackbox exporter: https://github.com/prometheus/blackbox_exporter/blob/master/example.yml"),
        targets(),
        prober_spec(),
    ];
    fields.extend(endpoint_auth_fields());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid() {
        let schema = schema();
        assert!(schema.check().is_ok());
        assert!(schema.derive_id);
        assert_eq!(
            schema.data_source_name(),
            "k8s_operator_victoriametrics_com_vmprobe_v1beta1_manifest"
        );
    }

    #[test]
    fn test_prober_required() {
        let schema = schema();
        let prober = schema.spec.iter().find(|f| f.name == "vm_prober_spec").unwrap();
        assert!(prober.required);
        assert_eq!(prober.target, "vmProberSpec");
    }
}
