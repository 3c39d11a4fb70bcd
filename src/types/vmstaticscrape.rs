// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{kinds, victoriametrics};
use crate::schema::{Field, ManifestSchema};
use crate::types::common::{endpoint_auth_fields, relabel_configs};

/// VMStaticScrape: scraping of a fixed list of targets
pub fn schema() -> ManifestSchema {
    ManifestSchema::new(
        victoriametrics::GROUP,
        victoriametrics::VERSION,
        kinds::VMSTATICSCRAPE,
        "vmstaticscrapes",
    )
    .describe("VMStaticScrapeSpec defines the desired state of VMStaticScrape.")
    .with_derived_id()
    .with_spec(spec_fields(), true)
}

fn target_endpoint() -> Vec<Field> {
    let mut fields = vec![
        Field::map_of_string("labels", "labels")
            .describe("Labels static labels for targets."),
        relabel_configs(
            "relabel_configs",
            "relabelConfigs",
            "RelabelConfigs to apply to samples during service discovery.",
        ),
        Field::list_of_string("targets", "targets")
            .required()
            .min_items(1)
            .describe("Targets static targets addresses in form of ['192.122.55.55:9100','some-name:9100']."),
    ];
    fields.extend(endpoint_auth_fields());
    fields
}

fn spec_fields() -> Vec<Field> {
    vec![
        Field::string("job_name", "jobName").describe("JobName name of job."),
        Field::string("max_scrape_size", "max_scrape_size")
            .describe("MaxScrapeSize defines a maximum size of scraped data for a job"),
        Field::integer("sample_limit", "sampleLimit")
            .range(Some(0), None)
            .describe("SampleLimit defines per-scrape limit on number of scraped samples that will be accepted."),
        Field::integer("series_limit", "seriesLimit")
            .range(Some(0), None)
            .describe("SeriesLimit defines per-scrape limit on number of unique time series a single target can expose during all the scrapes on the time window of 24h."),
        Field::list_of_object("target_endpoints", "targetEndpoints", target_endpoint())
            .required()
            .min_items(1)
            .describe("A list of target endpoints to scrape metrics from."),
    ]
}
