// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::io::{self, Read, Write};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vm_manifests::config::Config;
use vm_manifests::schema::input_schema;
use vm_manifests::{ManifestRenderer, ManifestRequest, SchemaRegistry};

/// One document of the request stream: the kind to render plus its configuration
#[derive(Deserialize)]
struct RequestDocument {
    kind: String,
    #[serde(flatten)]
    request: ManifestRequest,
}

fn read_input(config: &Config) -> Result<String> {
    let mut input = String::new();
    match &config.input {
        Some(path) => {
            input = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read requests from stdin")?;
        }
    }
    Ok(input)
}

fn parse_requests(input: &str) -> Result<Vec<(String, ManifestRequest)>> {
    let mut requests = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let doc = RequestDocument::deserialize(document)
            .with_context(|| format!("Invalid request document #{}", index + 1))?;
        requests.push((doc.kind, doc.request));
    }
    Ok(requests)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the manifests
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;

    let mut registry = SchemaRegistry::builtin()?;
    if let Some(dir) = &config.schema_dir {
        let loaded = registry
            .load_dir(dir)
            .with_context(|| format!("Failed to load schema descriptions from {}", dir.display()))?;
        info!("Loaded {} schema descriptions from {}", loaded, dir.display());
    }
    info!(
        "{} manifest kinds available: {}",
        registry.len(),
        registry.data_source_names().collect::<Vec<_>>().join(", ")
    );

    if let Some(kind) = &config.describe {
        let schema = registry.resolve(kind)?;
        let json = serde_json::to_string_pretty(&input_schema(&schema))?;
        println!("{json}");
        return Ok(());
    }

    let requests = parse_requests(&read_input(&config)?)?;
    let renderer = ManifestRenderer::new(Arc::new(registry));
    let results = renderer.render_batch(requests).await;

    let mut failed = 0;
    let mut stdout = io::stdout().lock();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(manifest) => {
                if let Some(id) = &manifest.id {
                    info!("Rendered {} {}", manifest.kind(), id);
                }
                writeln!(stdout, "---")?;
                write!(stdout, "{}", manifest.yaml)?;
            }
            Err(e) => {
                error!("Request #{} failed: {}", index + 1, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of the requests could not be rendered", failed);
    }
    Ok(())
}
