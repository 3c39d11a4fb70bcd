// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::env as keys;
use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

/// Renderer configuration loaded from environment variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Directory with additional schema descriptions (`*.yaml`)
    pub schema_dir: Option<PathBuf>,
    /// Request stream to read; stdin when unset
    pub input: Option<PathBuf>,
    /// Print the input JSON Schema of this kind instead of rendering
    pub describe: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let schema_dir = non_empty(keys::SCHEMA_DIR).map(PathBuf::from);
        if let Some(dir) = &schema_dir {
            if !dir.is_dir() {
                bail!("{} is not a directory: {}", keys::SCHEMA_DIR, dir.display());
            }
        }

        Ok(Config {
            schema_dir,
            input: non_empty(keys::INPUT).map(PathBuf::from),
            describe: non_empty(keys::DESCRIBE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = load(&[(keys::INPUT, "  "), (keys::DESCRIBE, "")]).unwrap();
        assert!(config.input.is_none());
        assert!(config.describe.is_none());
    }

    #[test]
    fn test_values_loaded() {
        let dir = std::env::temp_dir();
        let config = load(&[
            (keys::SCHEMA_DIR, dir.to_str().unwrap()),
            (keys::INPUT, "requests.yaml"),
            (keys::DESCRIBE, "VLogs"),
        ])
        .unwrap();

        assert_eq!(config.schema_dir, Some(dir));
        assert_eq!(config.input, Some(PathBuf::from("requests.yaml")));
        assert_eq!(config.describe.as_deref(), Some("VLogs"));
    }

    #[test]
    fn test_schema_dir_must_exist() {
        let err = load(&[(keys::SCHEMA_DIR, "/definitely/not/here")]).unwrap_err();
        assert!(err.to_string().contains("MANIFEST_SCHEMA_DIR"));
    }
}
