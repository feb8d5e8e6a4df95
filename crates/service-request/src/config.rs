// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Configuration handling

use crate::error::RequestError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tracing::trace;

fn default_json_mode() -> bool {
    true
}

/// Configuration of a single named upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL, with or without a `scheme://` prefix
    #[serde(rename = "url")]
    pub base_url: String,
    /// Whether bodies are sent and received as JSON
    #[serde(rename = "json", default = "default_json_mode")]
    pub json_mode: bool,
}

impl ServiceConfig {
    /// A JSON mode service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            json_mode: default_json_mode(),
        }
    }

    /// Sets the JSON mode.
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }
}

/// The immutable set of services a dispatcher can talk to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRegistry {
    services: BTreeMap<String, ServiceConfig>,
}

impl ServiceRegistry {
    /// Creates a registry from a name to config map.
    pub fn new(services: impl IntoIterator<Item = (String, ServiceConfig)>) -> Self {
        Self {
            services: services.into_iter().collect(),
        }
    }

    /// Looks up a service by name.
    pub fn get(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.get(name)
    }

    /// Iterates over the configured service names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Number of configured services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if no service is configured.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Loads the registry from a YAML, JSON or TOML file with a top level
    /// `services` table. The format is chosen by the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RequestError> {
        Self::load(path.as_ref(), None)
    }

    /// Like [`ServiceRegistry::from_file`], with environment overrides.
    ///
    /// `PREFIX__SERVICES__<NAME>__URL=...` overrides or adds the URL of a service,
    /// `PREFIX__SERVICES__<NAME>__JSON=false` its JSON mode. Environment keys are
    /// lower cased, so service names set this way are lower case.
    pub fn from_file_with_env(path: impl AsRef<Path>, prefix: &str) -> Result<Self, RequestError> {
        Self::load(path.as_ref(), Some(prefix))
    }

    fn load(path: &Path, env_prefix: Option<&str>) -> Result<Self, RequestError> {
        trace!(path = %path.display(), "Loading service config");
        let mut builder = Config::builder().add_source(File::from(path));
        if let Some(prefix) = env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        let registry = builder.build()?.try_deserialize::<ServiceRegistry>()?;
        trace!(services = registry.len(), "Loaded service config");
        Ok(registry)
    }
}

impl FromIterator<(String, ServiceConfig)> for ServiceRegistry {
    fn from_iter<T: IntoIterator<Item = (String, ServiceConfig)>>(iter: T) -> Self {
        Self::new(iter)
    }
}
