// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FragmentError, Result};

pub const DEFAULT_SERVICE_HOST: &str = "localhost";
pub const DEFAULT_SERVICE_PORT: u16 = 51200;
pub const DEFAULT_API_PREFIX: &str = "pxf";
pub const DEFAULT_API_VERSION: &str = "v15";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Settings for talking to the PXF service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Host written into every replica location after normalization
    pub service_host: String,
    pub service_port: u16,
    /// First path segment of the REST API
    pub api_prefix: String,
    /// Second path segment of the REST API
    pub api_version: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_host: DEFAULT_SERVICE_HOST.to_string(),
            service_port: DEFAULT_SERVICE_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("pxf-fragmenter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn service_address(&self) -> ServiceAddress {
        ServiceAddress {
            host: self.service_host.clone(),
            port: self.service_port,
        }
    }
}

/// The single endpoint that serves fragment bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAddress {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for ServiceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Load configuration from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig> {
    let content = std::fs::read_to_string(&path).map_err(|e| {
        FragmentError::ServiceConfig(format!(
            "Failed to read config file {}: {e}",
            path.as_ref().display()
        ))
    })?;

    let config: ServiceConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| {
            FragmentError::ServiceConfig(format!("Failed to parse YAML configuration: {e}"))
        })?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    if config.service_host.trim().is_empty() {
        return Err(FragmentError::ServiceConfig(
            "service_host cannot be empty".to_string(),
        ));
    }

    if config.service_port == 0 {
        return Err(FragmentError::ServiceConfig(
            "service_port must be greater than 0".to_string(),
        ));
    }

    for (name, segment) in [
        ("api_prefix", &config.api_prefix),
        ("api_version", &config.api_version),
    ] {
        if segment.is_empty() || segment.contains('/') {
            return Err(FragmentError::ServiceConfig(format!(
                "{name} must be a single non-empty path segment, got '{segment}'"
            )));
        }
    }

    if config.timeout_seconds == 0 {
        return Err(FragmentError::ServiceConfig(
            "timeout_seconds must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
