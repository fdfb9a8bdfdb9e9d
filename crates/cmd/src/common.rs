// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fragmenter::{QueryContext, ServiceConfig, load_config};

/// Segment identity, normally supplied by the query executor through the
/// environment
#[derive(Args, Debug, Clone, Default)]
pub struct SegmentArgs {
    /// Zero-based index of this segment
    #[arg(long, env = "PXF_SEGMENT_ID", default_value_t = 0)]
    pub segment_id: u32,

    /// Number of segments taking part in the query
    #[arg(long, env = "PXF_SEGMENT_COUNT", default_value_t = 1)]
    pub segment_count: u32,

    /// Distributed transaction id shared by all segments of the query
    #[arg(long, env = "PXF_XID")]
    pub xid: Option<u64>,
}

impl SegmentArgs {
    pub fn query_context(&self) -> QueryContext {
        QueryContext::new(self.segment_id, self.segment_count, self.xid)
    }
}

/// Where to find the PXF service settings
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// YAML file with service settings; built-in defaults when absent
    #[arg(long, env = "PXF_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ServiceArgs {
    pub fn load(&self) -> Result<ServiceConfig> {
        load_service_config(self.config.as_deref())
    }
}

/// Load service settings from `path`, or use the defaults
pub fn load_service_config(path: Option<&Path>) -> Result<ServiceConfig> {
    match path {
        Some(path) => {
            log::debug!("loading service configuration from {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))
        }
        None => Ok(ServiceConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_without_path() {
        let config = load_service_config(None).expect("defaults");
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "service_host: pxf-proxy\napi_version: v16").expect("write");

        let args = ServiceArgs {
            config: Some(file.path().to_path_buf()),
        };
        let config = args.load().expect("load");
        assert_eq!(config.service_host, "pxf-proxy");
        assert_eq!(config.api_version, "v16");
        assert_eq!(config.service_port, fragmenter::DEFAULT_SERVICE_PORT);
    }

    #[test]
    fn test_bad_config_reports_path() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "service_port: 0").expect("write");

        let err = load_service_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load configuration from"));
    }

    #[test]
    fn test_query_context_from_args() {
        let args = SegmentArgs {
            segment_id: 2,
            segment_count: 4,
            xid: Some(17),
        };
        assert_eq!(args.query_context(), QueryContext::new(2, 4, Some(17)));
    }
}
