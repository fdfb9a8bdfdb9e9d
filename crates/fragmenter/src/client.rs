// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Fragment catalog requests

use std::time::Duration;

use log::debug;
use pxfuri::{UriDescriptor, normalize_key_name};
use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

use crate::config::ServiceConfig;
use crate::context::QueryContext;
use crate::error::{FragmentError, Result};

/// Option keys that name how the fragment list is computed
const FRAGMENTER_KEY: &str = "FRAGMENTER";
const PROFILE_KEY: &str = "PROFILE";

/// A fully formed `getFragments` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub url: Url,
    /// Header name/value pairs in the order they are sent
    pub headers: Vec<(String, String)>,
}

impl CatalogRequest {
    /// First header with this name, ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Fetches the raw catalog response body for a request
pub trait Transport {
    fn get(&self, request: &CatalogRequest) -> Result<String>;
}

/// The service cannot pick a fragmenter unless one is named directly or
/// implied by a profile.
pub fn check_fragmenter_or_profile<F>(uri: &UriDescriptor<F>) -> Result<()> {
    if uri.has_option(FRAGMENTER_KEY) || uri.has_option(PROFILE_KEY) {
        Ok(())
    } else {
        Err(FragmentError::Configuration {
            uri: uri.uri().to_string(),
        })
    }
}

/// Build the catalog request for `uri` as seen from the segment in `ctx`
pub fn build_request<F>(
    uri: &UriDescriptor<F>,
    ctx: &QueryContext,
    config: &ServiceConfig,
) -> Result<CatalogRequest> {
    let request_error = |reason: String| FragmentError::Request {
        uri: uri.uri().to_string(),
        reason,
    };

    let base = format!("http://{}:{}/", uri.host(), uri.port());
    let mut url = Url::parse(&base).map_err(|e| request_error(format!("{base}: {e}")))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| request_error(format!("{base} cannot carry a path")))?;
        segments.pop_if_empty().extend([
            config.api_prefix.as_str(),
            config.api_version.as_str(),
            "Fragmenter",
            "getFragments",
        ]);
    }
    url.query_pairs_mut().append_pair("path", uri.data_path());

    let mut headers = Vec::with_capacity(uri.options().len() + 5);
    headers.push(("Accept".to_string(), "application/json".to_string()));
    for opt in uri.options() {
        headers.push((normalize_key_name(&opt.key), opt.value.clone()));
    }
    headers.push(("X-GP-DATA-DIR".to_string(), uri.data_path().to_string()));
    headers.push(("X-GP-SEGMENT-ID".to_string(), ctx.segment_index.to_string()));
    headers.push((
        "X-GP-SEGMENT-COUNT".to_string(),
        ctx.segment_count.to_string(),
    ));
    if let Some(xid) = ctx.xid {
        headers.push(("X-GP-XID".to_string(), xid.to_string()));
    }

    for (name, value) in &headers {
        check_header(name, value).map_err(request_error)?;
    }

    Ok(CatalogRequest { url, headers })
}

/// Option keys and values become HTTP headers and must be legal as such
fn check_header(name: &str, value: &str) -> std::result::Result<(), String> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| format!("invalid header name '{name}': {e}"))?;
    HeaderValue::from_str(value).map_err(|e| format!("invalid value for header {name}: {e}"))?;
    Ok(())
}

/// Blocking HTTP transport to the PXF service
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                FragmentError::ServiceConfig(format!("Failed to create HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &CatalogRequest) -> Result<String> {
        let url = request.url.as_str();
        debug!("requesting fragments from {url}");

        let mut bldr = self.client.get(request.url.clone());
        for (name, value) in &request.headers {
            bldr = bldr.header(name.as_str(), value.as_str());
        }
        let response = bldr.send().map_err(|e| FragmentError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FragmentError::CatalogStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.text().map_err(|e| FragmentError::transport(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxfuri::parse_uri;

    fn uri(text: &str) -> UriDescriptor {
        parse_uri(text).expect("valid uri")
    }

    #[test]
    fn test_requires_fragmenter_or_profile() {
        check_fragmenter_or_profile(&uri("pxf://h:1/d?PROFILE=HdfsTextSimple")).expect("profile");
        check_fragmenter_or_profile(&uri("pxf://h:1/d?fragmenter=a.B")).expect("fragmenter");

        let err = check_fragmenter_or_profile(&uri("pxf://h:1/d?ACCESSOR=x")).unwrap_err();
        assert!(matches!(err, FragmentError::Configuration { .. }));
        assert_eq!(
            err.to_string(),
            "FRAGMENTER or PROFILE option must exist in pxf://h:1/d?ACCESSOR=x"
        );
        assert!(check_fragmenter_or_profile(&uri("pxf://h:1/d")).is_err());
    }

    #[test]
    fn test_build_request() {
        let ctx = QueryContext::new(1, 3, Some(42));
        let req = build_request(
            &uri("pxf://namenode:51200/tmp/dummy 1?Profile=HdfsTextSimple&DELIMITER=,"),
            &ctx,
            &ServiceConfig::default(),
        )
        .expect("request");

        assert_eq!(req.url.host_str(), Some("namenode"));
        assert_eq!(req.url.port(), Some(51200));
        assert_eq!(req.url.path(), "/pxf/v15/Fragmenter/getFragments");
        let pairs: Vec<_> = req.url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "path");
        assert_eq!(pairs[0].1, "tmp/dummy 1");

        assert_eq!(req.headers[0], ("Accept".into(), "application/json".into()));
        assert_eq!(req.header("x-gp-profile"), Some("HdfsTextSimple"));
        assert_eq!(req.header("X-GP-DELIMITER"), Some(","));
        assert_eq!(req.header("X-GP-DATA-DIR"), Some("tmp/dummy 1"));
        assert_eq!(req.header("X-GP-SEGMENT-ID"), Some("1"));
        assert_eq!(req.header("X-GP-SEGMENT-COUNT"), Some("3"));
        assert_eq!(req.header("X-GP-XID"), Some("42"));
    }

    #[test]
    fn test_illegal_header_is_request_error() {
        let ctx = QueryContext::new(0, 1, Some(1));
        for text in [
            "pxf://h:1/d?PROFILE=x&my key=v",
            "pxf://h:1/d?PROFILE=x&K(1)=v",
            "pxf://h:1/d?PROFILE=x&KEY=line\nbreak",
        ] {
            let err = build_request(&uri(text), &ctx, &ServiceConfig::default()).unwrap_err();
            assert!(matches!(err, FragmentError::Request { .. }), "{text}: {err}");
            assert_eq!(err.class(), crate::error::ErrorClass::Syntax);
        }
    }

    #[test]
    fn test_build_request_custom_api_and_ipv6() {
        let config = ServiceConfig {
            api_version: "v16".into(),
            ..Default::default()
        };
        let req = build_request(
            &uri("pxf://[::1]:8080/data?PROFILE=p"),
            &QueryContext::new(0, 1, None),
            &config,
        )
        .expect("request");
        assert_eq!(
            req.url.as_str(),
            "http://[::1]:8080/pxf/v16/Fragmenter/getFragments?path=data"
        );
        assert_eq!(req.header("X-GP-XID"), None);
    }
}
