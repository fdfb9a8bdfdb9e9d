// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Fragment retrieval and per-segment assignment for PXF external tables
//!
//! Every segment of a query asks the PXF service for the fragments of the
//! same data path, rewrites their locations to point at the service, and
//! keeps the subset it owns under a transaction-seeded round robin. The
//! segments never communicate; they agree because they see the same list
//! and the same transaction id.

mod client;
mod config;
mod context;
mod decoder;
mod error;
mod model;
mod normalizer;
mod partition;

pub use client::{
    CatalogRequest, HttpTransport, Transport, build_request, check_fragmenter_or_profile,
};
pub use config::{
    DEFAULT_API_PREFIX, DEFAULT_API_VERSION, DEFAULT_SERVICE_HOST, DEFAULT_SERVICE_PORT,
    DEFAULT_TIMEOUT_SECONDS, ServiceAddress, ServiceConfig, load_config, validate_config,
};
pub use context::QueryContext;
pub use decoder::{FRAGMENTS_KEY, parse_fragments_response};
pub use error::{ErrorClass, FragmentError, Result};
pub use model::{FragmentDescriptor, FragmentList, PxfUri, ReplicaLocation};
pub use normalizer::assign_service_location;
pub use partition::{filter_fragments_for_segment, segment_for_position};

use log::debug;
use pxfuri::UriDescriptor;

/// Fetch the full, normalized fragment list for `uri`.
///
/// No fragment is assigned to a segment yet; every segment of the query
/// receives the same list from this call.
pub fn fetch_fragments<F, T>(
    uri: &UriDescriptor<F>,
    transport: &T,
    ctx: &QueryContext,
    config: &ServiceConfig,
) -> Result<Vec<FragmentDescriptor>>
where
    T: Transport + ?Sized,
{
    check_fragmenter_or_profile(uri)?;
    let request = build_request(uri, ctx, config)?;
    let body = transport.get(&request)?;
    let mut fragments = parse_fragments_response(&body)?;
    assign_service_location(&mut fragments, &config.service_address());

    debug!("{}", FragmentList(&fragments));
    Ok(fragments)
}

/// Fetch fragments for `uri` and attach the subset owned by this segment.
///
/// On failure the descriptor is left without fragments.
pub fn set_fragments<T>(
    uri: &mut PxfUri,
    transport: &T,
    ctx: &QueryContext,
    config: &ServiceConfig,
) -> Result<()>
where
    T: Transport + ?Sized,
{
    uri.release_fragments();
    let fragments = fetch_fragments(uri, transport, ctx, config)?;
    let owned = filter_fragments_for_segment(Some(fragments), ctx)?;
    uri.set_fragments(owned);
    Ok(())
}

/// Parse a location without contacting the service
pub fn validate_location(uri: &str) -> Result<PxfUri> {
    Ok(pxfuri::parse_uri(uri)?)
}

/// The lifetime of one external table scan on one segment.
///
/// Opening parses the location and assigns fragments; closing releases
/// them. Dropping an unclosed context releases them too.
#[derive(Debug)]
pub struct ImportContext {
    uri: PxfUri,
}

impl ImportContext {
    pub fn open<T>(
        location: &str,
        transport: &T,
        ctx: &QueryContext,
        config: &ServiceConfig,
    ) -> Result<Self>
    where
        T: Transport + ?Sized,
    {
        let mut uri = validate_location(location)?;
        set_fragments(&mut uri, transport, ctx, config)?;
        Ok(Self { uri })
    }

    pub fn uri(&self) -> &PxfUri {
        &self.uri
    }

    /// Fragments this segment must read
    pub fn fragments(&self) -> &[FragmentDescriptor] {
        self.uri.fragments().unwrap_or_default()
    }

    /// Release the descriptor. Returns how many fragments were held.
    pub fn close(mut self) -> usize {
        let released = self.uri.release_fragments();
        debug!("released {released} fragments for {}", self.uri.uri());
        released
    }
}
