// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::config::ServiceAddress;
use crate::model::FragmentDescriptor;

/// Point every replica of every fragment at the PXF service.
///
/// The service, not the storage node named by the catalog, serves the
/// fragment bytes, so the catalog's host hints are discarded.
pub fn assign_service_location(fragments: &mut [FragmentDescriptor], service: &ServiceAddress) {
    for replica in fragments.iter_mut().flat_map(|f| f.replicas.iter_mut()) {
        replica.ip.clone_from(&service.host);
        replica.rest_port = Some(service.port);
    }
}
