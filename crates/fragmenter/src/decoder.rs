// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding of the `getFragments` catalog response
//!
//! ```json
//! {"PXFFragments":[{"index":0,"userData":null,"sourceName":"demo/text2.csv",
//!   "metadata":"rO0ABXcQ...","replicas":["10.207.4.23","10.207.4.23"]}]}
//! ```
//!
//! Every per-fragment field is optional. A fragment without replicas
//! describes an empty source object and is dropped here, so it can never
//! reach the partitioner.

use log::debug;
use serde_json::{Map, Value};

use crate::error::{FragmentError, Result};
use crate::model::{FragmentDescriptor, ReplicaLocation};

/// Top-level key holding the fragment array
pub const FRAGMENTS_KEY: &str = "PXFFragments";

/// Decode a catalog response into fragments, preserving response order
pub fn parse_fragments_response(body: &str) -> Result<Vec<FragmentDescriptor>> {
    let whole: Value = serde_json::from_str(body).map_err(|e| FragmentError::decode(e.to_string()))?;

    let entries = whole
        .get(FRAGMENTS_KEY)
        .ok_or_else(|| FragmentError::decode(format!("missing '{FRAGMENTS_KEY}' key")))?
        .as_array()
        .ok_or_else(|| FragmentError::decode(format!("'{FRAGMENTS_KEY}' is not an array")))?;

    let mut fragments = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        let fragment = decode_fragment(entry);
        if fragment.is_empty_source() {
            debug!(
                "dropping fragment at position {position} ({}) with no replicas",
                fragment.source_name.as_deref().unwrap_or("unnamed")
            );
            continue;
        }
        fragments.push(fragment);
    }
    Ok(fragments)
}

fn decode_fragment(entry: &Value) -> FragmentDescriptor {
    // Non-object entries have no fields and fall out via the replica check
    let empty = Map::new();
    let fields = entry.as_object().unwrap_or(&empty);

    let replicas = match fields.get("replicas") {
        Some(Value::Array(hosts)) => hosts
            .iter()
            .map(|host| ReplicaLocation::new(scalar_string(host).unwrap_or_default()))
            .collect(),
        _ => Vec::new(),
    };

    FragmentDescriptor {
        index: fields.get("index").and_then(scalar_int),
        source_name: fields.get("sourceName").and_then(scalar_string),
        replicas,
        metadata: fields.get("metadata").and_then(scalar_string),
        user_data: fields.get("userData").and_then(scalar_string),
        profile: fields.get("profile").and_then(scalar_string),
    }
}

/// JSON null is absent; strings are taken verbatim; any other value keeps
/// its JSON text.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn scalar_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}
