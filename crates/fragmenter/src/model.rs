// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use pxfuri::UriDescriptor;
use serde::Serialize;

/// A PXF location URI that owns the fragments assigned to this segment
pub type PxfUri = UriDescriptor<FragmentDescriptor>;

/// A network location claimed to hold a copy of a fragment
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaLocation {
    pub ip: String,
    /// Unset until the location normalizer runs
    pub rest_port: Option<u16>,
}

impl ReplicaLocation {
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            rest_port: None,
        }
    }
}

/// One independently readable piece of an external data object
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FragmentDescriptor {
    /// Ordinal assigned by the source; only unique per `source_name`
    pub index: Option<i64>,
    pub source_name: Option<String>,
    pub replicas: Vec<ReplicaLocation>,
    /// Encoded offsets/length, passed through uninterpreted
    pub metadata: Option<String>,
    pub user_data: Option<String>,
    /// Reader profile recommended for this fragment
    pub profile: Option<String>,
}

impl FragmentDescriptor {
    /// A fragment with no replicas comes from an empty source object
    pub fn is_empty_source(&self) -> bool {
        self.replicas.is_empty()
    }
}

/// A fragment list rendered for debug logging
#[derive(Debug, Clone, Copy)]
pub struct FragmentList<'a>(pub &'a [FragmentDescriptor]);

impl fmt::Display for FragmentList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fragment list: ({} elements)", self.0.len())?;
        for frag in self.0 {
            match frag.index {
                Some(index) => writeln!(f, "Fragment index: {index}")?,
                None => writeln!(f, "Fragment index: unset")?,
            }
            for host in &frag.replicas {
                writeln!(f, "replicas: host: {}", host.ip)?;
            }
            writeln!(f, "metadata: {}", frag.metadata.as_deref().unwrap_or("NULL"))?;
            if let Some(user_data) = &frag.user_data {
                writeln!(f, "user data: {user_data}")?;
            }
            if let Some(profile) = &frag.profile {
                writeln!(f, "profile: {profile}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_list_display() {
        let fragments = vec![
            FragmentDescriptor {
                index: Some(3),
                source_name: Some("demo/a.csv".into()),
                replicas: vec![ReplicaLocation::new("10.0.0.1")],
                metadata: Some("md".into()),
                user_data: Some("ud".into()),
                profile: Some("HdfsTextSimple".into()),
            },
            FragmentDescriptor::default(),
        ];
        let text = FragmentList(&fragments).to_string();
        assert!(text.starts_with("Fragment list: (2 elements)\n"));
        assert!(text.contains("Fragment index: 3\nreplicas: host: 10.0.0.1\nmetadata: md\nuser data: ud\nprofile: HdfsTextSimple\n"));
        assert!(text.ends_with("Fragment index: unset\nmetadata: NULL\n"));
    }

    #[test]
    fn test_serializes_with_catalog_field_names() {
        let frag = FragmentDescriptor {
            index: Some(0),
            source_name: Some("demo/a.csv".into()),
            replicas: vec![ReplicaLocation::new("10.0.0.1")],
            ..Default::default()
        };
        let json = serde_json::to_value(&frag).expect("serialize");
        assert_eq!(json["sourceName"], "demo/a.csv");
        assert_eq!(json["replicas"][0]["ip"], "10.0.0.1");
        assert!(json["replicas"][0]["restPort"].is_null());
        assert!(json["userData"].is_null());
    }
}
