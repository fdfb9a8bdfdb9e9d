// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::error::UriError;
use crate::parser::parse_uri;

/// One `key=value` pair from the options section. Both sides are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionKeyValue {
    pub key: String,
    pub value: String,
}

impl OptionKeyValue {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A parsed `pxf://host:port/data?options` location.
///
/// The descriptor owns the fragment subset assigned to this segment once
/// fragment retrieval has run. `F` is the fragment type supplied by the
/// fragment layer; the parser itself never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriDescriptor<F = ()> {
    pub(crate) uri: String,
    pub(crate) protocol: String,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) data: String,
    pub(crate) options: Vec<OptionKeyValue>,
    pub(crate) profile: Option<String>,
    pub(crate) fragments: Option<Vec<F>>,
}

impl<F> UriDescriptor<F> {
    /// The original text this descriptor was parsed from
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Directory, file or table identifier between the authority and the options
    pub fn data_path(&self) -> &str {
        &self.data
    }

    /// Options in the order they were written, duplicates included
    pub fn options(&self) -> &[OptionKeyValue] {
        &self.options
    }

    /// The selected profile, from the last option whose key normalizes to
    /// `X-GP-PROFILE`
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Case-insensitive option lookup. The first matching pair wins.
    pub fn option_value(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.key.eq_ignore_ascii_case(key))
            .map(|opt| opt.value.as_str())
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.option_value(key).is_some()
    }

    /// Fragments assigned to this segment, absent until assignment has run
    pub fn fragments(&self) -> Option<&[F]> {
        self.fragments.as_deref()
    }

    /// Attach the segment's fragment subset, releasing any previous one
    pub fn set_fragments(&mut self, fragments: Vec<F>) {
        self.fragments = Some(fragments);
    }

    /// Detach the fragment subset and hand ownership to the caller
    pub fn take_fragments(&mut self) -> Option<Vec<F>> {
        self.fragments.take()
    }

    /// Drop the fragment subset. Returns how many fragments were released.
    pub fn release_fragments(&mut self) -> usize {
        self.fragments.take().map_or(0, |frags| frags.len())
    }
}

impl<F> fmt::Display for UriDescriptor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}:{}/{}",
            self.protocol, self.host, self.port, self.data
        )?;
        for (i, opt) in self.options.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, opt.key, opt.value)?;
        }
        Ok(())
    }
}

impl<F> FromStr for UriDescriptor<F> {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uri(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> UriDescriptor<u32> {
        parse_uri("pxf://namenode:51200/tmp/dummy1?FRAGMENTER=HdfsDataFragmenter&Profile=HdfsTextSimple&fragmenter=second")
            .expect("valid uri")
    }

    #[test]
    fn test_option_lookup_is_case_insensitive() {
        let uri = descriptor();
        assert_eq!(uri.option_value("fragmenter"), Some("HdfsDataFragmenter"));
        assert_eq!(uri.option_value("PROFILE"), Some("HdfsTextSimple"));
        assert!(uri.has_option("Fragmenter"));
        assert!(!uri.has_option("resolver"));
    }

    #[test]
    fn test_fragment_lifecycle() {
        let mut uri = descriptor();
        assert!(uri.fragments().is_none());

        uri.set_fragments(vec![1, 2, 3]);
        assert_eq!(uri.fragments(), Some(&[1, 2, 3][..]));

        assert_eq!(uri.release_fragments(), 3);
        assert!(uri.fragments().is_none());
        assert_eq!(uri.release_fragments(), 0);

        uri.set_fragments(vec![7]);
        assert_eq!(uri.take_fragments(), Some(vec![7]));
        assert!(uri.fragments().is_none());
    }

    #[test]
    fn test_display_reconstructs_uri() {
        let uri = descriptor();
        assert_eq!(
            uri.to_string(),
            "pxf://namenode:51200/tmp/dummy1?FRAGMENTER=HdfsDataFragmenter&Profile=HdfsTextSimple&fragmenter=second"
        );

        let bare: UriDescriptor = "pxf://[::1]:8080/table".parse().expect("valid uri");
        assert_eq!(bare.to_string(), "pxf://[::1]:8080/table");
    }
}
