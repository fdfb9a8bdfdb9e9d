// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Staged parser for PXF location URIs
//!
//! ```text
//! <protocol>://<host>:<port>/<data>?<key>=<value>&<key>=<value>&...
//! ```
//!
//! Each stage takes the unparsed remainder and returns its component plus
//! the new remainder. Stages run strictly left to right with no
//! backtracking; the first failure aborts the parse.

use log::debug;

use crate::descriptor::{OptionKeyValue, UriDescriptor};
use crate::error::{Result, UriError};

/// The only accepted protocol name
pub const PXF_PROTOCOL: &str = "pxf";

/// Normalized form of the option key that selects the reader profile
pub const PROFILE_KEY: &str = "X-GP-PROFILE";

const PROTOCOL_SEPARATOR: &str = "://";
const OPTIONS_MARKER: char = '?';
const OPTION_SEPARATOR: char = '&';
const KEY_VALUE_SEPARATOR: char = '=';
const MIN_OPTIONS_LEN: usize = 2;

/// Convert an option key to its HTTP header name: `X-GP-` plus the
/// upper-cased key.
pub fn normalize_key_name(key: &str) -> String {
    format!("X-GP-{}", key.to_ascii_uppercase())
}

/// Parse a PXF URI into a descriptor, or fail with the first syntax error.
pub fn parse_uri<F>(uri: &str) -> Result<UriDescriptor<F>> {
    let parsed = parse_sections(uri);
    if let Err(err) = &parsed {
        debug!("rejected PXF URI: {err}");
    }
    parsed
}

fn parse_sections<F>(uri: &str) -> Result<UriDescriptor<F>> {
    let (protocol, rest) = parse_protocol(uri, uri)?;
    let (authority, rest) = parse_authority(uri, rest)?;
    let (data, rest) = parse_data(rest);
    let options = parse_options(uri, rest)?;

    let profile = options
        .iter()
        .rev()
        .find(|opt| normalize_key_name(&opt.key) == PROFILE_KEY)
        .map(|opt| opt.value.clone());

    Ok(UriDescriptor {
        uri: uri.to_string(),
        protocol: protocol.to_string(),
        host: authority.host.to_string(),
        port: authority.port,
        data: data.to_string(),
        options,
        profile,
        fragments: None,
    })
}

/// Host and port split out of the authority section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Authority<'a> {
    host: &'a str,
    port: u16,
}

fn parse_protocol<'a>(uri: &str, rest: &'a str) -> Result<(&'a str, &'a str)> {
    let Some((protocol, after)) = rest.split_once(PROTOCOL_SEPARATOR) else {
        return Err(UriError::InvalidUri {
            uri: uri.to_string(),
        });
    };

    if !protocol.eq_ignore_ascii_case(PXF_PROTOCOL) {
        return Err(UriError::UnsupportedProtocol {
            uri: uri.to_string(),
            protocol: protocol.to_string(),
        });
    }

    Ok((protocol, after))
}

fn parse_authority<'a>(uri: &str, rest: &'a str) -> Result<(Authority<'a>, &'a str)> {
    let missing = || UriError::MissingAuthority {
        uri: uri.to_string(),
        section: rest.to_string(),
    };

    let (authority, after) = rest.split_once('/').ok_or_else(missing)?;
    if authority.is_empty() {
        return Err(missing());
    }

    let Some(colon) = port_separator(authority) else {
        return Err(UriError::MissingPort {
            uri: uri.to_string(),
            authority: authority.to_string(),
        });
    };

    let host = &authority[..colon];
    let port_text = &authority[colon + 1..];
    if host.is_empty() {
        return Err(UriError::MissingHost {
            uri: uri.to_string(),
            authority: authority.to_string(),
        });
    }

    let port = parse_port(port_text).ok_or_else(|| UriError::InvalidPort {
        uri: uri.to_string(),
        host: host.to_string(),
        port: port_text.to_string(),
    })?;

    Ok((Authority { host, port }, after))
}

/// Byte offset of the last `:` that is not inside an IPv6 `[...]` group
fn port_separator(authority: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut found = None;
    for (pos, c) in authority.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => found = Some(pos),
            _ => {}
        }
    }
    found
}

fn parse_port(text: &str) -> Option<u16> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Leading zeros are legal; strip them so long zero runs don't overflow
    let digits = text.trim_start_matches('0');
    if digits.is_empty() || digits.len() > 5 {
        return None;
    }
    match digits.parse::<u32>() {
        Ok(port) if (1..=u32::from(u16::MAX)).contains(&port) => u16::try_from(port).ok(),
        _ => None,
    }
}

/// The data path ends at the last `?`; any earlier `?` belongs to the path
fn parse_data(rest: &str) -> (&str, &str) {
    match rest.rfind(OPTIONS_MARKER) {
        Some(pos) => rest.split_at(pos),
        None => (rest, ""),
    }
}

fn parse_options(uri: &str, rest: &str) -> Result<Vec<OptionKeyValue>> {
    let Some(section) = rest.strip_prefix(OPTIONS_MARKER) else {
        return Ok(Vec::new());
    };

    if section.len() < MIN_OPTIONS_LEN {
        return Err(UriError::InvalidOptions {
            uri: uri.to_string(),
            section: section.to_string(),
        });
    }

    section
        .split(OPTION_SEPARATOR)
        .filter(|pair| !pair.is_empty())
        .map(|pair| parse_option(uri, pair))
        .collect()
}

fn parse_option(uri: &str, pair: &str) -> Result<OptionKeyValue> {
    let err_option = || pair.to_string();

    let Some((key, value)) = pair.split_once(KEY_VALUE_SEPARATOR) else {
        return Err(UriError::MissingEquals {
            uri: uri.to_string(),
            option: err_option(),
        });
    };
    if value.contains(KEY_VALUE_SEPARATOR) {
        return Err(UriError::DuplicateEquals {
            uri: uri.to_string(),
            option: err_option(),
        });
    }
    if key.is_empty() {
        return Err(UriError::MissingKey {
            uri: uri.to_string(),
            option: err_option(),
        });
    }
    if value.is_empty() {
        return Err(UriError::MissingValue {
            uri: uri.to_string(),
            option: err_option(),
        });
    }

    Ok(OptionKeyValue::new(key, value))
}
