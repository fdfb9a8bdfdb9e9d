// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax errors produced while parsing a PXF location URI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UriError>;

/// A malformed PXF URI.
///
/// Every variant carries the complete URI text and the substring that
/// failed to parse. All of them belong to the same "syntax error" class:
/// the caller must abort whatever requested the parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("Invalid URI {uri}")]
    InvalidUri { uri: String },

    #[error("Invalid URI {uri} : unsupported protocol '{protocol}'")]
    UnsupportedProtocol { uri: String, protocol: String },

    #[error("Invalid URI {uri} : missing authority section")]
    MissingAuthority { uri: String, section: String },

    #[error("Invalid URI {uri} : missing host in authority '{authority}'")]
    MissingHost { uri: String, authority: String },

    #[error("Invalid URI {uri} : missing port in authority '{authority}'")]
    MissingPort { uri: String, authority: String },

    #[error("Invalid port: {port} for authority host {host}")]
    InvalidPort {
        uri: String,
        host: String,
        port: String,
    },

    #[error("Invalid URI {uri}: invalid option after '?'")]
    InvalidOptions { uri: String, section: String },

    #[error("Invalid URI {uri}: option '{option}' missing '='")]
    MissingEquals { uri: String, option: String },

    #[error("Invalid URI {uri}: option '{option}' contains duplicate '='")]
    DuplicateEquals { uri: String, option: String },

    #[error("Invalid URI {uri}: option '{option}' missing key before '='")]
    MissingKey { uri: String, option: String },

    #[error("Invalid URI {uri}: option '{option}' missing value after '='")]
    MissingValue { uri: String, option: String },
}

impl UriError {
    /// The full URI text that failed to parse
    pub fn uri(&self) -> &str {
        match self {
            UriError::InvalidUri { uri }
            | UriError::UnsupportedProtocol { uri, .. }
            | UriError::MissingAuthority { uri, .. }
            | UriError::MissingHost { uri, .. }
            | UriError::MissingPort { uri, .. }
            | UriError::InvalidPort { uri, .. }
            | UriError::InvalidOptions { uri, .. }
            | UriError::MissingEquals { uri, .. }
            | UriError::DuplicateEquals { uri, .. }
            | UriError::MissingKey { uri, .. }
            | UriError::MissingValue { uri, .. } => uri,
        }
    }

    /// The section of the URI responsible for the failure
    pub fn offending(&self) -> &str {
        match self {
            UriError::InvalidUri { uri } => uri,
            UriError::UnsupportedProtocol { protocol, .. } => protocol,
            UriError::MissingAuthority { section, .. } => section,
            UriError::MissingHost { authority, .. } | UriError::MissingPort { authority, .. } => {
                authority
            }
            UriError::InvalidPort { port, .. } => port,
            UriError::InvalidOptions { section, .. } => section,
            UriError::MissingEquals { option, .. }
            | UriError::DuplicateEquals { option, .. }
            | UriError::MissingKey { option, .. }
            | UriError::MissingValue { option, .. } => option,
        }
    }
}
