// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for fragment retrieval and assignment

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FragmentError>;

/// Every failure is fatal to the query that asked for fragments; nothing
/// here is retried and no partial fragment list is ever returned.
#[derive(Error, Debug)]
pub enum FragmentError {
    #[error(transparent)]
    Uri(#[from] pxfuri::UriError),

    #[error("FRAGMENTER or PROFILE option must exist in {uri}")]
    Configuration { uri: String },

    /// Service settings could not be loaded or are invalid
    #[error("Service configuration error: {0}")]
    ServiceConfig(String),

    #[error("cannot build fragment request for {uri}: {reason}")]
    Request { uri: String, reason: String },

    #[error("failed to send fragment request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("fragment service responded with error [{status}] from {url}: {body}")]
    CatalogStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to parse fragment catalog: {reason}")]
    CatalogDecode { reason: String },

    #[error("internal error in fragment assignment: cannot get distributed transaction identifier")]
    SeedUnavailable,

    #[error("internal error in fragment assignment: fragment list is null")]
    NullFragmentList,

    #[error("internal error in fragment assignment: segment {index} of {count} is out of range")]
    InvalidSegment { index: u32, count: u32 },
}

/// Coarse classification of a [`FragmentError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The location URI (or the request derived from it) is malformed
    Syntax,
    /// Required options or service settings are missing or invalid
    Configuration,
    /// The catalog response is not a fragment document
    CatalogDecode,
    /// The fragment service could not be reached or refused the request
    Transport,
    /// An upstream invariant was violated
    Internal,
}

impl FragmentError {
    pub fn transport<E>(url: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FragmentError::Transport {
            url: url.into(),
            source: Box::new(source),
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        FragmentError::CatalogDecode {
            reason: reason.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            FragmentError::Uri(_) | FragmentError::Request { .. } => ErrorClass::Syntax,
            FragmentError::Configuration { .. } | FragmentError::ServiceConfig(_) => {
                ErrorClass::Configuration
            }
            FragmentError::Transport { .. } | FragmentError::CatalogStatus { .. } => {
                ErrorClass::Transport
            }
            FragmentError::CatalogDecode { .. } => ErrorClass::CatalogDecode,
            FragmentError::SeedUnavailable
            | FragmentError::NullFragmentList
            | FragmentError::InvalidSegment { .. } => ErrorClass::Internal,
        }
    }
}
