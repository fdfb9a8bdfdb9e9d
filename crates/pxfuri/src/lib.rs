// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! PXF location URI parser
//!
//! External tables name their data source with a connection string of the
//! form
//!
//! ```text
//! pxf://<host>:<port>/<data-path>[?key1=value1&key2=value2&...]
//! ```
//!
//! This crate turns that string into a [`UriDescriptor`] or rejects it with
//! a [`UriError`] naming the malformed section. It has no knowledge of the
//! fragments that are later attached to the descriptor.
//!
//! ```
//! use pxfuri::{UriDescriptor, parse_uri};
//!
//! let uri: UriDescriptor = parse_uri("pxf://namenode:51200/tmp/sales?PROFILE=HdfsTextSimple")?;
//! assert_eq!(uri.host(), "namenode");
//! assert_eq!(uri.port(), 51200);
//! assert_eq!(uri.data_path(), "tmp/sales");
//! assert_eq!(uri.profile(), Some("HdfsTextSimple"));
//! # Ok::<(), pxfuri::UriError>(())
//! ```

mod descriptor;
mod error;
mod parser;

pub use descriptor::{OptionKeyValue, UriDescriptor};
pub use error::{Result, UriError};
pub use parser::{PROFILE_KEY, PXF_PROTOCOL, normalize_key_name, parse_uri};
