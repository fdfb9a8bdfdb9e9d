// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use crate::error::{FragmentError, Result};

/// Per-query execution identity, supplied once by the query executor.
///
/// All segments of one query see the same `segment_count` and `xid`; only
/// `segment_index` differs between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    /// Zero-based index of this segment
    pub segment_index: u32,
    pub segment_count: u32,
    /// Distributed transaction id, `None` outside a distributed transaction
    pub xid: Option<u64>,
}

impl QueryContext {
    pub fn new(segment_index: u32, segment_count: u32, xid: Option<u64>) -> Self {
        Self {
            segment_index,
            segment_count,
            xid,
        }
    }

    /// The same query seen from another segment
    pub fn for_segment(&self, segment_index: u32) -> Self {
        Self {
            segment_index,
            ..*self
        }
    }

    /// The segment count, checked to be non-zero and to contain this segment
    pub(crate) fn checked_segment_count(&self) -> Result<NonZeroU32> {
        match NonZeroU32::new(self.segment_count) {
            Some(count) if self.segment_index < count.get() => Ok(count),
            _ => Err(FragmentError::InvalidSegment {
                index: self.segment_index,
                count: self.segment_count,
            }),
        }
    }

    pub(crate) fn seed(&self) -> Result<u64> {
        self.xid.ok_or(FragmentError::SeedUnavailable)
    }
}
