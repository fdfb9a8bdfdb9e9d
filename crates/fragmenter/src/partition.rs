// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Work allocation of fragments across segments
//!
//! Segment `S` of `N` processes the element at position `I` when
//!
//! ```text
//! S == (I + (XID mod N)) mod N
//! ```
//!
//! The distributed transaction id `XID` is identical on every segment of a
//! query and differs between queries, so each segment computes the same
//! partition without talking to the others, and short fragment lists do
//! not always land on segment 0.

use std::num::NonZeroU32;

use log::{debug, info};

use crate::context::QueryContext;
use crate::error::{FragmentError, Result};

/// The segment that owns the element at `position`
pub fn segment_for_position(position: usize, xid: u64, segment_count: NonZeroU32) -> u32 {
    let count = u64::from(segment_count.get());
    let shift = xid % count;
    let owner = (position as u64 % count + shift) % count;
    // owner < count <= u32::MAX
    owner as u32
}

/// Keep only the elements this segment must process.
///
/// Retained elements keep their relative order; all others are dropped.
/// `None` stands for a missing list and is an internal error, unlike an
/// empty list which simply yields an empty result.
pub fn filter_fragments_for_segment<T>(
    fragments: Option<Vec<T>>,
    ctx: &QueryContext,
) -> Result<Vec<T>> {
    let Some(mut fragments) = fragments else {
        return Err(FragmentError::NullFragmentList);
    };
    let xid = ctx.seed()?;
    let segment_count = ctx.checked_segment_count()?;

    let total = fragments.len();
    debug!(
        "allocating {total} fragments: segment {} of {}, xid {xid}, shift {}",
        ctx.segment_index,
        segment_count,
        xid % u64::from(segment_count.get())
    );

    let mut position = 0usize;
    fragments.retain(|_| {
        let owner = segment_for_position(position, xid, segment_count);
        position += 1;
        owner == ctx.segment_index
    });

    info!(
        "segment {} keeps {} of {total} fragments",
        ctx.segment_index,
        fragments.len()
    );
    Ok(fragments)
}
