// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::{Context, Result};
use fragmenter::{
    FragmentDescriptor, QueryContext, ServiceConfig, Transport, filter_fragments_for_segment,
};

/// Fetch the fragment list once and show which segment reads what
pub fn assign_command<T, W>(
    uri: &str,
    segment_count: u32,
    xid: u64,
    config: &ServiceConfig,
    transport: &T,
    out: &mut W,
) -> Result<()>
where
    T: Transport + ?Sized,
    W: Write,
{
    let uri = fragmenter::validate_location(uri)
        .with_context(|| format!("Invalid PXF location: {uri}"))?;
    anyhow::ensure!(segment_count > 0, "segment count must be at least 1");
    let ctx = QueryContext::new(0, segment_count, Some(xid));

    let fragments = fragmenter::fetch_fragments(&uri, transport, &ctx, config)
        .with_context(|| format!("Failed to get fragments for {}", uri.uri()))?;

    writeln!(
        out,
        "{} fragments over {segment_count} segments (xid {xid})",
        fragments.len()
    )?;
    for segment in 0..segment_count {
        let owned = filter_fragments_for_segment(Some(fragments.clone()), &ctx.for_segment(segment))?;
        writeln!(out, "segment {segment}: {} fragments", owned.len())?;
        for frag in &owned {
            writeln!(out, "  {}", fragment_label(frag))?;
        }
    }
    Ok(())
}

fn fragment_label(frag: &FragmentDescriptor) -> String {
    let name = frag.source_name.as_deref().unwrap_or("unnamed");
    match frag.index {
        Some(index) => format!("{name}#{index}"),
        None => name.to_string(),
    }
}
