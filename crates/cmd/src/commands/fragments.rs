// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::{Context, Result};
use fragmenter::{QueryContext, ServiceConfig, Transport};

/// Print the fragments this segment owns, or the whole normalized list
pub fn fragments_command<T, W>(
    uri: &str,
    ctx: &QueryContext,
    config: &ServiceConfig,
    show_all: bool,
    transport: &T,
    out: &mut W,
) -> Result<()>
where
    T: Transport + ?Sized,
    W: Write,
{
    let mut uri = fragmenter::validate_location(uri)
        .with_context(|| format!("Invalid PXF location: {uri}"))?;

    let fragments = if show_all {
        fragmenter::fetch_fragments(&uri, transport, ctx, config)
            .with_context(|| format!("Failed to get fragments for {}", uri.uri()))?
    } else {
        fragmenter::set_fragments(&mut uri, transport, ctx, config)
            .with_context(|| format!("Failed to assign fragments for {}", uri.uri()))?;
        uri.take_fragments().unwrap_or_default()
    };

    log::info!(
        "segment {} of {}: {} fragments",
        ctx.segment_index,
        ctx.segment_count,
        fragments.len()
    );
    serde_json::to_writer_pretty(&mut *out, &fragments)?;
    writeln!(out)?;
    Ok(())
}
