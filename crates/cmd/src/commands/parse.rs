// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::{Context, Result};

/// Parse a location and describe its parts without contacting the service
pub fn parse_command<W: Write>(uri: &str, out: &mut W) -> Result<()> {
    let uri = fragmenter::validate_location(uri)
        .with_context(|| format!("Invalid PXF location: {uri}"))?;

    writeln!(out, "protocol: {}", uri.protocol())?;
    writeln!(out, "host:     {}", uri.host())?;
    writeln!(out, "port:     {}", uri.port())?;
    writeln!(out, "data:     {}", uri.data_path())?;
    writeln!(out, "profile:  {}", uri.profile().unwrap_or("(none)"))?;
    if uri.options().is_empty() {
        writeln!(out, "options:  (none)")?;
    } else {
        writeln!(out, "options:")?;
        for opt in uri.options() {
            writeln!(
                out,
                "  {}={}  [{}]",
                opt.key,
                opt.value,
                pxfuri::normalize_key_name(&opt.key)
            )?;
        }
    }
    Ok(())
}
