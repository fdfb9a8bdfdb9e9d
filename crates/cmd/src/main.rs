// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::common::{SegmentArgs, ServiceArgs};
use fragmenter::HttpTransport;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "pxf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Enable debug logging, including the fetched fragment list
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a PXF location and show its parts
    Parse {
        /// Location of the form pxf://host:port/data?KEY=VALUE&...
        uri: String,
    },
    /// Fetch fragments and show the ones this segment reads
    Fragments {
        uri: String,
        #[command(flatten)]
        segment: SegmentArgs,
        #[command(flatten)]
        service: ServiceArgs,
        /// Show the full normalized list instead of this segment's subset
        #[arg(long)]
        all: bool,
    },
    /// Fetch fragments once and show the assignment for every segment
    Assign {
        uri: String,
        #[arg(long, env = "PXF_SEGMENT_COUNT")]
        segment_count: u32,
        #[arg(long, env = "PXF_XID")]
        xid: u64,
        #[command(flatten)]
        service: ServiceArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        diagnostics::init_with_level(diagnostics::LevelFilter::Debug);
    } else {
        diagnostics::init();
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Parse { uri } => cmd::parse_command(&uri, &mut out)?,
        Commands::Fragments {
            uri,
            segment,
            service,
            all,
        } => {
            let config = service.load()?;
            let transport = HttpTransport::new(&config)?;
            cmd::fragments_command(
                &uri,
                &segment.query_context(),
                &config,
                all,
                &transport,
                &mut out,
            )?;
        }
        Commands::Assign {
            uri,
            segment_count,
            xid,
            service,
        } => {
            let config = service.load()?;
            let transport = HttpTransport::new(&config)?;
            cmd::assign_command(&uri, segment_count, xid, &config, &transport, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
