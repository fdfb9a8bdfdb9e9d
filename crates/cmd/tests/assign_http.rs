// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use cmd::common::load_service_config;
use cmd::{assign_command, fragments_command};
use fragmenter::{HttpTransport, QueryContext};
use mockito::{Matcher, Server};

const BODY: &str = r#"{"PXFFragments":[
    {"index":0,"sourceName":"sales/2024.csv","metadata":"m0","replicas":["dn1","dn2"]},
    {"index":1,"sourceName":"sales/2024.csv","metadata":"m1","replicas":["dn2"]},
    {"index":0,"sourceName":"sales/empty.csv","replicas":[]},
    {"index":0,"sourceName":"sales/2025.csv","metadata":"m2","replicas":["dn3"]}
]}"#;

#[test]
fn test_assign_against_service() -> Result<()> {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/pxf/v15/Fragmenter/getFragments")
        .match_query(Matcher::UrlEncoded("path".into(), "sales".into()))
        .match_header("x-gp-fragmenter", "org.acme.SalesFragmenter")
        .with_status(200)
        .with_body(BODY)
        .expect(1)
        .create();

    let config = load_service_config(None)?;
    let transport = HttpTransport::new(&config)?;
    let uri = format!(
        "pxf://{}/sales?FRAGMENTER=org.acme.SalesFragmenter",
        server.host_with_port()
    );

    let mut out = Vec::new();
    assign_command(&uri, 2, 3, &config, &transport, &mut out)?;
    mock.assert();

    // shift = 3 mod 2 = 1
    assert_eq!(
        String::from_utf8(out)?,
        "3 fragments over 2 segments (xid 3)\n\
         segment 0: 1 fragments\n  sales/2024.csv#1\n\
         segment 1: 2 fragments\n  sales/2024.csv#0\n  sales/2025.csv#0\n"
    );
    Ok(())
}

#[test]
fn test_fragments_against_service() -> Result<()> {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/pxf/v15/Fragmenter/getFragments")
        .match_query(Matcher::Any)
        .match_header("x-gp-segment-id", "0")
        .with_status(200)
        .with_body(BODY)
        .create();

    let config = load_service_config(None)?;
    let transport = HttpTransport::new(&config)?;
    let uri = format!("pxf://{}/sales?PROFILE=HdfsTextSimple", server.host_with_port());

    let mut out = Vec::new();
    fragments_command(
        &uri,
        &QueryContext::new(0, 2, Some(3)),
        &config,
        false,
        &transport,
        &mut out,
    )?;
    mock.assert();

    let json: serde_json::Value = serde_json::from_slice(&out)?;
    let list = json.as_array().cloned().unwrap_or_default();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["index"], 1);
    assert_eq!(list[0]["replicas"][0]["ip"], "localhost");
    Ok(())
}

#[test]
fn test_service_unreachable() -> Result<()> {
    let config = load_service_config(None)?;
    let transport = HttpTransport::new(&config)?;

    let mut out = Vec::new();
    let err = fragments_command(
        "pxf://127.0.0.1:1/sales?PROFILE=HdfsTextSimple",
        &QueryContext::new(0, 1, Some(1)),
        &config,
        true,
        &transport,
        &mut out,
    )
    .unwrap_err();

    let cause = err.downcast_ref::<fragmenter::FragmentError>();
    assert_eq!(
        cause.map(fragmenter::FragmentError::class),
        Some(fragmenter::ErrorClass::Transport)
    );
    assert!(out.is_empty());
    Ok(())
}
