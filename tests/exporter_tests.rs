// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use siteledger::models::{NewProject, NewTransaction, TxKind};
use siteledger::{cli, commands::exporter, db, gateway::Gateway, utils};
use serde_json::json;
use std::str::FromStr;
use tempfile::tempdir;

fn setup() -> Gateway {
    let gw = Gateway::new(db::open_in_memory().unwrap());
    utils::set_current_user(gw.connection(), "u1").unwrap();
    let p = gw
        .insert_project(
            "u1",
            &NewProject {
                name: "Downtown Office".into(),
                location: "Springfield".into(),
                project_type: "commercial".into(),
                base_contract_amount: Decimal::from_str("250000").unwrap(),
            },
        )
        .unwrap();
    gw.insert_transaction(
        "u1",
        &NewTransaction {
            project_id: p.id,
            kind: TxKind::Debit,
            amount: Decimal::from_str("12.34").unwrap(),
            description: "Concrete delivery".into(),
            transaction_date: Some(chrono::NaiveDate::from_str("2025-01-02").unwrap()),
            category: "materials".into(),
        },
    )
    .unwrap();
    gw
}

#[test]
fn export_transactions_streams_pretty_json() {
    let gw = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "siteledger",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&gw, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "project": "Downtown Office",
                "kind": "debit",
                "amount": "12.34",
                "category": "materials",
                "description": "Concrete delivery"
            }
        ])
    );
}

#[test]
fn export_transactions_writes_csv_for_owner_only() {
    let gw = setup();
    // Another user's activity must not leak into the export.
    let foreign = gw
        .insert_project(
            "u2",
            &NewProject {
                name: "Elsewhere".into(),
                location: "Shelbyville".into(),
                project_type: "industrial".into(),
                base_contract_amount: Decimal::from_str("1000").unwrap(),
            },
        )
        .unwrap();
    gw.insert_transaction(
        "u2",
        &NewTransaction {
            project_id: foreign.id,
            kind: TxKind::Credit,
            amount: Decimal::from_str("999").unwrap(),
            description: "not ours".into(),
            transaction_date: Some(chrono::NaiveDate::from_str("2025-01-03").unwrap()),
            category: String::new(),
        },
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "siteledger",
        "export",
        "transactions",
        "--format",
        "csv",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&gw, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,project,kind,amount,category,description"
    );
    assert_eq!(
        lines.next().unwrap(),
        "2025-01-02,Downtown Office,debit,12.34,materials,Concrete delivery"
    );
    assert!(lines.next().is_none());
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let gw = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "siteledger",
        "export",
        "transactions",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&gw, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
