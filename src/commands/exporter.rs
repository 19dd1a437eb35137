// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::Gateway;
use crate::utils::require_current_user;
use anyhow::Result;
use rusqlite::params;
use serde_json::json;

pub fn handle(gateway: &Gateway, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(gateway, sub),
        _ => Ok(()),
    }
}

fn export_transactions(gateway: &Gateway, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let user = require_current_user(gateway.connection())?;

    let mut stmt = gateway.connection().prepare(
        "SELECT t.transaction_date, p.name as project, t.kind, t.amount, t.category, t.description
         FROM transactions t
         JOIN projects p ON t.project_id=p.id
         WHERE p.user_id=?1
         ORDER BY t.transaction_date, t.id",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "project",
                "kind",
                "amount",
                "category",
                "description",
            ])?;
            for row in rows {
                let (d, p, k, amt, cat, desc) = row?;
                wtr.write_record([d, p, k, amt, cat, desc])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, p, k, amt, cat, desc) = row?;
                items.push(json!({
                    "date": d, "project": p, "kind": k, "amount": amt,
                    "category": cat, "description": desc
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => anyhow::bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
