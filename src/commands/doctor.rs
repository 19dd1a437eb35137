// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::Gateway;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(gateway: &Gateway) -> Result<()> {
    let conn = gateway.connection();
    let mut rows = Vec::new();

    // 1) Stored amounts the constraints should have rejected
    let mut stmt = conn.prepare(
        "SELECT id, amount FROM transactions WHERE CAST(amount AS NUMERIC) < 0",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        rows.push(vec!["negative_amount".into(), format!("tx {} = {}", id, amount)]);
    }

    // 2) Kinds outside the closed enumeration
    let mut stmt2 = conn.prepare(
        "SELECT DISTINCT kind FROM transactions WHERE kind NOT IN ('credit','debit')",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let kind: String = r.get(0)?;
        rows.push(vec!["unknown_kind".into(), kind]);
    }

    // 3) Transactions whose project is gone (cascade should prevent this)
    let orphans: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions t LEFT JOIN projects p ON t.project_id=p.id
         WHERE p.id IS NULL",
        [],
        |r| r.get(0),
    )?;
    if orphans > 0 {
        rows.push(vec!["orphaned_transactions".into(), orphans.to_string()]);
    }

    // 4) Future-dated activity
    let mut stmt3 = conn.prepare(
        "SELECT id, transaction_date FROM transactions WHERE transaction_date > date('now')",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        rows.push(vec!["future_dated".into(), format!("tx {} on {}", id, d)]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
