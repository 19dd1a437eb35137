// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::Gateway;
use crate::models::{NewTransaction, Transaction, TxKind};
use crate::utils::{
    fmt_money, id_for_project, maybe_print_json, parse_date, parse_decimal, pretty_table,
    require_current_user,
};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

pub fn handle(gateway: &Gateway, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(gateway, sub)?,
        Some(("list", sub)) => list(gateway, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(gateway: &Gateway, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_current_user(gateway.connection())?;
    let project_name = sub.get_one::<String>("project").unwrap().trim();
    let project_id = id_for_project(gateway.connection(), &user, project_name)?;
    let kind = TxKind::from_str(sub.get_one::<String>("kind").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let date = match sub.get_one::<String>("date") {
        Some(raw) => Some(parse_date(raw.trim())?),
        None => None,
    };
    let input = NewTransaction {
        project_id,
        kind,
        amount,
        description: sub
            .get_one::<String>("description")
            .unwrap()
            .trim()
            .to_string(),
        transaction_date: date,
        category: sub
            .get_one::<String>("category")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    };
    let tx = gateway.insert_transaction(&user, &input)?;
    println!(
        "Recorded {} {} on {} for '{}'",
        tx.kind,
        fmt_money(&tx.amount),
        tx.transaction_date,
        project_name
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub project: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

fn list(gateway: &Gateway, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(gateway, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.project.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Project", "Kind", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(gateway: &Gateway, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let user = require_current_user(gateway.connection())?;
    let projects = gateway.list_projects_for_user(&user)?;

    let selected: Vec<i64> = match sub.get_one::<String>("project") {
        Some(name) => vec![id_for_project(gateway.connection(), &user, name.trim())?],
        None => projects.iter().map(|p| p.id).collect(),
    };
    let transactions = gateway.list_transactions_for_projects(&user, &selected)?;

    let names: HashMap<i64, &str> = projects
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(usize::MAX);

    Ok(transactions
        .iter()
        .take(limit)
        .map(|t: &Transaction| TransactionRow {
            date: t.transaction_date.to_string(),
            project: names.get(&t.project_id).copied().unwrap_or("?").to_string(),
            kind: t.kind.to_string(),
            amount: fmt_money(&t.amount),
            category: t.category.clone(),
            description: t.description.clone(),
        })
        .collect())
}
