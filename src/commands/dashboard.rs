// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dashboard::{Dashboard, DashboardState, ErrorPolicy};
use crate::gateway::Gateway;
use crate::models::PortfolioSnapshot;
use crate::utils::{fmt_money, parse_date, pretty_table, require_current_user, today};
use anyhow::{bail, Result};

pub fn handle(gateway: &Gateway, m: &clap::ArgMatches) -> Result<()> {
    let user = require_current_user(gateway.connection())?;
    let as_of = match m.get_one::<String>("as-of") {
        Some(raw) => parse_date(raw.trim())?,
        None => today(),
    };

    let mut view = Dashboard::new(gateway, &user, ErrorPolicy::KeepLastGood);
    view.refresh_at(as_of);
    match view.state() {
        DashboardState::Ready(snapshot) => render(snapshot, m.get_flag("json"))?,
        DashboardState::Failed { message, .. } => bail!("Dashboard load failed: {}", message),
        DashboardState::Idle | DashboardState::Loading => {
            bail!("Dashboard refresh did not complete")
        }
    }
    Ok(())
}

fn render(snapshot: &PortfolioSnapshot, json_flag: bool) -> Result<()> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Projects", "Portfolio Balance"],
            vec![vec![
                snapshot.total_projects.to_string(),
                fmt_money(&snapshot.total_portfolio_balance),
            ]],
        )
    );

    let project_rows: Vec<Vec<String>> = snapshot
        .projects_summary
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                fmt_money(&s.total_credits),
                fmt_money(&s.total_debits),
                fmt_money(&s.profit),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Project", "Credits", "Debits", "Profit"], project_rows)
    );

    let daily_rows: Vec<Vec<String>> = snapshot
        .daily_stats
        .iter()
        .map(|s| {
            vec![
                s.date.to_string(),
                fmt_money(&s.credits),
                fmt_money(&s.debits),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Credits", "Debits"], daily_rows)
    );

    let period_rows = |stats: &[crate::models::PeriodStat]| -> Vec<Vec<String>> {
        stats
            .iter()
            .map(|s| {
                vec![
                    s.start.to_string(),
                    s.end.to_string(),
                    fmt_money(&s.credits),
                    fmt_money(&s.debits),
                ]
            })
            .collect()
    };
    println!(
        "{}",
        pretty_table(
            &["Week From", "Week To", "Credits", "Debits"],
            period_rows(&snapshot.weekly_stats),
        )
    );
    println!(
        "{}",
        pretty_table(
            &["Month From", "Month To", "Credits", "Debits"],
            period_rows(&snapshot.monthly_stats),
        )
    );
    Ok(())
}
