// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use siteledger::aggregate;
use siteledger::models::{PortfolioSnapshot, Project, Transaction, TxKind};
use std::str::FromStr;

fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn project(id: i64, name: &str) -> Project {
    Project {
        id,
        user_id: "u1".into(),
        name: name.into(),
        location: "Springfield".into(),
        project_type: "commercial".into(),
        base_contract_amount: dec("100000"),
        created_at: "2025-01-01 00:00:00".into(),
        updated_at: "2025-01-01 00:00:00".into(),
    }
}

fn tx(project_id: i64, kind: TxKind, amount: &str, d: &str) -> Transaction {
    Transaction {
        id: 0,
        project_id,
        kind,
        amount: dec(amount),
        description: "work".into(),
        transaction_date: date(d),
        category: String::new(),
        created_at: String::new(),
    }
}

#[test]
fn summary_of_project_with_no_transactions_is_exact_zero() {
    let p = project(1, "Empty Lot");
    let summary = aggregate::project_summary(&p, &[]);
    assert_eq!(summary.total_credits, Decimal::ZERO);
    assert_eq!(summary.total_debits, Decimal::ZERO);
    assert_eq!(summary.profit, Decimal::ZERO);
}

#[test]
fn downtown_office_scenario() {
    let p = project(1, "Downtown Office");
    let d = date("2026-08-07");
    let txs = vec![
        tx(1, TxKind::Credit, "5000", "2026-08-07"),
        tx(1, TxKind::Debit, "1200", "2026-08-07"),
        tx(1, TxKind::Debit, "300", "2026-08-05"),
    ];

    let summary = aggregate::project_summary(&p, &txs);
    assert_eq!(summary.total_credits, dec("5000"));
    assert_eq!(summary.total_debits, dec("1500"));
    assert_eq!(summary.profit, dec("3500"));

    let stats = aggregate::daily_stats(&txs, d);
    let today = stats.last().unwrap();
    assert_eq!(today.date, d);
    assert_eq!(today.credits, dec("5000"));
    assert_eq!(today.debits, dec("1200"));
    let two_back = &stats[4];
    assert_eq!(two_back.date, d - Duration::days(2));
    assert_eq!(two_back.credits, Decimal::ZERO);
    assert_eq!(two_back.debits, dec("300"));
    for (i, stat) in stats.iter().enumerate() {
        if i != 4 && i != 6 {
            assert_eq!(stat.credits, Decimal::ZERO);
            assert_eq!(stat.debits, Decimal::ZERO);
        }
    }
}

#[test]
fn daily_stats_shape_is_always_seven_ascending_consecutive_days() {
    let reference = date("2025-03-03");
    let stats = aggregate::daily_stats(&[], reference);
    assert_eq!(stats.len(), 7);
    assert_eq!(stats.last().unwrap().date, reference);
    for pair in stats.windows(2) {
        assert_eq!(pair[0].date + Duration::days(1), pair[1].date);
    }
}

#[test]
fn portfolio_balance_equals_global_credits_minus_debits() {
    let projects = vec![project(1, "A"), project(2, "B"), project(3, "Untouched")];
    let txs = vec![
        tx(1, TxKind::Credit, "1000.50", "2025-06-01"),
        tx(1, TxKind::Debit, "400.25", "2025-06-02"),
        tx(2, TxKind::Credit, "10", "2025-06-03"),
        tx(2, TxKind::Debit, "650.75", "2025-06-03"),
    ];
    let snapshot = aggregate::portfolio_snapshot(&projects, &txs, date("2025-06-05"));

    let per_project: Decimal = snapshot.projects_summary.iter().map(|s| s.profit).sum();
    assert_eq!(snapshot.total_portfolio_balance, per_project);

    let global_credits: Decimal = txs
        .iter()
        .filter(|t| t.kind == TxKind::Credit)
        .map(|t| t.amount)
        .sum();
    let global_debits: Decimal = txs
        .iter()
        .filter(|t| t.kind == TxKind::Debit)
        .map(|t| t.amount)
        .sum();
    assert_eq!(
        snapshot.total_portfolio_balance,
        global_credits - global_debits
    );

    // Projects with zero transactions still appear, at zero profit.
    assert_eq!(snapshot.projects_summary.len(), 3);
    assert_eq!(snapshot.projects_summary[2].profit, Decimal::ZERO);
}

#[test]
fn losing_portfolio_goes_negative_without_clamping() {
    let projects = vec![project(1, "Profitable"), project(2, "Money Pit")];
    let txs = vec![
        tx(1, TxKind::Credit, "100", "2025-06-01"),
        tx(2, TxKind::Debit, "250", "2025-06-01"),
    ];
    let snapshot = aggregate::portfolio_snapshot(&projects, &txs, date("2025-06-02"));
    assert_eq!(snapshot.total_portfolio_balance, dec("-150"));
    assert_eq!(snapshot.projects_summary[1].profit, dec("-250"));
}

#[test]
fn aggregation_is_idempotent() {
    let projects = vec![project(1, "A"), project(2, "B")];
    let txs = vec![
        tx(1, TxKind::Credit, "123.45", "2025-06-01"),
        tx(2, TxKind::Debit, "67.89", "2025-06-04"),
    ];
    let reference = date("2025-06-05");
    let first = aggregate::portfolio_snapshot(&projects, &txs, reference);
    let second = aggregate::portfolio_snapshot(&projects, &txs, reference);
    assert_eq!(first, second);
}

#[test]
fn empty_portfolio_yields_empty_snapshot() {
    let snapshot = aggregate::portfolio_snapshot(&[], &[], date("2025-06-05"));
    assert_eq!(snapshot, PortfolioSnapshot::empty());
    assert_eq!(snapshot.total_projects, 0);
    assert!(snapshot.projects_summary.is_empty());
    assert!(snapshot.daily_stats.is_empty());
    assert!(snapshot.weekly_stats.is_empty());
    assert!(snapshot.monthly_stats.is_empty());
}

#[test]
fn decimal_sums_do_not_drift() {
    let p = project(1, "Precise");
    let txs: Vec<Transaction> = (0..10)
        .map(|i| {
            tx(
                1,
                TxKind::Credit,
                "0.10",
                &format!("2025-06-{:02}", i + 1),
            )
        })
        .collect();
    let summary = aggregate::project_summary(&p, &txs);
    assert_eq!(summary.total_credits, dec("1.00"));
    assert_eq!(summary.profit, dec("1.00"));
}

#[test]
fn weekly_and_monthly_series_bucket_the_same_totals() {
    let reference = date("2026-08-07");
    let txs = vec![
        tx(1, TxKind::Credit, "500", "2026-08-04"), // current week, current month
        tx(1, TxKind::Debit, "200", "2026-07-29"),  // previous week, previous month
    ];
    let weeks = aggregate::weekly_stats(&txs, reference);
    assert_eq!(weeks.len(), 4);
    assert_eq!(weeks[3].credits, dec("500"));
    assert_eq!(weeks[2].debits, dec("200"));

    let months = aggregate::monthly_stats(&txs, reference);
    assert_eq!(months.len(), 6);
    assert_eq!(months[5].credits, dec("500"));
    assert_eq!(months[4].debits, dec("200"));
}
