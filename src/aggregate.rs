// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{DailyStat, PeriodStat, PortfolioSnapshot, Project, ProjectSummary, Transaction, TxKind};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Credit/debit/profit totals for one project. Transactions belonging to
/// other projects are ignored; a project with no transactions sums to
/// exact zeros.
pub fn project_summary(project: &Project, transactions: &[Transaction]) -> ProjectSummary {
    let mut total_credits = Decimal::ZERO;
    let mut total_debits = Decimal::ZERO;
    for tx in transactions.iter().filter(|t| t.project_id == project.id) {
        match tx.kind {
            TxKind::Credit => total_credits += tx.amount,
            TxKind::Debit => total_debits += tx.amount,
        }
    }
    ProjectSummary {
        project_id: project.id,
        name: project.name.clone(),
        total_credits,
        total_debits,
        profit: total_credits - total_debits,
    }
}

/// Daily credit/debit totals for the 7 calendar days ending at `reference`
/// inclusive, ascending. Always exactly 7 entries; days without activity
/// are zero-filled, never omitted.
pub fn daily_stats(transactions: &[Transaction], reference: NaiveDate) -> Vec<DailyStat> {
    let start = reference - Duration::days(6);
    let mut by_day: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions {
        if tx.transaction_date < start || tx.transaction_date > reference {
            continue;
        }
        let entry = by_day
            .entry(tx.transaction_date)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match tx.kind {
            TxKind::Credit => entry.0 += tx.amount,
            TxKind::Debit => entry.1 += tx.amount,
        }
    }
    (0..7)
        .map(|i| {
            let date = start + Duration::days(i);
            let (credits, debits) = by_day
                .get(&date)
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));
            DailyStat {
                date,
                credits,
                debits,
            }
        })
        .collect()
}

/// Same bucketing with week granularity: the 4 Monday-based weeks ending
/// with the week containing `reference`, ascending.
pub fn weekly_stats(transactions: &[Transaction], reference: NaiveDate) -> Vec<PeriodStat> {
    let week_start =
        reference - Duration::days(i64::from(reference.weekday().num_days_from_monday()));
    (0..4)
        .map(|i| {
            let start = week_start - Duration::days(7 * (3 - i));
            period_stat(transactions, start, start + Duration::days(6))
        })
        .collect()
}

/// Same bucketing with month granularity: the 6 calendar months ending
/// with the month containing `reference`, ascending.
pub fn monthly_stats(transactions: &[Transaction], reference: NaiveDate) -> Vec<PeriodStat> {
    (0..6)
        .rev()
        .map(|k| {
            let (year, month) = months_back(reference.year(), reference.month(), k);
            let start =
                NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid");
            period_stat(transactions, start, last_day_of_month(year, month))
        })
        .collect()
}

/// The top-level derived aggregate. The portfolio balance is the sum of
/// per-project profits; with zero projects the snapshot is fully empty and
/// callers must not have fetched transactions at all.
pub fn portfolio_snapshot(
    projects: &[Project],
    transactions: &[Transaction],
    reference: NaiveDate,
) -> PortfolioSnapshot {
    if projects.is_empty() {
        return PortfolioSnapshot::empty();
    }
    let projects_summary: Vec<ProjectSummary> = projects
        .iter()
        .map(|p| project_summary(p, transactions))
        .collect();
    let total_portfolio_balance = projects_summary.iter().map(|s| s.profit).sum();
    PortfolioSnapshot {
        total_portfolio_balance,
        total_projects: projects.len(),
        projects_summary,
        daily_stats: daily_stats(transactions, reference),
        weekly_stats: weekly_stats(transactions, reference),
        monthly_stats: monthly_stats(transactions, reference),
    }
}

fn period_stat(transactions: &[Transaction], start: NaiveDate, end: NaiveDate) -> PeriodStat {
    let mut credits = Decimal::ZERO;
    let mut debits = Decimal::ZERO;
    for tx in transactions {
        if tx.transaction_date < start || tx.transaction_date > end {
            continue;
        }
        match tx.kind {
            TxKind::Credit => credits += tx.amount,
            TxKind::Debit => debits += tx.amount,
        }
    }
    PeriodStat {
        start,
        end,
        credits,
        debits,
    }
}

fn months_back(year: i32, month: u32, k: u32) -> (i32, u32) {
    let idx = year * 12 + (month as i32 - 1) - k as i32;
    (idx.div_euclid(12), (idx.rem_euclid(12) + 1) as u32)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("first of month is always valid")
        - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn tx(project_id: i64, kind: TxKind, amount: &str, d: &str) -> Transaction {
        Transaction {
            id: 0,
            project_id,
            kind,
            amount: Decimal::from_str_exact(amount).unwrap(),
            description: "x".into(),
            transaction_date: date(d),
            category: String::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn months_back_crosses_year_boundary() {
        assert_eq!(months_back(2026, 2, 0), (2026, 2));
        assert_eq!(months_back(2026, 2, 1), (2026, 1));
        assert_eq!(months_back(2026, 2, 2), (2025, 12));
        assert_eq!(months_back(2026, 2, 13), (2025, 1));
    }

    #[test]
    fn last_day_handles_leap_february() {
        assert_eq!(last_day_of_month(2024, 2), date("2024-02-29"));
        assert_eq!(last_day_of_month(2025, 2), date("2025-02-28"));
        assert_eq!(last_day_of_month(2025, 12), date("2025-12-31"));
    }

    #[test]
    fn weekly_buckets_are_monday_aligned_and_contiguous() {
        // 2026-08-07 is a Friday; its week starts 2026-08-03.
        let weeks = weekly_stats(&[], date("2026-08-07"));
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[3].start, date("2026-08-03"));
        assert_eq!(weeks[3].end, date("2026-08-09"));
        for pair in weeks.windows(2) {
            assert_eq!(pair[0].end + Duration::days(1), pair[1].start);
        }
    }

    #[test]
    fn monthly_buckets_cover_six_calendar_months() {
        let months = monthly_stats(&[], date("2026-03-15"));
        assert_eq!(months.len(), 6);
        assert_eq!(months[0].start, date("2025-10-01"));
        assert_eq!(months[0].end, date("2025-10-31"));
        assert_eq!(months[5].start, date("2026-03-01"));
        assert_eq!(months[5].end, date("2026-03-31"));
    }

    #[test]
    fn daily_window_excludes_dates_outside_range() {
        let txs = vec![
            tx(1, TxKind::Debit, "10", "2026-07-31"), // day before the window
            tx(1, TxKind::Credit, "25", "2026-08-01"),
            tx(1, TxKind::Credit, "5", "2026-08-08"), // day after the window
        ];
        let stats = daily_stats(&txs, date("2026-08-07"));
        assert_eq!(stats.len(), 7);
        assert_eq!(stats[0].date, date("2026-08-01"));
        assert_eq!(stats[0].credits, Decimal::from_str_exact("25").unwrap());
        let total: Decimal = stats.iter().map(|s| s.credits + s.debits).sum();
        assert_eq!(total, Decimal::from_str_exact("25").unwrap());
    }
}
