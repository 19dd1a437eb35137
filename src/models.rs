// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::GatewayError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a transaction. The amount itself is always non-negative;
/// the sign of its effect on profit is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Credit,
    Debit,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Credit => "credit",
            TxKind::Debit => "debit",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(TxKind::Credit),
            "debit" => Ok(TxKind::Debit),
            other => Err(GatewayError::Validation(format!(
                "Unknown transaction kind '{}', expected credit|debit",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub location: String,
    pub project_type: String,
    pub base_contract_amount: Decimal,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub project_id: i64,
    pub kind: TxKind,
    pub amount: Decimal,
    pub description: String,
    pub transaction_date: NaiveDate,
    pub category: String,
    pub created_at: String,
}

/// Insert shape for a project. Validated client-side before any statement
/// runs; the store's own constraints remain authoritative.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub location: String,
    pub project_type: String,
    pub base_contract_amount: Decimal,
}

impl NewProject {
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.name.trim().is_empty() {
            return Err(GatewayError::Validation("Project name is required".into()));
        }
        if self.location.trim().is_empty() {
            return Err(GatewayError::Validation(
                "Project location is required".into(),
            ));
        }
        if self.project_type.trim().is_empty() {
            return Err(GatewayError::Validation("Project type is required".into()));
        }
        if self.base_contract_amount < Decimal::ZERO {
            return Err(GatewayError::Validation(format!(
                "Base contract amount must be >= 0, got {}",
                self.base_contract_amount
            )));
        }
        Ok(())
    }
}

/// Insert shape for a transaction. A missing date means "today" and is
/// filled in at the gateway boundary.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub project_id: i64,
    pub kind: TxKind,
    pub amount: Decimal,
    pub description: String,
    pub transaction_date: Option<NaiveDate>,
    pub category: String,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), GatewayError> {
        // User-entered amounts must be strictly positive; zero-amount rows
        // carry no information and negatives belong in `kind`.
        if self.amount <= Decimal::ZERO {
            return Err(GatewayError::Validation(format!(
                "Amount must be > 0, got {}",
                self.amount
            )));
        }
        if self.description.trim().is_empty() {
            return Err(GatewayError::Validation("Description is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: i64,
    pub name: String,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub credits: Decimal,
    pub debits: Decimal,
}

/// Credit/debit totals over an inclusive date range; used for the weekly
/// and monthly activity series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStat {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub credits: Decimal,
    pub debits: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub total_portfolio_balance: Decimal,
    pub total_projects: usize,
    pub projects_summary: Vec<ProjectSummary>,
    pub daily_stats: Vec<DailyStat>,
    pub weekly_stats: Vec<PeriodStat>,
    pub monthly_stats: Vec<PeriodStat>,
}

impl PortfolioSnapshot {
    /// The snapshot for a user with no projects. No transaction fetch is
    /// needed (or allowed) to produce it.
    pub fn empty() -> Self {
        PortfolioSnapshot {
            total_portfolio_balance: Decimal::ZERO,
            total_projects: 0,
            projects_summary: Vec::new(),
            daily_stats: Vec::new(),
            weekly_stats: Vec::new(),
            monthly_stats: Vec::new(),
        }
    }
}
