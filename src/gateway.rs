// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{GatewayError, Result};
use crate::models::{NewProject, NewTransaction, Project, Transaction, TxKind};
use crate::watch::{ChangeBus, Scope, Subscription};
use chrono::NaiveDate;
use rusqlite::hooks::Action;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Optional field updates for a project. `None` leaves a field untouched;
/// any update refreshes `updated_at`. The owner is immutable.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub location: Option<String>,
    pub project_type: Option<String>,
    pub base_contract_amount: Option<Decimal>,
}

/// Scoped access to the `projects` and `transactions` collections. Every
/// read and write is bounded to the acting user; ownership checks happen
/// here, not in the aggregation engine. The store's own constraints
/// (kind enum, non-negative amounts, cascade delete) stay authoritative.
pub struct Gateway {
    conn: Connection,
    bus: ChangeBus,
}

impl Gateway {
    /// Wrap an opened connection. The SQLite update hook is wired to the
    /// change bus, so inserts/updates/deletes on either table notify
    /// subscribers no matter which caller performed them.
    pub fn new(conn: Connection) -> Self {
        let bus = ChangeBus::new();
        let hook_bus = bus.clone();
        conn.update_hook(Some(
            move |_action: Action, _db: &str, table: &str, _rowid: i64| match table {
                "projects" => hook_bus.notify(Scope::Projects),
                "transactions" => hook_bus.notify(Scope::Transactions),
                _ => {}
            },
        ));
        Gateway { conn, bus }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Register a change callback; see `watch::ChangeBus`. The callback
    /// receives no payload and must not re-enter this connection.
    pub fn subscribe<F>(&self, scope: Scope, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.bus.subscribe(scope, callback)
    }

    /// All projects owned by `user_id`, newest first.
    pub fn list_projects_for_user(&self, user_id: &str) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name, location, project_type, base_contract_amount,
                    created_at, updated_at
             FROM projects WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(project_from_row(r)?);
        }
        Ok(data)
    }

    /// Every transaction whose project is in `project_ids`, newest first.
    /// An empty set short-circuits without touching the store. Any project
    /// in the set that exists but belongs to another user is a refusal for
    /// the whole call.
    pub fn list_transactions_for_projects(
        &self,
        user_id: &str,
        project_ids: &[i64],
    ) -> Result<Vec<Transaction>> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; project_ids.len()].join(",");
        let id_params: Vec<&dyn rusqlite::ToSql> = project_ids
            .iter()
            .map(|id| id as &dyn rusqlite::ToSql)
            .collect();

        let foreign: i64 = {
            let sql = format!(
                "SELECT COUNT(*) FROM projects WHERE id IN ({}) AND user_id != ?",
                placeholders
            );
            let mut check_params = id_params.clone();
            check_params.push(&user_id as &dyn rusqlite::ToSql);
            self.conn
                .query_row(&sql, rusqlite::params_from_iter(check_params), |r| r.get(0))?
        };
        if foreign > 0 {
            return Err(GatewayError::NotAuthorized(
                "One or more projects belong to another user".into(),
            ));
        }

        let sql = format!(
            "SELECT id, project_id, kind, amount, description, transaction_date, category, created_at
             FROM transactions WHERE project_id IN ({})
             ORDER BY transaction_date DESC, id DESC",
            placeholders
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(id_params))?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(transaction_from_row(r)?);
        }
        Ok(data)
    }

    pub fn insert_project(&self, user_id: &str, input: &NewProject) -> Result<Project> {
        input.validate()?;
        self.conn.execute(
            "INSERT INTO projects(user_id, name, location, project_type, base_contract_amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                input.name.trim(),
                input.location.trim(),
                input.project_type.trim(),
                input.base_contract_amount.to_string()
            ],
        )?;
        self.get_project(self.conn.last_insert_rowid())
    }

    /// Apply `changes` to an owned project. Always refreshes `updated_at`,
    /// even for a no-op change set.
    pub fn update_project(
        &self,
        user_id: &str,
        project_id: i64,
        changes: &ProjectChanges,
    ) -> Result<Project> {
        if let Some(ref name) = changes.name {
            if name.trim().is_empty() {
                return Err(GatewayError::Validation("Project name is required".into()));
            }
        }
        if let Some(amount) = changes.base_contract_amount {
            if amount < Decimal::ZERO {
                return Err(GatewayError::Validation(format!(
                    "Base contract amount must be >= 0, got {}",
                    amount
                )));
            }
        }
        self.check_owner(user_id, project_id)?;
        self.conn.execute(
            "UPDATE projects SET
                 name=COALESCE(?2, name),
                 location=COALESCE(?3, location),
                 project_type=COALESCE(?4, project_type),
                 base_contract_amount=COALESCE(?5, base_contract_amount),
                 updated_at=datetime('now')
             WHERE id=?1",
            params![
                project_id,
                changes.name.as_deref().map(str::trim),
                changes.location.as_deref().map(str::trim),
                changes.project_type.as_deref().map(str::trim),
                changes.base_contract_amount.map(|a| a.to_string())
            ],
        )?;
        self.get_project(project_id)
    }

    /// Delete an owned project; its transactions go with it (cascade).
    pub fn delete_project(&self, user_id: &str, project_id: i64) -> Result<()> {
        self.check_owner(user_id, project_id)?;
        self.conn
            .execute("DELETE FROM projects WHERE id=?1", params![project_id])?;
        Ok(())
    }

    pub fn insert_transaction(&self, user_id: &str, input: &NewTransaction) -> Result<Transaction> {
        input.validate()?;
        self.check_owner(user_id, input.project_id)?;
        let date = input
            .transaction_date
            .unwrap_or_else(crate::utils::today);
        self.conn.execute(
            "INSERT INTO transactions(project_id, kind, amount, description, transaction_date, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.project_id,
                input.kind.as_str(),
                input.amount.to_string(),
                input.description.trim(),
                date.to_string(),
                input.category.trim()
            ],
        )?;
        self.get_transaction(self.conn.last_insert_rowid())
    }

    fn check_owner(&self, user_id: &str, project_id: i64) -> Result<()> {
        let owner: Option<String> = self
            .conn
            .query_row(
                "SELECT user_id FROM projects WHERE id=?1",
                params![project_id],
                |r| r.get(0),
            )
            .optional()?;
        match owner {
            None => Err(GatewayError::NotFound(format!(
                "Project {} does not exist",
                project_id
            ))),
            Some(ref u) if u != user_id => Err(GatewayError::NotAuthorized(format!(
                "Project {} belongs to another user",
                project_id
            ))),
            Some(_) => Ok(()),
        }
    }

    fn get_project(&self, id: i64) -> Result<Project> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name, location, project_type, base_contract_amount,
                    created_at, updated_at
             FROM projects WHERE id=?1",
        )?;
        let row = stmt.query_row(params![id], raw_project).optional()?;
        match row {
            Some(raw) => raw.try_into(),
            None => Err(GatewayError::NotFound(format!(
                "Project {} does not exist",
                id
            ))),
        }
    }

    fn get_transaction(&self, id: i64) -> Result<Transaction> {
        let mut stmt = self.conn.prepare(
            "SELECT id, project_id, kind, amount, description, transaction_date, category, created_at
             FROM transactions WHERE id=?1",
        )?;
        let row = stmt.query_row(params![id], raw_transaction).optional()?;
        match row {
            Some(raw) => raw.try_into(),
            None => Err(GatewayError::NotFound(format!(
                "Transaction {} does not exist",
                id
            ))),
        }
    }
}

fn parse_stored_decimal(s: &str, what: &str) -> Result<Decimal> {
    Decimal::from_str_exact(s)
        .map_err(|_| GatewayError::Unknown(format!("Invalid stored {} '{}'", what, s)))
}

fn parse_stored_kind(s: &str) -> Result<TxKind> {
    TxKind::from_str(s)
        .map_err(|_| GatewayError::Unknown(format!("Unknown stored transaction kind '{}'", s)))
}

// Row mappers are split in two: the rusqlite half pulls columns (so column
// errors surface as rusqlite::Error) and the typed half parses TEXT money
// and enums into domain values.

struct RawProject {
    id: i64,
    user_id: String,
    name: String,
    location: String,
    project_type: String,
    base_contract_amount: String,
    created_at: String,
    updated_at: String,
}

fn raw_project(r: &Row<'_>) -> std::result::Result<RawProject, rusqlite::Error> {
    Ok(RawProject {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        location: r.get(3)?,
        project_type: r.get(4)?,
        base_contract_amount: r.get(5)?,
        created_at: r.get(6)?,
        updated_at: r.get(7)?,
    })
}

fn project_from_row(r: &Row<'_>) -> Result<Project> {
    let raw = raw_project(r)?;
    raw.try_into()
}

impl TryFrom<RawProject> for Project {
    type Error = GatewayError;

    fn try_from(raw: RawProject) -> Result<Project> {
        Ok(Project {
            id: raw.id,
            user_id: raw.user_id,
            name: raw.name,
            location: raw.location,
            project_type: raw.project_type,
            base_contract_amount: parse_stored_decimal(
                &raw.base_contract_amount,
                "contract amount",
            )?,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

struct RawTransaction {
    id: i64,
    project_id: i64,
    kind: String,
    amount: String,
    description: String,
    transaction_date: NaiveDate,
    category: String,
    created_at: String,
}

fn raw_transaction(r: &Row<'_>) -> std::result::Result<RawTransaction, rusqlite::Error> {
    Ok(RawTransaction {
        id: r.get(0)?,
        project_id: r.get(1)?,
        kind: r.get(2)?,
        amount: r.get(3)?,
        description: r.get(4)?,
        transaction_date: r.get(5)?,
        category: r.get(6)?,
        created_at: r.get(7)?,
    })
}

fn transaction_from_row(r: &Row<'_>) -> Result<Transaction> {
    let raw = raw_transaction(r)?;
    raw.try_into()
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = GatewayError;

    fn try_from(raw: RawTransaction) -> Result<Transaction> {
        Ok(Transaction {
            id: raw.id,
            project_id: raw.project_id,
            kind: parse_stored_kind(&raw.kind)?,
            amount: parse_stored_decimal(&raw.amount, "amount")?,
            description: raw.description,
            transaction_date: raw.transaction_date,
            category: raw.category,
            created_at: raw.created_at,
        })
    }
}
