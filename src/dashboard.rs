// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::models::PortfolioSnapshot;
use crate::watch::{Scope, Subscription};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What `Failed` carries alongside the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Keep the last successfully computed snapshot available.
    KeepLastGood,
    /// Discard it, leaving only the error.
    ResetSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Idle,
    Loading,
    Ready(PortfolioSnapshot),
    Failed {
        message: String,
        last_good: Option<PortfolioSnapshot>,
    },
}

/// One consuming view over a user's portfolio. Owns its change
/// subscription; dropping the view cancels it, so a torn-down view can
/// never observe a late notification.
pub struct Dashboard<'g> {
    gateway: &'g Gateway,
    user_id: String,
    policy: ErrorPolicy,
    state: DashboardState,
    last_good: Option<PortfolioSnapshot>,
    dirty: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl<'g> Dashboard<'g> {
    pub fn new(gateway: &'g Gateway, user_id: &str, policy: ErrorPolicy) -> Self {
        // Starts dirty: the first refresh is always warranted.
        let dirty = Arc::new(AtomicBool::new(true));
        let flag = dirty.clone();
        let subscription = gateway.subscribe(Scope::All, move || {
            flag.store(true, Ordering::SeqCst);
        });
        Dashboard {
            gateway,
            user_id: user_id.to_string(),
            policy,
            state: DashboardState::Idle,
            last_good: None,
            dirty,
            _subscription: subscription,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// True when a change notification has arrived since the last
    /// completed refresh. Any number of notifications collapse into one
    /// pending flag.
    pub fn is_stale(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn refresh(&mut self) {
        self.refresh_at(crate::utils::today());
    }

    /// Fetch and recompute the snapshot. Single-flight: a notification
    /// landing while a pass is in flight triggers exactly one follow-up
    /// pass, regardless of how many notifications arrived. An error ends
    /// the refresh immediately; the user's next refresh is the retry.
    pub fn refresh_at(&mut self, reference: NaiveDate) {
        self.state = DashboardState::Loading;
        loop {
            self.dirty.store(false, Ordering::SeqCst);
            match self.load(reference) {
                Ok(snapshot) => {
                    if self.dirty.load(Ordering::SeqCst) {
                        continue;
                    }
                    self.last_good = Some(snapshot.clone());
                    self.state = DashboardState::Ready(snapshot);
                    return;
                }
                Err(err) => {
                    let last_good = match self.policy {
                        ErrorPolicy::KeepLastGood => self.last_good.clone(),
                        ErrorPolicy::ResetSnapshot => None,
                    };
                    self.state = DashboardState::Failed {
                        message: err.to_string(),
                        last_good,
                    };
                    return;
                }
            }
        }
    }

    fn load(&self, reference: NaiveDate) -> Result<PortfolioSnapshot> {
        let projects = self.gateway.list_projects_for_user(&self.user_id)?;
        // No projects: nothing to fetch; an empty-set transaction query is
        // not attempted.
        if projects.is_empty() {
            return Ok(PortfolioSnapshot::empty());
        }
        let ids: Vec<i64> = projects.iter().map(|p| p.id).collect();
        let transactions = self
            .gateway
            .list_transactions_for_projects(&self.user_id, &ids)?;
        Ok(aggregate::portfolio_snapshot(
            &projects,
            &transactions,
            reference,
        ))
    }
}
