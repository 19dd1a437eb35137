// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors surfaced by the data access gateway. None of these are retried
/// automatically; a failed operation is terminal for that call and the
/// user's re-run is the retry mechanism.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or invalid field caught before any statement runs.
    #[error("validation: {0}")]
    Validation(String),

    /// Referenced row does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Row exists but belongs to another user.
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// The backing store failed or is unavailable.
    #[error("backend: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("{0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
