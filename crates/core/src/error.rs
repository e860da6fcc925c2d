// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use capacity_domain::DomainError;

/// Errors that can occur while applying engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The edited row does not exist in the table.
    RowNotFound {
        /// Display form of the row key.
        key: String,
    },
    /// The edited row is read-only.
    RowDisabled {
        /// The row name.
        name: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::RowNotFound { key } => write!(f, "Row not found: {key}"),
            Self::RowDisabled { name } => write!(f, "Row '{name}' is read-only"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
