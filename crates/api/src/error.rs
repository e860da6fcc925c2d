// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use capacity_domain::{DomainError, FieldError};
use default_capacity::CoreError;
use thiserror::Error;

/// Message shown when a read request fails in transport.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again later.";

/// Message shown when a write request fails in transport.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit changes. Please try again later.";

/// Message shown when the service reports a failure without a message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Message shown after a successful submit.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Your changes have been successfully submitted.";

/// Territory name shown when a successful submit names no territory.
pub const UNKNOWN_TERRITORY: &str = "Unknown Territory";

/// Errors raised by the HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL is not a valid URL.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request could not be sent or the connection failed.
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success HTTP status.
    #[error("Unexpected HTTP status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// The response body was not the expected JSON.
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and map onto the three failure
/// classes the page reports: transport, service and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request did not complete.
    Transport {
        /// The user-facing message.
        message: String,
    },
    /// The service reported a business failure.
    ServiceFailure {
        /// The service's message, or a generic one when it sent none.
        message: String,
    },
}

impl ApiError {
    /// Returns the message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. }
            | Self::DomainRuleViolation { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::Transport { message }
            | Self::ServiceFailure { message } => message,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Transport { message } => write!(f, "Transport failure: {message}"),
            Self::ServiceFailure { message } => write!(f, "Service failure: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        Self::InvalidInput {
            field: err.field.to_string(),
            message: err.message,
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDateRange { .. } => ApiError::InvalidInput {
            field: String::from("endDate"),
            message: String::from("End Date must be after Start Date"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Invalid date '{date_string}': {error}"),
        },
        DomainError::InvalidDayName(name) => ApiError::InvalidInput {
            field: String::from("day"),
            message: format!("Invalid day name: {name}"),
        },
        DomainError::InvalidCalendarization(value) => ApiError::InvalidInput {
            field: String::from("calendarization"),
            message: format!("Invalid calendarization: {value}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::RowNotFound { key } => ApiError::ResourceNotFound {
            resource_type: String::from("Row"),
            message: format!("No table row for {key}"),
        },
        CoreError::RowDisabled { name } => ApiError::DomainRuleViolation {
            rule: String::from("read_only_row"),
            message: format!("Row '{name}' cannot be edited"),
        },
    }
}

/// Maps a service status envelope message to the user-facing message.
#[must_use]
pub fn service_message(message: &str) -> String {
    if message.is_empty() {
        String::from(UNKNOWN_ERROR_MESSAGE)
    } else {
        message.to_string()
    }
}
