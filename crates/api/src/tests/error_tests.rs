// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, ClientError, UNKNOWN_ERROR_MESSAGE, service_message, translate_core_error,
    translate_domain_error,
};
use capacity_domain::{DomainError, FieldError, FilterField, SlotKey};
use default_capacity::CoreError;
use time::macros::date;

#[test]
fn test_inverted_range_maps_to_end_date_field() {
    let err: ApiError = translate_domain_error(DomainError::InvalidDateRange {
        start: date!(2025 - 03 - 16),
        end: date!(2025 - 03 - 11),
    });
    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("endDate"),
            message: String::from("End Date must be after Start Date"),
        }
    );
}

#[test]
fn test_missing_row_maps_to_not_found() {
    let err: ApiError = translate_core_error(CoreError::RowNotFound {
        key: SlotKey::new(9, "08:00", "12:00").to_string(),
    });
    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Row"
    ));
}

#[test]
fn test_disabled_row_maps_to_rule_violation() {
    let err: ApiError = translate_core_error(CoreError::RowDisabled {
        name: String::from("Territory Level"),
    });
    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "read_only_row"
    ));
    assert_eq!(err.user_message(), "Row 'Territory Level' cannot be edited");
}

#[test]
fn test_core_domain_violation_is_unwrapped() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::InvalidDayName(String::from("FUNDAY")),
    ));
    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "day"
    ));
}

#[test]
fn test_field_error_converts_to_invalid_input() {
    let err: ApiError = ApiError::from(FieldError {
        field: FilterField::Territory,
        message: String::from("Service Territory is required"),
    });
    assert_eq!(
        err.to_string(),
        "Invalid input for field 'territory': Service Territory is required"
    );
}

#[test]
fn test_empty_service_message_falls_back() {
    assert_eq!(service_message(""), UNKNOWN_ERROR_MESSAGE);
    assert_eq!(service_message("Territory locked"), "Territory locked");
}

#[test]
fn test_client_error_display() {
    let err: ClientError = ClientError::Status {
        endpoint: String::from("getCapacityTableData"),
        status: 502,
    };
    assert_eq!(
        err.to_string(),
        "Unexpected HTTP status 502 from getCapacityTableData"
    );
}
