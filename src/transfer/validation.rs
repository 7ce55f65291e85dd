//! Precondition check for transfer requests
//!
//! Runs before any pricing. Every failing field is collected so the caller
//! gets the full list in one response.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::types::{TransferRequest, ValidatedTransfer};
use crate::money::{self, MoneyError};

/// Column width of the account identifiers
pub const MAX_ACCOUNT_LEN: usize = 20;

/// Wire names of the validated fields
pub mod fields {
    pub const SOURCE_ACCOUNT: &str = "sourceAccount";
    pub const DESTINATION_ACCOUNT: &str = "destinationAccount";
    pub const AMOUNT: &str = "amount";
    pub const TRANSFER_DATE: &str = "transferDate";
}

// ============================================================================
// Errors
// ============================================================================

/// One failing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All failing fields of a request (never empty)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid transfer request: {}", format_fields(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for `field`, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Validation
// ============================================================================

/// Check a request against the scheduling preconditions.
///
/// # Rules
/// - accounts: present, not blank, at most [`MAX_ACCOUNT_LEN`] characters
/// - amount: present, >= 0.01, at most 2 decimals, at most 13 integer digits
/// - transfer date: present, not before `today`
///
/// Account identifiers are trimmed; the amount is rescaled to 2 decimals.
pub fn validate_request(
    request: &TransferRequest,
    today: NaiveDate,
) -> Result<ValidatedTransfer, ValidationErrors> {
    let mut errors = Vec::new();

    let source = check_account(
        request.source_account.as_deref(),
        fields::SOURCE_ACCOUNT,
        "Source account",
        &mut errors,
    );
    let destination = check_account(
        request.destination_account.as_deref(),
        fields::DESTINATION_ACCOUNT,
        "Destination account",
        &mut errors,
    );

    let amount = match request.amount {
        None => {
            errors.push(FieldError::new(fields::AMOUNT, "Amount is required"));
            None
        }
        Some(amount) => match money::check_amount(amount) {
            Ok(amount) => Some(amount),
            Err(e) => {
                errors.push(FieldError::new(fields::AMOUNT, amount_message(&e)));
                None
            }
        },
    };

    let transfer_date = match request.transfer_date {
        None => {
            errors.push(FieldError::new(
                fields::TRANSFER_DATE,
                "Transfer date is required",
            ));
            None
        }
        Some(date) if date < today => {
            errors.push(FieldError::new(
                fields::TRANSFER_DATE,
                "Transfer date cannot be in the past",
            ));
            None
        }
        Some(date) => Some(date),
    };

    match (source, destination, amount, transfer_date) {
        (Some(source), Some(destination), Some(amount), Some(date)) if errors.is_empty() => {
            Ok(ValidatedTransfer::new(source, destination, amount, date))
        }
        _ => Err(ValidationErrors(errors)),
    }
}

fn check_account(
    value: Option<&str>,
    field: &'static str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", label)));
        return None;
    }
    if trimmed.chars().count() > MAX_ACCOUNT_LEN {
        errors.push(FieldError::new(
            field,
            format!("{} must be at most {} characters", label, MAX_ACCOUNT_LEN),
        ));
        return None;
    }
    Some(trimmed.to_string())
}

fn amount_message(err: &MoneyError) -> String {
    match err {
        MoneyError::BelowMinimum => "Amount must be greater than zero".to_string(),
        MoneyError::PrecisionOverflow { max, .. } => {
            format!("Amount must have at most {} decimal places", max)
        }
        MoneyError::TooManyIntegerDigits { max } => {
            format!("Amount exceeds {} integer digits", max)
        }
    }
}
