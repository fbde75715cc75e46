//! # Validation Module
//!
//! Field-level validation rules shared by checkout and reviews.
//!
//! ## Validation Philosophy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Validation Lives                               │
//! │                                                                         │
//! │   UI layer         - instant feedback while typing (not here)           │
//! │   bistro-core      - THE source of truth (this module)                  │
//! │   bistro-db        - CHECK constraints as a last line                   │
//! │                                                                         │
//! │   Rules are deliberately permissive: a checkout form should reject      │
//! │   obvious garbage, not implement Luhn or carrier-grade phone parsing.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_COMMENT_LENGTH, MAX_ITEM_QUANTITY};

// =============================================================================
// Generic Field Rules
// =============================================================================

/// Rejects empty or whitespace-only values.
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Rejects values longer than `max` characters.
pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Contact Fields
// =============================================================================

/// Validates an email address: something before and after a single `@`, and
/// a dot in the domain part.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    validate_required("email", value)?;
    let value = value.trim();

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || value.contains(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(())
}

/// Validates a phone number: at least 10 digits, ignoring spaces, dashes,
/// parentheses and a leading `+`.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    validate_required("phone", value)?;

    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+'));

    if digits < 10 || !allowed {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain at least 10 digits".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Card Fields
// =============================================================================

/// Validates a card number: exactly 16 digits once spaces are stripped.
///
/// No Luhn check: this system never charges a card, it only simulates the
/// form, so the rule matches what the form has always enforced.
pub fn validate_card_number(value: &str) -> Result<(), ValidationError> {
    validate_required("card_number", value)?;

    let stripped: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.len() != 16 || !stripped.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "card_number".to_string(),
            reason: "must be 16 digits".to_string(),
        });
    }
    Ok(())
}

/// Validates a card expiry in `MM/YY` form with month 01-12.
pub fn validate_card_expiry(value: &str) -> Result<(), ValidationError> {
    validate_required("card_expiry", value)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "card_expiry".to_string(),
        reason: reason.to_string(),
    };

    let (month, year) = value
        .trim()
        .split_once('/')
        .ok_or_else(|| invalid("must be MM/YY"))?;
    if month.len() != 2 || year.len() != 2 {
        return Err(invalid("must be MM/YY"));
    }
    let month: u32 = month.parse().map_err(|_| invalid("must be MM/YY"))?;
    let _: u32 = year.parse().map_err(|_| invalid("must be MM/YY"))?;
    if !(1..=12).contains(&month) {
        return Err(invalid("month must be 01-12"));
    }
    Ok(())
}

/// Validates a CVV: exactly 3 digits.
pub fn validate_cvv(value: &str) -> Result<(), ValidationError> {
    validate_required("cvv", value)?;

    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 digits".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Cart Fields
// =============================================================================

/// Validates a quantity coming from the stepper UI: 1 to 10.
///
/// The cart itself does not enforce the upper bound (programmatic callers
/// like reorder may exceed it); this is the rule the stepper applies.
pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

// =============================================================================
// Review Fields
// =============================================================================

/// Validates a star rating: whole stars 1-5.
pub fn validate_rating(rating: i64) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }
    Ok(())
}

/// Validates a review comment: optional, capped length.
///
/// A star rating with no text is a valid review; only the length is bounded.
pub fn validate_comment(value: &str) -> Result<(), ValidationError> {
    validate_max_length("comment", value, MAX_COMMENT_LENGTH)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(validate_required("name", "Mario").is_ok());
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("mario@example.com").is_ok());
        assert!(validate_email("a.b@sub.example.co").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("mario@").is_err());
        assert!(validate_email("mario@nodot").is_err());
        assert!(validate_email("mario@.com").is_err());
        assert!(validate_email("ma rio@example.com").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("0123456789").is_ok());
        assert!(validate_phone("+49 (0) 123 456-7890").is_ok());

        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me maybe").is_err());
    }

    #[test]
    fn test_card_number() {
        assert!(validate_card_number("4111111111111111").is_ok());
        assert!(validate_card_number("4111 1111 1111 1111").is_ok());

        assert!(validate_card_number("4111").is_err());
        assert!(validate_card_number("4111-1111-1111-1111").is_err());
        assert!(validate_card_number("41111111111111112222").is_err());
    }

    #[test]
    fn test_card_expiry() {
        assert!(validate_card_expiry("12/26").is_ok());
        assert!(validate_card_expiry("01/30").is_ok());

        assert!(validate_card_expiry("13/26").is_err());
        assert!(validate_card_expiry("00/26").is_err());
        assert!(validate_card_expiry("1/26").is_err());
        assert!(validate_card_expiry("12-26").is_err());
        assert!(validate_card_expiry("").is_err());
    }

    #[test]
    fn test_cvv() {
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("1234").is_err());
        assert!(validate_cvv("12a").is_err());
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(11).is_err());
    }

    #[test]
    fn test_rating() {
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_comment() {
        assert!(validate_comment("Great pizza!").is_ok());
        // Rating-only reviews are fine
        assert!(validate_comment("").is_ok());
        assert!(validate_comment(&"x".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
    }
}
