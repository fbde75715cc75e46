//! # Checkout Module
//!
//! The multi-step checkout wizard as a state machine.
//!
//! ## Step Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Steps                                     │
//! │                                                                         │
//! │   ┌──────────┐  advance  ┌─────────┐  advance  ┌────────┐  submit      │
//! │   │ Delivery │──────────►│ Payment │──────────►│ Review │─────────┐    │
//! │   │  (1/3)   │◄──────────│  (2/3)  │◄──────────│ (3/3)  │         │    │
//! │   └──────────┘   back    └─────────┘   back    └────────┘         ▼    │
//! │                                                            ┌───────────┐│
//! │   advance validates the CURRENT step's fields and          │ Submitted ││
//! │   refuses to move while any field is invalid.              │ (terminal)││
//! │                                                            └───────────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation failures are data, not errors: `advance` hands back the list of
//! per-field problems so the form can render them inline next to each input.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{OrderType, PaymentMethod, PaymentSummary};
use crate::validation;

// =============================================================================
// Promo Codes
// =============================================================================

/// Looks up the discount for a promo code, in basis points.
///
/// Codes are matched case-insensitively; the accepted set is fixed.
pub fn promo_discount_bps(code: &str) -> Option<u32> {
    match code.trim().to_ascii_uppercase().as_str() {
        "SAVE10" => Some(1000),
        "SAVE20" => Some(2000),
        "WELCOME" => Some(1500),
        _ => None,
    }
}

// =============================================================================
// Checkout Step
// =============================================================================

/// Where the customer is in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Delivery,
    Payment,
    Review,
    /// Terminal: the order has been placed.
    Submitted,
}

impl CheckoutStep {
    /// 1-based position on the three-step progress header.
    /// `Submitted` reports 3: the header stays full once the order is placed.
    pub const fn step_index(self) -> u8 {
        match self {
            CheckoutStep::Delivery => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review | CheckoutStep::Submitted => 3,
        }
    }
}

impl Default for CheckoutStep {
    fn default() -> Self {
        CheckoutStep::Delivery
    }
}

// =============================================================================
// Form Data
// =============================================================================

/// Delivery step form fields.
///
/// For pickup orders the address block (address, city, postal code) is
/// hidden and not validated; name and contact fields always are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    #[serde(default)]
    pub order_type: OrderType,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    /// Requested fulfilment slot ("asap" or a time); carried unvalidated.
    #[serde(default)]
    pub delivery_time: String,
    /// Free-text note for the courier; never validated.
    #[serde(default)]
    pub instructions: String,
}

/// Payment step form fields.
///
/// Card fields are held transiently while the wizard is open and are NEVER
/// copied into the order record; see [`CheckoutFlow::payment_summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub card_holder: String,
    pub card_number: String,
    pub card_expiry: String,
    pub cvv: String,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        PaymentDetails {
            method: PaymentMethod::Card,
            card_holder: String::new(),
            card_number: String::new(),
            card_expiry: String::new(),
            cvv: String::new(),
        }
    }
}

/// One invalid field, ready to render next to its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// The checkout wizard: current step, form data and applied promo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFlow {
    pub step: CheckoutStep,
    pub delivery: DeliveryDetails,
    pub payment: PaymentDetails,
    /// Review-step terms and conditions checkbox.
    pub terms_accepted: bool,
    /// Normalized (uppercased) promo code, once accepted.
    pub promo_code: Option<String>,
}

impl CheckoutFlow {
    /// A fresh wizard at the delivery step.
    pub fn new() -> Self {
        CheckoutFlow::default()
    }

    /// Discount from the applied promo, in basis points (0 without one).
    pub fn discount_bps(&self) -> u32 {
        self.promo_code
            .as_deref()
            .and_then(promo_discount_bps)
            .unwrap_or(0)
    }

    /// Applies a promo code, replacing any previous one.
    ///
    /// Returns the discount in basis points, or `UnknownPromoCode` if the
    /// code is not in the accepted set (the previous promo survives).
    pub fn apply_promo(&mut self, code: &str) -> CoreResult<u32> {
        match promo_discount_bps(code) {
            Some(bps) => {
                self.promo_code = Some(code.trim().to_ascii_uppercase());
                Ok(bps)
            }
            None => Err(CoreError::UnknownPromoCode(code.trim().to_string())),
        }
    }

    /// Removes the applied promo, if any.
    pub fn remove_promo(&mut self) {
        self.promo_code = None;
    }

    /// Validates the delivery step fields.
    ///
    /// Pickup orders skip the address block entirely.
    pub fn validate_delivery(&self) -> Vec<FieldError> {
        let d = &self.delivery;
        let mut errors = Vec::new();

        let mut required = vec![
            ("first_name", &d.first_name),
            ("last_name", &d.last_name),
        ];
        if d.order_type == OrderType::Delivery {
            required.push(("address", &d.address));
            required.push(("city", &d.city));
            required.push(("postal_code", &d.postal_code));
        }
        for (field, value) in required {
            if let Err(e) = validation::validate_required(field, value) {
                errors.push(FieldError::new(field, e.to_string()));
            }
        }
        if let Err(e) = validation::validate_email(&d.email) {
            errors.push(FieldError::new("email", e.to_string()));
        }
        if let Err(e) = validation::validate_phone(&d.phone) {
            errors.push(FieldError::new("phone", e.to_string()));
        }
        errors
    }

    /// Validates the payment step fields.
    ///
    /// Card fields only matter when paying by card; PayPal and cash have
    /// nothing to validate.
    pub fn validate_payment(&self) -> Vec<FieldError> {
        let p = &self.payment;
        let mut errors = Vec::new();

        if p.method == PaymentMethod::Card {
            if let Err(e) = validation::validate_required("card_holder", &p.card_holder) {
                errors.push(FieldError::new("card_holder", e.to_string()));
            }
            if let Err(e) = validation::validate_card_number(&p.card_number) {
                errors.push(FieldError::new("card_number", e.to_string()));
            }
            if let Err(e) = validation::validate_card_expiry(&p.card_expiry) {
                errors.push(FieldError::new("card_expiry", e.to_string()));
            }
            if let Err(e) = validation::validate_cvv(&p.cvv) {
                errors.push(FieldError::new("cvv", e.to_string()));
            }
        }
        errors
    }

    /// Validates the review step: the terms box must be ticked.
    pub fn validate_review(&self) -> Vec<FieldError> {
        if self.terms_accepted {
            Vec::new()
        } else {
            vec![FieldError::new(
                "terms_accepted",
                "Please accept the terms and conditions",
            )]
        }
    }

    /// Validates whichever step the wizard is on.
    pub fn validate_current(&self) -> Vec<FieldError> {
        match self.step {
            CheckoutStep::Delivery => self.validate_delivery(),
            CheckoutStep::Payment => self.validate_payment(),
            CheckoutStep::Review => self.validate_review(),
            CheckoutStep::Submitted => Vec::new(),
        }
    }

    /// Moves to the next step if the current step's fields validate.
    ///
    /// On `Review` this validates the terms checkbox but stays put (placing
    /// the order is a separate, effectful operation that lives above this
    /// crate); on `Submitted` it is a no-op.
    pub fn advance(&mut self) -> Result<CheckoutStep, Vec<FieldError>> {
        let errors = self.validate_current();
        if !errors.is_empty() {
            return Err(errors);
        }
        self.step = match self.step {
            CheckoutStep::Delivery => CheckoutStep::Payment,
            CheckoutStep::Payment => CheckoutStep::Review,
            other => other,
        };
        Ok(self.step)
    }

    /// Moves back one step, without re-validation. No-op on the first step
    /// and after submission: a placed order cannot be un-placed by pressing
    /// Back.
    pub fn back(&mut self) -> CheckoutStep {
        self.step = match self.step {
            CheckoutStep::Payment => CheckoutStep::Delivery,
            CheckoutStep::Review => CheckoutStep::Payment,
            other => other,
        };
        self.step
    }

    /// Marks the wizard terminal once the order is placed.
    ///
    /// Calling it twice is `AlreadySubmitted`.
    pub fn mark_submitted(&mut self) -> CoreResult<()> {
        match self.step {
            CheckoutStep::Submitted => Err(CoreError::AlreadySubmitted),
            _ => {
                self.step = CheckoutStep::Submitted;
                Ok(())
            }
        }
    }

    /// What the order record keeps about the payment.
    ///
    /// For card payments: the holder name and the LAST FOUR digits only.
    /// The full number and CVV never leave the wizard.
    pub fn payment_summary(&self) -> PaymentSummary {
        match self.payment.method {
            PaymentMethod::Card => {
                let digits: String = self
                    .payment
                    .card_number
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();
                let last4 = if digits.len() >= 4 {
                    Some(digits[digits.len() - 4..].to_string())
                } else {
                    None
                };
                PaymentSummary {
                    method: PaymentMethod::Card,
                    card_holder: Some(self.payment.card_holder.trim().to_string()),
                    card_last4: last4,
                }
            }
            method => PaymentSummary::for_method(method),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_flow() -> CheckoutFlow {
        let mut flow = CheckoutFlow::new();
        flow.delivery = DeliveryDetails {
            order_type: OrderType::Delivery,
            first_name: "Mario".to_string(),
            last_name: "Rossi".to_string(),
            email: "mario@example.com".to_string(),
            phone: "0123456789".to_string(),
            address: "Via Roma 1".to_string(),
            city: "Milano".to_string(),
            postal_code: "20121".to_string(),
            country: "IT".to_string(),
            delivery_time: "asap".to_string(),
            instructions: String::new(),
        };
        flow.payment = PaymentDetails {
            method: PaymentMethod::Card,
            card_holder: "Mario Rossi".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            card_expiry: "12/27".to_string(),
            cvv: "123".to_string(),
        };
        flow.terms_accepted = true;
        flow
    }

    #[test]
    fn test_happy_path_walks_all_steps() {
        let mut flow = valid_flow();
        assert_eq!(flow.step, CheckoutStep::Delivery);

        assert_eq!(flow.advance().unwrap(), CheckoutStep::Payment);
        assert_eq!(flow.advance().unwrap(), CheckoutStep::Review);
        // Review: advance validates terms but stays
        assert_eq!(flow.advance().unwrap(), CheckoutStep::Review);

        flow.mark_submitted().unwrap();
        assert_eq!(flow.step, CheckoutStep::Submitted);
    }

    #[test]
    fn test_invalid_delivery_blocks_advance() {
        let mut flow = valid_flow();
        flow.delivery.email = "not-an-email".to_string();
        flow.delivery.city = String::new();

        let errors = flow.advance().unwrap_err();
        assert_eq!(flow.step, CheckoutStep::Delivery);
        assert!(errors.iter().any(|e| e.field == "email"));
        assert!(errors.iter().any(|e| e.field == "city"));
    }

    #[test]
    fn test_pickup_skips_address_block() {
        let mut flow = valid_flow();
        flow.delivery.order_type = OrderType::Pickup;
        flow.delivery.address = String::new();
        flow.delivery.city = String::new();
        flow.delivery.postal_code = String::new();

        assert_eq!(flow.advance().unwrap(), CheckoutStep::Payment);
    }

    #[test]
    fn test_card_fields_skipped_for_cash() {
        let mut flow = valid_flow();
        flow.payment.method = PaymentMethod::Cash;
        flow.payment.card_number = String::new();
        flow.payment.cvv = String::new();

        flow.advance().unwrap();
        assert_eq!(flow.advance().unwrap(), CheckoutStep::Review);
    }

    #[test]
    fn test_invalid_card_blocks_payment_step() {
        let mut flow = valid_flow();
        flow.payment.card_number = "1234".to_string();

        flow.advance().unwrap();
        let errors = flow.advance().unwrap_err();
        assert_eq!(flow.step, CheckoutStep::Payment);
        assert!(errors.iter().any(|e| e.field == "card_number"));
    }

    #[test]
    fn test_terms_required_on_review() {
        let mut flow = valid_flow();
        flow.terms_accepted = false;
        flow.advance().unwrap();
        flow.advance().unwrap();

        let errors = flow.advance().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "terms_accepted"));

        flow.terms_accepted = true;
        assert!(flow.validate_review().is_empty());
    }

    #[test]
    fn test_back_navigation_never_validates() {
        let mut flow = valid_flow();
        flow.advance().unwrap();
        flow.advance().unwrap();

        // Invalidate a delivery field after the fact; back still works
        flow.delivery.email = String::new();
        assert_eq!(flow.back(), CheckoutStep::Payment);
        assert_eq!(flow.back(), CheckoutStep::Delivery);
        // First step: back stays
        assert_eq!(flow.back(), CheckoutStep::Delivery);
    }

    #[test]
    fn test_no_back_after_submission() {
        let mut flow = valid_flow();
        flow.advance().unwrap();
        flow.advance().unwrap();
        flow.mark_submitted().unwrap();

        assert_eq!(flow.back(), CheckoutStep::Submitted);
    }

    #[test]
    fn test_double_submission_rejected() {
        let mut flow = valid_flow();
        flow.advance().unwrap();
        flow.advance().unwrap();
        flow.mark_submitted().unwrap();

        assert!(matches!(
            flow.mark_submitted(),
            Err(CoreError::AlreadySubmitted)
        ));
    }

    #[test]
    fn test_promo_codes() {
        assert_eq!(promo_discount_bps("SAVE10"), Some(1000));
        assert_eq!(promo_discount_bps("save20"), Some(2000));
        assert_eq!(promo_discount_bps(" welcome "), Some(1500));
        assert_eq!(promo_discount_bps("SAVE50"), None);
    }

    #[test]
    fn test_apply_promo_normalizes_and_replaces() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.apply_promo("save10").unwrap(), 1000);
        assert_eq!(flow.promo_code.as_deref(), Some("SAVE10"));
        assert_eq!(flow.discount_bps(), 1000);

        assert_eq!(flow.apply_promo("WELCOME").unwrap(), 1500);
        assert_eq!(flow.discount_bps(), 1500);

        // Rejected code leaves the current promo alone
        assert!(flow.apply_promo("BOGUS").is_err());
        assert_eq!(flow.discount_bps(), 1500);

        flow.remove_promo();
        assert_eq!(flow.discount_bps(), 0);
    }

    #[test]
    fn test_payment_summary_masks_card() {
        let flow = valid_flow();
        let summary = flow.payment_summary();

        assert_eq!(summary.method, PaymentMethod::Card);
        assert_eq!(summary.card_holder.as_deref(), Some("Mario Rossi"));
        assert_eq!(summary.card_last4.as_deref(), Some("1111"));

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("4111 1111"));
        assert!(!json.contains("cvv"));
    }

    #[test]
    fn test_payment_summary_for_paypal() {
        let mut flow = valid_flow();
        flow.payment.method = PaymentMethod::Paypal;

        let summary = flow.payment_summary();
        assert_eq!(summary.method, PaymentMethod::Paypal);
        assert!(summary.card_holder.is_none());
        assert!(summary.card_last4.is_none());
    }
}
