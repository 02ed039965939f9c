//! Mock card payment.
//!
//! No card data leaves the storefront. The form only has to be complete
//! before the order is submitted.

use serde::Deserialize;
use thiserror::Error;

/// Errors from the mock payment form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Please fill in all fields")]
    MissingFields(Vec<&'static str>),
}

/// Card details as typed into the checkout form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentDetails {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvc: String,
    #[serde(default)]
    pub cardholder: String,
}

impl PaymentDetails {
    /// Check that every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::MissingFields`] naming the blank fields.
    pub fn validate(&self) -> Result<(), PaymentError> {
        let missing: Vec<&'static str> = [
            ("card_number", &self.card_number),
            ("expiry", &self.expiry),
            ("cvc", &self.cvc),
            ("cardholder", &self.cardholder),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PaymentError::MissingFields(missing))
        }
    }

    /// Last four digits of the card number, for the receipt banner.
    #[must_use]
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PaymentDetails {
        PaymentDetails {
            card_number: "4242 4242 4242 4242".into(),
            expiry: "12/30".into(),
            cvc: "123".into(),
            cardholder: "Ada Lovelace".into(),
        }
    }

    #[test]
    fn test_complete_form_passes() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_blank_fields_fail() {
        let mut details = filled();
        details.cvc = "  ".into();
        details.cardholder.clear();
        assert_eq!(
            details.validate(),
            Err(PaymentError::MissingFields(vec!["cvc", "cardholder"]))
        );
        assert_eq!(
            PaymentError::MissingFields(vec![]).to_string(),
            "Please fill in all fields"
        );
    }

    #[test]
    fn test_last_four() {
        assert_eq!(filled().last_four(), "4242");
        assert_eq!(
            PaymentDetails {
                card_number: "12".into(),
                ..PaymentDetails::default()
            }
            .last_four(),
            "12"
        );
    }
}
