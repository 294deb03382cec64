use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cart::CartLine;
use crate::core::app_error::AppError;

/// Flat sales-tax rate applied to the cart subtotal at checkout.
pub const TAX_RATE: f32 = 0.08;

#[derive(Deserialize, Debug, ToSchema)]
pub struct CustomerDetails {
    pub full_name: String,
    pub phone_number: String,
    pub email_address: String,
    pub delivery_address: String,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// One priced line as it is frozen into the order document.
#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct OrderLine {
    pub id: i32,
    pub name: String,
    pub price: f32,
    pub quantity: i32,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.item.id,
            name: line.item.name.clone(),
            price: line.item.price,
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f32,
    pub tax: f32,
    pub total: f32,
}

pub fn compute_totals(lines: &[CartLine]) -> OrderTotals {
    let subtotal: f32 = lines
        .iter()
        .map(|line| line.item.price * line.quantity as f32)
        .sum();
    let tax = subtotal * TAX_RATE;
    OrderTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Reject the checkout before any store write: required contact fields must
/// be non-blank and the cart non-empty. Special instructions stay optional.
pub fn validate_order(details: &CustomerDetails, lines: &[CartLine]) -> Result<(), AppError> {
    validate_customer_details(details)?;
    if lines.is_empty() {
        return Err(AppError::BadRequest("Your cart is empty".into()));
    }
    Ok(())
}

pub fn validate_customer_details(details: &CustomerDetails) -> Result<(), AppError> {
    let required = [
        ("full_name", &details.full_name),
        ("phone_number", &details.phone_number),
        ("email_address", &details.email_address),
        ("delivery_address", &details.delivery_address),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;

    fn line(id: i32, price: f32, quantity: i32) -> CartLine {
        CartLine {
            item: CartItem {
                id,
                name: format!("Item {id}"),
                price,
                image: String::new(),
            },
            quantity,
        }
    }

    fn details() -> CustomerDetails {
        CustomerDetails {
            full_name: "Ada Lovelace".to_string(),
            phone_number: "555-0100".to_string(),
            email_address: "ada@example.com".to_string(),
            delivery_address: "12 Analytical Way".to_string(),
            special_instructions: None,
        }
    }

    #[test]
    fn totals_match_the_worked_example() {
        // Cart: 2 x 10.00 + 1 x 5.00 -> subtotal 25.00, tax 2.00, total 27.00.
        let lines = [line(1, 10.0, 2), line(2, 5.0, 1)];
        let totals = compute_totals(&lines);

        assert_eq!(totals.subtotal, 25.0);
        assert_eq!(totals.tax, 2.0);
        assert_eq!(totals.total, 27.0);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let totals = compute_totals(&[]);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn total_is_subtotal_plus_tax() {
        let lines = [line(1, 12.99, 1), line(2, 15.99, 3)];
        let totals = compute_totals(&lines);
        assert_eq!(totals.total, totals.subtotal + totals.tax);
        assert_eq!(totals.tax, totals.subtotal * TAX_RATE);
    }

    #[test]
    fn complete_details_pass_validation() {
        assert!(validate_customer_details(&details()).is_ok());
    }

    #[test]
    fn each_missing_required_field_is_rejected() {
        for blank in ["", "   "] {
            let mut missing_name = details();
            missing_name.full_name = blank.to_string();
            assert!(validate_customer_details(&missing_name).is_err());

            let mut missing_phone = details();
            missing_phone.phone_number = blank.to_string();
            assert!(validate_customer_details(&missing_phone).is_err());

            let mut missing_email = details();
            missing_email.email_address = blank.to_string();
            assert!(validate_customer_details(&missing_email).is_err());

            let mut missing_address = details();
            missing_address.delivery_address = blank.to_string();
            assert!(validate_customer_details(&missing_address).is_err());
        }
    }

    #[test]
    fn checkout_with_an_empty_cart_is_rejected() {
        assert!(validate_order(&details(), &[]).is_err());
        assert!(validate_order(&details(), &[line(1, 10.0, 2)]).is_ok());
    }

    #[test]
    fn special_instructions_are_optional() {
        let mut with_notes = details();
        with_notes.special_instructions = Some("Ring the bell".to_string());
        assert!(validate_customer_details(&with_notes).is_ok());
    }

    #[test]
    fn order_lines_snapshot_cart_lines() {
        let cart_line = line(7, 3.5, 4);
        let order_line = OrderLine::from(&cart_line);
        assert_eq!(
            order_line,
            OrderLine {
                id: 7,
                name: "Item 7".to_string(),
                price: 3.5,
                quantity: 4,
            }
        );
    }
}
