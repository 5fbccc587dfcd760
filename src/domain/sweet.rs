use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{self, CoerceError};

/// A row of the inventory table.
///
/// The same field names are used for the CSV header and for JSON responses.
/// A sweet has no stored key: it is addressed by its row position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sweet {
    pub name: String,
    #[serde(deserialize_with = "coerce::lenient_int")]
    pub cost: i64,
    pub quantity: f64,
    pub ingredient: String,
}

impl Sweet {
    #[cfg(test)]
    pub fn new(
        name: impl Into<String>,
        cost: i64,
        quantity: f64,
        ingredient: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            quantity,
            ingredient: ingredient.into(),
        }
    }
}

/// Payload for adding or updating a sweet, as clients send it.
///
/// `cost` and `quantity` stay untyped until [`SweetForm::into_sweet`] coerces them.
#[derive(Debug, Clone, Deserialize)]
pub struct SweetForm {
    pub name: String,
    pub cost: Value,
    pub quantity: Value,
    pub ingredient: String,
}

impl SweetForm {
    #[cfg(test)]
    pub fn new(
        name: impl Into<String>,
        cost: impl Into<Value>,
        quantity: impl Into<Value>,
        ingredient: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cost: cost.into(),
            quantity: quantity.into(),
            ingredient: ingredient.into(),
        }
    }

    /// Cost becomes an integer, quantity a decimal.
    pub fn into_sweet(self) -> Result<Sweet, CoerceError> {
        let cost = coerce::to_int("cost", &self.cost)?;
        let quantity = coerce::to_float("quantity", &self.quantity)?;
        Ok(Sweet {
            name: self.name,
            cost,
            quantity,
            ingredient: self.ingredient,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_coercion() {
        let sweet = SweetForm::new("Choco", "10", "5", "Cocoa").into_sweet().unwrap();
        assert_eq!(sweet, Sweet::new("Choco", 10, 5.0, "Cocoa"));
    }

    #[test]
    fn test_form_rejects_non_numeric_cost() {
        let err = SweetForm::new("Choco", "ten", "5", "Cocoa")
            .into_sweet()
            .unwrap_err();
        assert_eq!(err.field, "cost");
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(Sweet::new("Choco", 10, 5.0, "Cocoa")).unwrap();
        assert_eq!(
            value,
            json!({"Name": "Choco", "Cost": 10, "Quantity": 5.0, "Ingredient": "Cocoa"})
        );
    }
}
