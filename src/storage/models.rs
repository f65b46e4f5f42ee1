//! Data models for the books table
//!
//! Two shapes cover every operation:
//! - [`Book`] is a full row, read back from typed queries.
//! - [`BookValues`] is a partial field set for writes and projected reads.
//!   Each field is wrapped in `Option` so "absent" is distinct from any real
//!   value; an absent field is neither validated nor written. The supplier
//!   fields are doubly wrapped because they are nullable in the schema, so
//!   "present but NULL" must stay representable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::contract::Column;
use crate::error::{Result, StoreError};

/// A stored book row.
///
/// Every stored book satisfies the table invariants: non-empty
/// `product_name`, `price >= 0`, `quantity >= 0`. The id is assigned on
/// insert and stable for the lifetime of the row.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub quantity: i64,
    #[sqlx(default)]
    pub supplier_name: Option<String>,
    #[sqlx(default)]
    pub supplier_phone_number: Option<String>,
}

/// Partial set of book fields, tracking per-field presence.
///
/// Built with the chained setters, or from a JSON object via
/// [`BookValues::from_json`]. Also used as the row shape for projected
/// queries, where only the projected columns are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookValues {
    /// Assigned by the store; populated on rows read back, never writeable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_phone_number: Option<Option<String>>,
}

impl BookValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn supplier_name(mut self, name: impl Into<String>) -> Self {
        self.supplier_name = Some(Some(name.into()));
        self
    }

    pub fn supplier_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.supplier_phone_number = Some(Some(phone.into()));
        self
    }

    /// Explicitly set the supplier name to NULL
    pub fn clear_supplier_name(mut self) -> Self {
        self.supplier_name = Some(None);
        self
    }

    /// Explicitly set the supplier phone number to NULL
    pub fn clear_supplier_phone_number(mut self) -> Self {
        self.supplier_phone_number = Some(None);
        self
    }

    /// Whether no writeable field is present (the read-only id doesn't count)
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.supplier_name.is_none()
            && self.supplier_phone_number.is_none()
    }

    /// Writeable columns present in this value set, in table order
    pub fn present_columns(&self) -> Vec<Column> {
        let mut columns = Vec::new();
        if self.product_name.is_some() {
            columns.push(Column::ProductName);
        }
        if self.price.is_some() {
            columns.push(Column::Price);
        }
        if self.quantity.is_some() {
            columns.push(Column::Quantity);
        }
        if self.supplier_name.is_some() {
            columns.push(Column::SupplierName);
        }
        if self.supplier_phone_number.is_some() {
            columns.push(Column::SupplierPhoneNumber);
        }
        columns
    }

    /// Validate the fields that are present.
    ///
    /// Absent fields are not checked. Supplier fields carry no rules.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.product_name {
            if name.is_empty() {
                return Err(StoreError::invalid_input("Book requires a name"));
            }
        }
        if let Some(price) = self.price {
            // Written as a negated `>=` so NaN also fails the rule
            if !(price >= 0.0) {
                return Err(StoreError::invalid_input("Book requires a valid price"));
            }
        }
        if let Some(quantity) = self.quantity {
            if quantity < 0 {
                return Err(StoreError::invalid_input("Book requires a valid quantity"));
            }
        }
        Ok(())
    }

    /// Validate for insert: the required fields must be present, then the
    /// per-field rules apply.
    pub fn validate_for_insert(&self) -> Result<()> {
        if self.product_name.is_none() {
            return Err(StoreError::invalid_input("Book requires a name"));
        }
        if self.price.is_none() {
            return Err(StoreError::invalid_input("Book requires a valid price"));
        }
        if self.quantity.is_none() {
            return Err(StoreError::invalid_input("Book requires a valid quantity"));
        }
        self.validate()
    }

    /// Parse a JSON object into a value set, respecting key presence.
    ///
    /// A key absent from the object leaves the field absent; `null` is only
    /// accepted for the nullable supplier fields. Unknown keys are rejected
    /// rather than silently passed through to SQL.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or_else(|| StoreError::invalid_input("Expected a JSON object"))?;

        let mut values = BookValues::new();
        for (key, field) in object {
            match key.as_str() {
                "product_name" => {
                    let name = field
                        .as_str()
                        .ok_or_else(|| StoreError::invalid_input("Book requires a name"))?;
                    values.product_name = Some(name.to_string());
                }
                "price" => {
                    let price = field
                        .as_f64()
                        .ok_or_else(|| StoreError::invalid_input("Book requires a valid price"))?;
                    values.price = Some(price);
                }
                "quantity" => {
                    let quantity = field.as_i64().ok_or_else(|| {
                        StoreError::invalid_input("Book requires a valid quantity")
                    })?;
                    values.quantity = Some(quantity);
                }
                "supplier_name" => {
                    values.supplier_name = Some(json_nullable_string(field, "supplier_name")?);
                }
                "supplier_phone_number" => {
                    values.supplier_phone_number =
                        Some(json_nullable_string(field, "supplier_phone_number")?);
                }
                "id" => {
                    return Err(StoreError::invalid_input(
                        "id is assigned by the store and cannot be written",
                    ));
                }
                other => {
                    return Err(StoreError::InvalidInput(format!("Unknown field: {}", other)));
                }
            }
        }
        Ok(values)
    }
}

fn json_nullable_string(value: &Value, field: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(StoreError::InvalidInput(format!(
            "Field {} must be a string or null",
            field
        ))),
    }
}
