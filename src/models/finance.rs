// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_digits(value: &str, len: usize) -> Result<(), ValidationError> {
    if value.len() != len || !value.chars().all(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("digits");
        err.add_param("length".into(), &len);
        err.message = Some(format!("Must be exactly {} digits.", len).into());
        return Err(err);
    }
    Ok(())
}

fn validate_sort_code(value: &str) -> Result<(), ValidationError> {
    // aceita "12-34-56" e "123456"
    validate_digits(&value.replace('-', ""), 6)
}

fn validate_account_number(value: &str) -> Result<(), ValidationError> {
    validate_digits(value, 8)
}

/// Valor gravado em NUMERIC(14, 2): nem zero, nem fração de centavo.
fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_zero() {
        let mut err = ValidationError::new("non_zero");
        err.message = Some("Amount cannot be zero.".into());
        return Err(err);
    }
    if value.normalize().scale() > 2 {
        let mut err = ValidationError::new("scale");
        err.message = Some("Amount cannot have more than 2 decimal places.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads: importação de extrato bancário
// ---

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankTransactionPayload {
    #[schema(value_type = String, format = Date, example = "2025-02-28")]
    pub date: NaiveDate,

    #[validate(length(min = 1, max = 255, message = "Description is required."))]
    #[schema(example = "Local authority fee - Room 4")]
    pub description: String,

    /// Positivo = entrada, negativo = saída
    #[validate(custom(function = "validate_amount"))]
    #[schema(value_type = f64, example = 1250.00)]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankImportPayload {
    #[validate(length(min = 1, max = 120, message = "Account name is required."))]
    #[schema(example = "Operating account")]
    pub account_name: String,

    #[validate(custom(function = "validate_sort_code"))]
    #[schema(example = "12-34-56")]
    pub sort_code: String,

    #[validate(custom(function = "validate_account_number"))]
    #[schema(example = "12345678")]
    pub account_number: String,

    #[schema(value_type = String, format = Date, example = "2025-02-28")]
    pub statement_date: NaiveDate,

    #[validate(length(min = 1, max = 5000, message = "Between 1 and 5000 transactions are required."))]
    #[validate(nested)]
    pub transactions: Vec<BankTransactionPayload>,
}

impl BankImportPayload {
    pub fn normalized_sort_code(&self) -> String {
        self.sort_code.replace('-', "")
    }

    pub fn totals(&self) -> (Decimal, Decimal) {
        self.transactions
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(credits, debits), t| {
                if t.amount.is_sign_negative() {
                    (credits, debits + t.amount.abs())
                } else {
                    (credits + t.amount, debits)
                }
            })
    }
}

// ---
// Registros gravados
// ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankImport {
    pub id: Uuid,
    #[schema(ignore)]
    pub organization_id: Uuid,
    pub account_name: String,
    pub sort_code: String,
    pub account_number: String,
    #[schema(value_type = String, format = Date)]
    pub statement_date: NaiveDate,
    pub line_count: i32,
    #[schema(value_type = f64)]
    pub total_credits: Decimal,
    #[schema(value_type = f64)]
    pub total_debits: Decimal,
    pub imported_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> BankImportPayload {
        serde_json::from_value(value).unwrap()
    }

    fn valid() -> serde_json::Value {
        json!({
            "accountName": "Operating account",
            "sortCode": "12-34-56",
            "accountNumber": "12345678",
            "statementDate": "2025-02-28",
            "transactions": [
                { "date": "2025-02-03", "description": "Council fees", "amount": 1250.50 },
                { "date": "2025-02-04", "description": "Laundry", "amount": -80.25 }
            ]
        })
    }

    #[test]
    fn accepts_a_well_formed_statement() {
        let p = payload(valid());
        assert!(p.validate().is_ok());
        assert_eq!(p.normalized_sort_code(), "123456");
        let (credits, debits) = p.totals();
        assert_eq!(credits, Decimal::new(125050, 2));
        assert_eq!(debits, Decimal::new(8025, 2));
    }

    #[test]
    fn rejects_bad_bank_details() {
        let mut v = valid();
        v["sortCode"] = json!("12-34");
        v["accountNumber"] = json!("1234abcd");
        let errors = payload(v).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("sort_code"));
        assert!(fields.contains_key("account_number"));
    }

    #[test]
    fn rejects_empty_statement() {
        let mut v = valid();
        v["transactions"] = json!([]);
        assert!(payload(v).validate().is_err());
    }

    #[test]
    fn rejects_zero_amount_lines() {
        let mut v = valid();
        v["transactions"][1]["amount"] = json!(0);
        assert!(payload(v).validate().is_err());
    }

    #[test]
    fn rejects_fractions_of_a_penny() {
        let mut v = valid();
        v["transactions"][0]["amount"] = json!(0.001);
        let errors = payload(v).validate().unwrap_err();
        let details = format!("{errors:?}");
        assert!(details.contains("scale"), "{details}");

        let mut v = valid();
        v["transactions"][1]["amount"] = json!(-12.345);
        assert!(payload(v).validate().is_err());
    }

    #[test]
    fn whole_pence_are_accepted() {
        let mut v = valid();
        v["transactions"][0]["amount"] = json!(99.99);
        let p = payload(v);
        assert!(p.validate().is_ok());
        assert_eq!(p.totals().0, Decimal::new(9999, 2));
    }
}
