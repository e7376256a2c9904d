use std::str::FromStr;
use std::sync::Arc;

use crate::models::columns;
use crate::types::{Amount, AmountError};

/// Value of the `is_fraudulent` column that marks a record as fraud.
pub const FRAUD_FLAG: &str = "1";

/// A single data row of an uploaded transaction CSV.
///
/// Every cell is kept as the trimmed text that was read. The header row is shared between
/// all records of one file, so a record answers lookups by column name for any header set,
/// not only the well-known transaction columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>
}

impl Record {
    /// Zips `values` positionally with `headers`.
    ///
    /// Missing trailing values become empty strings, values past the last header are dropped.
    pub fn new(headers: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(headers.len(), String::new());

        Self { headers, values }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the value of the column called `column`, or `""` when the file has no such
    /// column. When a header name repeats, the last column with that name wins.
    pub fn get(&self, column: &str) -> &str {
        self.headers.iter()
            .rposition(|header| header == column)
            .map(|index| self.values[index].as_str())
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(String::as_str).zip(self.values.iter().map(String::as_str))
    }

    pub fn transaction_id(&self) -> &str {
        self.get(columns::TRANSACTION_ID)
    }

    pub fn customer_id(&self) -> &str {
        self.get(columns::CUSTOMER_ID)
    }

    pub fn merchant_id(&self) -> &str {
        self.get(columns::MERCHANT_ID)
    }

    pub fn raw_amount(&self) -> &str {
        self.get(columns::AMOUNT)
    }

    pub fn transaction_time(&self) -> &str {
        self.get(columns::TRANSACTION_TIME)
    }

    pub fn card_type(&self) -> &str {
        self.get(columns::CARD_TYPE)
    }

    pub fn location(&self) -> &str {
        self.get(columns::LOCATION)
    }

    pub fn purchase_category(&self) -> &str {
        self.get(columns::PURCHASE_CATEGORY)
    }

    pub fn customer_age(&self) -> &str {
        self.get(columns::CUSTOMER_AGE)
    }

    pub fn transaction_description(&self) -> &str {
        self.get(columns::TRANSACTION_DESCRIPTION)
    }

    pub fn is_fraudulent(&self) -> bool {
        self.get(columns::IS_FRAUDULENT) == FRAUD_FLAG
    }

    pub fn amount(&self) -> Result<Amount, AmountError> {
        Amount::from_str(self.raw_amount())
    }
}
