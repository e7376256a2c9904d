use serde::Serialize;
use tracing::warn;

use crate::analysis::distinct;
use crate::models::Record;
use crate::types::Amount;

/// Summary figures over a complete record set.
///
/// These are always computed from every loaded record. Display filters never change them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FraudStatistics {
    pub total: usize,
    pub fraudulent: usize,
    pub legitimate: usize,
    pub total_amount: Amount,
    pub fraud_amount: Amount,
    /// Purchase categories seen among fraudulent records.
    pub fraud_categories: Vec<String>,
    /// Card types seen among fraudulent records.
    pub fraud_card_types: Vec<String>,
    /// Share of fraudulent records in percent, rounded to one decimal place.
    pub fraud_rate: f64,
    /// Records whose amount could not be read as a number and were left out of the sums.
    pub unparsed_amounts: usize
}

impl FraudStatistics {
    /// Returns `None` for an empty record set.
    pub fn compute(records: &[Record]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut fraudulent = 0;
        let mut total_amount = Amount::new();
        let mut fraud_amount = Amount::new();
        let mut unparsed_amounts = 0;

        for record in records {
            let amount = match record.amount() {
                Ok(amount) => Some(amount),
                Err(error) => {
                    warn!("Transaction [{}] left out of totals: {error}", record.transaction_id());
                    unparsed_amounts += 1;
                    None
                }
            };

            if record.is_fraudulent() {
                fraudulent += 1;
            }

            if let Some(amount) = amount {
                total_amount += amount;

                if record.is_fraudulent() {
                    fraud_amount += amount;
                }
            }
        }

        let fraud_records = || records.iter().filter(|record| record.is_fraudulent());
        let total = records.len();

        Some(Self {
            total,
            fraudulent,
            legitimate: total - fraudulent,
            total_amount,
            fraud_amount,
            fraud_categories: distinct(fraud_records().map(Record::purchase_category)),
            fraud_card_types: distinct(fraud_records().map(Record::card_type)),
            fraud_rate: fraud_rate(fraudulent, total),
            unparsed_amounts
        })
    }
}

fn fraud_rate(fraudulent: usize, total: usize) -> f64 {
    (fraudulent as f64 / total as f64 * 1000.0).round() / 10.0
}
