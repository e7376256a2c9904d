use super::{columns, Record};
use anyhow::Result;
use std::sync::Arc;

fn headers(names: &[&str]) -> Arc<[String]> {
    names.iter().map(|name| name.to_string()).collect()
}

fn values(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

#[test]
fn test_record_looks_up_values_by_header_name() {
    let record = Record::new(headers(&["a", "b"]), values(&["1", "2"]));

    assert_eq!(record.get("a"), "1");
    assert_eq!(record.get("b"), "2");
    assert_eq!(record.get("c"), "");
}

#[test]
fn test_record_pads_missing_trailing_values_with_empty_strings() {
    let record = Record::new(headers(&["a", "b", "c"]), values(&["1"]));

    assert_eq!(record.values(), &["1".to_string(), String::new(), String::new()]);
    assert_eq!(record.get("c"), "");
}

#[test]
fn test_record_drops_values_beyond_the_header_row() {
    let record = Record::new(headers(&["a"]), values(&["1", "2", "3"]));

    assert_eq!(record.values().len(), 1);
    assert_eq!(record.iter().collect::<Vec<_>>(), vec![("a", "1")]);
}

#[test]
fn test_record_duplicate_header_reads_the_last_column() {
    let record = Record::new(headers(&["id", "amount", "amount"]), values(&["1", "10.00", "12.50"]));

    assert_eq!(record.get("amount"), "12.50");
    assert_eq!(record.values().len(), 3);
}

#[test]
fn test_record_fraud_flag_only_accepts_one() {
    let columns = headers(&[columns::TRANSACTION_ID, columns::IS_FRAUDULENT]);

    assert!(Record::new(columns.clone(), values(&["1", "1"])).is_fraudulent());
    assert!(!Record::new(columns.clone(), values(&["2", "0"])).is_fraudulent());
    assert!(!Record::new(columns.clone(), values(&["3", "true"])).is_fraudulent());
    assert!(!Record::new(columns.clone(), values(&["4", "yes"])).is_fraudulent());
    assert!(!Record::new(columns, values(&["5"])).is_fraudulent());
}

#[test]
fn test_record_exposes_transaction_columns() -> Result<()> {
    let record = Record::new(
        columns::EXPECTED.iter().map(|name| name.to_string()).collect(),
        values(&["17", "C-204", "M-88", "42.50", "2023-02-11 14:03:00", "1", "Visa", "Denver", "Travel", "37", "Airline ticket"])
    );

    assert_eq!(record.transaction_id(), "17");
    assert_eq!(record.customer_id(), "C-204");
    assert_eq!(record.merchant_id(), "M-88");
    assert_eq!(record.transaction_time(), "2023-02-11 14:03:00");
    assert_eq!(record.card_type(), "Visa");
    assert_eq!(record.location(), "Denver");
    assert_eq!(record.purchase_category(), "Travel");
    assert_eq!(record.customer_age(), "37");
    assert_eq!(record.transaction_description(), "Airline ticket");
    assert_eq!(record.amount()?.to_string(), "42.50");
    assert!(record.is_fraudulent());

    Ok(())
}

#[test]
fn test_record_missing_amount_column_reads_as_zero() -> Result<()> {
    let record = Record::new(headers(&[columns::TRANSACTION_ID]), values(&["1"]));

    assert!(record.amount()?.is_zero());

    Ok(())
}
