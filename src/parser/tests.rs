use super::{parse_path, parse_reader, parse_str};
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

const TRANSACTIONS_CSV: &str = "transaction_id,customer_id,merchant_id,amount,transaction_time,is_fraudulent,card_type,location,purchase_category,customer_age,transaction_description
1,C-1,M-1,12.50,2023-01-01 08:00:00,0,Visa,Austin,Groceries,34,Weekly shop
2,C-2,M-2,980.00,2023-01-01 09:15:00,1,Amex,Miami,Electronics,22,Laptop
";

#[test]
fn test_parser_zips_rows_with_header_names_in_order() -> Result<()> {
    let records = parse_str("a,b\n1,2\n3,4")?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].iter().collect::<Vec<_>>(), vec![("a", "1"), ("b", "2")]);
    assert_eq!(records[1].iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "4")]);

    Ok(())
}

#[test]
fn test_parser_fills_missing_trailing_fields_with_empty_strings() -> Result<()> {
    let records = parse_str("a,b,c\n1\n2,3")?;

    assert_eq!(records[0].get("a"), "1");
    assert_eq!(records[0].get("b"), "");
    assert_eq!(records[0].get("c"), "");
    assert_eq!(records[1].get("b"), "3");
    assert_eq!(records[1].get("c"), "");

    Ok(())
}

#[test]
fn test_parser_trims_headers_and_values() -> Result<()> {
    let records = parse_str(" a , b \n  1 ,  2  \n")?;

    assert_eq!(records[0].headers(), &["a".to_string(), "b".to_string()]);
    assert_eq!(records[0].get("a"), "1");
    assert_eq!(records[0].get("b"), "2");

    Ok(())
}

#[test]
fn test_parser_skips_blank_and_trailing_lines() -> Result<()> {
    let records = parse_str("a,b\n1,2\n\n   \n3,4\n\n\n")?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get("a"), "3");

    Ok(())
}

#[test]
fn test_parser_keeps_rows_whose_cells_are_all_empty() -> Result<()> {
    let records = parse_str("a,b,c\n1,2,3\n,,\n4,5,6")?;

    assert_eq!(records.len(), 3);
    assert!(records[1].values().iter().all(String::is_empty));
    assert_eq!(records[2].get("a"), "4");

    Ok(())
}

#[test]
fn test_parser_handles_windows_line_endings() -> Result<()> {
    let records = parse_str("a,b\r\n1,2\r\n3,4\r\n")?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("b"), "2");
    assert_eq!(records[1].get("b"), "4");

    Ok(())
}

#[test]
fn test_parser_respects_quoted_commas() -> Result<()> {
    let records = parse_str("id,description,amount\n7,\"Dinner, drinks\",54.20")?;

    assert_eq!(records[0].get("description"), "Dinner, drinks");
    assert_eq!(records[0].get("amount"), "54.20");

    Ok(())
}

#[test]
fn test_parser_keeps_misaligned_rows_instead_of_rejecting_them() -> Result<()> {
    let records = parse_str("id,amount,is_fraudulent\n1 10.00,1\n2,20.00,0")?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("id"), "1 10.00");
    assert_eq!(records[0].get("amount"), "1");
    assert_eq!(records[0].get("is_fraudulent"), "");

    Ok(())
}

#[test]
fn test_parser_returns_nothing_for_empty_or_header_only_input() -> Result<()> {
    assert!(parse_str("")?.is_empty());
    assert!(parse_str("  \n\n")?.is_empty());
    assert!(parse_str("a,b\n")?.is_empty());

    Ok(())
}

#[test]
fn test_parser_reads_transaction_export() -> Result<()> {
    let records = parse_reader(TRANSACTIONS_CSV.as_bytes())?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].transaction_id(), "2");
    assert_eq!(records[1].card_type(), "Amex");
    assert!(records[1].is_fraudulent());
    assert!(!records[0].is_fraudulent());

    Ok(())
}

#[test]
fn test_parser_reads_from_disk() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{TRANSACTIONS_CSV}")?;

    let records = parse_path(file.path())?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].purchase_category(), "Groceries");

    Ok(())
}

#[test]
fn test_parser_reports_invalid_utf8() {
    assert!(parse_reader(&b"a,b\n\xff,1"[..]).is_err());
}

#[test]
fn test_parser_reports_missing_file() {
    assert!(parse_path(std::path::Path::new("does-not-exist.csv")).is_err());
}
