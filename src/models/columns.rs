//! Column names of the transaction export the analyzer understands.

pub const TRANSACTION_ID: &str = "transaction_id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const MERCHANT_ID: &str = "merchant_id";
pub const AMOUNT: &str = "amount";
pub const TRANSACTION_TIME: &str = "transaction_time";
pub const IS_FRAUDULENT: &str = "is_fraudulent";
pub const CARD_TYPE: &str = "card_type";
pub const LOCATION: &str = "location";
pub const PURCHASE_CATEGORY: &str = "purchase_category";
pub const CUSTOMER_AGE: &str = "customer_age";
pub const TRANSACTION_DESCRIPTION: &str = "transaction_description";

pub const EXPECTED: [&str; 11] = [
    TRANSACTION_ID,
    CUSTOMER_ID,
    MERCHANT_ID,
    AMOUNT,
    TRANSACTION_TIME,
    IS_FRAUDULENT,
    CARD_TYPE,
    LOCATION,
    PURCHASE_CATEGORY,
    CUSTOMER_AGE,
    TRANSACTION_DESCRIPTION
];
