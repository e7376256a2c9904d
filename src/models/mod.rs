pub mod columns;
mod errors;
mod record;
#[cfg(test)]
mod tests;

pub use errors::AnalyzerError;
pub use record::{Record, FRAUD_FLAG};
