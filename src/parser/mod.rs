mod csv_parser;
mod errors;
#[cfg(test)]
mod tests;

pub use csv_parser::{parse_path, parse_reader, parse_str};
pub use errors::ParseError;
