mod analyzer_session;
#[cfg(test)]
mod tests;

pub use analyzer_session::{AnalysisStatus, AnalyzerSession, Generation};
