mod analysis_engine;

pub use analysis_engine::AnalysisEngine;
