use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::Rng;
use tokio::task::spawn_blocking;
use tracing::{error, info};

use crate::models::{AnalyzerError, Record};
use crate::parser::parse_path;
use crate::session::{AnalysisStatus, AnalyzerSession};
use crate::simulation::{spawn_analysis, AnalysisEvent, ANALYSIS_TICK};

/// Loads transaction files into an [`AnalyzerSession`].
pub struct AnalysisEngine {
    tick: Duration,
    simulate: bool
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self {
            tick: ANALYSIS_TICK,
            simulate: false
        }
    }

    /// Holds loaded records behind the simulated AI analysis before installing them.
    pub fn with_simulation(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Reads and parses a `.csv` file off the async runtime.
    pub async fn load(&self, path: &Path) -> Result<Vec<Record>, AnalyzerError> {
        if !has_csv_extension(path) {
            return Err(AnalyzerError::unsupported_extension(path));
        }

        let owned: PathBuf = path.to_path_buf();
        let parsed = spawn_blocking(move || parse_path(&owned)).await?;

        parsed.map_err(|source| AnalyzerError::load(path, source))
    }

    /// Orchestrates a complete load of `path` into `session`.
    ///
    /// On failure the session goes back to idle and keeps its previous filters.
    pub async fn run<R>(&self, session: &mut AnalyzerSession, path: &Path, rng: R) -> Result<(), AnalyzerError>
    where
        R: Rng + Send + 'static,
    {
        let generation = session.begin_analysis();

        let records = match self.load(path).await {
            Ok(records) => records,
            Err(error) => {
                error!("{error}");
                session.abort();
                return Err(error);
            }
        };

        if !self.simulate {
            session.install(records);
            return Ok(());
        }

        info!("Running fraud detection models on {} transactions", records.len());

        let (handle, mut receiver) = spawn_analysis(records, self.tick, rng);
        session.track(generation, handle);

        while let Some(event) = receiver.recv().await {
            if let AnalysisEvent::Progress(percent) = &event {
                info!("AI analysis {percent:.0}% complete");
            }

            session.apply(generation, event);
        }

        match session.status() {
            AnalysisStatus::Ready => Ok(()),
            _ => {
                session.abort();
                Err(AnalyzerError::cancelled(path))
            }
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"))
}
