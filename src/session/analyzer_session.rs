use tracing::{debug, info};

use crate::analysis::{FilterOptions, FilteredView, FraudStatistics, Selection, TransactionFilter};
use crate::models::Record;
use crate::scheduler::TaskHandle;
use crate::simulation::AnalysisEvent;

/// Identifies one load of the session so late events from a replaced analysis are ignored.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisStatus {
    Idle,
    Analyzing {
        progress: f64
    },
    Ready
}

/// State of the CSV analyzer for one upload at a time.
///
/// Statistics and filter options are derived once per record set. Installing a new record
/// set replaces the old one wholesale and puts every filter back to its default.
#[derive(Debug)]
pub struct AnalyzerSession {
    records: Vec<Record>,
    statistics: Option<FraudStatistics>,
    options: FilterOptions,
    filter: TransactionFilter,
    status: AnalysisStatus,
    generation: Generation,
    in_flight: Option<TaskHandle>
}

impl Default for AnalyzerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerSession {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            statistics: None,
            options: FilterOptions::default(),
            filter: TransactionFilter::default(),
            status: AnalysisStatus::Idle,
            generation: 0,
            in_flight: None
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Header row of the current upload, empty until a file with data rows is loaded.
    pub fn headers(&self) -> &[String] {
        self.records.first().map_or(&[], Record::headers)
    }

    pub fn statistics(&self) -> Option<&FraudStatistics> {
        self.statistics.as_ref()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn view(&self) -> FilteredView<'_> {
        self.filter.apply(&self.records)
    }

    pub fn set_fraud_only(&mut self, fraud_only: bool) {
        self.filter.fraud_only = fraud_only;
    }

    pub fn set_category(&mut self, category: Selection) {
        self.filter.category = category;
    }

    pub fn set_card_type(&mut self, card_type: Selection) {
        self.filter.card_type = card_type;
    }

    /// Starts a new load. Any analysis still running for an earlier load is cancelled and
    /// its events will be ignored from now on.
    pub fn begin_analysis(&mut self) -> Generation {
        self.cancel_in_flight();
        self.generation += 1;
        self.status = AnalysisStatus::Analyzing { progress: 0.0 };

        debug!("Analysis generation [{}] started", self.generation);

        self.generation
    }

    /// Keeps the task driving `generation` alive until it completes or is replaced.
    pub fn track(&mut self, generation: Generation, handle: TaskHandle) {
        if generation == self.generation {
            self.in_flight = Some(handle);
        }
    }

    /// Applies an analysis event. Returns `false` when the event belongs to a replaced load.
    pub fn apply(&mut self, generation: Generation, event: AnalysisEvent) -> bool {
        if generation != self.generation {
            debug!("Ignoring event from stale analysis generation [{generation}]");
            return false;
        }

        match event {
            AnalysisEvent::Progress(progress) => {
                if matches!(self.status, AnalysisStatus::Analyzing { .. }) {
                    self.status = AnalysisStatus::Analyzing { progress };
                }
            }
            AnalysisEvent::Complete(records) => {
                self.in_flight = None;
                self.install(records);
            }
        }

        true
    }

    /// Replaces the record set and resets every filter to its default.
    pub fn install(&mut self, records: Vec<Record>) {
        self.statistics = FraudStatistics::compute(&records);
        self.options = FilterOptions::collect(&records);
        self.filter = TransactionFilter::default();
        self.records = records;
        self.status = AnalysisStatus::Ready;

        info!("Loaded {} transactions", self.records.len());
    }

    /// Drops a failed load and returns to idle without touching the filters.
    pub fn abort(&mut self) {
        self.cancel_in_flight();
        self.status = AnalysisStatus::Idle;
    }

    /// Clears the current upload so a new file can be chosen.
    pub fn reset(&mut self) {
        self.cancel_in_flight();
        self.generation += 1;
        self.records.clear();
        self.statistics = None;
        self.options = FilterOptions::default();
        self.filter = TransactionFilter::default();
        self.status = AnalysisStatus::Idle;
    }

    fn cancel_in_flight(&mut self) {
        if let Some(mut handle) = self.in_flight.take() {
            debug!("Cancelling analysis generation [{}]", self.generation);
            handle.cancel();
        }
    }
}
