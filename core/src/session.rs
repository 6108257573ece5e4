//! # Batch Session
//!
//! Owns the state of the single active batch and coordinates the use cases:
//! classify, derive statistics, request insights and export.
//!
//! Two independent [`BusyFlag`]s gate classification and insight requests.
//! Flags are released by [`BusyGuard`] on drop, so every exit path clears them.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use proxyscope_common::models::insight::{Insight, InsightOutcome};
use proxyscope_common::models::record::AddressRecord;
use proxyscope_common::models::stats::{BatchStats, LocationCount};
use thiserror::Error;
use tracing::warn;

use crate::aggregator::{self, TOP_LOCATIONS};
use crate::classifier::BatchClassifier;
use crate::export;
use crate::insights::InsightRequester;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("a batch is already being classified")]
    ClassificationInProgress,
    #[error("insights are already being requested")]
    InsightsInProgress,
    #[error("insight generation is not configured")]
    InsightsNotConfigured,
}

/// Shared "operation running" marker that UI code may observe.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Marks the flag busy, or returns `None` when it already is.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(self.0.clone()))
    }
}

/// Clears its [`BusyFlag`] when dropped.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Data of the current batch. Replaced wholesale on every run.
#[derive(Debug, Clone, Default)]
pub struct BatchState {
    input: String,
    records: Vec<AddressRecord>,
    insights: Vec<Insight>,
}

impl BatchState {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn risky_records(&self) -> Vec<&AddressRecord> {
        self.records.iter().filter(|record| record.is_risky()).collect()
    }

    pub fn has_risky(&self) -> bool {
        self.records.iter().any(AddressRecord::is_risky)
    }

    pub fn stats(&self) -> BatchStats {
        aggregator::summarize(&self.records)
    }

    pub fn top_locations(&self) -> Vec<LocationCount> {
        aggregator::top_locations(&self.records, TOP_LOCATIONS)
    }

    /// Starts a new run. Insights from the previous batch are stale from here on.
    fn begin_batch(&mut self, input: &str) {
        self.input = input.to_string();
        self.insights.clear();
    }

    fn finish_batch(&mut self, records: Vec<AddressRecord>) {
        self.records = records;
        self.insights.clear();
    }

    fn apply_insights(&mut self, insights: Vec<Insight>) {
        self.insights = insights;
    }
}

pub struct Session {
    classifier: BatchClassifier,
    requester: Option<InsightRequester>,
    state: BatchState,
    classifying: BusyFlag,
    requesting_insights: BusyFlag,
}

impl Session {
    pub fn new(classifier: BatchClassifier, requester: Option<InsightRequester>) -> Self {
        Self {
            classifier,
            requester,
            state: BatchState::default(),
            classifying: BusyFlag::default(),
            requesting_insights: BusyFlag::default(),
        }
    }

    pub fn state(&self) -> &BatchState {
        &self.state
    }

    pub fn classifying(&self) -> BusyFlag {
        self.classifying.clone()
    }

    pub fn requesting_insights(&self) -> BusyFlag {
        self.requesting_insights.clone()
    }

    pub fn insights_enabled(&self) -> bool {
        self.requester.is_some()
    }

    /// Classifies `input` and replaces the current batch with the result.
    pub async fn run_batch(&mut self, input: &str) -> Result<&[AddressRecord], SessionError> {
        let _guard: BusyGuard = self
            .classifying
            .try_acquire()
            .ok_or(SessionError::ClassificationInProgress)?;

        self.state.begin_batch(input);
        let records: Vec<AddressRecord> = self.classifier.classify(input).await;
        self.state.finish_batch(records);
        Ok(self.state.records())
    }

    /// Requests insights for the risky records of the current batch.
    ///
    /// Capability failures come back as [`InsightOutcome::Unavailable`] and leave
    /// the session with no insights.
    pub async fn generate_insights(&mut self) -> Result<InsightOutcome, SessionError> {
        let requester: &InsightRequester = self
            .requester
            .as_ref()
            .ok_or(SessionError::InsightsNotConfigured)?;
        let _guard: BusyGuard = self
            .requesting_insights
            .try_acquire()
            .ok_or(SessionError::InsightsInProgress)?;

        let outcome: InsightOutcome = requester.request_insights(self.state.records()).await;
        if outcome.is_unavailable() {
            warn!("security insights unavailable");
        }
        self.state.apply_insights(outcome.clone().into_insights());
        Ok(outcome)
    }

    pub fn export_csv(&self, dir: &Path, date: NaiveDate) -> std::io::Result<Option<PathBuf>> {
        export::write_csv(self.state.records(), dir, date)
    }
}
