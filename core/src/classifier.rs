//! # Batch Classifier
//!
//! Splits free-text input into address tokens and resolves each one through a
//! [`LookupProvider`]. The emitted records always follow input order, whatever
//! the configured fan-out.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use proxyscope_common::lookup::LookupProvider;
use proxyscope_common::models::record::AddressRecord;
use tracing::{debug, info};

pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Splits on any run of newlines, commas or spaces and drops empty tokens.
pub fn tokenize(raw_text: &str) -> Vec<&str> {
    raw_text
        .split(['\n', ',', ' '])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

pub struct BatchClassifier {
    provider: Arc<dyn LookupProvider>,
    concurrency: usize,
    on_resolved: Option<ProgressCallback>,
}

impl BatchClassifier {
    /// Sequential classifier: one lookup completes before the next begins.
    pub fn new(provider: Arc<dyn LookupProvider>) -> Self {
        Self {
            provider,
            concurrency: 1,
            on_resolved: None,
        }
    }

    /// Allows up to `concurrency` lookups in flight. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Called with `(resolved, total)` after every finished lookup.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_resolved = Some(callback);
        self
    }

    pub async fn classify(&self, raw_text: &str) -> Vec<AddressRecord> {
        let tokens: Vec<&str> = tokenize(raw_text);
        let total: usize = tokens.len();
        if total == 0 {
            debug!("no addresses in input");
            return Vec::new();
        }

        info!(total, concurrency = self.concurrency, "classifying batch");

        let resolved = AtomicUsize::new(0);
        let provider: &Arc<dyn LookupProvider> = &self.provider;
        let on_resolved: Option<&ProgressCallback> = self.on_resolved.as_ref();

        // `buffered` yields in submission order, so input order survives fan-out.
        let records: Vec<AddressRecord> = stream::iter(tokens)
            .map(|token| {
                let resolved = &resolved;
                async move {
                    let record: AddressRecord = provider.resolve(token).await;
                    let done: usize = resolved.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(callback) = on_resolved {
                        callback(done, total);
                    }
                    record
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let risky: usize = records.iter().filter(|record| record.is_risky()).count();
        info!(total, risky, "batch classified");
        records
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::lookup::fallback_record;
    use crate::lookup::static_table::StaticTableLookup;

    /// Answers later tokens faster so that completion order differs from input order.
    struct ReversedLatency {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LookupProvider for ReversedLatency {
        async fn resolve(&self, address: &str) -> AddressRecord {
            self.calls.lock().unwrap().push(address.to_string());
            let delay: u64 = match address {
                "10.0.0.1" => 30,
                "10.0.0.2" => 20,
                _ => 1,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            fallback_record(address)
        }
    }

    #[test]
    fn tokenize_collapses_separator_runs() {
        assert_eq!(tokenize(" 8.8.8.8, 1.1.1.1\n\n "), vec!["8.8.8.8", "1.1.1.1"]);
        assert_eq!(tokenize("a,,b  c\r\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn tokenize_blank_input_is_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n , \n").is_empty());
    }

    #[tokio::test]
    async fn emits_one_record_per_token_in_order() {
        let classifier = BatchClassifier::new(Arc::new(StaticTableLookup::new(Duration::ZERO)));
        let records = classifier.classify(" 8.8.8.8, 1.1.1.1\n\n ").await;
        let addresses: Vec<&str> = records.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["8.8.8.8", "1.1.1.1"]);
    }

    #[tokio::test]
    async fn duplicate_tokens_are_kept() {
        let classifier = BatchClassifier::new(Arc::new(StaticTableLookup::new(Duration::ZERO)));
        let records = classifier.classify("1.1.1.1 1.1.1.1").await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[tokio::test]
    async fn concurrent_resolution_preserves_input_order() {
        let provider = Arc::new(ReversedLatency {
            calls: Mutex::new(Vec::new()),
        });
        let classifier = BatchClassifier::new(provider.clone()).with_concurrency(3);
        let records = classifier.classify("10.0.0.1,10.0.0.2,10.0.0.3").await;

        let addresses: Vec<&str> = records.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
        assert_eq!(provider.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn progress_reports_every_lookup() {
        let seen: Arc<Mutex<Vec<(usize, usize)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let classifier = BatchClassifier::new(Arc::new(StaticTableLookup::new(Duration::ZERO)))
            .with_progress(Arc::new(move |done, total| sink.lock().unwrap().push((done, total))));

        classifier.classify("8.8.8.8\n1.1.1.1\n185.156.172.1").await;
        assert_eq!(*seen.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn empty_input_skips_provider() {
        let provider = Arc::new(ReversedLatency {
            calls: Mutex::new(Vec::new()),
        });
        let classifier = BatchClassifier::new(provider.clone());
        assert!(classifier.classify("   \n").await.is_empty());
        assert!(provider.calls.lock().unwrap().is_empty());
    }
}
