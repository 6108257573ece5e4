#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use proxyscope_common::models::insight::InsightOutcome;
use proxyscope_common::models::record::Classification;
use proxyscope_core::classifier::BatchClassifier;
use proxyscope_core::lookup::static_table::StaticTableLookup;

use crate::utils::{Behaviour, ScriptedGenerator, session_with};

/// Runs the default dashboard input through the whole pipeline.
#[tokio::test]
async fn default_batch_end_to_end() {
    let generator = ScriptedGenerator::new(Behaviour::Answer);
    let mut session = session_with(generator.clone());

    let records = session
        .run_batch("8.8.8.8\n1.1.1.1\n185.156.172.1")
        .await
        .unwrap();
    let addresses: Vec<&str> = records.iter().map(|r| r.address.as_str()).collect();
    assert_eq!(addresses, vec!["8.8.8.8", "1.1.1.1", "185.156.172.1"]);

    let stats = session.state().stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.clean, 0);
    assert_eq!(stats.proxies, 1);
    assert_eq!(stats.vpn_datacenter, 2);
    assert_eq!(stats.risky, 3);
    assert_eq!(stats.risk_percentage_label(), "100.0");

    let locations = session.state().top_locations();
    assert_eq!(locations.len(), 3);
    assert!(locations.iter().all(|l| l.count == 1));
    let mut countries: Vec<&str> = locations.iter().map(|l| l.country_short.as_str()).collect();
    countries.sort();
    assert_eq!(countries, vec!["AU", "SE", "US"]);

    let outcome = session.generate_insights().await.unwrap();
    assert!(!outcome.is_unavailable());
    assert_eq!(generator.calls(), 1);

    let insight_addresses: Vec<&str> = session
        .state()
        .insights()
        .iter()
        .map(|i| i.address.as_str())
        .collect();
    assert_eq!(insight_addresses, vec!["8.8.8.8", "1.1.1.1", "185.156.172.1"]);
}

#[tokio::test]
async fn one_of_each_class_is_two_thirds_risky() {
    let mut session = session_with(ScriptedGenerator::new(Behaviour::Answer));
    session
        .run_batch(" 203.0.113.9, 185.156.172.1\n\n 8.8.8.8 ")
        .await
        .unwrap();

    let stats = session.state().stats();
    assert_eq!((stats.clean, stats.proxies, stats.vpn_datacenter), (1, 1, 1));
    assert_eq!(stats.risky, 2);
    assert_eq!(stats.risk_percentage_label(), "66.7");
    assert_eq!(session.state().risky_records().len(), 2);
}

#[tokio::test]
async fn new_batch_discards_previous_insights() {
    let mut session = session_with(ScriptedGenerator::new(Behaviour::Answer));
    session.run_batch("185.156.172.1").await.unwrap();
    session.generate_insights().await.unwrap();
    assert_eq!(session.state().insights().len(), 1);

    session.run_batch("8.8.8.8").await.unwrap();
    assert!(session.state().insights().is_empty());
    assert_eq!(session.state().input(), "8.8.8.8");
}

#[tokio::test]
async fn whitespace_only_input_is_an_empty_batch() {
    let generator = ScriptedGenerator::new(Behaviour::Answer);
    let mut session = session_with(generator.clone());

    assert!(session.run_batch(" \n,, \n").await.unwrap().is_empty());
    let stats = session.state().stats();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.risk_percentage_label(), "0.0");
    assert!(session.state().top_locations().is_empty());

    let outcome = session.generate_insights().await.unwrap();
    assert_eq!(outcome, InsightOutcome::Generated(Vec::new()));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn insight_failure_degrades_to_no_insights() {
    let generator = ScriptedGenerator::new(Behaviour::Fail);
    let mut session = session_with(generator.clone());

    session.run_batch("185.156.172.1, 203.0.113.50").await.unwrap();
    let outcome = session.generate_insights().await.unwrap();

    assert_eq!(outcome, InsightOutcome::Unavailable);
    assert!(session.state().insights().is_empty());
    assert!(!session.requesting_insights().is_busy());
    assert_eq!(session.state().records().len(), 2);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn unknown_addresses_fail_open() {
    let classifier = BatchClassifier::new(Arc::new(StaticTableLookup::new(Duration::ZERO)));
    let records = classifier.classify("198.51.100.1 2001:db8::1 garbage").await;

    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.classification, Classification::Clean);
        assert_eq!(record.fraud_score, "0");
        assert_eq!(record.usage_type, "RES");
    }
}

#[tokio::test]
async fn fan_out_matches_sequential_results() {
    let input = "185.156.172.1,8.8.8.8 192.0.2.1\n1.1.1.1";
    let sequential = BatchClassifier::new(Arc::new(StaticTableLookup::new(Duration::from_millis(5))))
        .classify(input)
        .await;
    let concurrent = BatchClassifier::new(Arc::new(StaticTableLookup::new(Duration::from_millis(5))))
        .with_concurrency(4)
        .classify(input)
        .await;
    assert_eq!(sequential, concurrent);
}
