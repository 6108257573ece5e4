use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use proxyscope_common::insights::{InsightError, InsightGenerator, InsightPrompt};
use proxyscope_common::models::insight::{Insight, RiskLevel};
use proxyscope_core::classifier::BatchClassifier;
use proxyscope_core::insights::InsightRequester;
use proxyscope_core::lookup::static_table::StaticTableLookup;
use proxyscope_core::session::Session;

pub enum Behaviour {
    Answer,
    Fail,
}

/// Generator double that answers one High insight per flagged address.
pub struct ScriptedGenerator {
    pub behaviour: Behaviour,
    pub calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &InsightPrompt) -> Result<Vec<Insight>, InsightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            Behaviour::Fail => Err(server_error()),
            Behaviour::Answer => Ok(prompt
                .flagged
                .iter()
                .map(|flagged| Insight {
                    address: flagged.ip.clone(),
                    summary: format!("{} traffic from {}", flagged.proxy_type, flagged.country),
                    risk_level: RiskLevel::High,
                    recommendation: "Rate-limit and require MFA".into(),
                })
                .collect()),
        }
    }
}

fn server_error() -> InsightError {
    InsightError::Status {
        status: 500,
        body: "<html>internal error</html>".into(),
    }
}

pub fn session_with(generator: Arc<ScriptedGenerator>) -> Session {
    let classifier = BatchClassifier::new(Arc::new(StaticTableLookup::new(Duration::ZERO)));
    Session::new(classifier, Some(InsightRequester::new(generator)))
}

/// Minimal RFC 4180 reader for checking exports.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', _) => in_quotes = !in_quotes,
            (',', false) => row.push(std::mem::take(&mut field)),
            ('\n', false) => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            ('\r', false) => {}
            (other, _) => field.push(other),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}
