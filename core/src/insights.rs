//! # Insight Requester
//!
//! Best-effort bridge to an [`InsightGenerator`]. Insights are advisory, so every
//! failure is logged and collapsed into [`InsightOutcome::Unavailable`].

use std::collections::HashSet;
use std::sync::Arc;

use proxyscope_common::insights::{FlaggedAddress, InsightGenerator, InsightPrompt};
use proxyscope_common::models::insight::{Insight, InsightOutcome};
use proxyscope_common::models::record::AddressRecord;
use tracing::{error, info, warn};

pub const INSTRUCTIONS: &str = "Focus on identifying high-risk actors and recommending mitigation steps for a system administrator.";

pub struct InsightRequester {
    generator: Arc<dyn InsightGenerator>,
}

impl InsightRequester {
    pub fn new(generator: Arc<dyn InsightGenerator>) -> Self {
        Self { generator }
    }

    /// Requests insights for the risky subset of `records`.
    ///
    /// Without risky records the generator is never called.
    pub async fn request_insights(&self, records: &[AddressRecord]) -> InsightOutcome {
        let flagged: Vec<FlaggedAddress> = records
            .iter()
            .filter(|record| record.is_risky())
            .map(FlaggedAddress::from)
            .collect();

        if flagged.is_empty() {
            info!("no risky addresses, skipping insight generation");
            return InsightOutcome::Generated(Vec::new());
        }

        let prompt = InsightPrompt {
            flagged,
            instructions: INSTRUCTIONS.to_string(),
        };

        info!(count = prompt.flagged.len(), "requesting security insights");
        match self.generator.generate(&prompt).await {
            Ok(insights) => {
                let insights: Vec<Insight> = retain_requested(insights, &prompt.flagged);
                info!(count = insights.len(), "security insights received");
                InsightOutcome::Generated(insights)
            }
            Err(e) => {
                error!("insight generation failed: {e}");
                InsightOutcome::Unavailable
            }
        }
    }
}

/// Drops insights for addresses that were not part of the request.
fn retain_requested(insights: Vec<Insight>, flagged: &[FlaggedAddress]) -> Vec<Insight> {
    let requested: HashSet<&str> = flagged.iter().map(|f| f.ip.as_str()).collect();
    insights
        .into_iter()
        .filter(|insight| {
            let known: bool = requested.contains(insight.address.as_str());
            if !known {
                warn!(address = %insight.address, "discarding insight for unrequested address");
            }
            known
        })
        .collect()
}
