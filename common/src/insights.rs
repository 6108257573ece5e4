//! Outbound port for the natural-language insight capability.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::insight::Insight;
use crate::models::record::AddressRecord;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("no credentials configured for the insight service")]
    MissingCredentials,
    #[error("request to insight service failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("insight service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("insight service returned no content")]
    EmptyResponse,
    #[error("malformed insight response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized description of one flagged address sent to the capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedAddress {
    pub ip: String,
    #[serde(rename = "type")]
    pub proxy_type: String,
    pub isp: String,
    pub fraud: String,
    pub country: String,
}

impl From<&AddressRecord> for FlaggedAddress {
    fn from(record: &AddressRecord) -> Self {
        Self {
            ip: record.address.clone(),
            proxy_type: record.proxy_type.clone(),
            isp: record.isp.clone(),
            fraud: record.fraud_score.clone(),
            country: record.country_long.clone(),
        }
    }
}

/// Everything the capability receives for one request.
#[derive(Debug, Clone)]
pub struct InsightPrompt {
    pub flagged: Vec<FlaggedAddress>,
    pub instructions: String,
}

impl InsightPrompt {
    /// Renders the task text with the flagged addresses embedded as a JSON array.
    pub fn render(&self) -> Result<String, InsightError> {
        let payload: String = serde_json::to_string(&self.flagged)?;
        Ok(format!(
            "Analyze these IP detection results and provide security insights.\nResults: {payload}\n\n{}",
            self.instructions
        ))
    }
}

/// Defines the contract for turning flagged addresses into structured advisories.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Returns one insight per analyzed address, or an error when the capability
    /// is unreachable or answers outside the expected schema.
    async fn generate(&self, prompt: &InsightPrompt) -> Result<Vec<Insight>, InsightError>;
}
