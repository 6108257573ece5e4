use serde::Serialize;

/// Summary counts for one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    pub total: usize,
    pub clean: usize,
    pub proxies: usize,
    pub vpn_datacenter: usize,
    pub risky: usize,
    /// Share of risky addresses, already rounded to one decimal.
    pub risk_percentage: f64,
}

impl BatchStats {
    /// Risk percentage with exactly one decimal, e.g. `"66.7"` or `"0.0"`.
    pub fn risk_percentage_label(&self) -> String {
        format!("{:.1}", self.risk_percentage)
    }
}

/// One bar of the top-locations histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCount {
    pub country_short: String,
    pub count: usize,
}
