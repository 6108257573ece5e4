//! Summary statistics and the top-locations histogram for a batch.

use std::collections::HashMap;

use proxyscope_common::models::record::{AddressRecord, Classification};
use proxyscope_common::models::stats::{BatchStats, LocationCount};

pub const TOP_LOCATIONS: usize = 5;

pub fn summarize(records: &[AddressRecord]) -> BatchStats {
    let total: usize = records.len();
    let count = |wanted: Classification| {
        records
            .iter()
            .filter(|record| record.classification == wanted)
            .count()
    };

    let clean: usize = count(Classification::Clean);
    let proxies: usize = count(Classification::Proxy);
    let vpn_datacenter: usize = count(Classification::VpnDatacenter);
    let risky: usize = proxies + vpn_datacenter;

    let risk_percentage: f64 = if total == 0 {
        0.0
    } else {
        (risky as f64 / total as f64 * 1000.0).round() / 10.0
    };

    BatchStats {
        total,
        clean,
        proxies,
        vpn_datacenter,
        risky,
        risk_percentage,
    }
}

/// Groups records by short country code and keeps the `limit` most frequent.
///
/// Ties keep the order in which the countries first appeared.
pub fn top_locations(records: &[AddressRecord], limit: usize) -> Vec<LocationCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LocationCount> = Vec::new();

    for record in records {
        let country: &str = record.country_short.as_str();
        match positions.get(country) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                positions.insert(country, counts.len());
                counts.push(LocationCount {
                    country_short: country.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable sort
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
