use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use proxyscope_common::lookup::LookupProvider;
use proxyscope_common::models::record::{AddressRecord, Classification};
use tracing::debug;

use super::fallback_record;

static PX12_TABLE: OnceLock<HashMap<&'static str, AddressRecord>> = OnceLock::new();

fn get_table() -> &'static HashMap<&'static str, AddressRecord> {
    PX12_TABLE.get_or_init(|| {
        HashMap::from([
            (
                "8.8.8.8",
                entry(
                    "8.8.8.8",
                    Classification::VpnDatacenter,
                    ["DCH", "US", "United States", "California", "Mountain View"],
                    ["Google LLC", "google.com", "DCH", "15169", "Google LLC"],
                    ["1", "-", "-", "0"],
                ),
            ),
            (
                "1.1.1.1",
                entry(
                    "1.1.1.1",
                    Classification::VpnDatacenter,
                    ["DCH", "AU", "Australia", "Queensland", "Brisbane"],
                    ["CloudFlare Inc", "cloudflare.com", "CDN", "13335", "CloudFlare Inc"],
                    ["1", "-", "-", "0"],
                ),
            ),
            (
                "185.156.172.1",
                entry(
                    "185.156.172.1",
                    Classification::Proxy,
                    ["VPN", "SE", "Sweden", "Stockholm", "Stockholm"],
                    ["Mullvad VPN", "mullvad.net", "VPN", "39351", "Mullvad VPN AB"],
                    ["2", "1", "Mullvad", "45"],
                ),
            ),
        ])
    })
}

// [proxy type, country short, country long, region, city]
// [isp, domain, usage type, asn, as name]
// [last seen, threat, provider, fraud score]
fn entry(
    address: &str,
    classification: Classification,
    location: [&str; 5],
    network: [&str; 5],
    activity: [&str; 4],
) -> AddressRecord {
    let [proxy_type, country_short, country_long, region, city] = location.map(String::from);
    let [isp, domain, usage_type, asn, as_name] = network.map(String::from);
    let [last_seen, threat, provider, fraud_score] = activity.map(String::from);
    AddressRecord {
        address: address.to_string(),
        classification,
        proxy_type,
        country_short,
        country_long,
        region,
        city,
        isp,
        domain,
        usage_type,
        asn,
        as_name,
        last_seen,
        threat,
        provider,
        fraud_score,
    }
}

/// In-memory stand-in for the PX12 proxy database.
///
/// Every lookup sleeps for `delay` to mimic the cost of a real query.
pub struct StaticTableLookup {
    delay: Duration,
}

impl StaticTableLookup {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl LookupProvider for StaticTableLookup {
    async fn resolve(&self, address: &str) -> AddressRecord {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match get_table().get(address) {
            Some(record) => record.clone(),
            None => {
                debug!(address, "address not in table, using fallback record");
                fallback_record(address)
            }
        }
    }
}
