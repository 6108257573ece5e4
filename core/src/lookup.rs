//! Lookup adapters implementing [`LookupProvider`](proxyscope_common::lookup::LookupProvider).
//!
//! * [`static_table::StaticTableLookup`]: the built-in table.
//! * [`json_table::JsonTableLookup`]: a table loaded from disk.
//!
//! Both answer unknown addresses with [`fallback_record`].

use proxyscope_common::models::record::{AddressRecord, Classification};

pub mod json_table;
pub mod static_table;

/// Generic clean record returned for any address a table does not know.
pub fn fallback_record(address: &str) -> AddressRecord {
    AddressRecord {
        address: address.to_string(),
        classification: Classification::Clean,
        proxy_type: "-".into(),
        country_short: "US".into(),
        country_long: "United States".into(),
        region: "Unknown".into(),
        city: "Unknown".into(),
        isp: "Generic ISP".into(),
        domain: "example.com".into(),
        usage_type: "RES".into(),
        asn: "0000".into(),
        as_name: "Unknown ASN".into(),
        last_seen: "-".into(),
        threat: "-".into(),
        provider: "-".into(),
        fraud_score: "0".into(),
    }
}
