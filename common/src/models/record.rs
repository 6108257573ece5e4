use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-way risk bucket reported for an address.
///
/// Serialized as its numeric code (`isProxy` in exports and JSON tables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Classification {
    Clean,
    Proxy,
    VpnDatacenter,
}

impl Classification {
    pub fn code(self) -> u8 {
        match self {
            Classification::Clean => 0,
            Classification::Proxy => 1,
            Classification::VpnDatacenter => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Classification::Clean => "Clean",
            Classification::Proxy => "Proxy",
            Classification::VpnDatacenter => "VPN/DataCenter",
        }
    }
}

impl TryFrom<u8> for Classification {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Classification::Clean),
            1 => Ok(Classification::Proxy),
            2 => Ok(Classification::VpnDatacenter),
            other => Err(format!("invalid proxy classification code: {other}")),
        }
    }
}

impl From<Classification> for u8 {
    fn from(classification: Classification) -> Self {
        classification.code()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One classification result for a single address.
///
/// Records are produced by a lookup provider and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    #[serde(rename = "ipAddress")]
    pub address: String,
    #[serde(rename = "isProxy")]
    pub classification: Classification,
    pub proxy_type: String,
    pub country_short: String,
    pub country_long: String,
    pub region: String,
    pub city: String,
    pub isp: String,
    pub domain: String,
    pub usage_type: String,
    pub asn: String,
    pub as_name: String,
    pub last_seen: String,
    pub threat: String,
    pub provider: String,
    pub fraud_score: String,
}

impl AddressRecord {
    /// Anything not classified as clean.
    pub fn is_risky(&self) -> bool {
        self.classification != Classification::Clean
    }

    /// Numeric fraud score, or `None` when the field holds a placeholder such as `-`.
    pub fn fraud_score_value(&self) -> Option<u32> {
        self.fraud_score.trim().parse().ok()
    }
}
