use colored::*;
use proxyscope_common::models::insight::{Insight, RiskLevel};
use proxyscope_common::models::record::{AddressRecord, Classification};

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn classification_color(classification: Classification) -> Color {
    match classification {
        Classification::Clean => colors::CLEAN,
        Classification::Proxy => colors::PROXY,
        Classification::VpnDatacenter => colors::VPN_DCH,
    }
}

pub fn classification_to_colored(classification: Classification) -> ColoredString {
    classification
        .label()
        .color(classification_color(classification))
        .bold()
}

pub fn risk_level_to_colored(level: RiskLevel) -> ColoredString {
    let label: String = format!("{level} Risk");
    match level {
        RiskLevel::Critical => label.red().bold(),
        RiskLevel::High => label.truecolor(255, 165, 0).bold(),
        RiskLevel::Medium | RiskLevel::Low => label.blue().bold(),
    }
}

pub fn address_to_colored(record: &AddressRecord) -> ColoredString {
    record
        .address
        .as_str()
        .color(classification_color(record.classification))
}

/// `City, Region, Country (CC)`, skipping placeholder parts.
pub fn location(record: &AddressRecord) -> String {
    let parts: Vec<&str> = [&record.city, &record.region, &record.country_long]
        .into_iter()
        .map(String::as_str)
        .filter(|part| !is_placeholder(part))
        .collect();
    format!("{} ({})", parts.join(", "), record.country_short)
}

fn is_placeholder(value: &str) -> bool {
    matches!(value.trim(), "" | "-" | "Unknown")
}

fn optional(value: &str) -> ColoredString {
    if is_placeholder(value) {
        "-".color(colors::SEPARATOR)
    } else {
        value.normal()
    }
}

pub fn record_to_details(record: &AddressRecord) -> Vec<Detail> {
    let fraud: ColoredString = match record.fraud_score_value() {
        Some(score) if score >= 75 => score.to_string().red().bold(),
        Some(score) if score >= 25 => score.to_string().yellow().bold(),
        Some(score) => score.to_string().green(),
        None => optional(&record.fraud_score),
    };

    vec![
        ("Status".into(), classification_to_colored(record.classification)),
        ("Type".into(), optional(&record.proxy_type)),
        ("Location".into(), location(record).normal()),
        ("ISP".into(), record.isp.as_str().color(colors::SECONDARY)),
        ("Domain".into(), optional(&record.domain)),
        ("Usage".into(), optional(&record.usage_type)),
        ("ASN".into(), format!("AS{} {}", record.asn, record.as_name).normal()),
        ("Seen".into(), optional(&record.last_seen)),
        ("Threat".into(), optional(&record.threat)),
        ("Provider".into(), optional(&record.provider)),
        ("Fraud".into(), fraud),
    ]
}

/// Compact single-line form used in quiet mode.
pub fn record_to_line(record: &AddressRecord) -> String {
    format!(
        "{} {} {} {}",
        address_to_colored(record),
        classification_to_colored(record.classification),
        record.country_short.as_str().color(colors::PRIMARY),
        record.isp.as_str().color(colors::SEPARATOR)
    )
}

pub fn insight_to_details(insight: &Insight) -> Vec<Detail> {
    vec![
        ("Risk".into(), risk_level_to_colored(insight.risk_level)),
        ("Summary".into(), insight.summary.as_str().normal()),
        ("Advice".into(), insight.recommendation.as_str().italic()),
    ]
}
