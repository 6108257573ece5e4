#![cfg(test)]
use chrono::NaiveDate;
use proxyscope_common::models::record::{AddressRecord, Classification};
use proxyscope_core::export::{self, CSV_HEADER};
use proxyscope_core::lookup::fallback_record;

use crate::utils::{Behaviour, ScriptedGenerator, parse_csv, session_with};

fn quoted_record() -> AddressRecord {
    AddressRecord {
        classification: Classification::Proxy,
        proxy_type: "PUB".into(),
        isp: r#"The "Open" Proxy Co, Ltd"#.into(),
        domain: "open-proxy.example".into(),
        fraud_score: "99".into(),
        ..fallback_record("192.0.2.77")
    }
}

fn to_fields(record: &AddressRecord) -> Vec<String> {
    vec![
        record.address.clone(),
        record.classification.code().to_string(),
        record.proxy_type.clone(),
        record.country_short.clone(),
        record.country_long.clone(),
        record.region.clone(),
        record.city.clone(),
        record.isp.clone(),
        record.domain.clone(),
        record.usage_type.clone(),
        record.asn.clone(),
        record.as_name.clone(),
        record.last_seen.clone(),
        record.threat.clone(),
        record.provider.clone(),
        record.fraud_score.clone(),
    ]
}

#[test]
fn csv_reads_back_the_same_fields() {
    let records = vec![quoted_record(), fallback_record("198.51.100.3")];
    let csv = export::to_csv(&records).unwrap();

    let rows = parse_csv(&csv);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], CSV_HEADER.map(String::from).to_vec());
    assert_eq!(rows[1], to_fields(&records[0]));
    assert_eq!(rows[2], to_fields(&records[1]));
    assert_eq!(rows[1][7], r#"The "Open" Proxy Co, Ltd"#);
}

#[tokio::test]
async fn session_export_writes_dated_file() {
    let mut session = session_with(ScriptedGenerator::new(Behaviour::Answer));
    session.run_batch("8.8.8.8 185.156.172.1").await.unwrap();

    let dir = std::env::temp_dir().join(format!("proxyscope-export-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();

    let path = session.export_csv(&dir, date).unwrap().unwrap();
    assert!(path.ends_with("ip2proxy_intelligence_2025-03-09.csv"));

    let rows = parse_csv(&std::fs::read_to_string(&path).unwrap());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], "8.8.8.8");
    assert_eq!(rows[1][1], "2");
    assert_eq!(rows[2][0], "185.156.172.1");
    assert_eq!(rows[2][1], "1");

    std::fs::remove_dir_all(&dir).unwrap();
}
