//! CSV export of a classified batch.
//!
//! Every value is double-quoted and embedded quotes are doubled, so the output
//! reads back cleanly with any RFC 4180 parser.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use proxyscope_common::models::record::AddressRecord;
use tracing::{debug, info};

pub const CSV_HEADER: [&str; 16] = [
    "ipAddress",
    "isProxy",
    "proxyType",
    "countryShort",
    "countryLong",
    "region",
    "city",
    "isp",
    "domain",
    "usageType",
    "asn",
    "as",
    "lastSeen",
    "threat",
    "provider",
    "fraudScore",
];

const FILE_PREFIX: &str = "ip2proxy_intelligence";

/// Serializes `records` with a header row, or `None` when there is nothing to export.
pub fn to_csv(records: &[AddressRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let mut lines: Vec<String> = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));
    lines.extend(records.iter().map(csv_row));
    Some(lines.join("\n"))
}

fn csv_row(record: &AddressRecord) -> String {
    let code: String = record.classification.code().to_string();
    let fields: [&str; 16] = [
        &record.address,
        &code,
        &record.proxy_type,
        &record.country_short,
        &record.country_long,
        &record.region,
        &record.city,
        &record.isp,
        &record.domain,
        &record.usage_type,
        &record.asn,
        &record.as_name,
        &record.last_seen,
        &record.threat,
        &record.provider,
        &record.fraud_score,
    ];
    fields
        .iter()
        .map(|field| quote(field))
        .collect::<Vec<String>>()
        .join(",")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Download name for an export made on `date`, e.g. `ip2proxy_intelligence_2024-05-01.csv`.
pub fn file_name(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the export into `dir`. Returns `Ok(None)` without touching the
/// filesystem when `records` is empty.
pub fn write_csv(
    records: &[AddressRecord],
    dir: &Path,
    date: NaiveDate,
) -> std::io::Result<Option<PathBuf>> {
    let Some(csv) = to_csv(records) else {
        debug!("nothing to export");
        return Ok(None);
    };

    let path: PathBuf = dir.join(file_name(date));
    std::fs::write(&path, csv)?;
    info!(path = %path.display(), rows = records.len(), "exported csv");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use proxyscope_common::models::record::Classification;

    use super::*;
    use crate::lookup::fallback_record;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn empty_batch_exports_nothing() {
        assert!(to_csv(&[]).is_none());
    }

    #[test]
    fn header_and_row_layout() {
        let record = AddressRecord {
            classification: Classification::VpnDatacenter,
            ..fallback_record("8.8.8.8")
        };
        let csv = to_csv(&[record]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ipAddress,isProxy,proxyType,countryShort,countryLong,region,city,isp,domain,usageType,asn,as,lastSeen,threat,provider,fraudScore"
        );
        assert_eq!(
            lines.next().unwrap(),
            r#""8.8.8.8","2","-","US","United States","Unknown","Unknown","Generic ISP","example.com","RES","0000","Unknown ASN","-","-","-","0""#
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let record = AddressRecord {
            isp: r#"ACME "Fast" Net, Inc"#.into(),
            ..fallback_record("192.0.2.4")
        };
        let csv = to_csv(&[record]).unwrap();
        assert!(csv.contains(r#","ACME ""Fast"" Net, Inc","#));
    }

    #[test]
    fn file_name_carries_iso_date() {
        assert_eq!(file_name(date()), "ip2proxy_intelligence_2024-05-01.csv");
    }

    #[test]
    fn write_csv_creates_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&[fallback_record("192.0.2.1")], dir.path(), date())
            .unwrap()
            .unwrap();
        assert_eq!(path, dir.path().join("ip2proxy_intelligence_2024-05-01.csv"));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("ipAddress,isProxy"));
    }

    #[test]
    fn write_csv_skips_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_csv(&[], dir.path(), date()).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
