//! Parsing of full pipeline results documents.

use codedb_core::enums::BinType;
use codedb_core::results::AnalysisResults;
use pretty_assertions::assert_eq;

const FULL_DOCUMENT: &str = r#"{
    "Info": {
        "file": {
            "EXE": true,
            "DLL": false,
            "DRIVER": false,
            "isProbablyPacked": false,
            "size": 73802
        },
        "analyse": {
            "started": "2015-03-01 12:34:56",
            "uuid": "4f1c7f0e-5a0b-4d0a-9a53-9f1e8a0c2b11"
        },
        "url": {
            "url": "http://evil.example/payload/invoice.exe",
            "hostname": "evil.example"
        }
    },
    "OwnLocation": {"country": "DE", "city": "Berlin"},
    "InetSourceAnalysis": {
        "URLVoid": {
            "urlResult": {"CountryCode": "RU", "IP": "192.0.2.7"}
        }
    },
    "VirusTotal": {"positives": 12}
}"#;

const MINIMAL_DOCUMENT: &str = r#"{
    "Info": {
        "file": {},
        "analyse": {"started": "2015-03-01T08:00:00Z", "uuid": "run-2"},
        "url": {"hostname": "cdn.example"}
    }
}"#;

#[test]
fn full_document_exposes_upload_fields() {
    let results: AnalysisResults = serde_json::from_str(FULL_DOCUMENT).unwrap();

    assert_eq!(results.info.file.bin_type(), Some(BinType::Exe));
    assert_eq!(results.info.file.probably_packed, Some(false));
    assert_eq!(results.download_datestamp(), "2015-03-01 12:34");
    assert_eq!(results.info.url.hostname, "evil.example");
    assert_eq!(results.geolocation_self(), Some("DE"));
    assert_eq!(results.geolocation_host(), Some("RU"));
    assert_eq!(results.download_ip(), Some("192.0.2.7"));
}

#[test]
fn optional_sections_may_be_missing() {
    let results: AnalysisResults = serde_json::from_str(MINIMAL_DOCUMENT).unwrap();

    assert_eq!(results.info.file.bin_type(), None);
    assert_eq!(results.download_datestamp(), "2015-03-01 08:00");
    assert_eq!(results.geolocation_self(), None);
    assert_eq!(results.geolocation_host(), None);
    assert_eq!(results.download_ip(), None);
}

#[test]
fn inet_source_analysis_without_urlvoid_yields_no_host_location() {
    let doc = r#"{
        "Info": {
            "analyse": {"started": "2015-03-01 12:34:56", "uuid": "run-3"}
        },
        "InetSourceAnalysis": {"Whois": {}}
    }"#;
    let results: AnalysisResults = serde_json::from_str(doc).unwrap();
    assert!(results.inet_source_analysis.is_some());
    assert_eq!(results.geolocation_host(), None);
    assert_eq!(results.info.url.hostname, "");
}

#[test]
fn document_without_analysis_info_is_rejected() {
    let doc = r#"{"Info": {"file": {"EXE": true}}}"#;
    assert!(serde_json::from_str::<AnalysisResults>(doc).is_err());
}
