//! The analysis results document produced by the local pipeline.
//!
//! Field names mirror the pipeline's JSON keys (`Info`, `EXE`,
//! `isProbablyPacked`, `URLVoid`, ...). Unknown keys are ignored so the full
//! pipeline document can be passed in as-is.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::enums::BinType;
use crate::errors::CoreError;

/// Format the remote store expects for `downloadDatestamp`.
pub const DATESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(rename = "Info")]
    pub info: Info,

    #[serde(rename = "OwnLocation", default, skip_serializing_if = "Option::is_none")]
    pub own_location: Option<OwnLocation>,

    /// Only present when the source-analysis stage ran.
    #[serde(
        rename = "InetSourceAnalysis",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inet_source_analysis: Option<InetSourceAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub file: FileFlags,
    pub analyse: AnalyseInfo,
    #[serde(default)]
    pub url: UrlInfo,
}

/// File-type flags computed by the pipeline. A flag the pipeline could not
/// determine is absent, which is distinct from `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFlags {
    #[serde(rename = "EXE", default, skip_serializing_if = "Option::is_none")]
    pub exe: Option<bool>,
    #[serde(rename = "DLL", default, skip_serializing_if = "Option::is_none")]
    pub dll: Option<bool>,
    #[serde(rename = "DRIVER", default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<bool>,
    #[serde(
        rename = "isProbablyPacked",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub probably_packed: Option<bool>,
}

impl FileFlags {
    /// First matching kind in `EXE`, `DLL`, `DRIVER` order.
    #[must_use]
    pub fn bin_type(&self) -> Option<BinType> {
        if self.exe == Some(true) {
            Some(BinType::Exe)
        } else if self.dll == Some(true) {
            Some(BinType::Dll)
        } else if self.driver == Some(true) {
            Some(BinType::Sys)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyseInfo {
    /// When the analysis run (and the download) started.
    #[serde(
        serialize_with = "serialize_started",
        deserialize_with = "deserialize_started"
    )]
    pub started: NaiveDateTime,
    /// Unique identifier of the analysis run.
    pub uuid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlInfo {
    #[serde(default)]
    pub hostname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InetSourceAnalysis {
    #[serde(rename = "URLVoid", default, skip_serializing_if = "Option::is_none")]
    pub url_void: Option<UrlVoid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlVoid {
    #[serde(rename = "urlResult", default)]
    pub url_result: UrlVoidResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlVoidResult {
    #[serde(rename = "CountryCode", default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(rename = "IP", default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl AnalysisResults {
    /// `Info.analyse.started` in the remote store's datestamp format.
    #[must_use]
    pub fn download_datestamp(&self) -> String {
        self.info.analyse.started.format(DATESTAMP_FORMAT).to_string()
    }

    #[must_use]
    pub fn geolocation_self(&self) -> Option<&str> {
        self.own_location.as_ref()?.country.as_deref()
    }

    fn url_void_result(&self) -> Option<&UrlVoidResult> {
        self.inet_source_analysis
            .as_ref()?
            .url_void
            .as_ref()
            .map(|v| &v.url_result)
    }

    /// Country of the download host, as reported by URLVoid.
    #[must_use]
    pub fn geolocation_host(&self) -> Option<&str> {
        self.url_void_result()?.country_code.as_deref()
    }

    #[must_use]
    pub fn download_ip(&self) -> Option<&str> {
        self.url_void_result()?.ip.as_deref()
    }
}

/// Parse a pipeline timestamp: RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS`
/// (with optional fractional seconds, `T` or space separated).
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if no supported format matches.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| CoreError::InvalidTimestamp {
            value: value.to_string(),
        })
}

fn serialize_started<S: Serializer>(
    started: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&started.format("%Y-%m-%d %H:%M:%S"))
}

fn deserialize_started<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bin_type_prefers_exe_then_dll_then_driver() {
        let flags = FileFlags {
            exe: Some(true),
            dll: Some(true),
            driver: Some(true),
            probably_packed: None,
        };
        assert_eq!(flags.bin_type(), Some(BinType::Exe));

        let flags = FileFlags {
            exe: Some(false),
            dll: Some(true),
            ..FileFlags::default()
        };
        assert_eq!(flags.bin_type(), Some(BinType::Dll));

        let flags = FileFlags {
            driver: Some(true),
            ..FileFlags::default()
        };
        assert_eq!(flags.bin_type(), Some(BinType::Sys));

        assert_eq!(FileFlags::default().bin_type(), None);
    }

    #[test]
    fn parses_supported_timestamp_formats() {
        let expected =
            NaiveDateTime::parse_from_str("2015-03-01 12:34:56", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parse_timestamp("2015-03-01 12:34:56").unwrap(), expected);
        assert_eq!(parse_timestamp("2015-03-01T12:34:56").unwrap(), expected);
        assert_eq!(parse_timestamp("2015-03-01T12:34:56Z").unwrap(), expected);
        let fractional = parse_timestamp("2015-03-01 12:34:56.250").unwrap();
        assert_eq!(fractional.format("%H:%M:%S").to_string(), "12:34:56");
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, CoreError::InvalidTimestamp { .. }));
    }

    #[test]
    fn missing_flags_deserialize_as_absent() {
        let flags: FileFlags = serde_json::from_str(r#"{"EXE": true}"#).unwrap();
        assert_eq!(flags.exe, Some(true));
        assert_eq!(flags.dll, None);
        assert_eq!(flags.probably_packed, None);
    }
}
