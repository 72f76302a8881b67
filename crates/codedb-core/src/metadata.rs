//! Upload metadata and its multipart field rendering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::BinType;

/// Confidentiality flag value for samples released to all store users.
pub const CONFIDENTIALITY_RELEASED: &str = "0";

/// Value of the `base64` field when the payload is base64-encoded.
pub const BASE64_FLAG: &str = "True";

/// Descriptive fields sent alongside an uploaded sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub sha256: String,
    /// Hash of the file an unpacked variant came from.
    pub orig_hash: Option<String>,
    pub confidentiality: String,
    pub file_name: String,
    pub bin_type: Option<BinType>,
    /// `YYYY-MM-DD HH:MM`.
    pub download_datestamp: String,
    pub download_hostname: String,
    pub geolocation_self: Option<String>,
    pub geolocation_host: Option<String>,
    pub download_ip: Option<String>,
    /// Set only by the form encoder when it falls back to base64.
    pub base64: bool,
    pub tags: BTreeMap<String, String>,
}

impl UploadMetadata {
    /// Multipart text fields in wire order. Optional fields are omitted when
    /// unset; each tag becomes a `tags.<key>` field.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![("sha256".to_string(), self.sha256.clone())];

        let mut push_opt = |name: &str, value: Option<&str>| {
            if let Some(value) = value {
                fields.push((name.to_string(), value.to_string()));
            }
        };
        push_opt("origHash", self.orig_hash.as_deref());
        push_opt("vertraulich", Some(self.confidentiality.as_str()));
        push_opt("fileName", Some(self.file_name.as_str()));
        push_opt("binType", self.bin_type.map(BinType::as_str));
        push_opt("downloadDatestamp", Some(self.download_datestamp.as_str()));
        push_opt("downloadHostname", Some(self.download_hostname.as_str()));
        push_opt("geolocationSelf", self.geolocation_self.as_deref());
        push_opt("geolocationHost", self.geolocation_host.as_deref());
        push_opt("downloadIP", self.download_ip.as_deref());
        push_opt("base64", self.base64.then_some(BASE64_FLAG));

        fields.extend(
            self.tags
                .iter()
                .map(|(key, value)| (format!("tags.{key}"), value.clone())),
        );
        fields
    }

    /// Whether every text field is plain ASCII.
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.form_fields()
            .iter()
            .all(|(name, value)| name.is_ascii() && value.is_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metadata() -> UploadMetadata {
        UploadMetadata {
            sha256: "ab12".into(),
            orig_hash: None,
            confidentiality: CONFIDENTIALITY_RELEASED.into(),
            file_name: "invoice.exe".into(),
            bin_type: Some(BinType::Exe),
            download_datestamp: "2015-03-01 12:34".into(),
            download_hostname: "evil.example".into(),
            geolocation_self: None,
            geolocation_host: None,
            download_ip: None,
            base64: false,
            tags: BTreeMap::from([
                ("Collector".to_string(), "Ragpicker".to_string()),
                ("Ragpicker-uuid".to_string(), "run-1".to_string()),
            ]),
        }
    }

    fn names(fields: &[(String, String)]) -> Vec<&str> {
        fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn minimal_metadata_renders_required_fields_in_order() {
        let fields = metadata().form_fields();
        assert_eq!(
            names(&fields),
            vec![
                "sha256",
                "vertraulich",
                "fileName",
                "binType",
                "downloadDatestamp",
                "downloadHostname",
                "tags.Collector",
                "tags.Ragpicker-uuid",
            ]
        );
        assert_eq!(fields[3].1, "exe");
    }

    #[test]
    fn optional_fields_and_base64_flag_render_when_set() {
        let mut meta = metadata();
        meta.orig_hash = Some("ff00".into());
        meta.geolocation_self = Some("DE".into());
        meta.geolocation_host = Some("RU".into());
        meta.download_ip = Some("192.0.2.7".into());
        meta.base64 = true;
        meta.bin_type = None;

        let fields = meta.form_fields();
        assert_eq!(
            names(&fields),
            vec![
                "sha256",
                "origHash",
                "vertraulich",
                "fileName",
                "downloadDatestamp",
                "downloadHostname",
                "geolocationSelf",
                "geolocationHost",
                "downloadIP",
                "base64",
                "tags.Collector",
                "tags.Ragpicker-uuid",
            ]
        );
        assert!(fields.contains(&("base64".to_string(), "True".to_string())));
    }

    #[test]
    fn non_ascii_value_is_detected() {
        let mut meta = metadata();
        assert!(meta.is_ascii());
        meta.geolocation_host = Some("Côte d'Ivoire".into());
        assert!(!meta.is_ascii());
    }
}
