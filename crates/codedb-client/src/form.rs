//! Upload form construction with a base64 fallback for the payload.
//!
//! The raw path sends the sample bytes as-is. It is only taken when the
//! payload can sit next to the text fields in one body: either every text
//! field and the filename are ASCII, or the payload itself is ASCII. Any
//! other combination switches to the base64 path, which encodes the payload
//! and sets the `base64` field so the store decodes it on arrival.

use base64::Engine as _;
use codedb_core::metadata::UploadMetadata;
use reqwest::blocking::multipart::{Form, Part};
use serde::Serialize;

/// Multipart field carrying the sample bytes.
pub const SAMPLE_FIELD: &str = "sample";

/// How the sample bytes are carried in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadEncoding {
    Raw,
    Base64,
}

impl PayloadEncoding {
    /// Pick the encoding for `payload` given the text that accompanies it.
    #[must_use]
    pub fn select(metadata: &UploadMetadata, file_name: &str, payload: &[u8]) -> Self {
        if payload.is_ascii() || (metadata.is_ascii() && file_name.is_ascii()) {
            Self::Raw
        } else {
            Self::Base64
        }
    }
}

/// A fully prepared upload. Plain data, so the uploader can render a fresh
/// multipart body for every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedForm {
    metadata: UploadMetadata,
    file_name: String,
    payload: Vec<u8>,
    encoding: PayloadEncoding,
}

impl EncodedForm {
    /// Build the form, choosing the payload encoding and setting the
    /// metadata's `base64` flag to match.
    pub fn build(mut metadata: UploadMetadata, file_name: impl Into<String>, payload: &[u8]) -> Self {
        let file_name = file_name.into();
        let encoding = PayloadEncoding::select(&metadata, &file_name, payload);
        let payload = match encoding {
            PayloadEncoding::Raw => payload.to_vec(),
            PayloadEncoding::Base64 => {
                tracing::info!(
                    hash = %metadata.sha256,
                    "payload not representable next to form text, falling back to base64"
                );
                base64::engine::general_purpose::STANDARD
                    .encode(payload)
                    .into_bytes()
            }
        };
        metadata.base64 = encoding == PayloadEncoding::Base64;
        Self {
            metadata,
            file_name,
            payload,
            encoding,
        }
    }

    /// Hash the upload is submitted under.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.metadata.sha256
    }

    #[must_use]
    pub const fn metadata(&self) -> &UploadMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub const fn encoding(&self) -> PayloadEncoding {
        self.encoding
    }

    /// Bytes as they go on the wire (base64 text on the fallback path).
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Text fields as they go on the wire.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, String)> {
        self.metadata.form_fields()
    }

    /// Original sample bytes, undoing the base64 path if it was taken.
    ///
    /// # Errors
    ///
    /// Returns the decode error if the stored payload is not valid base64.
    pub fn decoded_payload(&self) -> Result<Vec<u8>, base64::DecodeError> {
        match self.encoding {
            PayloadEncoding::Raw => Ok(self.payload.clone()),
            PayloadEncoding::Base64 => {
                base64::engine::general_purpose::STANDARD.decode(&self.payload)
            }
        }
    }

    /// Render a multipart body for one request.
    #[must_use]
    pub fn to_multipart(&self) -> Form {
        let form = self
            .fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));
        let part = Part::bytes(self.payload.clone()).file_name(self.file_name.clone());
        form.part(SAMPLE_FIELD, part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codedb_core::metadata::CONFIDENTIALITY_RELEASED;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    const PE_HEADER: &[u8] = &[0x4d, 0x5a, 0x90, 0x00, 0x03, 0x00, 0xff, 0xfe];

    fn metadata() -> UploadMetadata {
        UploadMetadata {
            sha256: "ab12".into(),
            orig_hash: None,
            confidentiality: CONFIDENTIALITY_RELEASED.into(),
            file_name: "invoice.exe".into(),
            bin_type: None,
            download_datestamp: "2015-03-01 12:34".into(),
            download_hostname: "evil.example".into(),
            geolocation_self: None,
            geolocation_host: None,
            download_ip: None,
            base64: false,
            tags: BTreeMap::new(),
        }
    }

    #[test]
    fn ascii_text_with_binary_payload_stays_raw() {
        let form = EncodedForm::build(metadata(), "invoice.exe", PE_HEADER);
        assert_eq!(form.encoding(), PayloadEncoding::Raw);
        assert_eq!(form.payload(), PE_HEADER);
        assert!(!form.metadata().base64);
        assert!(form.fields().iter().all(|(name, _)| name != "base64"));
    }

    #[test]
    fn non_ascii_text_with_ascii_payload_stays_raw() {
        let mut meta = metadata();
        meta.geolocation_host = Some("Côte d'Ivoire".into());
        let form = EncodedForm::build(meta, "script.ps1", b"Write-Host hi");
        assert_eq!(form.encoding(), PayloadEncoding::Raw);
    }

    #[test]
    fn non_ascii_text_with_binary_payload_falls_back_to_base64() {
        let mut meta = metadata();
        meta.geolocation_host = Some("Côte d'Ivoire".into());
        let form = EncodedForm::build(meta, "invoice.exe", PE_HEADER);

        assert_eq!(form.encoding(), PayloadEncoding::Base64);
        assert!(form.metadata().base64);
        assert!(
            form.fields()
                .contains(&("base64".to_string(), "True".to_string()))
        );
        assert!(form.payload().is_ascii());
        assert_eq!(form.decoded_payload().unwrap(), PE_HEADER);
    }

    #[test]
    fn non_ascii_filename_with_binary_payload_falls_back_to_base64() {
        let form = EncodedForm::build(metadata(), "rechnung-größe.exe", PE_HEADER);
        assert_eq!(form.encoding(), PayloadEncoding::Base64);
        assert_eq!(form.decoded_payload().unwrap(), PE_HEADER);
    }

    #[test]
    fn stale_base64_flag_is_cleared_on_raw_path() {
        let mut meta = metadata();
        meta.base64 = true;
        let form = EncodedForm::build(meta, "invoice.exe", PE_HEADER);
        assert!(!form.metadata().base64);
    }

    #[test]
    fn hash_comes_from_metadata() {
        let form = EncodedForm::build(metadata(), "invoice.exe", PE_HEADER);
        assert_eq!(form.hash(), "ab12");
        assert_eq!(form.file_name(), "invoice.exe");
    }
}
