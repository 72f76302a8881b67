//! Sample files and the variants derived from one analyzed sample.
//!
//! A [`SampleFile`] derives its SHA-256 identity from its bytes, so the hash
//! submitted to the remote store always matches the uploaded content.

use sha2::{Digest, Sha256};

use crate::enums::VariantKind;

/// One file's bytes plus the type label the analysis pipeline assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile {
    sha256: String,
    file_type: String,
    data: Vec<u8>,
}

impl SampleFile {
    /// Wrap `data`, computing its SHA-256 digest.
    pub fn new(data: impl Into<Vec<u8>>, file_type: impl Into<String>) -> Self {
        let data = data.into();
        let sha256 = hex::encode(Sha256::digest(&data));
        Self {
            sha256,
            file_type: file_type.into(),
            data,
        }
    }

    /// Lowercase hex SHA-256 of the file content.
    #[must_use]
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Type label (e.g. `PE32 executable (GUI) Intel 80386`).
    #[must_use]
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// An analyzed sample: the downloaded file and everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// The file as downloaded.
    pub file: SampleFile,
    /// Result of unpacking `file`, if the pipeline produced one.
    pub unpacked: Option<SampleFile>,
    /// Files extracted from `file`, in pipeline order.
    pub extracted: Vec<SampleFile>,
    /// Name the sample was downloaded under.
    pub url_filename: String,
}

impl Sample {
    pub fn new(file: SampleFile, url_filename: impl Into<String>) -> Self {
        Self {
            file,
            unpacked: None,
            extracted: Vec::new(),
            url_filename: url_filename.into(),
        }
    }

    #[must_use]
    pub fn with_unpacked(mut self, unpacked: SampleFile) -> Self {
        self.unpacked = Some(unpacked);
        self
    }

    #[must_use]
    pub fn with_extracted(mut self, extracted: SampleFile) -> Self {
        self.extracted.push(extracted);
        self
    }

    /// All variants in submission order: original, unpacked, then extracted.
    #[must_use]
    pub fn variants(&self) -> Vec<SampleVariant<'_>> {
        let mut variants = Vec::with_capacity(2 + self.extracted.len());
        variants.push(SampleVariant {
            kind: VariantKind::Original,
            file: &self.file,
            origin_hash: None,
            file_name: &self.url_filename,
        });
        if let Some(unpacked) = &self.unpacked {
            variants.push(SampleVariant {
                kind: VariantKind::Unpacked,
                file: unpacked,
                origin_hash: Some(self.file.sha256()),
                file_name: &self.url_filename,
            });
        }
        variants.extend(self.extracted.iter().map(|file| SampleVariant {
            kind: VariantKind::Extracted,
            file,
            origin_hash: None,
            file_name: &self.url_filename,
        }));
        variants
    }
}

/// Borrowed view of one variant for the duration of its submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleVariant<'a> {
    pub kind: VariantKind,
    pub file: &'a SampleFile,
    /// Hash of the file this variant was unpacked from. Only set for
    /// [`VariantKind::Unpacked`].
    pub origin_hash: Option<&'a str>,
    /// Display filename sent with the upload.
    pub file_name: &'a str,
}

impl SampleVariant<'_> {
    #[must_use]
    pub fn hash(&self) -> &str {
        self.file.sha256()
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.file.data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // sha256("abc")
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn hash_is_derived_from_content() {
        let file = SampleFile::new(b"abc".to_vec(), "ASCII text");
        assert_eq!(file.sha256(), ABC_SHA256);
        assert_eq!(file.file_type(), "ASCII text");
        assert_eq!(file.data(), b"abc");
    }

    #[test]
    fn variants_follow_submission_order() {
        let sample = Sample::new(SampleFile::new(b"orig".to_vec(), "PE32"), "dropper.exe")
            .with_unpacked(SampleFile::new(b"unpacked".to_vec(), "PE32"))
            .with_extracted(SampleFile::new(b"first".to_vec(), "data"))
            .with_extracted(SampleFile::new(b"second".to_vec(), "data"));

        let variants = sample.variants();
        let kinds: Vec<VariantKind> = variants.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                VariantKind::Original,
                VariantKind::Unpacked,
                VariantKind::Extracted,
                VariantKind::Extracted,
            ]
        );
        assert_eq!(variants[2].data(), b"first");
        assert_eq!(variants[3].data(), b"second");
        assert!(variants.iter().all(|v| v.file_name == "dropper.exe"));
    }

    #[test]
    fn only_unpacked_variant_carries_origin_hash() {
        let sample = Sample::new(SampleFile::new(b"orig".to_vec(), "PE32"), "a.exe")
            .with_unpacked(SampleFile::new(b"unpacked".to_vec(), "PE32"))
            .with_extracted(SampleFile::new(b"embedded".to_vec(), "data"));
        let original_hash = sample.file.sha256().to_string();

        let variants = sample.variants();
        assert_eq!(variants[0].origin_hash, None);
        assert_eq!(variants[1].origin_hash, Some(original_hash.as_str()));
        assert_eq!(variants[2].origin_hash, None);
    }

    #[test]
    fn sample_without_derived_files_has_one_variant() {
        let sample = Sample::new(SampleFile::new(b"orig".to_vec(), "PE32"), "a.exe");
        assert_eq!(sample.variants().len(), 1);
    }
}
