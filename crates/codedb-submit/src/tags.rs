//! Tag mapping attached to every upload, and the ASCII sanitizer shared by
//! all free-text upload fields.

use std::collections::BTreeMap;

use codedb_core::enums::VariantKind;
use codedb_core::results::AnalysisResults;
use codedb_core::sample::{Sample, SampleVariant};

/// Value of the `Collector` tag.
pub const COLLECTOR: &str = "Ragpicker";

pub const TAG_COLLECTOR: &str = "Collector";
pub const TAG_RUN_UUID: &str = "Ragpicker-uuid";
pub const TAG_ORIG_FILE_TYPE: &str = "OrigFileType";
pub const TAG_EXTRACTED_FROM: &str = "ExtractedFrom";

/// Build the tags for `variant` of `sample`.
///
/// Every value is passed through [`sanitize_ascii`].
#[must_use]
pub fn build_tags(
    results: &AnalysisResults,
    sample: &Sample,
    variant: &SampleVariant<'_>,
) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    tags.insert(TAG_COLLECTOR.to_string(), COLLECTOR.to_string());
    tags.insert(TAG_RUN_UUID.to_string(), results.info.analyse.uuid.clone());

    match variant.kind {
        VariantKind::Original => {}
        VariantKind::Unpacked => {
            tags.insert(
                TAG_ORIG_FILE_TYPE.to_string(),
                sample.file.file_type().to_string(),
            );
        }
        VariantKind::Extracted => {
            tags.insert(
                TAG_ORIG_FILE_TYPE.to_string(),
                sample.file.file_type().to_string(),
            );
            tags.insert(
                TAG_EXTRACTED_FROM.to_string(),
                sample.file.sha256().to_string(),
            );
        }
    }

    for value in tags.values_mut() {
        *value = sanitize_ascii(value);
    }
    tracing::debug!(hash = variant.hash(), ?tags, "built upload tags");
    tags
}

/// Reduce `value` to printable ASCII.
///
/// Common Latin letters with diacritics fold to their base letters (`ä` to
/// `a`, `ß` to `ss`). Any other non-ASCII character and every control
/// character is dropped. Applying it twice gives the same result as once.
#[must_use]
pub fn sanitize_ascii(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii() {
            if !c.is_ascii_control() {
                out.push(c);
            }
        } else if let Some(folded) = fold_latin(c) {
            out.push_str(folded);
        }
    }
    out
}

const fn fold_latin(c: char) -> Option<&'static str> {
    Some(match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' => "C",
        'ç' => "c",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ð' => "D",
        'ð' => "d",
        'Ñ' => "N",
        'ñ' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'Ý' => "Y",
        'ý' | 'ÿ' => "y",
        'Þ' => "TH",
        'þ' => "th",
        'ß' => "ss",
        'Œ' => "OE",
        'œ' => "oe",
        'Š' => "S",
        'š' => "s",
        'Ž' => "Z",
        'ž' => "z",
        'Ł' => "L",
        'ł' => "l",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use codedb_core::sample::SampleFile;
    use pretty_assertions::assert_eq;

    fn results() -> AnalysisResults {
        serde_json::from_str(
            r#"{"Info": {"analyse": {"started": "2015-03-01 12:34:56", "uuid": "run-7"}}}"#,
        )
        .unwrap()
    }

    fn sample() -> Sample {
        Sample::new(SampleFile::new(b"MZ original".to_vec(), "PE32 executable"), "a.exe")
            .with_unpacked(SampleFile::new(b"MZ unpacked".to_vec(), "PE32 executable"))
            .with_extracted(SampleFile::new(b"PK extracted".to_vec(), "Zip archive"))
    }

    #[test]
    fn original_gets_collector_and_run_only() {
        let sample = sample();
        let variants = sample.variants();
        let tags = build_tags(&results(), &sample, &variants[0]);

        assert_eq!(
            tags,
            BTreeMap::from([
                ("Collector".to_string(), "Ragpicker".to_string()),
                ("Ragpicker-uuid".to_string(), "run-7".to_string()),
            ])
        );
    }

    #[test]
    fn unpacked_adds_original_file_type() {
        let sample = sample();
        let variants = sample.variants();
        let tags = build_tags(&results(), &sample, &variants[1]);

        assert_eq!(tags.get(TAG_ORIG_FILE_TYPE).map(String::as_str), Some("PE32 executable"));
        assert!(!tags.contains_key(TAG_EXTRACTED_FROM));
    }

    #[test]
    fn extracted_adds_type_and_parent_hash() {
        let sample = sample();
        let variants = sample.variants();
        let tags = build_tags(&results(), &sample, &variants[2]);

        assert_eq!(tags.get(TAG_ORIG_FILE_TYPE).map(String::as_str), Some("PE32 executable"));
        assert_eq!(
            tags.get(TAG_EXTRACTED_FROM).map(String::as_str),
            Some(sample.file.sha256())
        );
    }

    #[test]
    fn tag_values_are_sanitized() {
        let sample = Sample::new(SampleFile::new(b"x".to_vec(), "Über\tformat\u{2122}"), "x")
            .with_unpacked(SampleFile::new(b"y".to_vec(), "data"));
        let variants = sample.variants();
        let tags = build_tags(&results(), &sample, &variants[1]);
        assert_eq!(tags[TAG_ORIG_FILE_TYPE], "Uberformat");
    }

    #[test]
    fn folds_accents_and_drops_the_rest() {
        assert_eq!(sanitize_ascii("Straße"), "Strasse");
        assert_eq!(sanitize_ascii("Côte d'Ivoire"), "Cote d'Ivoire");
        assert_eq!(sanitize_ascii("файл.exe"), ".exe");
        assert_eq!(sanitize_ascii("a\u{0}b\r\nc"), "abc");
        assert_eq!(sanitize_ascii(""), "");
    }

    #[test]
    fn sanitizing_is_idempotent() {
        for input in ["Straße", "naïve\u{7}", "Łódź ☃ файл", "plain ascii", "\u{1b}[31m"] {
            let once = sanitize_ascii(input);
            assert_eq!(sanitize_ascii(&once), once);
            assert!(once.chars().all(|c| c.is_ascii() && !c.is_ascii_control()));
        }
    }

    #[test]
    fn sanitized_mapping_is_stable() {
        let sample = sample();
        let variants = sample.variants();
        let tags = build_tags(&results(), &sample, &variants[2]);
        let again: BTreeMap<_, _> = tags
            .iter()
            .map(|(k, v)| (k.clone(), sanitize_ascii(v)))
            .collect();
        assert_eq!(again, tags);
    }
}
