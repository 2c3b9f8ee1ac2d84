// Missing-information detector

pub const MISSING_INFO_ADVISORY: &str = "Some information was not available in the provided document(s)";

/// Phrases the model uses when it admits the documents lacked something.
/// Stored lower-case.
const MISSING_INDICATORS: [&str; 4] = [
    "not available in provided document",
    "information is missing",
    "not mentioned in the document",
    "unclear from the document",
];

/// Returns [`MISSING_INFO_ADVISORY`] when `output` contains any indicator
/// (case-insensitive), otherwise an empty string.
pub fn detect_missing_info(output: &str) -> String {
    let haystack = output.to_lowercase();

    if MISSING_INDICATORS.iter().any(|indicator| haystack.contains(indicator)) {
        MISSING_INFO_ADVISORY.to_string()
    } else {
        String::new()
    }
}
