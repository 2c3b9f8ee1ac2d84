// Language directive resolver

use tracing::warn;

use crate::types::Language;

impl Language {
    /// Instruction prepended to every user prompt.
    pub fn directive(&self) -> &'static str {
        match self {
            Language::En => "Respond in English only.",
            Language::Or => "Respond in Odia (ଓଡ଼ିଆ) only.",
            Language::Bilingual => {
                "Respond in both English and Odia (ଓଡ଼ିଆ). Use clear section headers for each language."
            }
        }
    }

    /// Lenient lookup: anything unrecognised becomes [`Language::En`].
    pub fn from_selector_or_default(selector: &str) -> Self {
        // Silent English fallback kept as-is; whether unknown selectors should be
        // rejected instead is an open product question.
        Language::from_selector(selector).unwrap_or_else(|| {
            warn!(selector, "Unrecognised language selector, falling back to English");
            Language::En
        })
    }
}

/// Resolve a raw language selector to its directive string.
pub fn language_directive(selector: &str) -> &'static str {
    Language::from_selector_or_default(selector).directive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(language_directive("en"), "Respond in English only.");
        assert_eq!(language_directive("or"), "Respond in Odia (ଓଡ଼ିଆ) only.");
        assert!(language_directive("bilingual").contains("both English and Odia"));
    }

    #[test]
    fn test_unknown_selector_falls_back_to_english() {
        assert_eq!(language_directive("fr"), language_directive("en"));
        assert_eq!(language_directive(""), language_directive("en"));
        // Selectors are case-sensitive, so this is unknown too
        assert_eq!(language_directive("OR"), language_directive("en"));
    }

    #[test]
    fn test_every_language_has_distinct_directive() {
        let directives: Vec<_> = Language::ALL.iter().map(|l| l.directive()).collect();
        assert_eq!(directives.len(), 3);
        assert_ne!(directives[0], directives[1]);
        assert_ne!(directives[1], directives[2]);
    }
}
