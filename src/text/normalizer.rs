//! Word normalization applied before anything enters a map set.

use crate::config::TextConfig;
use unicode_normalization::UnicodeNormalization;

/// Word normalizer: trims, lowercases and filters sentinel words.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: TextConfig,
}

impl Normalizer {
    /// Creates a new normalizer with the given configuration.
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Creates a normalizer with default configuration.
    pub fn default_config() -> Self {
        Self::new(TextConfig::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    /// Cleans a single word, without filtering.
    pub fn clean_word(&self, word: &str) -> String {
        let mut result = if self.config.trim {
            word.trim().to_string()
        } else {
            word.to_string()
        };

        if self.config.unicode_normalize {
            result = result.nfc().collect();
        }

        if self.config.lowercase {
            result = result.to_lowercase();
        }

        result
    }

    /// Checks whether an already cleaned word is a sentinel.
    pub fn is_empty_word(&self, cleaned: &str) -> bool {
        self.config.empty_words.iter().any(|w| w == cleaned)
    }

    /// Normalizes a single word.
    ///
    /// Returns `None` if the word is a sentinel and must be dropped.
    pub fn normalize_token(&self, word: &str) -> Option<String> {
        let cleaned = self.clean_word(word);
        if self.is_empty_word(&cleaned) {
            None
        } else {
            Some(cleaned)
        }
    }

    /// Normalizes the word fields of a row, keeping their order.
    pub fn normalize_row<'a, I>(&self, fields: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields
            .into_iter()
            .filter_map(|field| self.normalize_token(field))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_word() {
        let normalizer = Normalizer::default_config();
        assert_eq!(normalizer.clean_word("  MoT "), "mot");
    }

    #[test]
    fn test_sentinels_dropped() {
        let normalizer = Normalizer::default_config();
        assert_eq!(normalizer.normalize_token("NULL"), None);
        assert_eq!(normalizer.normalize_token("   "), None);
        assert_eq!(normalizer.normalize_token(" Nickel"), Some("nickel".to_string()));
    }

    #[test]
    fn test_normalize_row_keeps_order_and_duplicates() {
        let normalizer = Normalizer::default_config();
        let row = normalizer.normalize_row(["Mer", "null", "argent", "", "mer"]);
        assert_eq!(row, vec!["mer", "argent", "mer"]);
    }

    #[test]
    fn test_inner_whitespace_kept() {
        let normalizer = Normalizer::default_config();
        assert_eq!(normalizer.clean_word(" Terre Rouge "), "terre rouge");
    }

    #[test]
    fn test_unicode_normalization() {
        let config = TextConfig {
            unicode_normalize: true,
            ..Default::default()
        };
        let normalizer = Normalizer::new(config);
        // e followed by a combining acute accent
        let decomposed = "re\u{301}paration";
        assert_eq!(normalizer.clean_word(decomposed), "réparation");
    }
}
