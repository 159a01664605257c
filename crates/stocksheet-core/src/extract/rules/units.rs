//! Unit vocabulary.

use std::collections::HashMap;

/// Fixed set of recognized unit tokens, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct UnitVocabulary {
    // lower-cased token -> configured spelling
    tokens: HashMap<String, String>,
}

impl UnitVocabulary {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for token in tokens {
            let token = token.as_ref().trim();
            if !token.is_empty() {
                map.entry(token.to_lowercase())
                    .or_insert_with(|| token.to_string());
            }
        }
        Self { tokens: map }
    }

    /// Configured spelling of `word`, if it is a unit.
    pub fn canonical(&self, word: &str) -> Option<&str> {
        self.tokens.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.canonical(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_membership() {
        let units = UnitVocabulary::new(["kg", "ltr", " ", "KG"]);

        assert_eq!(units.len(), 2);
        assert_eq!(units.canonical("KG"), Some("kg"));
        assert_eq!(units.canonical("Ltr"), Some("ltr"));
        assert!(!units.contains("packet"));
    }
}
