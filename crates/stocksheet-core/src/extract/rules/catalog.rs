//! Catalog of known item names.

use std::collections::HashSet;

use regex::Regex;
use tracing::warn;

/// A catalog name with its compiled whole-word pattern.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    name: String,
    pattern: Regex,
}

impl CatalogEntry {
    fn new(name: &str) -> Result<Self, regex::Error> {
        // Words may be separated by any run of whitespace in OCR output.
        let body = name
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        // No lookaround in `regex`, so boundaries are consumed and the name is group 1.
        let pattern = Regex::new(&format!(r"(?i)(?:^|\W)({body})(?:\W|$)"))?;

        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }

    /// Canonical display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte span of the first whole-word occurrence in `text`.
    pub fn find_in(&self, text: &str) -> Option<(usize, usize)> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| (m.start(), m.end()))
    }
}

/// Known item names, deduplicated and ordered longest first.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from item names.
    ///
    /// Names are trimmed, blank names dropped and duplicates removed
    /// case-insensitively (first spelling wins). Entries are sorted by
    /// descending length in characters so that "Filter Coffee Glass" is
    /// tried before "Filter Coffee"; equal lengths sort alphabetically.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries: Vec<CatalogEntry> = Vec::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || !seen.insert(name.to_lowercase()) {
                continue;
            }
            match CatalogEntry::new(name) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping catalog item {:?}: {}", name, e),
            }
        }

        entries.sort_by(|a, b| {
            b.name
                .chars()
                .count()
                .cmp(&a.name.chars().count())
                .then_with(|| a.name.cmp(&b.name))
        });

        Self { entries }
    }

    /// Entries in match order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Names in match order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(CatalogEntry::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_longest_first_and_deduplicated() {
        let catalog = Catalog::new([
            "Milk",
            "Filter Coffee",
            "  ",
            "milk",
            "Filter Coffee Glass",
            "Sugar",
        ]);

        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec!["Filter Coffee Glass", "Filter Coffee", "Sugar", "Milk"]
        );
    }

    #[test]
    fn test_whole_word_only() {
        let catalog = Catalog::new(["Sugar"]);
        let entry = &catalog.entries()[0];

        assert_eq!(entry.find_in("Sugar 5 kg"), Some((0, 5)));
        assert_eq!(entry.find_in("brown SUGAR, 2 kg"), Some((6, 11)));
        assert_eq!(entry.find_in("Sugarcane 5 kg"), None);
        assert_eq!(entry.find_in("Brownsugar 5 kg"), None);
    }

    #[test]
    fn test_internal_whitespace_is_flexible() {
        let catalog = Catalog::new(["Toor Dal"]);

        assert_eq!(catalog.entries()[0].find_in("toor   dal 3 kg"), Some((0, 10)));
    }

    #[test]
    fn test_name_with_punctuation() {
        let catalog = Catalog::new(["Tea (Loose)"]);

        assert_eq!(catalog.entries()[0].find_in("tea (loose) 2 kg"), Some((0, 11)));
    }
}
