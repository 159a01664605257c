//! Catalog item matching.

use super::catalog::Catalog;
use super::{ExtractionMatch, FieldExtractor};

/// Finds which catalog item a line refers to.
///
/// The catalog is tried in its longest-first order and the first whole-word
/// hit wins, so a line mentioning "Filter Coffee Glass" is never claimed by
/// "Filter Coffee".
pub struct ItemMatcher<'c> {
    catalog: &'c Catalog,
}

impl<'c> ItemMatcher<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }
}

impl FieldExtractor for ItemMatcher<'_> {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.catalog.entries().iter().find_map(|entry| {
            entry.find_in(text).map(|(start, end)| {
                ExtractionMatch::new(entry.name().to_string(), start, end, &text[start..end])
            })
        })
    }

    /// Every catalog item found in the text, in catalog order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.catalog
            .entries()
            .iter()
            .filter_map(|entry| {
                entry.find_in(text).map(|(start, end)| {
                    ExtractionMatch::new(entry.name().to_string(), start, end, &text[start..end])
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_most_specific_name_wins() {
        let catalog = Catalog::new(["Filter Coffee", "Filter Coffee Glass"]);
        let matcher = ItemMatcher::new(&catalog);

        let m = matcher.extract("Filter Coffee Glass 2 pcs").unwrap();
        assert_eq!(m.value, "Filter Coffee Glass");
        assert_eq!(m.end(), 19);

        let m = matcher.extract("filter coffee 3 kg").unwrap();
        assert_eq!(m.value, "Filter Coffee");
        assert_eq!(m.source, "filter coffee");
    }

    #[test]
    fn test_end_offset_points_past_match() {
        let catalog = Catalog::new(["Milk"]);
        let matcher = ItemMatcher::new(&catalog);

        let text = "fresh milk 2 ltr";
        let m = matcher.extract(text).unwrap();
        assert_eq!(&text[m.end()..], " 2 ltr");
    }

    #[test]
    fn test_no_match() {
        let catalog = Catalog::new(["Sugar", "Milk"]);
        let matcher = ItemMatcher::new(&catalog);

        assert!(matcher.extract("Sugarcane juice 4").is_none());
        assert!(matcher.extract("").is_none());
    }

    #[test]
    fn test_extract_all_reports_overlaps() {
        let catalog = Catalog::new(["Filter Coffee", "Filter Coffee Glass"]);
        let matcher = ItemMatcher::new(&catalog);

        let names: Vec<String> = matcher
            .extract_all("Filter Coffee Glass 2 pcs")
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(names, vec!["Filter Coffee Glass", "Filter Coffee"]);
    }
}
