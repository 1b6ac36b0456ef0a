//! Case-insensitive containment matching.

use super::{resolve_countries, wants_scenarios, Mention, QueryExtractor, TradeQuery, Vocabulary};

/// Product words shorter than this are ignored by the word fallback.
const MIN_PRODUCT_WORD_LEN: usize = 3;

/// Matches vocabulary entries that appear verbatim (ignoring case) in the text.
///
/// Products are matched on their full name first. When no full name
/// appears, the first product with any significant word in the text wins,
/// so "computers" still finds "Computers and laptops".
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordExtractor;

impl KeywordExtractor {
    fn match_product(lower: &str, products: &[String]) -> Option<String> {
        let full = products
            .iter()
            .filter_map(|p| lower.find(&p.to_lowercase()).map(|pos| (pos, p)))
            .min_by(|(pa, a), (pb, b)| pa.cmp(pb).then_with(|| b.len().cmp(&a.len())))
            .map(|(_, p)| p.clone());
        if full.is_some() {
            return full;
        }

        products
            .iter()
            .find(|p| {
                p.to_lowercase()
                    .split_whitespace()
                    .filter(|w| w.chars().count() >= MIN_PRODUCT_WORD_LEN)
                    .any(|w| lower.contains(w))
            })
            .cloned()
    }
}

impl QueryExtractor for KeywordExtractor {
    fn extract(&self, text: &str, vocabulary: &Vocabulary) -> TradeQuery {
        let lower = text.to_lowercase();

        let mentions = vocabulary
            .countries
            .iter()
            .filter_map(|country| {
                let needle = country.to_lowercase();
                lower.find(&needle).map(|start| Mention {
                    start,
                    end: start + needle.len(),
                    name: country.as_str(),
                })
            })
            .collect();
        let (export_country, import_country) = resolve_countries(mentions);

        TradeQuery {
            export_country,
            import_country,
            product: Self::match_product(&lower, &vocabulary.products),
            scenario_flag: wants_scenarios(text),
        }
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new(
            ["Korea", "Germany", "United States", "Japan", "Brazil", "France"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ["Passenger cars", "Computers and laptops", "Meat", "Wheat"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    #[test]
    fn test_positional_country_order() {
        let q = KeywordExtractor.extract("Germany to Korea for wheat", &vocabulary());
        assert_eq!(q.export_country.as_deref(), Some("Germany"));
        assert_eq!(q.import_country.as_deref(), Some("Korea"));

        let q = KeywordExtractor.extract("Exporting meat from Brazil to Japan with weaker USD", &vocabulary());
        assert_eq!(q.export_country.as_deref(), Some("Brazil"));
        assert_eq!(q.import_country.as_deref(), Some("Japan"));
        assert_eq!(q.product.as_deref(), Some("Meat"));
        assert!(q.scenario_flag);
    }

    #[test]
    fn test_full_product_name() {
        let q = KeywordExtractor.extract("korea to germany for PASSENGER CARS", &vocabulary());
        assert_eq!(q.product.as_deref(), Some("Passenger cars"));
        assert!(!q.scenario_flag);
        assert!(q.is_complete());
    }

    #[test]
    fn test_product_word_fallback() {
        let q = KeywordExtractor.extract(
            "What if Korea exports computers to United States with stronger USD?",
            &vocabulary(),
        );
        assert_eq!(q.product.as_deref(), Some("Computers and laptops"));
        assert_eq!(q.import_country.as_deref(), Some("United States"));
        assert!(q.scenario_flag);
    }

    #[test]
    fn test_short_product_words_ignored() {
        let vocab = Vocabulary::new(vec![], vec!["Cars of Korea".to_string()]);
        let q = KeywordExtractor.extract("a list of things", &vocab);
        assert_eq!(q.product, None);
    }

    #[test]
    fn test_unrecognised_text() {
        let q = KeywordExtractor.extract("hello there", &vocabulary());
        assert_eq!(q, TradeQuery::default());
    }
}
