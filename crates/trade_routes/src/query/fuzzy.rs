//! Edit-distance matching for misspelled questions.

use super::{resolve_countries, wants_scenarios, Mention, QueryExtractor, TradeQuery, Vocabulary};

/// Default minimum similarity for a window to count as a mention.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Matches vocabulary entries against word windows of the question.
///
/// A candidate of `k` words is compared with every run of `k` consecutive
/// words in the text using normalised Levenshtein similarity
/// (`1 - distance / max_len`). The best window at or above the threshold
/// is a mention at that window's word position.
#[derive(Clone, Copy, Debug)]
pub struct FuzzyExtractor {
    threshold: f64,
}

impl FuzzyExtractor {
    /// Create an extractor with the given similarity threshold in `(0, 1]`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The similarity threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Best `(word_index, window_len, similarity)` for `candidate` among the windows of `words`.
    fn best_window(&self, words: &[String], candidate: &str) -> Option<(usize, usize, f64)> {
        let target = tokenize(candidate);
        let k = target.len();
        if k == 0 || words.len() < k {
            return None;
        }
        let target = target.join(" ");

        words
            .windows(k)
            .enumerate()
            .map(|(i, window)| (i, k, similarity(&window.join(" "), &target)))
            .filter(|(_, _, score)| *score >= self.threshold)
            .max_by(|a, b| a.2.total_cmp(&b.2).then_with(|| b.0.cmp(&a.0)))
    }
}

impl Default for FuzzyExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl QueryExtractor for FuzzyExtractor {
    fn extract(&self, text: &str, vocabulary: &Vocabulary) -> TradeQuery {
        let words = tokenize(text);

        let mentions = vocabulary
            .countries
            .iter()
            .filter_map(|country| {
                self.best_window(&words, country).map(|(start, len, _)| Mention {
                    start,
                    end: start + len,
                    name: country.as_str(),
                })
            })
            .collect();
        let (export_country, import_country) = resolve_countries(mentions);

        // Highest similarity wins; earlier position breaks ties.
        let product = vocabulary
            .products
            .iter()
            .filter_map(|p| self.best_window(&words, p).map(|(start, _, score)| (start, score, p)))
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(_, _, p)| p.clone());

        TradeQuery {
            export_country,
            import_country,
            product,
            scenario_flag: wants_scenarios(text),
        }
    }

    fn name(&self) -> &'static str {
        "fuzzy"
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Normalised Levenshtein similarity in `[0, 1]`.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
