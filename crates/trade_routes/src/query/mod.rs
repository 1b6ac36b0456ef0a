//! Free-text question extraction.
//!
//! A [`QueryExtractor`] turns a question such as
//! "Korea to Germany for passenger cars with stronger USD" into a
//! [`TradeQuery`]. Strategies are swappable and know nothing about pricing.
//!
//! Country order is positional in every strategy: the country mentioned
//! first is the exporter and the next distinct country is the importer.

mod fuzzy;
mod keyword;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::table::RouteTable;

pub use fuzzy::{FuzzyExtractor, DEFAULT_FUZZY_THRESHOLD};
pub use keyword::KeywordExtractor;

/// Phrases that ask for a scenario comparison.
pub const SCENARIO_KEYWORDS: [&str; 6] = [
    "stronger",
    "lower usd",
    "weaker",
    "higher usd",
    "higher tariff",
    "lower tariff",
];

/// Entities recognised in a question.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeQuery {
    /// Exporting country, as spelled in the table
    pub export_country: Option<String>,
    /// Importing country, as spelled in the table
    pub import_country: Option<String>,
    /// Product, as spelled in the table
    pub product: Option<String>,
    /// Whether the question asks for scenarios
    pub scenario_flag: bool,
}

impl TradeQuery {
    /// True when exporter, importer and product were all recognised.
    pub fn is_complete(&self) -> bool {
        self.export_country.is_some() && self.import_country.is_some() && self.product.is_some()
    }
}

/// Countries and products the extractors match against.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    /// Known countries
    pub countries: Vec<String>,
    /// Known products
    pub products: Vec<String>,
}

impl Vocabulary {
    /// Create a vocabulary from explicit lists.
    pub fn new(countries: Vec<String>, products: Vec<String>) -> Self {
        Self { countries, products }
    }

    /// Collect the vocabulary of a route table.
    pub fn from_table(table: &RouteTable) -> Self {
        Self::new(table.countries(), table.products())
    }
}

/// A text-to-entity extraction strategy.
pub trait QueryExtractor: Send + Sync {
    /// Extract route entities from `text`.
    fn extract(&self, text: &str, vocabulary: &Vocabulary) -> TradeQuery;

    /// Strategy name for logs.
    fn name(&self) -> &'static str;
}

/// Selectable extraction strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// Case-insensitive containment
    #[default]
    Keyword,
    /// Normalised edit-distance matching
    Fuzzy,
}

impl ExtractorKind {
    /// Build the extractor; `fuzzy_threshold` only applies to [`ExtractorKind::Fuzzy`].
    pub fn build(&self, fuzzy_threshold: f64) -> Box<dyn QueryExtractor> {
        match self {
            Self::Keyword => Box::new(KeywordExtractor),
            Self::Fuzzy => Box::new(FuzzyExtractor::new(fuzzy_threshold)),
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl FromStr for ExtractorKind {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(RouteError::UnknownExtractor(other.to_string())),
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when the question asks for a scenario comparison.
pub fn wants_scenarios(text: &str) -> bool {
    let lower = text.to_lowercase();
    SCENARIO_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// A candidate found in the text at `[start, end)`, in strategy-specific units.
#[derive(Clone, Debug)]
struct Mention<'a> {
    start: usize,
    end: usize,
    name: &'a str,
}

/// Pick exporter and importer from country mentions.
///
/// Longer mentions win over shorter ones they overlap ("South Korea" hides
/// the "Korea" inside it).
fn resolve_countries(mut mentions: Vec<Mention<'_>>) -> (Option<String>, Option<String>) {
    mentions.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| (b.end - b.start).cmp(&(a.end - a.start)))
    });

    let mut accepted: Vec<Mention<'_>> = Vec::new();
    for mention in mentions {
        if accepted
            .iter()
            .all(|m| mention.end <= m.start || mention.start >= m.end)
        {
            accepted.push(mention);
        }
    }

    let export = accepted.first().map(|m| m.name);
    let import = accepted
        .iter()
        .map(|m| m.name)
        .find(|name| Some(*name) != export);
    (export.map(str::to_string), import.map(str::to_string))
}
