// =============================================================================
// relevance.rs - IS THIS A TRUCK BUSINESS OR NOT?
// =============================================================================
//
// Two keyword lists, two Aho-Corasick automatons, one rule:
//
//   1. If ANY exclusion keyword appears anywhere in the lowercased name,
//      the answer is no. Full stop. No amount of "trucking" saves
//      "Joe's Auto Repair".
//   2. Otherwise, if ANY inclusion keyword appears, the answer is yes.
//   3. Otherwise, no.
//
// Matching is plain substring matching on the lowercased name. No word
// boundaries, no tokenizing. "pc" knocks out anything with "pc" in it and
// "rv" knocks out "Harvey's Hauling". The exclusion list was curated
// against exactly these semantics, so switching to word-boundary matching
// would change which businesses survive.
//
// The lists themselves are data. The defaults below are the curated ones;
// callers (and tests) hand in whatever lists they like.
// =============================================================================

use aho_corasick::AhoCorasick;
use tracing::debug;

/// Core freight, heavy construction, fleet maintenance and commercial rental
/// terms.
pub const DEFAULT_INCLUDE_KEYWORDS: &[&str] = &[
    // Core freight and logistics
    "truck", "trucks", "trucking", "trailer", "trailers",
    "freight", "logistics", "transport", "transportation", "ltl",
    // Heavy-duty construction and related services
    "hauling", "haul", "excavation", "excavating",
    "construction", "grading", "sitework", "aggregates",
    "paving", "asphalt", "concrete",
    // Fleet maintenance / repair services
    "diesel", "repair", "tow", "towing", "tows",
    // Commercial rental and equipment providers
    "equipment", "rental",
];

/// False positives and small contractors. Any hit here beats any inclusion.
pub const DEFAULT_EXCLUDE_KEYWORDS: &[&str] = &[
    // Residential & consumer services
    "accessories", "apartment", "bank", "budget", "car", "care", "cellphone", "cellphones",
    "cleaners", "cleaning", "furniture", "homes", "home", "hospital", "ice",
    "jewelry", "luxury", "mattress", "moving", "party", "phone", "phones", "piano",
    "pianos", "plumber", "restaurant", "rug", "rugs", "rv", "salon", "school",
    "shoe", "shoes", "storage", "vacation", "watch", "watches",
    // Musical instrument / non-fleet commercial
    "eyeglass", "eyeglasses", "woodwind", "woodwinds",
    // Auto/consumer repair & parts chains
    "advance", "auto", "autozone", "automotive", "body", "collision", "computer",
    "detailing", "firestone", "ford", "glass", "mazda", "medical", "motor", "motors",
    "napa", "oreilly", "penske", "shop", "tire", "tools", "toyota", "wash",
    // Local and non-commercial government
    "church", "city of", "county", "department", "park", "town", "town of", "township",
    "tower", "towne",
    // Generic consultants / irrelevant businesses
    "consultants", "credit", "dream", "electrician", "emissions", "event", "handyman",
    "hvac", "pc", "training", "wireless",
    // High-volume brand noise
    "fedex", "harbor", "saia",
];

/// Why a name was (or wasn't) judged relevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relevance {
    /// The input was absent, not text, or empty.
    NotText,
    /// An exclusion keyword matched. Inclusion keywords were never checked.
    Excluded(String),
    /// No exclusion matched and this inclusion keyword did.
    Included(String),
    /// Neither list matched.
    NoMatch,
}

impl Relevance {
    pub fn is_relevant(&self) -> bool {
        matches!(self, Relevance::Included(_))
    }
}

/// Keyword classifier holding both lists and their automatons.
#[derive(Debug, Clone)]
pub struct RelevanceClassifier {
    include: Vec<String>,
    exclude: Vec<String>,
    include_automaton: AhoCorasick,
    exclude_automaton: AhoCorasick,
}

impl RelevanceClassifier {
    /// Build a classifier from explicit keyword lists.
    ///
    /// Keywords are trimmed and lowercased. Blank keywords are dropped,
    /// since the empty string is a substring of every name.
    pub fn new<I, E, S, T>(include: I, exclude: E) -> crate::error::Result<Self>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let include = normalize_keywords(include);
        let exclude = normalize_keywords(exclude);

        let include_automaton = AhoCorasick::new(&include)?;
        let exclude_automaton = AhoCorasick::new(&exclude)?;

        debug!(
            include_keywords = include.len(),
            exclude_keywords = exclude.len(),
            "Relevance classifier built"
        );

        Ok(Self {
            include,
            exclude,
            include_automaton,
            exclude_automaton,
        })
    }

    /// Classifier over the curated default lists.
    pub fn with_default_keywords() -> crate::error::Result<Self> {
        Self::new(DEFAULT_INCLUDE_KEYWORDS, DEFAULT_EXCLUDE_KEYWORDS)
    }

    pub fn include_keywords(&self) -> &[String] {
        &self.include
    }

    pub fn exclude_keywords(&self) -> &[String] {
        &self.exclude
    }

    /// Classify a business name and report the keyword that decided it.
    pub fn classify(&self, name: Option<&str>) -> Relevance {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return Relevance::NotText;
        };

        let lowered = name.to_lowercase();

        if let Some(m) = self.exclude_automaton.find(&lowered) {
            return Relevance::Excluded(self.exclude[m.pattern().as_usize()].clone());
        }

        match self.include_automaton.find(&lowered) {
            Some(m) => Relevance::Included(self.include[m.pattern().as_usize()].clone()),
            None => Relevance::NoMatch,
        }
    }

    /// `true` when the name matches an inclusion keyword and no exclusion
    /// keyword. Absent, non-text and empty names are never relevant.
    pub fn is_truck_relevant(&self, name: Option<&str>) -> bool {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return false;
        };
        let lowered = name.to_lowercase();
        !self.exclude_automaton.is_match(&lowered) && self.include_automaton.is_match(&lowered)
    }
}

fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
