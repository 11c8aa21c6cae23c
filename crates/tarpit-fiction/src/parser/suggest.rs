//! "Did you mean" suggestions for unknown verbs.

use strsim::jaro_winkler;

/// Minimum similarity score for a suggestion (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// The known verb closest to `word`, if any is close enough.
pub fn suggest_verb<'a>(word: &str, verbs: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let word = word.to_lowercase();
    let mut matches: Vec<(&str, f64)> = verbs
        .into_iter()
        .filter_map(|verb| {
            let score = jaro_winkler(&word, verb);
            (score >= FUZZY_THRESHOLD).then_some((verb, score))
        })
        .collect();

    matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    matches.first().map(|(verb, _)| *verb)
}
