use std::collections::HashSet;

use crate::model::CandidateVideo;
use crate::{bool_to_f64, clamp01};

const STOP_WORDS: [&str; 10] = ["the", "and", "or", "in", "on", "at", "to", "for", "of", "with"];

/// Lowercased description words longer than two characters, stop words and
/// duplicates removed, in order of first appearance.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '_' || ch.is_whitespace() {
                ch
            } else {
                ' '
            }
        })
        .collect();

    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .filter(|word| !STOP_WORDS.contains(word))
        .filter(|word| seen.insert(word.to_string()))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct RelevancyScorer;

impl RelevancyScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, video: &CandidateVideo, keywords: &[String], query: &str) -> f64 {
        let query = query.to_lowercase();
        let title = video.title.to_lowercase();
        let description = video.description.to_lowercase();
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

        let exact = exact_match_score(&query, &title, &description, &keywords);

        let query_terms: HashSet<&str> = query
            .split_whitespace()
            .filter(|term| term.chars().count() > 2)
            .collect();
        let title_terms: HashSet<&str> = title.split_whitespace().collect();
        let description_terms: HashSet<&str> = description.split_whitespace().collect();
        let keyword_terms: HashSet<&str> = keywords.iter().map(String::as_str).collect();

        let title_match = term_overlap(&query_terms, &title_terms);
        let description_match = term_overlap(&query_terms, &description_terms);
        let keyword_match = term_overlap(&query_terms, &keyword_terms);

        clamp01(
            exact * 0.4 + title_match * 0.3 + description_match * 0.2 + keyword_match * 0.1,
        )
    }
}

fn exact_match_score(query: &str, title: &str, description: &str, keywords: &[String]) -> f64 {
    let in_title = title.contains(query);
    let in_description = description.contains(query);
    let in_keywords = keywords.iter().any(|keyword| keyword.contains(query));

    0.5 * bool_to_f64(in_title) + 0.3 * bool_to_f64(in_description) + 0.2 * bool_to_f64(in_keywords)
}

/// Fraction of query terms found inside at least one content term.
fn term_overlap(query_terms: &HashSet<&str>, content_terms: &HashSet<&str>) -> f64 {
    if query_terms.is_empty() {
        return 1.0;
    }
    let matched = query_terms
        .iter()
        .filter(|term| content_terms.iter().any(|content| content.contains(**term)))
        .count();
    matched as f64 / query_terms.len() as f64
}
