// ============================================================
// Layer 4 — Keyword Extractor (RAKE)
// ============================================================
// Rapid Automatic Keyword Extraction turns a free-text query
// into ranked key phrases that are used as the search string.
//
// Steps:
//   1. Lower-case and split into word / punctuation tokens
//      ("capital of France?" → capital, of, france, ?)
//   2. Cut the token stream at every stopword or punctuation
//      token; the runs in between are candidate phrases
//      ("capital", "france")
//   3. For every word: freq = occurrences,
//      degree = summed length of the phrases it occurs in
//   4. Phrase score = Σ degree(w) / freq(w) over its words
//   5. Sort by score descending, phrase text descending on ties
//
// Multi-word phrases therefore outrank single words:
//   "deep learning frameworks" scores 3 + 3 + 3 = 9
//
// Reference: Rose et al. (2010) Automatic Keyword Extraction
//            from Individual Documents

use regex::Regex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::data::stopwords;

const WORD_PUNCT_PATTERN: &str = r"\w+|[^\w\s]+";

pub struct KeywordExtractor {
    tokens:    Regex,
    stopwords: HashSet<&'static str>,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            tokens:    Regex::new(WORD_PUNCT_PATTERN).expect("static token pattern compiles"),
            stopwords: stopwords::ENGLISH.iter().copied().collect(),
        }
    }

    /// Extract key phrases from `text`, highest ranked first.
    /// Returns an empty Vec when nothing but stopwords and
    /// punctuation is present.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let phrases = self.candidate_phrases(&lowered);

        // ── Word statistics ───────────────────────────────────────────────────
        let mut freq:   HashMap<&str, f64> = HashMap::new();
        let mut degree: HashMap<&str, f64> = HashMap::new();
        for phrase in &phrases {
            for &word in phrase {
                *freq.entry(word).or_insert(0.0)   += 1.0;
                *degree.entry(word).or_insert(0.0) += phrase.len() as f64;
            }
        }

        // ── Phrase scores (each distinct phrase once) ─────────────────────────
        let mut seen   = HashSet::new();
        let mut scored = Vec::new();
        for phrase in &phrases {
            let joined = phrase.join(" ");
            if !seen.insert(joined.clone()) {
                continue;
            }
            let score: f64 = phrase.iter().map(|w| degree[w] / freq[w]).sum();
            scored.push((score, joined));
        }

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.1.cmp(&a.1))
        });

        tracing::debug!("Extracted {} key phrases", scored.len());
        scored.into_iter().map(|(_, phrase)| phrase).collect()
    }

    fn candidate_phrases<'a>(&self, lowered: &'a str) -> Vec<Vec<&'a str>> {
        let mut phrases = Vec::new();
        let mut current = Vec::new();

        for m in self.tokens.find_iter(lowered) {
            let token = m.as_str();
            if self.is_boundary(token) {
                if !current.is_empty() {
                    phrases.push(std::mem::take(&mut current));
                }
            } else {
                current.push(token);
            }
        }
        if !current.is_empty() {
            phrases.push(current);
        }
        phrases
    }

    fn is_boundary(&self, token: &str) -> bool {
        self.stopwords.contains(token) || !token.chars().any(char::is_alphanumeric)
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capital_of_france() {
        let k = KeywordExtractor::new();
        let keywords = k.extract("What is the capital of France?");
        assert_eq!(keywords, vec!["france", "capital"]);
    }

    #[test]
    fn test_multi_word_phrase_ranks_first() {
        let k = KeywordExtractor::new();
        let keywords = k.extract("Which deep learning frameworks support Python?");
        assert_eq!(keywords[0], "deep learning frameworks support python");
    }

    #[test]
    fn test_phrases_split_on_punctuation() {
        let k = KeywordExtractor::new();
        let keywords = k.extract("Deep learning, capital city");
        assert_eq!(keywords.len(), 2);
        assert!(keywords.contains(&"deep learning".to_string()));
        assert!(keywords.contains(&"capital city".to_string()));
    }

    #[test]
    fn test_repeated_phrase_reported_once() {
        let k = KeywordExtractor::new();
        let keywords = k.extract("Paris. Paris. Paris?");
        assert_eq!(keywords, vec!["paris"]);
    }

    #[test]
    fn test_empty_and_stopword_only_queries() {
        let k = KeywordExtractor::new();
        assert!(k.extract("").is_empty());
        assert!(k.extract("?!...").is_empty());
        assert!(k.extract("What is it?").is_empty());
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let k = KeywordExtractor::new();
        let q = "red apples, green pears, yellow bananas";
        assert_eq!(k.extract(q), k.extract(q));
    }
}
