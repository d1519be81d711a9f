// ============================================================
// Layer 4 — Passage Ranker (BM25 Okapi)
// ============================================================
// Scores each retrieved passage against the question and
// keeps the best N. The "corpus" for IDF is only the handful of
// passages retrieved for this one question.
//
// For each query term q:
//   score += idf(q) * tf * (k1 + 1)
//                   / (tf + k1 * (1 - b + b * |d| / avgdl))
//
//   idf(q) = ln(N - df + 0.5) - ln(df + 0.5)
//
// With a tiny corpus a term present in most passages gets a
// negative idf; those are floored to epsilon * mean idf.
//
// Tokenization is a plain split on ' ': no lower-casing, no
// stemming, punctuation stays attached ("France?" ≠ "France").

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::error::RankError;

pub const DEFAULT_K1:      f64 = 1.5;
pub const DEFAULT_B:       f64 = 0.75;
pub const DEFAULT_EPSILON: f64 = 0.25;

/// BM25 Okapi index over a fixed set of documents.
#[derive(Debug, Clone)]
pub struct Bm25 {
    k1:        f64,
    b:         f64,
    avgdl:     f64,
    doc_lens:  Vec<usize>,
    doc_freqs: Vec<HashMap<String, usize>>,
    idf:       HashMap<String, f64>,
}

impl Bm25 {
    pub fn new(documents: &[&str]) -> Result<Self, RankError> {
        Self::with_params(documents, DEFAULT_K1, DEFAULT_B, DEFAULT_EPSILON)
    }

    pub fn with_params(
        documents: &[&str],
        k1:        f64,
        b:         f64,
        epsilon:   f64,
    ) -> Result<Self, RankError> {
        if documents.is_empty() {
            return Err(RankError::EmptyCorpus);
        }

        let mut doc_lens  = Vec::with_capacity(documents.len());
        let mut doc_freqs = Vec::with_capacity(documents.len());
        // Ordered so the idf sum (and the epsilon floor) is bit-for-bit
        // reproducible between calls.
        let mut df: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let tokens = tokenize(doc);
            doc_lens.push(tokens.len());

            let mut counts: HashMap<String, usize> = HashMap::new();
            for token in tokens {
                *counts.entry(token.to_string()).or_insert(0) += 1;
            }
            for term in counts.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
            doc_freqs.push(counts);
        }

        let total_len: usize = doc_lens.iter().sum();
        let avgdl = total_len as f64 / documents.len() as f64;

        let idf = compute_idf(&df, documents.len(), epsilon);

        Ok(Self { k1, b, avgdl, doc_lens, doc_freqs, idf })
    }

    /// One score per document, in corpus order.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let terms = tokenize(query);

        self.doc_freqs
            .iter()
            .zip(&self.doc_lens)
            .map(|(freqs, &len)| {
                // Every document in a corpus of empty strings has
                // length 1 (a single "" token), so avgdl > 0 here.
                let norm = self.k1 * (1.0 - self.b + self.b * len as f64 / self.avgdl);
                terms
                    .iter()
                    .map(|term| {
                        let tf  = freqs.get(*term).copied().unwrap_or(0) as f64;
                        let idf = self.idf.get(*term).copied().unwrap_or(0.0);
                        idf * (tf * (self.k1 + 1.0)) / (tf + norm)
                    })
                    .sum()
            })
            .collect()
    }

    /// Indices of the `n` best documents, best first.
    /// Equal scores keep corpus order.
    pub fn top_n_indices(&self, query: &str, n: usize) -> Vec<usize> {
        let scores = self.scores(query);
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order.truncate(n);
        order
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

fn compute_idf(df: &BTreeMap<String, usize>, corpus_size: usize, epsilon: f64) -> HashMap<String, f64> {
    let n = corpus_size as f64;
    let mut idf      = HashMap::with_capacity(df.len());
    let mut negative = HashSet::new();
    let mut idf_sum  = 0.0;

    for (term, &freq) in df {
        let freq  = freq as f64;
        let value = (n - freq + 0.5).ln() - (freq + 0.5).ln();
        idf_sum += value;
        if value < 0.0 {
            negative.insert(term.clone());
        }
        idf.insert(term.clone(), value);
    }

    let floor = epsilon * idf_sum / df.len().max(1) as f64;
    for term in negative {
        idf.insert(term, floor);
    }
    idf
}

/// Rank `documents` against `query` and return the indices of
/// the top `n`, best first.
pub fn rank(documents: &[&str], query: &str, n: usize) -> Result<Vec<usize>, RankError> {
    let index = Bm25::new(documents)?;
    Ok(index.top_n_indices(query, n))
}
