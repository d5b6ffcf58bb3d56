//! Document-frequency statistics over a built index.

use crate::index::InvertedIndex;
use crate::query::intersect;
use crate::DocId;
use serde::Serialize;
use std::fmt::Write as _;

/// Tuning for [`CollectionStatistics::find_similar_pair`].
#[derive(Debug, Clone, Serialize)]
pub struct PairSearch {
    /// Inclusive document-frequency range of candidate terms.
    pub min_doc_freq: usize,
    pub max_doc_freq: usize,
    /// How far ahead in the frequency-sorted candidates each term looks for a partner.
    pub window: usize,
    /// Allowed frequency gap as a fraction of the larger frequency.
    pub freq_tolerance: f64,
    /// Minimum shared documents as a fraction of the smaller frequency.
    pub min_overlap: f64,
}

impl Default for PairSearch {
    fn default() -> Self {
        Self {
            min_doc_freq: 50,
            max_doc_freq: 200,
            window: 50,
            freq_tolerance: 0.1,
            min_overlap: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermFrequency {
    pub term: String,
    pub doc_freq: usize,
    /// Share of the collection containing the term, in percent.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermPair {
    pub first: TermFrequency,
    pub second: TermFrequency,
    pub shared: Vec<DocId>,
}

impl TermPair {
    /// Shared documents as a percentage of the smaller posting list.
    pub fn overlap_percentage(&self) -> f64 {
        let smaller = self.first.doc_freq.min(self.second.doc_freq);
        if smaller == 0 {
            return 0.0;
        }
        self.shared.len() as f64 / smaller as f64 * 100.0
    }
}

/// Everything the statistics report shows, ready to render or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub num_documents: usize,
    pub num_terms: usize,
    pub highest: Vec<TermFrequency>,
    pub lowest: Vec<TermFrequency>,
    pub similar_pair: Option<TermPair>,
    /// DOCNOs of the first shared documents of `similar_pair`, paired with their IDs.
    pub shared_sample: Vec<(String, DocId)>,
}

pub struct CollectionStatistics<'a> {
    index: &'a InvertedIndex,
    /// Terms sorted by `(doc_freq, term)` ascending.
    by_freq: Vec<(&'a str, &'a [DocId])>,
}

impl<'a> CollectionStatistics<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        let mut by_freq: Vec<(&str, &[DocId])> = index.terms().collect();
        by_freq.sort_unstable_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| a.0.cmp(b.0)));
        Self { index, by_freq }
    }

    fn frequency(&self, term: &str, doc_freq: usize) -> TermFrequency {
        let n = self.index.num_documents();
        let percentage = if n == 0 { 0.0 } else { doc_freq as f64 / n as f64 * 100.0 };
        TermFrequency { term: term.to_string(), doc_freq, percentage }
    }

    /// The `n` most frequent terms, highest first; equal frequencies in term order.
    pub fn highest(&self, n: usize) -> Vec<TermFrequency> {
        let mut terms = self.by_freq.clone();
        terms.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
        terms.iter().take(n).map(|(t, p)| self.frequency(t, p.len())).collect()
    }

    /// The `n` least frequent terms, lowest first; equal frequencies in term order.
    pub fn lowest(&self, n: usize) -> Vec<TermFrequency> {
        self.by_freq.iter().take(n).map(|(t, p)| self.frequency(t, p.len())).collect()
    }

    /// Look for two terms of similar frequency that share many documents.
    ///
    /// Only a window of frequency neighbours is searched for each term, so the pair returned is
    /// the best one inside those windows, not necessarily the global best. On equal overlap the
    /// first pair found is kept.
    pub fn find_similar_pair(&self, cfg: &PairSearch) -> Option<TermPair> {
        let candidates: Vec<&(&str, &[DocId])> = self
            .by_freq
            .iter()
            .filter(|(_, p)| (cfg.min_doc_freq..=cfg.max_doc_freq).contains(&p.len()))
            .collect();

        let mut best: Option<((&str, &[DocId]), (&str, &[DocId]), Vec<DocId>)> = None;
        let mut best_overlap = 0;

        for (i, &&(t1, p1)) in candidates.iter().enumerate() {
            let end = (i + cfg.window).min(candidates.len());
            for &&(t2, p2) in candidates.get(i + 1..end).unwrap_or(&[]) {
                let (f1, f2) = (p1.len() as f64, p2.len() as f64);
                if (f1 - f2).abs() > f1.max(f2) * cfg.freq_tolerance {
                    continue;
                }
                let shared = intersect(p1, p2);
                let overlap = shared.len();
                if overlap as f64 >= f1.min(f2) * cfg.min_overlap && overlap > best_overlap {
                    best_overlap = overlap;
                    best = Some(((t1, p1), (t2, p2), shared));
                }
            }
        }

        best.map(|((t1, p1), (t2, p2), shared)| TermPair {
            first: self.frequency(t1, p1.len()),
            second: self.frequency(t2, p2.len()),
            shared,
        })
    }

    pub fn report(&self, top_n: usize, cfg: &PairSearch) -> StatsReport {
        let similar_pair = self.find_similar_pair(cfg);
        let shared_sample = similar_pair
            .iter()
            .flat_map(|pair| pair.shared.iter().take(10))
            .map(|&id| (self.index.docno(id).unwrap_or_default().to_string(), id))
            .collect();
        StatsReport {
            num_documents: self.index.num_documents(),
            num_terms: self.index.num_terms(),
            highest: self.highest(top_n),
            lowest: self.lowest(top_n),
            similar_pair,
            shared_sample,
        }
    }
}

const RULE_WIDTH: usize = 70;

impl StatsReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self, cfg: &PairSearch) -> String {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{heavy}\nCOLLECTION STATISTICS\n{heavy}");
        let _ = writeln!(
            out,
            "Documents: {}  Distinct terms: {}\n",
            self.num_documents, self.num_terms
        );

        let _ = writeln!(
            out,
            "1. Top {} Terms with Highest Document Frequency\n{light}",
            self.highest.len()
        );
        for (i, tf) in self.highest.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:2}. '{}' - appears in {} documents ({:.1}%)",
                i + 1,
                tf.term,
                tf.doc_freq,
                tf.percentage
            );
        }

        let _ = writeln!(
            out,
            "\n\n2. Top {} Terms with Lowest Document Frequency\n{light}",
            self.lowest.len()
        );
        for (i, tf) in self.lowest.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:2}. '{}' - appears in {} document(s)",
                i + 1,
                tf.term,
                tf.doc_freq
            );
        }

        let _ = writeln!(out, "\n\n3. Characteristics Comparison\n{light}");
        if !self.highest.is_empty() {
            let total: f64 = self.highest.iter().map(|t| t.percentage).sum();
            let avg = total / self.highest.len() as f64;
            let _ = writeln!(out, "HIGH FREQUENCY TERMS: on average in {avg:.1}% of documents");
            let _ = writeln!(out, "- Too common to discriminate between documents");
        }
        if !self.lowest.is_empty() {
            let singletons = self.lowest.iter().filter(|t| t.doc_freq == 1).count();
            let _ = writeln!(
                out,
                "LOW FREQUENCY TERMS: {} of {} occur in a single document",
                singletons,
                self.lowest.len()
            );
            let _ = writeln!(out, "- Highly discriminative, useful only for precise lookups");
        }

        let _ = writeln!(
            out,
            "\n\n4. Terms with Similar Frequencies Appearing in Same Documents\n{light}"
        );
        match &self.similar_pair {
            Some(pair) => {
                for (n, tf) in [(1, &pair.first), (2, &pair.second)] {
                    let _ = writeln!(
                        out,
                        "TERM {n}: '{}'\n  Document Frequency: {} documents\n",
                        tf.term, tf.doc_freq
                    );
                }
                let _ = writeln!(
                    out,
                    "SHARED DOCUMENTS: {} documents (both terms appear together)",
                    pair.shared.len()
                );
                let _ = writeln!(out, "  Overlap percentage: {:.1}%\n", pair.overlap_percentage());
                let _ = writeln!(out, "First {} shared document IDs:", self.shared_sample.len());
                for (docno, id) in &self.shared_sample {
                    let _ = writeln!(out, "  - {docno} (ID: {id})");
                }
                let _ = writeln!(
                    out,
                    "\nSearched terms in {}-{} documents, frequencies within {:.0}%, \
                     overlap at least {:.0}%, window {}",
                    cfg.min_doc_freq,
                    cfg.max_doc_freq,
                    cfg.freq_tolerance * 100.0,
                    cfg.min_overlap * 100.0,
                    cfg.window
                );
            }
            None => {
                let _ = writeln!(out, "No suitable term pair found.");
            }
        }

        let _ = writeln!(out, "\n{heavy}");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::RawDocument;

    fn index_of(texts: &[&str]) -> InvertedIndex {
        InvertedIndex::from_documents(texts.iter().enumerate().map(|(i, t)| RawDocument {
            docno: Some(format!("D{}", i + 1)),
            text: Some(t.to_string()),
        }))
    }

    #[test]
    fn ties_break_by_term() {
        let idx = index_of(&["b a c", "b a", "z"]);
        let stats = CollectionStatistics::new(&idx);
        let top: Vec<_> = stats.highest(2).into_iter().map(|t| t.term).collect();
        assert_eq!(top, vec!["a", "b"]);
        let bottom: Vec<_> = stats.lowest(2).into_iter().map(|t| t.term).collect();
        assert_eq!(bottom, vec!["c", "z"]);
    }

    #[test]
    fn percentage_is_of_collection() {
        let idx = index_of(&["a", "a b", "c", "d"]);
        let top = CollectionStatistics::new(&idx).highest(1);
        assert_eq!(top[0].doc_freq, 2);
        assert!((top[0].percentage - 50.0).abs() < 1e-9);
    }
}
