use crate::collection::RawDocument;
use crate::tokenizer::tokenize;
use crate::DocId;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Term-level inverted index over a static collection.
///
/// Every posting list is sorted ascending with no duplicates and only holds IDs in
/// `1..=num_documents`. The index is immutable once built.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<DocId>>,
    /// Slot `i` holds the DOCNO of document `i + 1`.
    doc_id_to_docno: Vec<String>,
    docno_to_doc_id: HashMap<String, DocId>,
}

impl InvertedIndex {
    pub fn from_documents<I>(docs: I) -> Self
    where
        I: IntoIterator<Item = RawDocument>,
    {
        let mut builder = IndexBuilder::new();
        for doc in docs {
            builder.add_document(doc.docno.as_deref(), doc.text.as_deref());
        }
        builder.finish()
    }

    /// Posting list for a normalized term; unknown terms give an empty slice.
    pub fn postings(&self, term: &str) -> &[DocId] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn doc_freq(&self, term: &str) -> usize {
        self.postings(term).len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    pub fn num_documents(&self) -> usize {
        self.doc_id_to_docno.len()
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    /// Iterate `(term, posting list)` pairs in arbitrary order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }

    pub fn docno(&self, doc_id: DocId) -> Option<&str> {
        let slot = (doc_id as usize).checked_sub(1)?;
        self.doc_id_to_docno.get(slot).map(String::as_str)
    }

    /// Internal ID for a DOCNO. With duplicate DOCNOs this is the last document that used it.
    pub fn doc_id(&self, docno: &str) -> Option<DocId> {
        self.docno_to_doc_id.get(docno).copied()
    }

    /// Render a posting list as `'term' -> 1 (AP1) -> 2 (AP2)`.
    ///
    /// With `limit`, only the first `limit` entries are shown and a total is appended when the
    /// list was cut short.
    pub fn describe_term(&self, term: &str, limit: Option<usize>) -> String {
        let postings = self.postings(&term.to_lowercase());
        if postings.is_empty() {
            return format!("'{term}' -> (not found)");
        }
        let shown = limit.map_or(postings.len(), |n| n.min(postings.len()));
        let mut out = format!("'{term}'");
        for &doc_id in &postings[..shown] {
            let _ = write!(out, " -> {} ({})", doc_id, self.docno(doc_id).unwrap_or("?"));
        }
        if shown < postings.len() {
            let _ = write!(out, " -> ... ({} total docs)", postings.len());
        }
        out
    }
}

/// Accumulates documents in collection order and produces an [`InvertedIndex`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    postings: HashMap<String, Vec<DocId>>,
    doc_id_to_docno: Vec<String>,
    docno_to_doc_id: HashMap<String, DocId>,
    skipped: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next document. Returns the assigned ID, or `None` when the record has no DOCNO
    /// and was skipped.
    pub fn add_document(&mut self, docno: Option<&str>, text: Option<&str>) -> Option<DocId> {
        let Some(docno) = docno else {
            self.skipped += 1;
            tracing::debug!(skipped = self.skipped, "skipping record without DOCNO");
            return None;
        };

        let doc_id = self.doc_id_to_docno.len() as DocId + 1;
        self.doc_id_to_docno.push(docno.to_string());
        self.docno_to_doc_id.insert(docno.to_string(), doc_id);

        if let Some(text) = text {
            for term in tokenize(text) {
                self.postings.entry(term).or_default().push(doc_id);
            }
        }
        Some(doc_id)
    }

    pub fn finish(self) -> InvertedIndex {
        let mut postings = self.postings;
        for list in postings.values_mut() {
            list.sort_unstable();
            list.dedup();
        }
        tracing::info!(
            num_docs = self.doc_id_to_docno.len(),
            num_terms = postings.len(),
            skipped = self.skipped,
            "index build complete"
        );
        InvertedIndex {
            postings,
            doc_id_to_docno: self.doc_id_to_docno,
            docno_to_doc_id: self.docno_to_doc_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(docno: &str, text: &str) -> RawDocument {
        RawDocument { docno: Some(docno.to_string()), text: Some(text.to_string()) }
    }

    #[test]
    fn ids_start_at_one_in_order() {
        let idx = InvertedIndex::from_documents(vec![raw("A", "x y"), raw("B", "y z")]);
        assert_eq!(idx.num_documents(), 2);
        assert_eq!(idx.postings("x"), &[1]);
        assert_eq!(idx.postings("y"), &[1, 2]);
        assert_eq!(idx.postings("z"), &[2]);
        assert_eq!(idx.docno(1), Some("A"));
        assert_eq!(idx.doc_id("B"), Some(2));
        assert_eq!(idx.docno(0), None);
        assert_eq!(idx.docno(3), None);
    }

    #[test]
    fn describe_term_truncates() {
        let idx = InvertedIndex::from_documents(vec![raw("A", "w"), raw("B", "w"), raw("C", "w")]);
        assert_eq!(idx.describe_term("w", None), "'w' -> 1 (A) -> 2 (B) -> 3 (C)");
        assert_eq!(idx.describe_term("W", Some(2)), "'W' -> 1 (A) -> 2 (B) -> ... (3 total docs)");
        assert_eq!(idx.describe_term("nope", Some(2)), "'nope' -> (not found)");
    }
}
