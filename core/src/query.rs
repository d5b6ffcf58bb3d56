//! Postfix Boolean query evaluation over sorted posting lists.
//!
//! Queries are written in Reverse Polish notation: `iran israel AND` means
//! `AND(iran, israel)`. Operators are binary; `NOT` is "left but not right".

use crate::error::CollectionError;
use crate::index::InvertedIndex;
use crate::tokenizer::query_tokens;
use crate::DocId;
use std::fs;
use std::path::Path;

/// Which categories of a two-list merge end up in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeFlags {
    pub keep_both: bool,
    pub keep_left_only: bool,
    pub keep_right_only: bool,
}

impl MergeFlags {
    pub const AND: MergeFlags = MergeFlags {
        keep_both: true,
        keep_left_only: false,
        keep_right_only: false,
    };
    pub const OR: MergeFlags = MergeFlags {
        keep_both: true,
        keep_left_only: true,
        keep_right_only: true,
    };
    pub const NOT: MergeFlags = MergeFlags {
        keep_both: false,
        keep_left_only: true,
        keep_right_only: false,
    };
}

/// Two-pointer merge of two ascending, duplicate-free lists.
///
/// The remainder of whichever list outlives the other is kept only when its "only" flag is set,
/// so the output stays ascending and duplicate-free.
pub fn merge(left: &[DocId], right: &[DocId], flags: MergeFlags) -> Vec<DocId> {
    let mut result = Vec::with_capacity(match (flags.keep_left_only, flags.keep_right_only) {
        (true, true) => left.len() + right.len(),
        (true, false) => left.len(),
        _ => left.len().min(right.len()),
    });
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        let (l, r) = (left[i], right[j]);
        if l == r {
            if flags.keep_both {
                result.push(l);
            }
            i += 1;
            j += 1;
        } else if l < r {
            if flags.keep_left_only {
                result.push(l);
            }
            i += 1;
        } else {
            if flags.keep_right_only {
                result.push(r);
            }
            j += 1;
        }
    }

    if flags.keep_left_only {
        result.extend_from_slice(&left[i..]);
    }
    if flags.keep_right_only {
        result.extend_from_slice(&right[j..]);
    }
    result
}

pub fn intersect(left: &[DocId], right: &[DocId]) -> Vec<DocId> {
    merge(left, right, MergeFlags::AND)
}

pub fn union(left: &[DocId], right: &[DocId]) -> Vec<DocId> {
    merge(left, right, MergeFlags::OR)
}

pub fn difference(left: &[DocId], right: &[DocId]) -> Vec<DocId> {
    merge(left, right, MergeFlags::NOT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    /// Recognize a lowercased query token as an operator.
    pub fn parse(token: &str) -> Option<Operator> {
        match token {
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            "not" => Some(Operator::Not),
            _ => None,
        }
    }

    pub fn flags(self) -> MergeFlags {
        match self {
            Operator::And => MergeFlags::AND,
            Operator::Or => MergeFlags::OR,
            Operator::Not => MergeFlags::NOT,
        }
    }

    pub fn apply(self, left: &[DocId], right: &[DocId]) -> Vec<DocId> {
        merge(left, right, self.flags())
    }
}

/// Counts reported after processing a query file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub queries: usize,
    pub matches: usize,
}

/// Evaluates postfix Boolean queries against a borrowed index.
#[derive(Debug, Clone, Copy)]
pub struct BooleanRetrieval<'a> {
    index: &'a InvertedIndex,
}

impl<'a> BooleanRetrieval<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Evaluate a postfix query and return matching IDs in ascending order.
    ///
    /// Unknown terms evaluate to the empty list. An operator that finds fewer than two operands
    /// on the stack does nothing. The result is whatever is on top of the stack at the end.
    pub fn execute(&self, query: &str) -> Vec<DocId> {
        let mut stack: Vec<Vec<DocId>> = Vec::new();

        for token in query_tokens(query) {
            match Operator::parse(&token) {
                Some(op) => {
                    if stack.len() < 2 {
                        tracing::debug!(?op, depth = stack.len(), "operator underflow, ignored");
                        continue;
                    }
                    let right = stack.pop().unwrap_or_default();
                    let left = stack.pop().unwrap_or_default();
                    stack.push(op.apply(&left, &right));
                }
                None => stack.push(self.index.postings(&token).to_vec()),
            }
        }

        stack.pop().unwrap_or_default()
    }

    /// Map internal IDs to DOCNOs, dropping unknown IDs and empty DOCNOs.
    pub fn to_docnos(&self, doc_ids: &[DocId]) -> Vec<&'a str> {
        doc_ids
            .iter()
            .filter_map(|&id| self.index.docno(id))
            .filter(|docno| !docno.is_empty())
            .collect()
    }

    /// Every document ID in the collection, ascending.
    pub fn all_docs(&self) -> Vec<DocId> {
        (1..=self.index.num_documents() as DocId).collect()
    }

    /// Run every non-blank line of `queries` and write one line of space-separated DOCNOs per
    /// query to `output`.
    ///
    /// The query file is read in full before `output` is created, so a missing query file leaves
    /// no output behind.
    pub fn process_query_file(
        &self,
        queries: &Path,
        output: &Path,
    ) -> Result<BatchSummary, CollectionError> {
        if !queries.exists() {
            return Err(CollectionError::NotFound { path: queries.to_path_buf() });
        }
        let text = fs::read_to_string(queries).map_err(|e| CollectionError::io(queries, e))?;

        let mut summary = BatchSummary::default();
        let mut out = String::new();
        for query in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let doc_ids = self.execute(query);
            summary.queries += 1;
            summary.matches += doc_ids.len();
            out.push_str(&self.to_docnos(&doc_ids).join(" "));
            out.push('\n');
        }

        fs::write(output, out).map_err(|e| CollectionError::io(output, e))?;
        tracing::info!(
            queries = summary.queries,
            matches = summary.matches,
            output = %output.display(),
            "wrote query results"
        );
        Ok(summary)
    }
}
