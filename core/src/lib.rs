pub mod collection;
pub mod error;
pub mod index;
pub mod query;
pub mod stats;
pub mod tokenizer;

pub use collection::RawDocument;
pub use error::CollectionError;
pub use index::{IndexBuilder, InvertedIndex};
pub use query::BooleanRetrieval;
pub use stats::CollectionStatistics;

/// Dense document identifier, assigned from 1 in collection order.
pub type DocId = u32;
