//! Lemmascan: reference wordlist search over lemmatized corpora
//!
//! Counts how often single lemmas and multi-word expressions from reference
//! wordlists occur in a POS-tagged, lemmatized corpus, and extracts a
//! keyword-in-context line for every occurrence.

// Corpus model and ingestion
pub mod conllu; // CoNLL-U file parsing
pub mod corpus; // Interned parallel lemma/POS/surface sequences
pub mod sources; // Document discovery and loading
pub mod tei; // TEI / TXM word extraction

// Search
pub mod concordance; // KWIC extraction
pub mod config;
pub mod counter; // Single-lemma and windowed multi-word counting
pub mod index; // Lemma and POS position indices
pub mod results; // Count and concordance tables
pub mod searcher; // Lists x expressions driver
pub mod wordlist; // Reference lists and expressions

// Reporting and preparation
pub mod annotator; // External TreeTagger lemmatization
pub mod export; // CSV/TSV tables and POS word lists
pub mod stats; // POS distributions and meaningful-lemma filter

// Re-exports for convenience
pub use config::SearchConfig;
pub use corpus::{Corpus, CorpusBuilder, Token};
pub use counter::OccurrenceCounter;
pub use index::LemmaIndex;
pub use results::{OccurrenceCount, ResultTables};
pub use searcher::{search_lists, search_with_index};
pub use sources::{CorpusSources, IngestError};
pub use stats::{CorpusStatistics, PosFilter};
pub use wordlist::{ReferenceExpression, ReferenceList};
