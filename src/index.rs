//! Inverted lemma index for exact lookups
//!
//! Built once from the corpus and shared by reference with every query, so
//! single-word frequencies are table lookups rather than corpus scans.

use crate::corpus::{Corpus, Sym};
use rustc_hash::FxHashMap;

/// Positions of every lemma in the corpus
#[derive(Debug)]
pub struct LemmaIndex<'a> {
    corpus: &'a Corpus,
    by_lemma: FxHashMap<Sym, Vec<usize>>,
}

impl<'a> LemmaIndex<'a> {
    /// Build an index over the whole corpus
    pub fn build(corpus: &'a Corpus) -> Self {
        let mut by_lemma: FxHashMap<Sym, Vec<usize>> = FxHashMap::default();
        for (i, &lemma) in corpus.lemma_syms().iter().enumerate() {
            by_lemma.entry(lemma).or_default().push(i);
        }

        Self { corpus, by_lemma }
    }

    pub fn corpus(&self) -> &'a Corpus {
        self.corpus
    }

    /// Ascending positions whose lemma equals `lemma`
    pub fn get_by_lemma(&self, lemma: &str) -> &[usize] {
        self.corpus
            .lookup(lemma)
            .and_then(|sym| self.by_lemma.get(&sym))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Exact frequency of a lemma
    pub fn frequency(&self, lemma: &str) -> usize {
        self.get_by_lemma(lemma).len()
    }
}
