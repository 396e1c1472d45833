//! Descriptive corpus statistics
//!
//! Read-only views over the corpus used for reporting: POS frequencies,
//! per-POS lemma distributions and the "meaningful" lemma filter. Nothing
//! here feeds back into counting or concordance extraction.

use crate::config::SearchConfig;
use crate::corpus::{Corpus, Sym};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Number of lemmas shown at each end of a distribution
pub const SUMMARY_LEMMAS: usize = 5;

/// Membership filter on POS categories
#[derive(Debug, Clone, Default)]
pub struct PosFilter {
    allowed: FxHashSet<String>,
}

impl PosFilter {
    pub fn new<S: AsRef<str>>(allowed: &[S]) -> Self {
        Self {
            allowed: allowed.iter().map(|p| p.as_ref().to_string()).collect(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(&config.meaningful_pos)
    }

    pub fn allows(&self, pos: &str) -> bool {
        self.allowed.contains(pos)
    }

    /// Lemmas whose POS is in the allow-set, in corpus order
    pub fn classify<'c>(&self, corpus: &'c Corpus) -> Vec<&'c str> {
        corpus
            .pos_tags()
            .zip(corpus.lemmas())
            .filter(|(pos, _)| self.allows(pos))
            .map(|(_, lemma)| lemma)
            .collect()
    }
}

/// Lemma frequencies for one POS category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosBreakdown {
    pub pos: String,
    pub total_tokens: usize,
    /// Most frequent first; ties keep first-appearance order
    pub distribution: Vec<(String, usize)>,
}

impl PosBreakdown {
    pub fn unique_lemmas(&self) -> usize {
        self.distribution.len()
    }

    pub fn most_common(&self, n: usize) -> &[(String, usize)] {
        &self.distribution[..n.min(self.distribution.len())]
    }

    pub fn least_common(&self, n: usize) -> &[(String, usize)] {
        &self.distribution[self.distribution.len().saturating_sub(n)..]
    }

    /// Sorted, deduplicated lemmas carrying this POS
    pub fn word_list(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.distribution.iter().map(|(l, _)| l.as_str()).collect();
        words.sort_unstable();
        words
    }
}

/// One row of the POS summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosSummaryRow {
    pub pos: String,
    pub total_tokens: usize,
    pub unique_lemmas: usize,
    pub top_5: String,
    pub last_5: String,
}

#[derive(Debug, Clone, Default)]
pub struct CorpusStatistics {
    pos_counts: Vec<(String, usize)>,
    breakdowns: Vec<PosBreakdown>,
}

impl CorpusStatistics {
    pub fn compute(corpus: &Corpus) -> Self {
        // per POS in first-appearance order: lemma -> slot, (lemma, freq) by slot
        let mut pos_slots: FxHashMap<Sym, usize> = FxHashMap::default();
        let mut per_pos: Vec<(Sym, FxHashMap<Sym, usize>, Vec<(Sym, usize)>)> = Vec::new();

        for (&pos, &lemma) in corpus.pos_syms().iter().zip(corpus.lemma_syms()) {
            let next = per_pos.len();
            let slot = *pos_slots.entry(pos).or_insert(next);
            if slot == next {
                per_pos.push((pos, FxHashMap::default(), Vec::new()));
            }

            let (_, lemma_slots, freqs) = &mut per_pos[slot];
            let next = freqs.len();
            let lemma_slot = *lemma_slots.entry(lemma).or_insert(next);
            if lemma_slot == next {
                freqs.push((lemma, 0));
            }
            freqs[lemma_slot].1 += 1;
        }

        let breakdowns: Vec<PosBreakdown> = per_pos
            .into_iter()
            .map(|(pos, _, mut freqs)| {
                // stable: ties stay in first-appearance order
                freqs.sort_by(|a, b| b.1.cmp(&a.1));
                PosBreakdown {
                    pos: corpus.resolve(pos).to_string(),
                    total_tokens: freqs.iter().map(|(_, n)| n).sum(),
                    distribution: freqs
                        .into_iter()
                        .map(|(lemma, n)| (corpus.resolve(lemma).to_string(), n))
                        .collect(),
                }
            })
            .collect();

        let mut pos_counts: Vec<(String, usize)> = breakdowns
            .iter()
            .map(|b| (b.pos.clone(), b.total_tokens))
            .collect();
        pos_counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            pos_counts,
            breakdowns,
        }
    }

    /// POS tags by descending frequency
    pub fn pos_counts(&self) -> &[(String, usize)] {
        &self.pos_counts
    }

    /// Breakdowns in order of first appearance in the corpus
    pub fn breakdowns(&self) -> &[PosBreakdown] {
        &self.breakdowns
    }

    pub fn breakdown(&self, pos: &str) -> Option<&PosBreakdown> {
        self.breakdowns.iter().find(|b| b.pos == pos)
    }

    pub fn summary_rows(&self) -> Vec<PosSummaryRow> {
        self.breakdowns
            .iter()
            .map(|b| PosSummaryRow {
                pos: b.pos.clone(),
                total_tokens: b.total_tokens,
                unique_lemmas: b.unique_lemmas(),
                top_5: format_frequencies(b.most_common(SUMMARY_LEMMAS)),
                last_5: format_frequencies(b.least_common(SUMMARY_LEMMAS)),
            })
            .collect()
    }
}

/// `lemma(freq), lemma(freq), ...`
pub fn format_frequencies(freqs: &[(String, usize)]) -> String {
    freqs
        .iter()
        .map(|(lemma, n)| format!("{lemma}({n})"))
        .collect::<Vec<_>>()
        .join(", ")
}
