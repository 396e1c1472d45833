//! Occurrence counting for reference expressions
//!
//! Single-word expressions are exact lemma lookups in the [`LemmaIndex`].
//! Multi-word expressions use the window rule: position `i` is counted when
//! every word of the expression occurs somewhere in the lemmas at
//! `[i - W, i + W]` (clipped to the corpus). Word order is ignored, and one
//! token can satisfy a word that is repeated in the expression.
//!
//! A phrase occurrence is therefore usually counted once for each nearby
//! position whose window covers it. Multi-word counts are window counts, not
//! phrase counts.

use crate::corpus::Sym;
use crate::index::LemmaIndex;
use crate::wordlist::{ExpressionKind, ReferenceExpression};
use rustc_hash::FxHashMap;
use std::ops::Range;

/// Half-open index range of the window of radius `radius` around `position`
/// in a corpus of `len` tokens.
///
/// Away from the edges the window holds `2 * radius + 1` positions; near the
/// edges it is clipped.
pub fn window_range(position: usize, len: usize, radius: usize) -> Range<usize> {
    let start = position.saturating_sub(radius).min(len);
    let end = position.saturating_add(radius).saturating_add(1).min(len);
    start..end
}

/// Counts and locates expressions over a prebuilt index
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceCounter<'i, 'c> {
    index: &'i LemmaIndex<'c>,
    window: usize,
}

impl<'i, 'c> OccurrenceCounter<'i, 'c> {
    pub fn new(index: &'i LemmaIndex<'c>, window: usize) -> Self {
        Self { index, window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of positions matching the expression
    pub fn count(&self, expression: &ReferenceExpression) -> usize {
        match expression.kind() {
            ExpressionKind::Single => self.index.frequency(expression.text()),
            ExpressionKind::Multi => self.positions(expression).len(),
        }
    }

    /// Ascending positions matching the expression. For multi-word
    /// expressions these are the window anchors.
    pub fn positions(&self, expression: &ReferenceExpression) -> Vec<usize> {
        match expression.kind() {
            ExpressionKind::Single => self.index.get_by_lemma(expression.text()).to_vec(),
            ExpressionKind::Multi => {
                let corpus = self.index.corpus();
                let mut required = Vec::with_capacity(expression.word_count());
                for word in expression.words() {
                    match corpus.lookup(word) {
                        Some(sym) => required.push(sym),
                        // a word absent from the corpus can never be in a window
                        None => return Vec::new(),
                    }
                }
                window_anchors(corpus.lemma_syms(), &required, self.window)
            }
        }
    }
}

/// Positions whose window contains every required symbol.
///
/// Slides the window one position at a time and keeps, per distinct
/// required symbol, how many window tokens carry it. Equivalent to testing
/// each window from scratch.
pub fn window_anchors(lemmas: &[Sym], required: &[Sym], radius: usize) -> Vec<usize> {
    let len = lemmas.len();
    if len == 0 || required.is_empty() {
        return Vec::new();
    }

    let mut slots: FxHashMap<Sym, usize> = FxHashMap::default();
    for &sym in required {
        let next = slots.len();
        slots.entry(sym).or_insert(next);
    }

    let mut in_window = vec![0usize; slots.len()];
    let mut satisfied = 0;
    let mut anchors = Vec::new();

    // current window is lemmas[lo..hi]
    let mut lo = 0;
    let mut hi = 0;

    for i in 0..len {
        let Range { start, end } = window_range(i, len, radius);

        while hi < end {
            if let Some(&slot) = slots.get(&lemmas[hi]) {
                if in_window[slot] == 0 {
                    satisfied += 1;
                }
                in_window[slot] += 1;
            }
            hi += 1;
        }

        while lo < start {
            if let Some(&slot) = slots.get(&lemmas[lo]) {
                in_window[slot] -= 1;
                if in_window[slot] == 0 {
                    satisfied -= 1;
                }
            }
            lo += 1;
        }

        if satisfied == in_window.len() {
            anchors.push(i);
        }
    }

    anchors
}
