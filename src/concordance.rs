//! Keyword-in-context lines
//!
//! The hit starts at the match position and spans as many surface tokens as
//! the expression has words. For multi-word expressions the match position is
//! the window anchor, so the hit text need not contain the matched words.

use crate::corpus::Corpus;
use crate::wordlist::ReferenceExpression;
use serde::Serialize;

/// One row of the concordance table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcordanceLine {
    pub list: String,
    pub expression: String,
    pub before: String,
    pub hit: String,
    pub after: String,
}

/// Before/hit/after text around a span of surface tokens
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Kwic {
    pub before: String,
    pub hit: String,
    pub after: String,
}

impl Kwic {
    /// Extract the span `[start, start + width)` with `radius` tokens of
    /// context on either side, all clipped to `surface`.
    pub fn extract(surface: &[String], start: usize, width: usize, radius: usize) -> Self {
        let len = surface.len();
        let hit_start = start.min(len);
        let hit_end = hit_start.saturating_add(width).min(len);
        let before_start = hit_start.saturating_sub(radius);
        let after_end = hit_end.saturating_add(radius).min(len);

        Self {
            before: surface[before_start..hit_start].join(" "),
            hit: surface[hit_start..hit_end].join(" "),
            after: surface[hit_end..after_end].join(" "),
        }
    }
}

/// Builds concordance lines from corpus surface forms
#[derive(Debug, Clone, Copy)]
pub struct ConcordanceBuilder<'c> {
    corpus: &'c Corpus,
    context: usize,
}

impl<'c> ConcordanceBuilder<'c> {
    pub fn new(corpus: &'c Corpus, context: usize) -> Self {
        Self { corpus, context }
    }

    /// Concordance line for `expression` matched at `position`
    pub fn build(
        &self,
        list: &str,
        expression: &ReferenceExpression,
        position: usize,
    ) -> ConcordanceLine {
        let Kwic { before, hit, after } = Kwic::extract(
            self.corpus.surfaces(),
            position,
            expression.word_count(),
            self.context,
        );

        ConcordanceLine {
            list: list.to_string(),
            expression: expression.text().to_string(),
            before,
            hit,
            after,
        }
    }
}
