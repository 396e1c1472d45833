//! Result tables
//!
//! Counts and concordance lines are kept in the order they were recorded, so
//! identical inputs always export identical tables.

use crate::concordance::ConcordanceLine;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// One row of the counts table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceCount {
    pub list: String,
    pub expression: String,
    pub count: usize,
}

/// Counts table plus concordance table
#[derive(Debug, Clone, Default)]
pub struct ResultTables {
    counts: Vec<OccurrenceCount>,
    concordance: Vec<ConcordanceLine>,
    /// (list, expression) pairs already in `counts`
    recorded: FxHashSet<(String, String)>,
}

impl ResultTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the count for an expression. Returns `false` and leaves the
    /// table unchanged if the pair was already recorded.
    pub fn record_count(&mut self, list: &str, expression: &str, count: usize) -> bool {
        if !self
            .recorded
            .insert((list.to_string(), expression.to_string()))
        {
            return false;
        }
        self.counts.push(OccurrenceCount {
            list: list.to_string(),
            expression: expression.to_string(),
            count,
        });
        true
    }

    /// Append a concordance line
    pub fn push_line(&mut self, line: ConcordanceLine) {
        self.concordance.push(line);
    }

    pub fn counts(&self) -> &[OccurrenceCount] {
        &self.counts
    }

    pub fn concordance(&self) -> &[ConcordanceLine] {
        &self.concordance
    }

    /// Concordance lines of one expression, in discovery order
    pub fn lines_for<'a>(
        &'a self,
        list: &'a str,
        expression: &'a str,
    ) -> impl Iterator<Item = &'a ConcordanceLine> + 'a {
        self.concordance
            .iter()
            .filter(move |line| line.list == list && line.expression == expression)
    }
}
