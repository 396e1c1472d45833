//! Search parameters

/// Default half-width of the multi-word matching window
pub const DEFAULT_WINDOW: usize = 3;

/// Default half-width of the concordance context
pub const DEFAULT_CONTEXT: usize = 20;

/// POS categories kept by the descriptive "meaningful lemma" filter:
/// nouns, proper nouns, verbs, adjectives, adverbs and interjections
pub const DEFAULT_MEANINGFUL_POS: &[&str] = &["NOM", "NAM", "VER", "ADJ", "ADV", "INT"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Radius `W` of the multi-word window
    pub window: usize,
    /// Radius `K` of the concordance context
    pub context: usize,
    /// Categories for the descriptive POS filter; never used by the search
    pub meaningful_pos: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            context: DEFAULT_CONTEXT,
            meaningful_pos: DEFAULT_MEANINGFUL_POS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl SearchConfig {
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    pub fn with_meaningful_pos<S: AsRef<str>>(mut self, pos: &[S]) -> Self {
        self.meaningful_pos = pos.iter().map(|p| p.as_ref().to_string()).collect();
        self
    }
}
