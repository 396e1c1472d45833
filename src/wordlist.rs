//! Reference wordlists
//!
//! A wordlist is a plain-text file with one expression per line. Blank lines
//! are ignored and the list takes its name from the file stem. A missing or
//! unreadable file yields an empty list and a warning rather than an error.

use log::{debug, warn};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

/// Whether an expression is matched exactly or through the window rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    Single,
    Multi,
}

/// One line of a reference list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceExpression {
    text: String,
    words: Vec<String>,
}

impl ReferenceExpression {
    /// Parse an expression. Returns `None` if the line contains no words.
    pub fn parse(line: &str) -> Option<Self> {
        let text = line.trim();
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        if words.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            words,
        })
    }

    /// The expression as written (trimmed)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn kind(&self) -> ExpressionKind {
        if self.words.len() == 1 {
            ExpressionKind::Single
        } else {
            ExpressionKind::Multi
        }
    }
}

/// Named, ordered collection of expressions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceList {
    name: String,
    expressions: Vec<ReferenceExpression>,
}

impl ReferenceList {
    /// Create an empty list
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            expressions: Vec::new(),
        }
    }

    /// Build a list from raw lines, keeping the first occurrence of repeated
    /// expressions
    pub fn from_lines<'l>(name: &str, lines: impl IntoIterator<Item = &'l str>) -> Self {
        let mut list = Self::new(name);
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for line in lines {
            let Some(expression) = ReferenceExpression::parse(line) else {
                continue;
            };
            if seen.insert(expression.text.clone()) {
                list.expressions.push(expression);
            } else {
                debug!("{}: duplicate expression {:?} ignored", name, expression.text);
            }
        }

        list
    }

    /// Load a list from a file. Missing or unreadable files give an empty list.
    pub fn load(path: &Path) -> Self {
        let name = list_name(path);
        match fs::read_to_string(path) {
            Ok(text) => {
                let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
                Self::from_lines(&name, text.lines())
            }
            Err(e) => {
                warn!("Wordlist {} not loaded ({}); treating as empty", path.display(), e);
                Self::new(&name)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expressions(&self) -> &[ReferenceExpression] {
        &self.expressions
    }

    /// Single-word expressions in list order
    pub fn singles(&self) -> impl Iterator<Item = &ReferenceExpression> {
        self.expressions
            .iter()
            .filter(|e| e.kind() == ExpressionKind::Single)
    }

    /// Multi-word expressions in list order
    pub fn multis(&self) -> impl Iterator<Item = &ReferenceExpression> {
        self.expressions
            .iter()
            .filter(|e| e.kind() == ExpressionKind::Multi)
    }

    /// Expressions in search order: single words first, then multi-word
    pub fn search_order(&self) -> impl Iterator<Item = &ReferenceExpression> {
        self.singles().chain(self.multis())
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

/// List name for a wordlist path: the file name without its extension
pub fn list_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load several lists, preserving the order of `paths`
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Vec<ReferenceList> {
    paths.iter().map(|p| ReferenceList::load(p.as_ref())).collect()
}
