//! Corpus store: aligned lemma, POS and surface sequences
//!
//! Documents are appended whole and concatenated in load order; document
//! boundaries are not kept. Lemmas and POS tags are interned so that window
//! scans compare symbols instead of strings.

use lasso::{Rodeo, RodeoReader, Spur};
use std::fmt;

/// POS sentinel for tokens the annotator left untagged
pub const UNKNOWN_POS: &str = "UNK";

/// Interned lemma or POS symbol
pub type Sym = Spur;

/// One annotated token as produced by an ingestion step or an annotator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub pos: String,
    pub lemma: String,
}

impl Token {
    /// Create a token with all three annotations present
    pub fn new(surface: &str, pos: &str, lemma: &str) -> Self {
        Self {
            surface: surface.to_string(),
            pos: pos.to_string(),
            lemma: lemma.to_string(),
        }
    }

    /// Build a token from possibly missing annotations.
    ///
    /// The lemma falls back to the surface form, the surface form falls back
    /// to the lemma, and the POS tag is reduced to its main category (or
    /// [`UNKNOWN_POS`]). Returns `None` when there is neither a lemma nor a
    /// surface form.
    pub fn from_parts(
        surface: Option<&str>,
        pos: Option<&str>,
        lemma: Option<&str>,
    ) -> Option<Self> {
        let surface = surface.map(str::trim).filter(|s| !s.is_empty());
        let lemma = lemma.map(str::trim).filter(|s| !s.is_empty()).or(surface)?;
        let pos = pos
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(main_pos)
            .unwrap_or(UNKNOWN_POS);

        Some(Self::new(surface.unwrap_or(lemma), pos, lemma))
    }
}

/// Reduce a detailed tag such as `VER:pres` to its main category (`VER`)
pub fn main_pos(tag: &str) -> &str {
    match tag.split_once(':') {
        Some((main, _)) if !main.is_empty() => main,
        Some(_) => UNKNOWN_POS,
        None => tag,
    }
}

/// Accumulates documents before the corpus is frozen
#[derive(Default)]
pub struct CorpusBuilder {
    interner: Rodeo,
    lemmas: Vec<Sym>,
    pos: Vec<Sym>,
    surface: Vec<String>,
    documents: usize,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fully parsed document. Returns the number of tokens added.
    pub fn add_document(&mut self, tokens: Vec<Token>) -> usize {
        let added = tokens.len();
        self.lemmas.reserve(added);
        self.pos.reserve(added);
        self.surface.reserve(added);

        for token in tokens {
            self.lemmas.push(self.interner.get_or_intern(&token.lemma));
            self.pos.push(self.interner.get_or_intern(&token.pos));
            self.surface.push(token.surface);
        }

        self.documents += 1;
        added
    }

    /// Number of tokens accumulated so far
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// Freeze into an immutable corpus
    pub fn build(self) -> Corpus {
        Corpus {
            interner: self.interner.into_reader(),
            lemmas: self.lemmas,
            pos: self.pos,
            surface: self.surface,
            documents: self.documents,
        }
    }
}

/// The whole corpus as three parallel sequences in document order
pub struct Corpus {
    interner: RodeoReader,
    lemmas: Vec<Sym>,
    pos: Vec<Sym>,
    surface: Vec<String>,
    documents: usize,
}

impl Corpus {
    /// Build a single-document corpus from tokens
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut builder = CorpusBuilder::new();
        builder.add_document(tokens);
        builder.build()
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// Number of documents that contributed tokens (or were empty but valid)
    pub fn document_count(&self) -> usize {
        self.documents
    }

    pub fn lemma(&self, i: usize) -> &str {
        self.interner.resolve(&self.lemmas[i])
    }

    pub fn pos(&self, i: usize) -> &str {
        self.interner.resolve(&self.pos[i])
    }

    pub fn surface(&self, i: usize) -> &str {
        &self.surface[i]
    }

    pub fn lemma_syms(&self) -> &[Sym] {
        &self.lemmas
    }

    pub fn pos_syms(&self) -> &[Sym] {
        &self.pos
    }

    pub fn surfaces(&self) -> &[String] {
        &self.surface
    }

    /// Symbol for a lemma or POS string, if it occurs anywhere in the corpus
    pub fn lookup(&self, text: &str) -> Option<Sym> {
        self.interner.get(text)
    }

    pub fn resolve(&self, sym: Sym) -> &str {
        self.interner.resolve(&sym)
    }

    /// All lemmas in corpus order
    pub fn lemmas(&self) -> impl Iterator<Item = &str> + '_ {
        self.lemmas.iter().map(|sym| self.interner.resolve(sym))
    }

    /// All POS tags in corpus order
    pub fn pos_tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.pos.iter().map(|sym| self.interner.resolve(sym))
    }
}

impl fmt::Debug for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Corpus")
            .field("tokens", &self.len())
            .field("documents", &self.documents)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Corpus whose lemmas are the given words, with surface forms upper-cased
    pub(crate) fn corpus_of(words: &[&str]) -> Corpus {
        Corpus::from_tokens(
            words
                .iter()
                .map(|w| Token::new(&w.to_uppercase(), "NOM", w))
                .collect(),
        )
    }

    #[test]
    fn test_corpus_creation() {
        let corpus = Corpus::from_tokens(vec![
            Token::new("chiens", "NOM", "chien"),
            Token::new("courent", "VER", "courir"),
        ]);

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.document_count(), 1);
        assert_eq!(corpus.lemma(0), "chien");
        assert_eq!(corpus.pos(1), "VER");
        assert_eq!(corpus.surface(1), "courent");
    }

    #[test]
    fn test_documents_are_concatenated() {
        let mut builder = CorpusBuilder::new();
        builder.add_document(vec![Token::new("a", "DET", "a")]);
        builder.add_document(vec![]);
        builder.add_document(vec![Token::new("b", "NOM", "b"), Token::new("c", "NOM", "c")]);
        let corpus = builder.build();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.document_count(), 3);
        assert_eq!(corpus.lemmas().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(corpus.lemma_syms().len(), corpus.pos_syms().len());
        assert_eq!(corpus.surfaces().len(), corpus.len());
    }

    #[test]
    fn test_interned_symbols_shared() {
        let corpus = corpus_of(&["rose", "rose", "lys"]);
        let syms = corpus.lemma_syms();

        assert_eq!(syms[0], syms[1]);
        assert_ne!(syms[0], syms[2]);
        assert_eq!(corpus.lookup("rose"), Some(syms[0]));
        assert_eq!(corpus.lookup("tulipe"), None);
        assert_eq!(corpus.resolve(syms[2]), "lys");
    }

    #[test]
    fn test_token_fallbacks() {
        let t = Token::from_parts(Some("marchait"), Some("VER:impf"), None).unwrap();
        assert_eq!(t.lemma, "marchait");
        assert_eq!(t.pos, "VER");

        let t = Token::from_parts(None, None, Some("marcher")).unwrap();
        assert_eq!(t.surface, "marcher");
        assert_eq!(t.pos, UNKNOWN_POS);

        assert!(Token::from_parts(Some("  "), Some("NOM"), None).is_none());
    }

    #[test]
    fn test_main_pos() {
        assert_eq!(main_pos("VER:pres"), "VER");
        assert_eq!(main_pos("NOM"), "NOM");
        assert_eq!(main_pos(":x"), UNKNOWN_POS);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = CorpusBuilder::new().build();
        assert!(corpus.is_empty());
        assert_eq!(corpus.document_count(), 0);
        assert_eq!(corpus.lookup("anything"), None);
    }
}
