//! Corpus document discovery and loading
//!
//! Inputs may be single files, directories (all supported files directly
//! inside them) or glob patterns. Paths are sorted so the corpus is always
//! assembled in the same order. Each document is parsed completely before it
//! is added; a document that fails to parse is reported and left out.

use crate::conllu::{self, ParseError};
use crate::corpus::{Corpus, CorpusBuilder, Token};
use crate::tei::{self, XmlError};
use flate2::read::MultiGzDecoder;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error while reading one corpus document
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Conllu(#[from] ParseError),

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("Unsupported corpus format: {}", .0.display())]
    Unsupported(PathBuf),
}

/// Annotated document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    /// `.conllu` / `.conll`
    Conllu,
    /// TEI / TXM `.xml`
    Tei,
}

impl CorpusFormat {
    /// Detect the format from the file name, looking through a `.gz` suffix
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        if name.ends_with(".conllu") || name.ends_with(".conll") {
            Some(Self::Conllu)
        } else if name.ends_with(".xml") {
            Some(Self::Tei)
        } else {
            None
        }
    }
}

/// Open a file for buffered reading, decompressing `.gz` files
pub fn open_text(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let is_gz = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    if is_gz {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read every token of one document
pub fn read_document(path: &Path) -> Result<Vec<Token>, IngestError> {
    let format = CorpusFormat::detect(path)
        .ok_or_else(|| IngestError::Unsupported(path.to_path_buf()))?;
    let mut reader = open_text(path)?;

    match format {
        CorpusFormat::Conllu => Ok(conllu::read_tokens(reader)?),
        CorpusFormat::Tei => {
            let mut xml = String::new();
            reader.read_to_string(&mut xml)?;
            Ok(tei::parse_words(&xml)?)
        }
    }
}

/// Ordered set of corpus documents
#[derive(Debug, Clone, Default)]
pub struct CorpusSources {
    paths: Vec<PathBuf>,
}

/// Outcome of loading a set of documents
#[derive(Debug)]
pub struct LoadReport {
    pub corpus: Corpus,
    /// Documents left out, with the reason
    pub skipped: Vec<(PathBuf, IngestError)>,
}

impl CorpusSources {
    /// Use explicit file paths, in the order given
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Create from a glob pattern
    ///
    /// Files are processed in sorted order for deterministic results.
    pub fn from_glob(pattern: &str) -> Result<Self, glob::PatternError> {
        let mut paths: Vec<PathBuf> = glob::glob(pattern)?.filter_map(Result::ok).collect();
        paths.sort();
        Ok(Self::from_paths(paths))
    }

    /// Resolve command-line style inputs.
    ///
    /// Globs and directories expand to their supported files in sorted
    /// order; plain files are kept as given (unsupported ones are reported
    /// when loading).
    pub fn resolve<S: AsRef<str>>(inputs: &[S]) -> Result<Self, glob::PatternError> {
        let mut paths = Vec::new();

        for input in inputs {
            let input = input.as_ref();
            let path = Path::new(input);

            if path.is_dir() {
                let pattern = format!(
                    "{}/*",
                    glob::Pattern::escape(&path.to_string_lossy()).trim_end_matches('/')
                );
                paths.extend(
                    Self::from_glob(&pattern)?
                        .paths
                        .into_iter()
                        .filter(|p| p.is_file() && CorpusFormat::detect(p).is_some()),
                );
            } else if input.contains(['*', '?', '[']) {
                paths.extend(
                    Self::from_glob(input)?
                        .paths
                        .into_iter()
                        .filter(|p| p.is_file() && CorpusFormat::detect(p).is_some()),
                );
            } else {
                paths.push(path.to_path_buf());
            }
        }

        Ok(Self::from_paths(paths))
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Read every document and concatenate the ones that parse
    pub fn load(&self) -> LoadReport {
        let mut builder = CorpusBuilder::new();
        let mut skipped = Vec::new();

        for path in &self.paths {
            match read_document(path) {
                Ok(tokens) => {
                    let added = builder.add_document(tokens);
                    info!("Loaded {} tokens from {}", added, path.display());
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    skipped.push((path.clone(), e));
                }
            }
        }

        let corpus = builder.build();
        info!(
            "Corpus: {} tokens from {} documents ({} skipped)",
            corpus.len(),
            corpus.document_count(),
            skipped.len()
        );
        LoadReport { corpus, skipped }
    }
}
