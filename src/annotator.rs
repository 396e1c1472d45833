//! External POS tagging
//!
//! An [`Annotator`] turns raw text into annotated tokens. It is only used to
//! prepare data (for example lemmatizing a wordlist so its entries match
//! corpus lemmas); the search itself never calls it.

use crate::corpus::{Token, UNKNOWN_POS};
use crate::wordlist::list_name;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use thiserror::Error;

/// Lemma TreeTagger prints for words missing from its lexicon
pub const UNKNOWN_LEMMA: &str = "<unknown>";

/// French elided clitic (`l'`, `qu'`, `jusqu'`...), a word with inner
/// hyphens or apostrophes, or a single punctuation mark
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:jusqu|lorsqu|puisqu|quoiqu|qu|[cdjlmnst])['’]",
        r"|[\p{L}\p{N}]+(?:[-'’][\p{L}\p{N}]+)*",
        r"|\S",
    ))
    .unwrap()
});

#[derive(Debug, Error)]
pub enum AnnotatorError {
    #[error("Failed to run tagger {}: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Tagger exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Tags raw text
pub trait Annotator {
    fn tag(&mut self, text: &str) -> Result<Vec<Token>, AnnotatorError>;
}

/// TreeTagger run as an external process
#[derive(Debug, Clone)]
pub struct TreeTagger {
    binary: PathBuf,
    params: PathBuf,
}

impl TreeTagger {
    /// `binary` is the `tree-tagger` executable, `params` the language
    /// parameter file (e.g. `french.par`)
    pub fn new(binary: impl Into<PathBuf>, params: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            params: params.into(),
        }
    }
}

impl Annotator for TreeTagger {
    fn tag(&mut self, text: &str) -> Result<Vec<Token>, AnnotatorError> {
        let words = tokenize(text);
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let mut command = Command::new(&self.binary);
        command.args(["-token", "-lemma", "-sgml"]).arg(&self.params);

        // one token per line
        let mut input = words.join("\n");
        input.push('\n');

        let output = run_piped(command, input).map_err(|source| AnnotatorError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(AnnotatorError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_tagger_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Run `command` with `input` on stdin and collect its output.
///
/// Stdin is fed from its own thread so a child that writes while it reads
/// cannot block on a full pipe.
fn run_piped(mut command: Command, input: String) -> io::Result<Output> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let feeder = child.stdin.take().map(|mut stdin| {
        thread::spawn(move || stdin.write_all(input.as_bytes()))
    });

    let output = child.wait_with_output()?;
    if let Some(feeder) = feeder {
        feeder
            .join()
            .map_err(|_| io::Error::other("stdin writer panicked"))??;
    }
    Ok(output)
}

/// Split text into tagger input tokens. Elided clitics and punctuation
/// become tokens of their own.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Parse `surface<TAB>POS<TAB>lemma` lines.
///
/// Unknown lemmas fall back to the surface form; lines without three
/// columns become untagged tokens.
pub fn parse_tagger_output(output: &str) -> Vec<Token> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('\t').collect();
            match parts.as_slice() {
                [surface, pos, lemma] => {
                    let lemma = if *lemma == UNKNOWN_LEMMA { *surface } else { *lemma };
                    Token::from_parts(Some(*surface), Some(*pos), Some(lemma))
                }
                [surface, ..] => Token::from_parts(Some(*surface), Some(UNKNOWN_POS), None),
                [] => None,
            }
        })
        .collect()
}

/// Lemmatize one wordlist line: the space-joined lemmas of its tokens
pub fn lemmatize_line<A: Annotator + ?Sized>(
    annotator: &mut A,
    line: &str,
) -> Result<String, AnnotatorError> {
    if line.trim().is_empty() {
        return Ok(String::new());
    }
    let tokens = annotator.tag(line.trim())?;
    Ok(tokens
        .iter()
        .map(|t| t.lemma.as_str())
        .collect::<Vec<_>>()
        .join(" "))
}

/// Lemmatize a wordlist file line by line into
/// `output_dir/<stem>_lemmatized.txt`. Blank lines are kept.
pub fn lemmatize_wordlist<A: Annotator + ?Sized>(
    annotator: &mut A,
    input: &Path,
    output_dir: &Path,
) -> Result<PathBuf, AnnotatorError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| AnnotatorError::Io { path, source }
    };

    let text = fs::read_to_string(input).map_err(io_error(input))?;
    fs::create_dir_all(output_dir).map_err(io_error(output_dir))?;

    let output = output_dir.join(format!("{}_lemmatized.txt", list_name(input)));
    let mut writer = BufWriter::new(File::create(&output).map_err(io_error(&output))?);

    let mut lines = 0;
    for line in text.lines() {
        let lemmatized = lemmatize_line(annotator, line)?;
        writeln!(writer, "{}", lemmatized).map_err(io_error(&output))?;
        lines += 1;
    }
    writer.flush().map_err(io_error(&output))?;

    info!("Lemmatized {} lines: {} -> {}", lines, input.display(), output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Lowercases and strips a trailing "s", tagging everything NOM
    struct FakeTagger {
        calls: usize,
    }

    impl Annotator for FakeTagger {
        fn tag(&mut self, text: &str) -> Result<Vec<Token>, AnnotatorError> {
            self.calls += 1;
            Ok(tokenize(text)
                .into_iter()
                .map(|w| {
                    let lower = w.to_lowercase();
                    let lemma = lower.strip_suffix('s').unwrap_or(&lower);
                    Token::new(w, "NOM", lemma)
                })
                .collect())
        }
    }

    #[test]
    fn test_tokenize_elision_and_punctuation() {
        assert_eq!(tokenize("d'abord l'heure."), vec!["d'", "abord", "l'", "heure", "."]);
        assert_eq!(
            tokenize("Jusqu’à ce qu'il parte, aujourd'hui!"),
            vec!["Jusqu’", "à", "ce", "qu'", "il", "parte", ",", "aujourd'hui", "!"]
        );
        assert_eq!(tokenize("c'est-à-dire"), vec!["c'", "est-à-dire"]);
        assert_eq!(tokenize("dans la nuit"), vec!["dans", "la", "nuit"]);
        assert!(tokenize("  ").is_empty());
    }

    #[test]
    fn test_lemmatize_line_splits_elision() {
        let mut tagger = FakeTagger { calls: 0 };
        assert_eq!(lemmatize_line(&mut tagger, "D'abord").unwrap(), "d' abord");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_piped_large_input() {
        // larger than a pipe buffer in both directions
        let input = "mot\n".repeat(200_000);
        let output = run_piped(Command::new("cat"), input.clone()).unwrap();

        assert!(output.status.success());
        assert_eq!(output.stdout.len(), input.len());
    }

    #[test]
    fn test_parse_tagger_output() {
        let output = "Les\tDET:ART\tle\nheures\tNOM\theure\nxyzzy\tNAM\t<unknown>\n\nseul\n";
        let tokens = parse_tagger_output(output);

        assert_eq!(
            tokens,
            vec![
                Token::new("Les", "DET", "le"),
                Token::new("heures", "NOM", "heure"),
                Token::new("xyzzy", "NAM", "xyzzy"),
                Token::new("seul", UNKNOWN_POS, "seul"),
            ]
        );
    }

    #[test]
    fn test_lemmatize_line() {
        let mut tagger = FakeTagger { calls: 0 };

        assert_eq!(lemmatize_line(&mut tagger, "Heures Creuses").unwrap(), "heure creuse");
        assert_eq!(lemmatize_line(&mut tagger, "   ").unwrap(), "");
        assert_eq!(tagger.calls, 1);
    }

    #[test]
    fn test_lemmatize_wordlist() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("temps.txt");
        fs::write(&input, "jours\n\nheures creuses\n").unwrap();

        let mut tagger = FakeTagger { calls: 0 };
        let out_dir = dir.path().join("out");
        let output = lemmatize_wordlist(&mut tagger, &input, &out_dir).unwrap();

        assert_eq!(output, out_dir.join("temps_lemmatized.txt"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "jour\n\nheure creuse\n");
    }

    #[test]
    fn test_missing_tagger_binary() {
        let mut tagger = TreeTagger::new("/nonexistent/tree-tagger", "french.par");
        let err = tagger.tag("bonjour").unwrap_err();
        assert!(matches!(err, AnnotatorError::Spawn { .. }));
    }

    #[test]
    fn test_missing_wordlist() {
        let dir = tempdir().unwrap();
        let mut tagger = FakeTagger { calls: 0 };
        let err = lemmatize_wordlist(&mut tagger, &dir.path().join("nope.txt"), dir.path())
            .unwrap_err();
        assert!(matches!(err, AnnotatorError::Io { .. }));
    }
}
