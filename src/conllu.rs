//! CoNLL-U file parsing
//!
//! Reads CoNLL-U sentences as flat token sequences. Only the FORM, LEMMA and
//! UPOS columns are kept; dependency structure is ignored. Multiword token
//! ranges and empty nodes are skipped so every syntactic word appears once.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use crate::corpus::{Token, UNKNOWN_POS};
use memchr::memchr_iter;
use std::io::{BufRead, BufReader, Cursor, Lines};
use thiserror::Error;

/// Number of tab-separated columns in a token line
pub const FIELD_COUNT: usize = 10;

/// Error during CoNLL-U parsing
#[derive(Debug, Error)]
#[error("Parse error at line {line_num}: {message}")]
pub struct ParseError {
    pub line_num: usize,
    pub message: String,
}

/// Token ID column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenId {
    /// Regular word: `3`
    Single(usize),
    /// Multiword token: `1-2`
    Range(usize, usize),
    /// Empty node: `2.1`
    Decimal(usize, usize),
}

/// CoNLL-U reader that iterates over sentences
pub struct CoNLLUReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
}

impl<R: BufRead> CoNLLUReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}

impl CoNLLUReader<BufReader<Cursor<String>>> {
    /// Create a reader from a string
    pub fn from_string(text: &str) -> Self {
        Self::new(BufReader::new(Cursor::new(text.to_string())))
    }
}

impl<R: BufRead> Iterator for CoNLLUReader<R> {
    type Item = Result<Vec<Token>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut tokens = Vec::new();
        let mut seen_line = false;

        // Read lines until a blank line (sentence boundary) or EOF
        loop {
            self.line_num += 1;
            match self.lines.next() {
                None => {
                    if seen_line {
                        break;
                    }
                    return None;
                }
                Some(Err(e)) => {
                    return Some(Err(ParseError {
                        line_num: self.line_num,
                        message: format!("IO error: {}", e),
                    }));
                }
                Some(Ok(line)) => {
                    let line = line.trim_end_matches(['\r', '\n']);

                    if line.trim().is_empty() {
                        if seen_line {
                            break;
                        }
                        continue;
                    }
                    seen_line = true;

                    if line.starts_with('#') {
                        continue;
                    }

                    match parse_line(line, self.line_num) {
                        Ok(Some(token)) => tokens.push(token),
                        Ok(None) => {}
                        Err(e) => return Some(Err(e)),
                    }
                }
            }
        }

        Some(Ok(tokens))
    }
}

/// Split a token line into its ten columns
fn split_fields(line: &str) -> Option<[&str; FIELD_COUNT]> {
    let mut fields = [""; FIELD_COUNT];
    let mut start = 0;
    let mut n = 0;

    for tab in memchr_iter(b'\t', line.as_bytes()) {
        if n == FIELD_COUNT - 1 {
            return None;
        }
        fields[n] = &line[start..tab];
        start = tab + 1;
        n += 1;
    }
    if n != FIELD_COUNT - 1 {
        return None;
    }
    fields[n] = &line[start..];
    Some(fields)
}

/// Parse a single CoNLL-U line into a token.
/// Returns None for multiword tokens and empty nodes.
fn parse_line(line: &str, line_num: usize) -> Result<Option<Token>, ParseError> {
    let fields = split_fields(line).ok_or_else(|| ParseError {
        line_num,
        message: format!(
            "Expected {} fields, found {}",
            FIELD_COUNT,
            memchr_iter(b'\t', line.as_bytes()).count() + 1
        ),
    })?;

    let token_id = parse_id(fields[0]).ok_or_else(|| ParseError {
        line_num,
        message: format!("Invalid ID: {}", fields[0]),
    })?;
    if !matches!(token_id, TokenId::Single(_)) {
        return Ok(None);
    }

    let form = fields[1];
    let lemma = if fields[2] == "_" && form != "_" {
        form // Default to form if lemma not specified
    } else {
        fields[2]
    };
    let pos = if fields[3] == "_" { UNKNOWN_POS } else { fields[3] };

    Ok(Token::from_parts(Some(form), Some(pos), Some(lemma)))
}

/// Parse ID field (integer, range, or decimal)
pub fn parse_id(s: &str) -> Option<TokenId> {
    let bytes = s.as_bytes();
    let whole = |b: &[u8]| -> Option<usize> {
        if b.is_empty() || !b.iter().all(u8::is_ascii_digit) {
            return None;
        }
        atoi::atoi(b)
    };

    if let Some((start, end)) = s.split_once('-') {
        Some(TokenId::Range(whole(start.as_bytes())?, whole(end.as_bytes())?))
    } else if let Some((main, sub)) = s.split_once('.') {
        Some(TokenId::Decimal(whole(main.as_bytes())?, whole(sub.as_bytes())?))
    } else {
        Some(TokenId::Single(whole(bytes)?))
    }
}

/// Read a whole CoNLL-U document; any malformed sentence fails the document
pub fn read_tokens<R: BufRead>(reader: R) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    for sentence in CoNLLUReader::new(reader) {
        tokens.extend(sentence?);
    }
    Ok(tokens)
}
