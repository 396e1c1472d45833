//! TEI / TXM XML word extraction
//!
//! Reads the `<w>` elements of a TXM-style TEI export:
//!
//! ```xml
//! <w id="w_1">
//!   <txm:form>marchait</txm:form>
//!   <txm:ana type="#frpos">VER:impf</txm:ana>
//!   <txm:ana type="#frlemma">marcher</txm:ana>
//! </w>
//! ```
//!
//! Plain TEI words with `lemma`/`pos` attributes and text content are read as
//! well. The document is scanned with regular expressions; only the word
//! layer is interpreted.

use crate::corpus::Token;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w\b([^>]*?)(?:/>|>(.*?)</w\s*>)").unwrap());
static WORD_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w\b[^>]*?(/?)>").unwrap());
static WORD_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</w\s*>").unwrap());
static FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<txm:form\b[^>]*>(.*?)</txm:form\s*>").unwrap());
static ANA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<txm:ana\b([^>]*)>(.*?)</txm:ana\s*>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static CHAR_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap());

/// Malformed word layer
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("Unbalanced <w> elements: {open} opened, {closed} closed")]
    Unbalanced { open: usize, closed: usize },
}

/// Extract all words of a document in order
pub fn parse_words(xml: &str) -> Result<Vec<Token>, XmlError> {
    check_balance(xml)?;

    let mut tokens = Vec::new();
    for caps in WORD.captures_iter(xml) {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());
        if let Some(token) = parse_word(attrs, body) {
            tokens.push(token);
        }
    }
    Ok(tokens)
}

fn check_balance(xml: &str) -> Result<(), XmlError> {
    let open = WORD_OPEN
        .captures_iter(xml)
        .filter(|caps| caps.get(1).is_none_or(|m| m.as_str().is_empty()))
        .count();
    let closed = WORD_CLOSE.find_iter(xml).count();
    if open != closed {
        return Err(XmlError::Unbalanced { open, closed });
    }
    Ok(())
}

fn parse_word(attrs: &str, body: &str) -> Option<Token> {
    let mut lemma = attribute(attrs, "lemma").map(decode_entities);
    let mut pos = attribute(attrs, "pos")
        .or_else(|| attribute(attrs, "type"))
        .map(decode_entities);

    for caps in ANA.captures_iter(body) {
        let Some(kind) = attribute(&caps[1], "type") else {
            continue;
        };
        let value = decode_entities(caps[2].trim());
        if kind.ends_with("lemma") {
            lemma.get_or_insert(value);
        } else if kind.ends_with("pos") {
            pos.get_or_insert(value);
        }
    }

    let surface = match FORM.captures(body) {
        Some(caps) => decode_entities(&caps[1]),
        None => decode_entities(&TAG.replace_all(body, " ")),
    };

    Token::from_parts(Some(&surface), pos.as_deref(), lemma.as_deref())
}

/// Value of `name="..."` (or single-quoted) in an attribute string
fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = attrs;
    while let Some(at) = rest.find(name) {
        let preceded = rest[..at]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace());
        let after = rest[at + name.len()..].trim_start();
        rest = &rest[at + name.len()..];

        if !preceded {
            continue;
        }
        let Some(value) = after.strip_prefix('=') else {
            continue;
        };
        let value = value.trim_start();
        let quote = value.chars().next()?;
        if quote != '"' && quote != '\'' {
            continue;
        }
        let value = &value[1..];
        return value.find(quote).map(|end| &value[..end]);
    }
    None
}

/// Decode the predefined XML entities and numeric character references
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let text = CHAR_REF.replace_all(text, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        value
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    });
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::UNKNOWN_POS;

    const TXM: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:txm="http://textometrie.org/1.0">
<text><p>
<w id="w_1"><txm:form>Il</txm:form><txm:ana type="#frpos">PRO:PER</txm:ana><txm:ana type="#frlemma">il</txm:ana></w>
<w id="w_2">
  <txm:form>marchait</txm:form>
  <txm:ana resp="#txm" type="#frpos">VER:impf</txm:ana>
  <txm:ana resp="#txm" type="#frlemma">marcher</txm:ana>
</w>
<w id="w_3"><txm:form>l&apos;aube</txm:form><txm:ana type="#frlemma">aube</txm:ana></w>
<w id="w_4"><txm:form>?</txm:form><txm:ana type="#frpos">SENT</txm:ana></w>
</p></text>
</TEI>"##;

    #[test]
    fn test_parse_txm_words() {
        let tokens = parse_words(TXM).unwrap();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0], Token::new("Il", "PRO", "il"));
        assert_eq!(tokens[1], Token::new("marchait", "VER", "marcher"));
        assert_eq!(tokens[2], Token::new("l'aube", UNKNOWN_POS, "aube"));
        // no lemma annotation: lemma falls back to the form
        assert_eq!(tokens[3], Token::new("?", "SENT", "?"));
    }

    #[test]
    fn test_parse_attribute_words() {
        let xml = r#"<p><w lemma="soir" pos="NOUN">soirs</w> <w lemma='venir' type="VERB"><hi>vint</hi></w><w/></p>"#;
        let tokens = parse_words(xml).unwrap();

        assert_eq!(tokens, vec![
            Token::new("soirs", "NOUN", "soir"),
            Token::new("vint", "VERB", "venir"),
        ]);
    }

    #[test]
    fn test_unbalanced() {
        let xml = "<w><txm:form>a</txm:form></w><w><txm:form>b</txm:form>";
        assert!(matches!(
            parse_words(xml),
            Err(XmlError::Unbalanced { open: 2, closed: 1 })
        ));
    }

    #[test]
    fn test_not_confused_by_similar_tags() {
        let xml = "<wrapper><wx>no</wx><w><txm:form>oui</txm:form></w></wrapper>";
        let tokens = parse_words(xml).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].surface, "oui");
    }

    #[test]
    fn test_no_words() {
        assert!(parse_words("<TEI><text/></TEI>").unwrap().is_empty());
    }

    #[test]
    fn test_attribute() {
        assert_eq!(attribute(r##" type="#frpos" resp="x""##, "type"), Some("#frpos"));
        assert_eq!(attribute(r#" subtype="a" type='b'"#, "type"), Some("b"));
        assert_eq!(attribute(r#" id="1""#, "type"), None);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;x&gt; &quot;y&quot;"), "<x> \"y\"");
        assert_eq!(decode_entities("&#233;t&#xE9;"), "été");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("plain"), "plain");
    }
}
