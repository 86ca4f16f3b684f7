//! Message tokenization.
//!
//! Converts one chat message into an ordered token sequence, preserving
//! rich-text mention elements as single indivisible tokens.

use crate::error::TokenizeError;
use crate::token::Token;

/// The textual content of one incoming chat message.
///
/// Chat clients deliver a plain-text body and, for rich messages, an
/// additional formatted body carrying inline markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    /// Plain-text body.
    pub plain: String,
    /// Rich-text body, when the client sent one.
    pub formatted: Option<String>,
}

impl Message {
    /// A message with only a plain-text body.
    #[must_use]
    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            plain: body.into(),
            formatted: None,
        }
    }

    /// Adds a rich-text body.
    #[must_use]
    pub fn with_formatted(mut self, formatted: impl Into<String>) -> Self {
        self.formatted = Some(formatted.into());
        self
    }
}

/// A mention element that has been opened but not yet closed.
struct OpenMention {
    target: String,
    label: String,
}

/// Splits chat messages into argument tokens.
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenizes a message body.
    ///
    /// Without a formatted body the plain text splits on whitespace. A
    /// formatted body is scanned as a markup stream: every mention element
    /// becomes one atomic token carrying its target reference and label,
    /// all other markup is discarded, and text outside mention elements
    /// splits on whitespace in document order.
    ///
    /// Text inside a mention element replaces that element's label buffer on
    /// every text event. A mention opened while another is still open
    /// therefore discards whatever the outer element had accumulated; the
    /// innermost, most recent element wins. This surprising behavior is kept
    /// deliberately and covered by tests.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenizeError`] for malformed markup: an unclosed mention
    /// element, a closing tag with no open element, or an unterminated tag.
    pub fn tokenize(message: &Message) -> Result<Vec<Token>, TokenizeError> {
        match &message.formatted {
            Some(body) => Self::tokenize_formatted(body),
            None => Ok(Self::tokenize_plain(&message.plain)),
        }
    }

    /// Tokenizes a plain-text body by splitting on runs of whitespace.
    #[must_use]
    pub fn tokenize_plain(body: &str) -> Vec<Token> {
        body.split_whitespace().map(Token::text).collect()
    }

    /// Tokenizes a rich-text body.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenizeError`] for malformed markup.
    pub fn tokenize_formatted(body: &str) -> Result<Vec<Token>, TokenizeError> {
        let mut tokens = Vec::new();
        let mut open: Vec<OpenMention> = Vec::new();
        let mut rest = body;

        while let Some(lt) = rest.find('<') {
            let (text, tail) = rest.split_at(lt);
            flush_text(text, &mut tokens, &mut open);
            let (tag, after) = scan_tag(&tail[1..])?;
            apply_tag(tag, &mut tokens, &mut open)?;
            rest = after;
        }
        flush_text(rest, &mut tokens, &mut open);

        if open.is_empty() {
            Ok(tokens)
        } else {
            Err(TokenizeError::UnclosedMention)
        }
    }
}

/// Emits a text chunk: into the innermost open mention, or as word tokens.
fn flush_text(text: &str, tokens: &mut Vec<Token>, open: &mut [OpenMention]) {
    if text.is_empty() {
        return;
    }
    let decoded = decode_entities(text);
    if let Some(frame) = open.last_mut() {
        // Replaces rather than appends; see `Tokenizer::tokenize`.
        frame.label = decoded;
    } else {
        tokens.extend(decoded.split_whitespace().map(Token::text));
    }
}

/// Scans a tag body up to its closing `>`, honoring quoted attribute values.
fn scan_tag(input: &str) -> Result<(&str, &str), TokenizeError> {
    let mut quote: Option<char> = None;
    for (idx, ch) in input.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => quote = Some(ch),
            (None, '>') => return Ok((&input[..idx], &input[idx + 1..])),
            _ => {}
        }
    }
    Err(TokenizeError::UnterminatedTag)
}

/// Interprets one scanned tag, updating the open-element stack.
fn apply_tag(
    tag: &str,
    tokens: &mut Vec<Token>,
    open: &mut Vec<OpenMention>,
) -> Result<(), TokenizeError> {
    let tag = tag.trim();

    if let Some(name) = tag.strip_prefix('/') {
        if name.trim().eq_ignore_ascii_case("a") {
            let frame = open.pop().ok_or(TokenizeError::UnmatchedClose)?;
            tokens.push(Token::Mention {
                target: frame.target,
                label: frame.label,
            });
        }
        return Ok(());
    }

    // Comments, doctypes, and processing instructions are dropped wholesale.
    if tag.starts_with('!') || tag.starts_with('?') {
        return Ok(());
    }

    let self_closing = tag.ends_with('/');
    let body = if self_closing {
        tag[..tag.len() - 1].trim_end()
    } else {
        tag
    };
    let (name, attrs) = split_name(body);
    if !name.eq_ignore_ascii_case("a") {
        return Ok(());
    }

    let target = find_attr(attrs, "href").unwrap_or_default();
    if self_closing {
        tokens.push(Token::mention(target, ""));
    } else {
        open.push(OpenMention {
            target,
            label: String::new(),
        });
    }
    Ok(())
}

/// Splits a tag body into its element name and attribute text.
fn split_name(tag: &str) -> (&str, &str) {
    match tag.find(char::is_whitespace) {
        Some(idx) => (&tag[..idx], &tag[idx + 1..]),
        None => (tag, ""),
    }
}

/// Finds one attribute value inside a tag's attribute text.
fn find_attr(attrs: &str, wanted: &str) -> Option<String> {
    let mut rest = attrs.trim_start();
    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let mut value = "";
        if let Some(stripped) = rest.strip_prefix('=') {
            let stripped = stripped.trim_start();
            if let Some(quote) = stripped.chars().next().filter(|&c| c == '"' || c == '\'') {
                let inner = &stripped[1..];
                let end = inner.find(quote).unwrap_or(inner.len());
                value = &inner[..end];
                rest = &inner[(end + 1).min(inner.len())..];
            } else {
                let end = stripped
                    .find(char::is_whitespace)
                    .unwrap_or(stripped.len());
                value = &stripped[..end];
                rest = &stripped[end..];
            }
        }

        if name.eq_ignore_ascii_case(wanted) {
            return Some(decode_entities(value));
        }
        rest = rest.trim_start();
    }
    None
}

/// Decodes the common named and numeric character references.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        match tail.find(';') {
            Some(end) if end <= 8 => {
                let name = &tail[..end];
                let decoded = match name {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => name.strip_prefix('#').and_then(|num| {
                        let code = match num.strip_prefix(['x', 'X']) {
                            Some(hex) => u32::from_str_radix(hex, 16).ok(),
                            None => num.parse::<u32>().ok(),
                        };
                        code.and_then(char::from_u32)
                    }),
                };
                match decoded {
                    Some(c) => {
                        out.push(c);
                        rest = &tail[end + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = tail;
                    }
                }
            }
            _ => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
