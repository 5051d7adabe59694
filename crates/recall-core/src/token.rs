//! Display tokenization.
//!
//! Splits a raw string into word, whitespace and punctuation runs that keep
//! their original formatting. Concatenating the tokens reproduces the input
//! exactly. These tokens feed the renderer; scoring uses
//! [`crate::normalize::scoring_words`] instead.

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_word, NormalizedWord};

/// What kind of run a token covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Word,
    Whitespace,
    Punctuation,
}

/// A substring of a raw string, carrying its original formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The exact text of the run.
    pub text: String,
    /// Run classification.
    pub kind: TokenKind,
    /// Byte offset of the run in the source string.
    pub offset: usize,
    /// Scoring word of the whitespace-delimited span this token belongs to.
    /// Set on word tokens and on punctuation inside a word ("-" in
    /// "self-evident"); `None` for whitespace and edge punctuation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<NormalizedWord>,
}

impl Token {
    /// The scoring word this token renders part of.
    pub fn normalized(&self) -> Option<&NormalizedWord> {
        self.word.as_ref()
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Split `text` into display tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens: Vec<Token> = Vec::new();

    for (i, &(offset, c)) in chars.iter().enumerate() {
        let kind = classify(&chars, i, c);
        match tokens.last_mut() {
            Some(last) if last.kind == kind => last.text.push(c),
            _ => tokens.push(Token {
                text: c.to_string(),
                kind,
                offset,
                word: None,
            }),
        }
    }

    let mut start = 0;
    while start < tokens.len() {
        if tokens[start].kind == TokenKind::Whitespace {
            start += 1;
            continue;
        }
        let end = tokens[start..]
            .iter()
            .position(|t| t.kind == TokenKind::Whitespace)
            .map_or(tokens.len(), |n| start + n);
        assign_span_word(&mut tokens[start..end]);
        start = end;
    }

    tokens
}

// "self-evident" scores as one word, so all three of its runs map to it.
fn assign_span_word(span: &mut [Token]) {
    let text: String = span.iter().map(|t| t.text.as_str()).collect();
    let Some(word) = normalize_word(&text) else {
        return;
    };
    let first = span.iter().position(Token::is_word);
    let last = span.iter().rposition(Token::is_word);
    if let (Some(first), Some(last)) = (first, last) {
        for token in &mut span[first..=last] {
            token.word = Some(word.clone());
        }
    }
}

fn classify(chars: &[(usize, char)], i: usize, c: char) -> TokenKind {
    if c.is_whitespace() {
        TokenKind::Whitespace
    } else if c.is_alphanumeric() || is_joining_apostrophe(chars, i, c) {
        TokenKind::Word
    } else {
        TokenKind::Punctuation
    }
}

// Keeps "don't" and "don’t" as one word run.
fn is_joining_apostrophe(chars: &[(usize, char)], i: usize, c: char) -> bool {
    if c != '\'' && c != '\u{2019}' {
        return false;
    }
    let before = i.checked_sub(1).and_then(|j| chars.get(j));
    let after = chars.get(i + 1);
    matches!((before, after), (Some((_, b)), Some((_, a))) if b.is_alphanumeric() && a.is_alphanumeric())
}
