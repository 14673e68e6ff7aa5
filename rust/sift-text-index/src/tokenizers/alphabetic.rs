//! Alphabetic Tokenizer - extracts runs of ASCII letters.

use super::{DEFAULT_MAX_TERM_LENGTH, DEFAULT_MIN_TERM_LENGTH, Tokenizer, within_limits};
use crate::tokenizers::TokenizerKind;

/// Alphabetic Tokenizer - every maximal run of ASCII letters is a term.
///
/// Anything else, including digits, apostrophes and non-ASCII letters, acts
/// as a separator. The output is always plain ASCII, which makes this the
/// tokenizer of choice when every term should reach the stemmer.
pub struct AlphabeticTokenizer {
    max_term_length: usize,
    min_term_length: usize,
}

impl AlphabeticTokenizer {
    pub fn with_lengths(max_term_length: usize, min_term_length: usize) -> Self {
        Self {
            max_term_length,
            min_term_length,
        }
    }

    pub fn new() -> Self {
        Self::with_lengths(DEFAULT_MAX_TERM_LENGTH, DEFAULT_MIN_TERM_LENGTH)
    }
}

impl Default for AlphabeticTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ASCII letter runs of a string.
pub struct AlphabeticTokenIterator<'a> {
    input: &'a str,
    pos: usize,
    max_term_length: usize,
    min_term_length: usize,
}

impl<'a> AlphabeticTokenIterator<'a> {
    pub fn new(input: &'a str, max_term_length: usize, min_term_length: usize) -> Self {
        Self {
            input,
            pos: 0,
            max_term_length,
            min_term_length,
        }
    }
}

impl<'a> Iterator for AlphabeticTokenIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        loop {
            while self.pos < bytes.len() && !bytes[self.pos].is_ascii_alphabetic() {
                self.pos += 1;
            }
            if self.pos == bytes.len() {
                return None;
            }
            let start = self.pos;
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_alphabetic() {
                self.pos += 1;
            }
            // Both ends sit next to ASCII bytes or the string ends, so the
            // slice is on char boundaries.
            let term = &self.input[start..self.pos];
            if within_limits(term, self.max_term_length, self.min_term_length) {
                return Some(term);
            }
        }
    }
}

impl Tokenizer for AlphabeticTokenizer {
    type TokenIter<'a> = AlphabeticTokenIterator<'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        AlphabeticTokenIterator::new(input, self.max_term_length, self.min_term_length)
    }

    fn kind(&self) -> TokenizerKind {
        TokenizerKind::Alphabetic
    }

    fn max_term_length(&self) -> usize {
        self.max_term_length
    }

    fn min_term_length(&self) -> usize {
        self.min_term_length
    }
}
