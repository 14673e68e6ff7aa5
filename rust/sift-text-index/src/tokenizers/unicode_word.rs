//! Unicode Word Tokenizer - extracts words on Unicode word boundaries.

use unicode_segmentation::{UnicodeSegmentation, UnicodeWords};

use super::{DEFAULT_MAX_TERM_LENGTH, DEFAULT_MIN_TERM_LENGTH, Tokenizer, within_limits};
use crate::tokenizers::TokenizerKind;

/// Word Tokenizer - extracts words as delimited by the Unicode word
/// segmentation rules (UAX #29).
///
/// Words made only of digits are dropped, so a term always carries at least
/// one alphabetic character. Contractions such as "can't" stay one term.
pub struct UnicodeWordTokenizer {
    max_term_length: usize,
    min_term_length: usize,
}

impl UnicodeWordTokenizer {
    /// Create a new UnicodeWordTokenizer with custom max and min term lengths.
    pub fn with_lengths(max_term_length: usize, min_term_length: usize) -> Self {
        Self {
            max_term_length,
            min_term_length,
        }
    }

    /// Create a new UnicodeWordTokenizer with default settings.
    pub fn new() -> Self {
        Self::with_lengths(DEFAULT_MAX_TERM_LENGTH, DEFAULT_MIN_TERM_LENGTH)
    }
}

impl Default for UnicodeWordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator that yields word tokens from a string input.
pub struct WordTokenIterator<'a> {
    words: UnicodeWords<'a>,
    max_term_length: usize,
    min_term_length: usize,
}

impl<'a> WordTokenIterator<'a> {
    pub fn new(input: &'a str, max_term_length: usize, min_term_length: usize) -> Self {
        Self {
            words: input.unicode_words(),
            max_term_length,
            min_term_length,
        }
    }
}

impl<'a> Iterator for WordTokenIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let (max, min) = (self.max_term_length, self.min_term_length);
        self.words
            .by_ref()
            .find(|word| within_limits(word, max, min) && word.chars().any(char::is_alphabetic))
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    type TokenIter<'a> = WordTokenIterator<'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        WordTokenIterator::new(input, self.max_term_length, self.min_term_length)
    }

    fn kind(&self) -> TokenizerKind {
        TokenizerKind::UnicodeWord
    }

    fn max_term_length(&self) -> usize {
        self.max_term_length
    }

    fn min_term_length(&self) -> usize {
        self.min_term_length
    }
}
