//! Tokenizers for extracting terms from document text.
//!
//! Tokenizers are used in two places:
//!
//! 1. **Indexing**: [`TermDictionary`](crate::TermDictionary) feeds every
//!    document through the configured tokenizer and normalizes each term
//!    before adding it to the dictionary.
//!
//! 2. **Lookup**: query words are run through the same normalization so that
//!    they meet the terms produced while indexing.
//!
//! The tokenizers return iterators of string slices borrowed from the input,
//! so tokenization itself never allocates.

pub mod alphabetic;
pub mod unicode_word;

use sift_common::{Result, error::Error, verify_arg};

pub use alphabetic::AlphabeticTokenizer;
pub use unicode_word::UnicodeWordTokenizer;

use crate::stemmer::MAX_WORD_LENGTH;

/// Default maximum length of a single term in bytes.
pub const DEFAULT_MAX_TERM_LENGTH: usize = MAX_WORD_LENGTH;

/// Default minimum length of a single term in bytes.
pub const DEFAULT_MIN_TERM_LENGTH: usize = 1;

/// A tokenizer extracts terms (tokens) from raw text for indexing.
///
/// Terms outside the `[min_term_length, max_term_length]` byte range are
/// excluded entirely. Nothing is ever truncated, since a truncated word would
/// stem to something unrelated to the original.
pub trait Tokenizer: Send + Sync {
    /// The iterator type returned by tokenize.
    type TokenIter<'a>: Iterator<Item = &'a str>
    where
        Self: 'a;

    /// Extract terms from the input string as an iterator of string slices.
    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a>;

    /// Get the kind of the tokenizer.
    fn kind(&self) -> TokenizerKind;

    /// Get the name of the tokenizer kind as a static string.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Maximum length of a single term in bytes.
    fn max_term_length(&self) -> usize;

    /// Minimum length of a single term in bytes.
    fn min_term_length(&self) -> usize;
}

/// Creates a tokenizer by name with the default term length limits.
///
/// # Errors
/// Returns an [`Error::invalid_arg`] if the tokenizer name is not recognized.
pub fn create_tokenizer(name: &str) -> Result<TokenizerType> {
    create_tokenizer_with_lengths(name, DEFAULT_MAX_TERM_LENGTH, DEFAULT_MIN_TERM_LENGTH)
}

/// Creates a tokenizer by name that keeps terms between `min_term_length`
/// and `max_term_length` bytes long.
///
/// # Errors
/// Returns an [`Error::invalid_arg`] if the name is not recognized or the
/// length range is empty.
pub fn create_tokenizer_with_lengths(
    name: &str,
    max_term_length: usize,
    min_term_length: usize,
) -> Result<TokenizerType> {
    verify_arg!(min_term_length, min_term_length >= 1);
    verify_arg!(max_term_length, max_term_length >= min_term_length);
    match name.try_into()? {
        TokenizerKind::UnicodeWord => Ok(TokenizerType::UnicodeWord(
            UnicodeWordTokenizer::with_lengths(max_term_length, min_term_length),
        )),
        TokenizerKind::Alphabetic => Ok(TokenizerType::Alphabetic(
            AlphabeticTokenizer::with_lengths(max_term_length, min_term_length),
        )),
    }
}

#[inline]
pub(crate) fn within_limits(term: &str, max_term_length: usize, min_term_length: usize) -> bool {
    (min_term_length..=max_term_length).contains(&term.len())
}

/// Identifies the available tokenizer implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerKind {
    /// Splits input on Unicode word boundaries and keeps words that contain
    /// at least one alphabetic character.
    UnicodeWord,
    /// Extracts maximal runs of ASCII letters.
    Alphabetic,
}

impl TryFrom<&str> for TokenizerKind {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        match name {
            "unicode-word" => Ok(TokenizerKind::UnicodeWord),
            "alphabetic" => Ok(TokenizerKind::Alphabetic),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized tokenizer: {name}"),
            )),
        }
    }
}

impl TokenizerKind {
    /// Get the name of the tokenizer kind as a static string.
    pub const fn name(&self) -> &'static str {
        match self {
            TokenizerKind::UnicodeWord => "unicode-word",
            TokenizerKind::Alphabetic => "alphabetic",
        }
    }
}

/// Enum that holds all available tokenizer types.
/// This allows for dynamic dispatch while maintaining the iterator-based API.
pub enum TokenizerType {
    UnicodeWord(UnicodeWordTokenizer),
    Alphabetic(AlphabeticTokenizer),
}

impl Tokenizer for TokenizerType {
    type TokenIter<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        match self {
            TokenizerType::UnicodeWord(tokenizer) => Box::new(tokenizer.tokenize(input)),
            TokenizerType::Alphabetic(tokenizer) => Box::new(tokenizer.tokenize(input)),
        }
    }

    fn kind(&self) -> TokenizerKind {
        match self {
            TokenizerType::UnicodeWord(tokenizer) => tokenizer.kind(),
            TokenizerType::Alphabetic(tokenizer) => tokenizer.kind(),
        }
    }

    fn max_term_length(&self) -> usize {
        match self {
            TokenizerType::UnicodeWord(tokenizer) => tokenizer.max_term_length(),
            TokenizerType::Alphabetic(tokenizer) => tokenizer.max_term_length(),
        }
    }

    fn min_term_length(&self) -> usize {
        match self {
            TokenizerType::UnicodeWord(tokenizer) => tokenizer.min_term_length(),
            TokenizerType::Alphabetic(tokenizer) => tokenizer.min_term_length(),
        }
    }
}
