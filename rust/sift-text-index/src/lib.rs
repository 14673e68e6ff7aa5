//! Term extraction and an in-memory inverted index.
//!
//! This crate turns document text into normalized index terms and collects
//! them, with their postings, in a [`TermDictionary`] backed by
//! [`sift_ordered_index::OrderedIndex`].
//!
//! # Overview
//!
//! Text goes through three stages:
//!
//! 1. **Tokenization**: a [`Tokenizer`] splits text into candidate terms.
//! 2. **Normalization**: terms are lowercased and reduced to their stem by
//!    the [`PorterStemmer`], so that "connect", "connected" and "connection"
//!    all become "connect".
//! 3. **Accumulation**: each normalized term is looked up or inserted in the
//!    dictionary and its postings for the current document are updated.
//!
//! What happens at each stage is controlled by an [`IndexerConfig`], which
//! is usually read from a [`Properties`] file.
//!
//! # Available Tokenizers
//!
//! - **Unicode Word Tokenizer** (`"unicode-word"`): words as delimited by
//!   Unicode word boundaries
//! - **Alphabetic Tokenizer** (`"alphabetic"`): runs of ASCII letters
//!
//! # Quick Start
//!
//! ```rust
//! use sift_text_index::{IndexerConfig, TermDictionary};
//!
//! let mut dict = TermDictionary::new(IndexerConfig::default()).unwrap();
//! dict.add_document(1, "Connected devices keep connecting.").unwrap();
//!
//! let entry = dict.lookup("connection").unwrap();
//! assert_eq!(entry.term(), "connect");
//! assert_eq!(entry.postings()[0].tf, 2);
//! ```

mod properties;
mod stemmer;
mod term_dictionary;
mod tokenizers;

pub use properties::{IndexerConfig, Properties};
pub use stemmer::{MAX_WORD_LENGTH, PorterStemmer};
pub use term_dictionary::{Posting, TermDictionary, TermEntry};
pub use tokenizers::{
    AlphabeticTokenizer, Tokenizer, TokenizerKind, TokenizerType, UnicodeWordTokenizer,
    create_tokenizer, create_tokenizer_with_lengths,
};
