use std::cmp::Ordering;

use sift_common::{Result, verify_arg};
use sift_ordered_index::{OrderedIndex, Record};

use crate::properties::IndexerConfig;
use crate::stemmer::PorterStemmer;
use crate::tokenizers::{Tokenizer, TokenizerType};

/// Occurrences of a term within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: u32,
    /// Term frequency: how often the term occurs in the document.
    pub tf: u32,
}

/// A normalized term together with its postings.
#[derive(Debug)]
pub struct TermEntry {
    term: String,
    postings: Vec<Posting>,
    collection_frequency: u64,
}

impl TermEntry {
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Postings in ascending document id order.
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Number of documents containing the term.
    pub fn document_frequency(&self) -> usize {
        self.postings.len()
    }

    /// Total number of occurrences across all documents.
    pub fn collection_frequency(&self) -> u64 {
        self.collection_frequency
    }

    /// Counts one more occurrence in `doc_id` and returns the term frequency
    /// for that document. Document ids arrive in non-decreasing order, so
    /// only the last posting can match.
    fn record_occurrence(&mut self, doc_id: u32) -> u32 {
        self.collection_frequency += 1;
        match self.postings.last_mut() {
            Some(posting) if posting.doc_id == doc_id => {
                posting.tf += 1;
                posting.tf
            }
            _ => {
                self.postings.push(Posting { doc_id, tf: 1 });
                1
            }
        }
    }
}

impl Record for TermEntry {
    type Key = str;

    #[inline]
    fn compare(key: &str, record: &TermEntry) -> Ordering {
        key.cmp(record.term.as_str())
    }

    fn construct(key: &str) -> TermEntry {
        TermEntry {
            term: key.to_owned(),
            postings: Vec::new(),
            collection_frequency: 0,
        }
    }

    #[inline]
    fn key(&self) -> &str {
        &self.term
    }
}

/// In-memory inverted index builder.
///
/// Documents are tokenized, normalized according to the [`IndexerConfig`]
/// and accumulated into an ordered dictionary of terms, each carrying its
/// postings list.
pub struct TermDictionary {
    config: IndexerConfig,
    tokenizer: TokenizerType,
    stemmer: PorterStemmer,
    terms: OrderedIndex<TermEntry>,
    documents: usize,
    /// Highest term frequency per document, in document id order.
    max_tf: Vec<(u32, u32)>,
}

impl TermDictionary {
    /// Creates an empty dictionary.
    ///
    /// # Errors
    /// Returns an invalid argument error if `config` does not validate.
    pub fn new(config: IndexerConfig) -> Result<TermDictionary> {
        config.validate()?;
        let tokenizer = config.create_tokenizer()?;
        Ok(TermDictionary {
            config,
            tokenizer,
            stemmer: PorterStemmer::new(),
            terms: OrderedIndex::new(),
            documents: 0,
            max_tf: Vec::new(),
        })
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Indexes `text` as (part of) document `doc_id` and returns the number
    /// of terms added.
    ///
    /// Calling this again with the same id appends to that document.
    ///
    /// # Errors
    /// Returns an invalid argument error if `doc_id` is smaller than the id
    /// of the previous call, and an allocation error if the term index
    /// cannot grow. Terms added before an allocation failure are kept.
    pub fn add_document(&mut self, doc_id: u32, text: &str) -> Result<usize> {
        if let Some(&(last, _)) = self.max_tf.last() {
            verify_arg!(doc_id, doc_id >= last);
        }
        if self.max_tf.last().map(|&(last, _)| last) != Some(doc_id) {
            self.documents += 1;
            self.max_tf.push((doc_id, 0));
        }

        let TermDictionary {
            config,
            tokenizer,
            stemmer,
            terms,
            max_tf,
            ..
        } = self;
        let mut added = 0;
        for word in tokenizer.tokenize(text) {
            let term = normalize_word(config, stemmer, word);
            let (entry, _) = terms.insert(&term)?;
            let tf = entry.record_occurrence(doc_id);
            if let Some((_, max)) = max_tf.last_mut() {
                *max = (*max).max(tf);
            }
            added += 1;
        }
        log::trace!(
            "document {doc_id}: {added} terms, {} distinct in dictionary",
            terms.len()
        );
        Ok(added)
    }

    /// Applies the same transformation to `word` that indexing applies to
    /// each token.
    pub fn normalize(&self, word: &str) -> String {
        normalize_word(&self.config, &self.stemmer, word)
    }

    /// Finds the entry `word` was indexed under.
    pub fn lookup(&self, word: &str) -> Option<&TermEntry> {
        self.terms.find(&self.normalize(word))
    }

    /// Drops the entry `word` was indexed under, with all its postings.
    pub fn remove(&mut self, word: &str) -> bool {
        let term = self.normalize(word);
        self.terms.delete(&term)
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of distinct document ids seen.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Entries in ascending term order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = &TermEntry> + '_ {
        self.terms.iter()
    }

    /// Highest frequency of any term in document `doc_id`.
    pub fn max_term_frequency(&self, doc_id: u32) -> Option<u32> {
        self.max_tf
            .binary_search_by_key(&doc_id, |&(id, _)| id)
            .ok()
            .map(|pos| self.max_tf[pos].1)
    }

    /// The underlying term index.
    pub fn index(&self) -> &OrderedIndex<TermEntry> {
        &self.terms
    }
}

fn normalize_word(config: &IndexerConfig, stemmer: &PorterStemmer, word: &str) -> String {
    let word = if config.lowercase {
        word.to_lowercase()
    } else {
        word.to_string()
    };
    if !config.stemming {
        return word;
    }
    match stemmer.stem(&word) {
        Ok(stem) => stem,
        Err(e) => {
            log::debug!("indexing {word:?} unstemmed: {e}");
            word
        }
    }
}
