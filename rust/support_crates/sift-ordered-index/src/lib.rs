//! A generic, height-balanced ordered container.
//!
//! [`OrderedIndex`] is an AVL tree holding caller-defined records. What a
//! record looks like, how it is created from a key and how keys are ordered
//! is supplied once, at compile time, through the [`Record`] trait. The tree
//! itself only deals with node links and balance indicators.
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//! use sift_ordered_index::{OrderedIndex, Record};
//!
//! #[derive(Debug)]
//! struct WordCount {
//!     word: String,
//!     count: u32,
//! }
//!
//! impl Record for WordCount {
//!     type Key = str;
//!
//!     fn compare(key: &str, record: &WordCount) -> Ordering {
//!         key.cmp(record.word.as_str())
//!     }
//!
//!     fn construct(key: &str) -> WordCount {
//!         WordCount { word: key.to_owned(), count: 0 }
//!     }
//!
//!     fn key(&self) -> &str {
//!         &self.word
//!     }
//! }
//!
//! let mut index = OrderedIndex::<WordCount>::new();
//! for word in ["stem", "tree", "stem"] {
//!     let (record, _inserted) = index.insert(word).unwrap();
//!     record.count += 1;
//! }
//!
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.find("stem").unwrap().count, 2);
//! let words: Vec<&str> = index.iter().map(|r| r.word.as_str()).collect();
//! assert_eq!(words, ["stem", "tree"]);
//! ```

mod arena;
mod iter;
mod record;
mod tree;

pub use iter::Iter;
pub use record::Record;
pub use tree::OrderedIndex;

#[cfg(test)]
mod tests;
