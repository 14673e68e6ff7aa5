//! Property files and the indexer configuration read from them.
//!
//! A property file is a sequence of `name=value` lines:
//!
//! ```text
//! # lines starting with '#' are comments
//! stemming=true
//! tokenizer=alphabetic
//! max_term_length=64
//! ```
//!
//! Each line is split at its first `=`, so values may themselves contain
//! `=`. Lines without `=`, or with an empty name or value, are ignored. When
//! a name is defined more than once, the first definition wins.

use std::path::Path;

use sift_common::{Result, error::Error, verify_arg};

use crate::stemmer::MAX_WORD_LENGTH;
use crate::tokenizers::{
    DEFAULT_MAX_TERM_LENGTH, DEFAULT_MIN_TERM_LENGTH, TokenizerKind, TokenizerType,
    create_tokenizer_with_lengths,
};

/// Ordered `name=value` pairs parsed from a property file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Properties {
        Properties::default()
    }

    /// Reads and parses the property file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Properties> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        let props = Properties::parse(&text);
        log::debug!(
            "loaded {} properties from {}",
            props.len(),
            path.display()
        );
        Ok(props)
    }

    pub fn parse(text: &str) -> Properties {
        let mut entries = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((name, value)) if !name.is_empty() && !value.is_empty() => {
                    entries.push((name.to_string(), value.to_string()));
                }
                _ => log::trace!("skipping malformed property line {}: {line:?}", line_no + 1),
            }
        }
        Properties { entries }
    }

    /// Returns the first value defined for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parsed definitions, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Definitions in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// How text is turned into dictionary terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Reduce terms to their Porter stem.
    pub stemming: bool,
    /// Lowercase terms before stemming.
    pub lowercase: bool,
    /// Name of the tokenizer, see [`create_tokenizer`](crate::create_tokenizer).
    pub tokenizer: String,
    pub min_term_length: usize,
    pub max_term_length: usize,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        IndexerConfig {
            stemming: true,
            lowercase: true,
            tokenizer: TokenizerKind::UnicodeWord.name().to_string(),
            min_term_length: DEFAULT_MIN_TERM_LENGTH,
            max_term_length: DEFAULT_MAX_TERM_LENGTH,
        }
    }
}

impl IndexerConfig {
    pub const STEMMING: &'static str = "stemming";
    pub const LOWERCASE: &'static str = "lowercase";
    pub const TOKENIZER: &'static str = "tokenizer";
    pub const MIN_TERM_LENGTH: &'static str = "min_term_length";
    pub const MAX_TERM_LENGTH: &'static str = "max_term_length";

    /// Builds a configuration from `props`, using defaults for absent keys.
    ///
    /// # Errors
    /// Returns an invalid argument error naming the key when a value cannot
    /// be parsed, or when the resulting configuration fails [`validate`].
    ///
    /// [`validate`]: IndexerConfig::validate
    pub fn from_properties(props: &Properties) -> Result<IndexerConfig> {
        let defaults = IndexerConfig::default();
        let config = IndexerConfig {
            stemming: parse_bool(props, Self::STEMMING)?.unwrap_or(defaults.stemming),
            lowercase: parse_bool(props, Self::LOWERCASE)?.unwrap_or(defaults.lowercase),
            tokenizer: props
                .get(Self::TOKENIZER)
                .map(str::to_string)
                .unwrap_or(defaults.tokenizer),
            min_term_length: parse_usize(props, Self::MIN_TERM_LENGTH)?
                .unwrap_or(defaults.min_term_length),
            max_term_length: parse_usize(props, Self::MAX_TERM_LENGTH)?
                .unwrap_or(defaults.max_term_length),
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads the property file at `path` and builds a configuration from it.
    pub fn load(path: impl AsRef<Path>) -> Result<IndexerConfig> {
        IndexerConfig::from_properties(&Properties::load(path)?)
    }

    /// Checks that the term length range is non-empty, starts at one byte or
    /// more and does not exceed [`MAX_WORD_LENGTH`], and that the tokenizer
    /// name is recognized.
    ///
    /// # Errors
    /// Returns an invalid argument error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        verify_arg!(min_term_length, self.min_term_length >= 1);
        verify_arg!(
            max_term_length,
            self.max_term_length >= self.min_term_length
        );
        verify_arg!(max_term_length, self.max_term_length <= MAX_WORD_LENGTH);
        TokenizerKind::try_from(self.tokenizer.as_str())?;
        Ok(())
    }

    /// Creates the tokenizer this configuration names.
    pub fn create_tokenizer(&self) -> Result<TokenizerType> {
        create_tokenizer_with_lengths(
            &self.tokenizer,
            self.max_term_length,
            self.min_term_length,
        )
    }
}

fn parse_bool(props: &Properties, name: &str) -> Result<Option<bool>> {
    let Some(value) = props.get(name) else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(Some(true)),
        "false" | "no" | "off" | "0" => Ok(Some(false)),
        _ => Err(Error::invalid_arg(
            name,
            format!("expected a boolean, found {value:?}"),
        )),
    }
}

fn parse_usize(props: &Properties, name: &str) -> Result<Option<usize>> {
    props
        .get(name)
        .map(|value| {
            value.parse::<usize>().map_err(|e| {
                Error::invalid_arg(name, format!("expected a length, found {value:?}: {e}"))
            })
        })
        .transpose()
}
