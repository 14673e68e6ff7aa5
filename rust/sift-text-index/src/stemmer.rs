//! Porter suffix-stripping stemmer.
//!
//! Reduces English words to a canonical stem so that morphological variants
//! ("connect", "connected", "connection") share one index key. This is the
//! classic 1980 algorithm: five ordered rule groups, each committing at most
//! one suffix rewrite, gated by the measure `m` of the remaining stem.

use sift_common::{Result, verify_arg};

/// Longest word, in bytes, accepted by [`PorterStemmer::stem`].
pub const MAX_WORD_LENGTH: usize = 255;

/// A suffix and the text that replaces it.
type Rule = (&'static str, &'static str);

/// Stateless Porter stemmer.
///
/// Input is expected to be lowercase ASCII; uppercase letters are treated as
/// consonants. Every call works on its own buffer, so a single stemmer can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Creates a stemmer. Equivalent to `PorterStemmer::default()`.
    pub fn new() -> PorterStemmer {
        PorterStemmer
    }

    /// Returns the stem of `word`.
    ///
    /// Words of two bytes or fewer are returned unchanged. The result is
    /// never longer than the input.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `word` is longer than
    /// [`MAX_WORD_LENGTH`] bytes or contains non-ASCII characters. Overlong
    /// words are rejected rather than truncated.
    pub fn stem(&self, word: &str) -> Result<String> {
        verify_arg!(word, word.len() <= MAX_WORD_LENGTH);
        verify_arg!(word, word.is_ascii());
        if word.len() <= 2 {
            return Ok(word.to_owned());
        }

        let mut w = Word::new(word);
        w.step1a();
        w.step1b();
        w.step1c();
        w.step2();
        w.step3();
        w.step4();
        w.step5a();
        w.step5b();
        Ok(w.into_string())
    }
}

/// Working buffer of a single `stem` call.
struct Word {
    b: Vec<u8>,
}

impl Word {
    fn new(word: &str) -> Word {
        Word {
            b: word.as_bytes().to_vec(),
        }
    }

    fn into_string(self) -> String {
        // Only ASCII bytes are ever written into the buffer.
        self.b.into_iter().map(char::from).collect()
    }

    #[inline]
    fn len(&self) -> usize {
        self.b.len()
    }

    #[inline]
    fn last(&self) -> u8 {
        self.b[self.b.len() - 1]
    }

    /// `y` counts as a vowel when it follows a consonant.
    fn is_vowel(&self, pos: usize) -> bool {
        match self.b[pos] {
            b'a' | b'e' | b'i' | b'o' | b'u' => true,
            b'y' => pos > 0 && !self.is_vowel(pos - 1),
            _ => false,
        }
    }

    /// Number of vowel-run/consonant-run pairs in the first `len` bytes,
    /// ignoring a leading consonant run.
    fn measure(&self, len: usize) -> usize {
        let mut pos = 0;
        while pos < len && !self.is_vowel(pos) {
            pos += 1;
        }
        let mut m = 0;
        while pos < len {
            pos += 1;
            while pos < len && self.is_vowel(pos) {
                pos += 1;
            }
            if pos == len {
                break;
            }
            m += 1;
            pos += 1;
            while pos < len && !self.is_vowel(pos) {
                pos += 1;
            }
        }
        m
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|pos| self.is_vowel(pos))
    }

    fn ends_with(&self, suffix: &str) -> bool {
        self.b.ends_with(suffix.as_bytes())
    }

    fn ends_with_double_consonant(&self) -> bool {
        let len = self.len();
        len > 1 && self.b[len - 1] == self.b[len - 2] && !self.is_vowel(len - 1)
    }

    /// Consonant-vowel-consonant at the end of the first `len` bytes, where
    /// the final consonant is not `w`, `x` or `y`.
    fn ends_with_cvc(&self, len: usize) -> bool {
        if len < 3 || matches!(self.b[len - 1], b'w' | b'x' | b'y') {
            return false;
        }
        !self.is_vowel(len - 1) && self.is_vowel(len - 2) && !self.is_vowel(len - 3)
    }

    fn set_tail(&mut self, stem_len: usize, replacement: &str) {
        self.b.truncate(stem_len);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    fn replace_suffix(&mut self, suffix: &str, replacement: &str) -> bool {
        if !self.ends_with(suffix) {
            return false;
        }
        self.set_tail(self.len() - suffix.len(), replacement);
        true
    }

    /// Finds the first rule whose suffix matches and applies it if the stem
    /// in front of the suffix has a measure above `min_measure`. A matching
    /// suffix ends the search even when the measure is too small.
    fn apply_first(&mut self, rules: &[Rule], min_measure: usize) {
        let Some(&(suffix, replacement)) = rules.iter().find(|(suffix, _)| self.ends_with(suffix))
        else {
            return;
        };
        let stem_len = self.len() - suffix.len();
        if self.measure(stem_len) > min_measure {
            self.set_tail(stem_len, replacement);
        }
    }

    /// Plurals.
    fn step1a(&mut self) {
        if self.last() != b's' {
            return;
        }
        let _ = self.replace_suffix("sses", "ss")
            || self.replace_suffix("ies", "i")
            || self.ends_with("ss")
            || self.replace_suffix("s", "");
    }

    /// Past tense and progressive forms.
    fn step1b(&mut self) {
        if self.ends_with("eed") {
            let stem_len = self.len() - 3;
            if self.measure(stem_len) > 0 {
                self.set_tail(stem_len, "ee");
            }
            return;
        }

        let stripped = self.strip_after_vowel("ed") || self.strip_after_vowel("ing");
        if !stripped || self.len() < 2 {
            return;
        }
        if self.replace_suffix("at", "ate")
            || self.replace_suffix("bl", "ble")
            || self.replace_suffix("iz", "ize")
        {
            return;
        }
        if self.ends_with_double_consonant() {
            if !matches!(self.last(), b'l' | b's' | b'z') {
                self.b.pop();
            }
        } else if self.measure(self.len()) == 1 && self.ends_with_cvc(self.len()) {
            self.b.push(b'e');
        }
    }

    /// Removes `suffix` if the stem in front of it contains a vowel.
    fn strip_after_vowel(&mut self, suffix: &str) -> bool {
        if !self.ends_with(suffix) {
            return false;
        }
        let stem_len = self.len() - suffix.len();
        if !self.has_vowel(stem_len) {
            return false;
        }
        self.b.truncate(stem_len);
        true
    }

    fn step1c(&mut self) {
        let len = self.len();
        if len > 1 && self.last() == b'y' && self.has_vowel(len - 1) {
            self.b[len - 1] = b'i';
        }
    }

    /// Double suffixes mapped to single ones, keyed by the penultimate letter.
    fn step2(&mut self) {
        if self.len() < 3 {
            return;
        }
        let rules: &[Rule] = match self.b[self.len() - 2] {
            b'a' => &[("ational", "ate"), ("tional", "tion")],
            b'c' => &[("enci", "ence"), ("anci", "ance")],
            b'e' => &[("izer", "ize")],
            b'l' => &[
                ("bli", "ble"),
                ("alli", "al"),
                ("entli", "ent"),
                ("eli", "e"),
                ("ousli", "ous"),
            ],
            b'o' => &[("ization", "ize"), ("ation", "ate"), ("ator", "ate")],
            b's' => &[
                ("alism", "al"),
                ("iveness", "ive"),
                ("fulness", "ful"),
                ("ousness", "ous"),
            ],
            b't' => &[("aliti", "al"), ("iviti", "ive"), ("biliti", "ble")],
            b'g' => &[("logi", "log")],
            _ => return,
        };
        self.apply_first(rules, 0);
    }

    /// -ic-, -full, -ness and similar, keyed by the last letter.
    fn step3(&mut self) {
        if self.len() < 3 {
            return;
        }
        let rules: &[Rule] = match self.last() {
            b'e' => &[("icate", "ic"), ("ative", ""), ("alize", "al")],
            b'i' => &[("iciti", "ic")],
            b'l' => &[("ical", "ic"), ("ful", "")],
            b's' => &[("ness", "")],
            _ => return,
        };
        self.apply_first(rules, 0);
    }

    /// Strips residual suffixes from stems with `m > 1`, keyed by the
    /// penultimate letter.
    fn step4(&mut self) {
        let len = self.len();
        if len < 2 {
            return;
        }
        let rules: &[Rule] = match self.b[len - 2] {
            b'a' => &[("al", "")],
            b'c' => &[("ance", ""), ("ence", "")],
            b'e' => &[("er", "")],
            b'i' => &[("ic", "")],
            b'l' => &[("able", ""), ("ible", "")],
            b'n' => &[("ant", ""), ("ement", ""), ("ment", ""), ("ent", "")],
            b'o' if len >= 4 && matches!(self.b[len - 4], b's' | b't') && self.ends_with("ion") => {
                &[("ion", "")]
            }
            b'o' => &[("ou", "")],
            b's' => &[("ism", "")],
            b't' => &[("ate", ""), ("iti", "")],
            b'u' => &[("ous", "")],
            b'v' => &[("ive", "")],
            b'z' => &[("ize", "")],
            _ => return,
        };
        self.apply_first(rules, 1);
    }

    fn step5a(&mut self) {
        let len = self.len();
        if len <= 2 || self.last() != b'e' {
            return;
        }
        let m = self.measure(len - 1);
        if m > 1 || (m == 1 && !self.ends_with_cvc(len - 1)) {
            self.b.pop();
        }
    }

    fn step5b(&mut self) {
        if self.len() >= 5
            && self.last() == b'l'
            && self.ends_with_double_consonant()
            && self.measure(self.len()) > 1
        {
            self.b.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(word: &str) -> String {
        PorterStemmer::new().stem(word).unwrap()
    }

    #[test]
    fn test_canonical_vectors() {
        let vectors = [
            ("sensibility", "sensibl"),
            ("replacement", "replac"),
            ("irritant", "irrit"),
            ("adjustment", "adjust"),
            ("dependent", "depend"),
            ("adoption", "adopt"),
            ("communism", "commun"),
            ("activate", "activ"),
            ("angularity", "angular"),
            ("homologous", "homolog"),
            ("effective", "effect"),
            ("bowdlerize", "bowdler"),
            ("rate", "rate"),
            ("cease", "ceas"),
            ("sky", "sky"),
            ("roll", "roll"),
            ("generalization", "gener"),
        ];
        for (word, expected) in vectors {
            assert_eq!(stem(word), expected, "stem({word})");
        }
    }

    #[test]
    fn test_step1a_plurals() {
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("caress"), "caress");
        assert_eq!(stem("cats"), "cat");
    }

    #[test]
    fn test_step1b_verb_forms() {
        assert_eq!(stem("feed"), "feed");
        assert_eq!(stem("agreed"), "agre");
        assert_eq!(stem("plastered"), "plaster");
        assert_eq!(stem("bled"), "bled");
        assert_eq!(stem("motoring"), "motor");
        assert_eq!(stem("sing"), "sing");
        assert_eq!(stem("conflated"), "conflat");
        assert_eq!(stem("troubled"), "troubl");
        assert_eq!(stem("sized"), "size");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("falling"), "fall");
        assert_eq!(stem("hissing"), "hiss");
        assert_eq!(stem("fizzed"), "fizz");
        assert_eq!(stem("failing"), "fail");
        assert_eq!(stem("filing"), "file");
    }

    #[test]
    fn test_step1c_terminal_y() {
        assert_eq!(stem("happy"), "happi");
        assert_eq!(stem("sky"), "sky");
    }

    #[test]
    fn test_measure_gated_suffixes() {
        assert_eq!(stem("relational"), "relat");
        assert_eq!(stem("conditional"), "condit");
        assert_eq!(stem("valenci"), "valenc");
        assert_eq!(stem("digitizer"), "digit");
        assert_eq!(stem("triplicate"), "triplic");
        assert_eq!(stem("hopeful"), "hope");
        assert_eq!(stem("goodness"), "good");
        assert_eq!(stem("revival"), "reviv");
        assert_eq!(stem("allowance"), "allow");
        assert_eq!(stem("controll"), "control");
        assert_eq!(stem("probate"), "probat");
    }

    #[test]
    fn test_ion_requires_s_or_t() {
        assert_eq!(stem("adoption"), "adopt");
        assert_eq!(stem("decision"), "decis");
        assert_eq!(stem("onion"), "onion");
    }

    #[test]
    fn test_short_words_unchanged() {
        assert_eq!(stem(""), "");
        assert_eq!(stem("a"), "a");
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("as"), "as");
    }

    #[test]
    fn test_overlong_input_is_rejected() {
        let stemmer = PorterStemmer::new();
        let word = "a".repeat(MAX_WORD_LENGTH);
        assert!(stemmer.stem(&word).is_ok());

        let word = "a".repeat(MAX_WORD_LENGTH + 1);
        let err = stemmer.stem(&word).unwrap_err();
        assert!(err.is_invalid_arg());
    }

    #[test]
    fn test_non_ascii_input_is_rejected() {
        let err = PorterStemmer::new().stem("naïve").unwrap_err();
        assert!(err.is_invalid_arg());
    }

    #[test]
    fn test_random_words_never_grow() {
        let stemmer = PorterStemmer::new();
        let mut rng = fastrand::Rng::with_seed(1980);
        for _ in 0..2000 {
            let len = rng.usize(0..=MAX_WORD_LENGTH);
            let word: String = (0..len).map(|_| rng.lowercase()).collect();
            let stemmed = stemmer.stem(&word).unwrap();
            assert!(stemmed.len() <= word.len(), "{word} -> {stemmed}");
        }
        // Vowel-poor and suffix-heavy shapes.
        for word in ["yyyyyyyyyy", "sssssss", "ingingingeded", "eeeeeed", "ationalization"] {
            let stemmed = stemmer.stem(word).unwrap();
            assert!(stemmed.len() <= word.len(), "{word} -> {stemmed}");
        }
    }
}
