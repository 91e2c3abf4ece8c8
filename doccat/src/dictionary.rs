use hashbrown::{HashMap, HashSet};
use log::{debug, info};

use crate::corpus::Document;
use crate::errors::{DoccatError, Result};
use crate::stop_words;

/// Stop words removed from a vocabulary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StopWords {
    /// Keeps every word.
    #[default]
    None,

    /// Removes the built-in list of Czech function words.
    Czech,

    /// Removes the given words.
    Custom(Vec<String>),
}

impl StopWords {
    fn to_set(&self) -> HashSet<String> {
        match self {
            Self::None => HashSet::new(),
            Self::Czech => stop_words::CZECH.iter().map(|w| w.to_string()).collect(),
            Self::Custom(words) => words.iter().cloned().collect(),
        }
    }
}

/// Generates every n-gram of `words` joined by a single space.
///
/// Yields nothing if `words` is shorter than `n`.
pub(crate) fn ngrams(words: &[String], n: usize) -> impl Iterator<Item = String> + '_ {
    words.windows(n).map(|window| window.join(" "))
}

/// Looks up the position of `term` in a sorted term list.
pub(crate) fn term_index(terms: &[String], term: &str) -> Option<usize> {
    terms.binary_search_by(|probe| probe.as_str().cmp(term)).ok()
}

/// Checks that restored terms are strictly increasing, so that binary search is valid.
pub(crate) fn check_terms(terms: &[String]) -> Result<()> {
    if terms.windows(2).any(|w| w[0] >= w[1]) {
        return Err(DoccatError::invalid_model("terms are not sorted"));
    }
    Ok(())
}

/// Counts the occurrences of vocabulary terms in a document.
///
/// Returns pairs of a term index and its count. N-grams missing in `terms` are skipped.
pub(crate) fn term_counts(terms: &[String], words: &[String], n: usize) -> Vec<(usize, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for gram in ngrams(words, n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter_map(|(gram, count)| term_index(terms, &gram).map(|idx| (idx, count)))
        .collect()
}

fn is_blank(term: &str) -> bool {
    term.chars().all(char::is_whitespace)
}

/// Sorted vocabulary with document frequencies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    document_frequency: Vec<usize>,
    ngram_size: usize,
}

impl Vocabulary {
    /// Gets the sorted terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Gets the number of documents containing each term, parallel to [`Self::terms()`].
    pub fn document_frequencies(&self) -> &[usize] {
        &self.document_frequency
    }

    /// Gets the number of words in a term.
    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    /// Gets the vector index of a term.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        term_index(&self.terms, term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Counts the number of documents containing each term with a fresh pass over `documents`.
    ///
    /// # Returns
    ///
    /// Document frequencies parallel to [`Self::terms()`].
    pub fn count_document_frequencies(&self, documents: &[Document]) -> Vec<usize> {
        let mut frequencies = vec![0; self.terms.len()];
        for document in documents {
            let seen: HashSet<String> = ngrams(&document.words, self.ngram_size).collect();
            for gram in seen {
                if let Some(idx) = self.index_of(&gram) {
                    frequencies[idx] += 1;
                }
            }
        }
        frequencies
    }

    pub(crate) fn into_terms(self) -> Vec<String> {
        self.terms
    }
}

/// Builder of a [`Vocabulary`].
///
/// # Examples
///
/// ```
/// use doccat::{DictionaryBuilder, Document};
///
/// let docs = vec![
///     Document::from_labelled_text("a", "cat dog cat"),
///     Document::from_labelled_text("a", "cat dog"),
///     Document::from_labelled_text("b", "fish 42"),
/// ];
/// let vocab = DictionaryBuilder::new(1)
///     .unwrap()
///     .min_document_frequency(0)
///     .build(&docs);
/// assert_eq!(&["cat", "dog", "fish"], vocab.terms());
/// assert_eq!(&[2, 2, 1], vocab.document_frequencies());
/// ```
#[derive(Clone, Debug)]
pub struct DictionaryBuilder {
    ngram_size: usize,
    min_document_frequency: usize,
    numeric_filter: bool,
    stop_words: HashSet<String>,
}

impl DictionaryBuilder {
    /// Words occurring in this many documents or fewer are dropped by default.
    pub const DEFAULT_MIN_WORD_FREQUENCY: usize = 5;

    /// N-grams (n > 1) occurring in this many documents or fewer are dropped by default.
    pub const DEFAULT_MIN_NGRAM_FREQUENCY: usize = 2;

    /// Creates a new builder.
    ///
    /// # Arguments
    ///
    /// * `ngram_size` - The number of words in a term.
    ///
    /// # Returns
    ///
    /// A builder with the default filters for the given n-gram size: single words that parse as
    /// integers or occur in at most 5 documents are dropped; longer n-grams occurring in at most
    /// 2 documents are dropped.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if `ngram_size` is 0.
    pub fn new(ngram_size: usize) -> Result<Self> {
        if ngram_size == 0 {
            return Err(DoccatError::invalid_argument(
                "ngram_size",
                "must be at least 1",
            ));
        }
        let min_document_frequency = if ngram_size == 1 {
            Self::DEFAULT_MIN_WORD_FREQUENCY
        } else {
            Self::DEFAULT_MIN_NGRAM_FREQUENCY
        };
        Ok(Self {
            ngram_size,
            min_document_frequency,
            numeric_filter: ngram_size == 1,
            stop_words: HashSet::new(),
        })
    }

    /// Drops terms whose document frequency is less than or equal to `threshold`.
    pub fn min_document_frequency(mut self, threshold: usize) -> Self {
        self.min_document_frequency = threshold;
        self
    }

    /// Enables or disables dropping terms that parse as integers.
    pub fn numeric_filter(mut self, enabled: bool) -> Self {
        self.numeric_filter = enabled;
        self
    }

    /// Drops n-grams containing one of the given stop words.
    pub fn stop_words(mut self, stop_words: &StopWords) -> Self {
        self.stop_words = stop_words.to_set();
        self
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    fn keeps(&self, term: &str, frequency: usize) -> bool {
        if frequency <= self.min_document_frequency {
            return false;
        }
        if self.numeric_filter && term.parse::<i32>().is_ok() {
            return false;
        }
        if is_blank(term) {
            return false;
        }
        !term.split(' ').any(|word| self.stop_words.contains(word))
    }

    /// Builds a vocabulary from a training corpus.
    ///
    /// # Arguments
    ///
    /// * `documents` - Training documents.
    ///
    /// # Returns
    ///
    /// A vocabulary sorted in the byte-wise order of terms.
    pub fn build(&self, documents: &[Document]) -> Vocabulary {
        info!("Processing training corpus");
        let mut frequencies: HashMap<String, usize> = HashMap::new();
        for document in documents {
            let seen: HashSet<String> = ngrams(&document.words, self.ngram_size).collect();
            for gram in seen {
                *frequencies.entry(gram).or_insert(0) += 1;
            }
        }
        debug!("# of distinct terms: {}", frequencies.len());

        info!("Creating dictionary");
        let mut entries: Vec<(String, usize)> = frequencies
            .into_iter()
            .filter(|(term, frequency)| self.keeps(term, *frequency))
            .collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        debug!("# of terms after cleaning: {}", entries.len());

        let (terms, document_frequency) = entries.into_iter().unzip();
        Vocabulary {
            terms,
            document_frequency,
            ngram_size: self.ngram_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Document> {
        vec![
            Document::from_labelled_text("a", "the cat and the dog"),
            Document::from_labelled_text("a", "the cat sat 12 times"),
            Document::from_labelled_text("b", "the fish and the bird"),
            Document::from_labelled_text("b", "a fish sat 12 days"),
            Document::from_labelled_text("b", "the bird and the cat"),
            Document::from_labelled_text("a", "ten cats and the dog"),
            Document::from_labelled_text("b", "the end"),
        ]
    }

    #[test]
    fn test_ngrams() {
        let words: Vec<String> = ["a", "b", "c"].iter().map(|w| w.to_string()).collect();

        assert_eq!(vec!["a b", "b c"], ngrams(&words, 2).collect::<Vec<_>>());
        assert_eq!(vec!["a b c"], ngrams(&words, 3).collect::<Vec<_>>());
        assert_eq!(Vec::<String>::new(), ngrams(&words, 4).collect::<Vec<_>>());
    }

    #[test]
    fn test_builder_new_zero() {
        let builder = DictionaryBuilder::new(0);

        assert_eq!(
            "InvalidArgumentError: ngram_size: must be at least 1",
            &builder.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_builder_defaults() {
        let unigram = DictionaryBuilder::new(1).unwrap();
        let bigram = DictionaryBuilder::new(2).unwrap();

        assert_eq!(5, unigram.min_document_frequency);
        assert!(unigram.numeric_filter);
        assert_eq!(2, bigram.min_document_frequency);
        assert!(!bigram.numeric_filter);
    }

    #[test]
    fn test_build_default_threshold() {
        // "the" occurs in 6 documents, everything else in at most 5.
        let vocab = DictionaryBuilder::new(1).unwrap().build(&corpus());

        assert_eq!(&["the"], vocab.terms());
        assert_eq!(&[6], vocab.document_frequencies());
    }

    #[test]
    fn test_build_counts_documents_not_occurrences() {
        let vocab = DictionaryBuilder::new(1)
            .unwrap()
            .min_document_frequency(1)
            .build(&corpus());

        #[rustfmt::skip]
        let expected = vec![
            ("and", 4), ("bird", 2), ("cat", 3), ("dog", 2), ("fish", 2), ("sat", 2), ("the", 6),
        ];
        let actual: Vec<_> = vocab
            .terms()
            .iter()
            .map(String::as_str)
            .zip(vocab.document_frequencies().iter().copied())
            .collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_build_numeric_filter() {
        let with_filter = DictionaryBuilder::new(1)
            .unwrap()
            .min_document_frequency(1)
            .build(&corpus());
        let without_filter = DictionaryBuilder::new(1)
            .unwrap()
            .min_document_frequency(1)
            .numeric_filter(false)
            .build(&corpus());

        assert_eq!(None, with_filter.index_of("12"));
        assert_eq!(Some(0), without_filter.index_of("12"));
    }

    #[test]
    fn test_build_stop_words() {
        let vocab = DictionaryBuilder::new(1)
            .unwrap()
            .min_document_frequency(1)
            .stop_words(&StopWords::Custom(vec!["the".into(), "and".into()]))
            .build(&corpus());

        assert_eq!(&["bird", "cat", "dog", "fish", "sat"], vocab.terms());
    }

    #[test]
    fn test_build_czech_stop_words() {
        let docs = vec![
            Document::from_labelled_text("a", "pes a kočka"),
            Document::from_labelled_text("a", "pes nebo kočka"),
        ];
        let vocab = DictionaryBuilder::new(1)
            .unwrap()
            .min_document_frequency(0)
            .stop_words(&StopWords::Czech)
            .build(&docs);

        assert_eq!(&["a", "kočka", "pes"], vocab.terms());
    }

    #[test]
    fn test_build_bigrams() {
        let vocab = DictionaryBuilder::new(2).unwrap().build(&corpus());

        assert_eq!(&["and the", "the cat"], vocab.terms());
        assert_eq!(&[4, 3], vocab.document_frequencies());
        assert_eq!(2, vocab.ngram_size());
    }

    #[test]
    fn test_build_drops_blank_terms() {
        let docs = vec![Document::from_labelled_text("a", ""); 3];
        let vocab = DictionaryBuilder::new(1)
            .unwrap()
            .min_document_frequency(0)
            .build(&docs);

        assert!(vocab.is_empty());
    }

    #[test]
    fn test_build_sorted_and_deterministic() {
        let builder = DictionaryBuilder::new(1).unwrap().min_document_frequency(0);
        let first = builder.build(&corpus());
        let second = builder.build(&corpus());

        assert!(first.terms().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_count_document_frequencies() {
        let docs = corpus();
        let vocab = DictionaryBuilder::new(2).unwrap().build(&docs);

        assert_eq!(
            vocab.document_frequencies(),
            &vocab.count_document_frequencies(&docs)[..]
        );
    }

    #[test]
    fn test_term_counts() {
        let terms: Vec<String> = ["cat", "dog"].iter().map(|w| w.to_string()).collect();
        let words: Vec<String> = ["cat", "fish", "cat"].iter().map(|w| w.to_string()).collect();

        assert_eq!(vec![(0, 2)], term_counts(&terms, &words, 1));
    }
}
