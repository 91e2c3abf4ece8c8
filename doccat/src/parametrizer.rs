//! Conversion of documents into feature vectors.

mod bag_of_words;
mod bag_of_words_tfidf;
mod ngrams;

use std::fmt;
use std::str::FromStr;

use log::info;

use crate::corpus::Document;
use crate::dictionary::{DictionaryBuilder, StopWords};
use crate::errors::{DoccatError, Result};
use crate::utils::{SectionReader, PARAMETRIZER_PREFIX};

pub use bag_of_words::BagOfWords;
pub use bag_of_words_tfidf::BagOfWordsTfIdf;
pub use ngrams::NGrams;

/// Parametrizer type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParametrizerKind {
    /// Bag of words with raw term frequencies.
    BagOfWords,

    /// Bag of words with normalized TF-IDF weights.
    BagOfWordsTfIdf,

    /// Word n-grams.
    NGrams,
}

impl ParametrizerKind {
    /// Gets the identifier used on the command line and in model files.
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::BagOfWords => "bagofwords",
            Self::BagOfWordsTfIdf => "tfidf",
            Self::NGrams => "ngrams",
        }
    }
}

impl fmt::Display for ParametrizerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for ParametrizerKind {
    type Err = DoccatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bagofwords" => Ok(Self::BagOfWords),
            "tfidf" => Ok(Self::BagOfWordsTfIdf),
            "ngrams" => Ok(Self::NGrams),
            _ => Err(DoccatError::invalid_argument(
                "parametrizer",
                format!("unknown parametrizer: {s}"),
            )),
        }
    }
}

/// Settings of a parametrizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParametrizerConfig {
    /// Parametrizer type.
    pub kind: ParametrizerKind,

    /// Number of words in a gram. Used only by [`ParametrizerKind::NGrams`].
    pub ngram_size: usize,

    /// Weights n-gram counts by IDF values. Used only by [`ParametrizerKind::NGrams`].
    pub ngram_tfidf: bool,

    /// Overrides the default minimum document frequency of the dictionary.
    pub min_document_frequency: Option<usize>,

    /// Overrides whether numbers are dropped from the dictionary.
    pub numeric_filter: Option<bool>,

    /// Stop words dropped from the dictionary.
    pub stop_words: StopWords,
}

impl Default for ParametrizerConfig {
    fn default() -> Self {
        Self {
            kind: ParametrizerKind::BagOfWords,
            ngram_size: 2,
            ngram_tfidf: false,
            min_document_frequency: None,
            numeric_filter: None,
            stop_words: StopWords::None,
        }
    }
}

impl ParametrizerConfig {
    fn dictionary_builder(&self, ngram_size: usize) -> Result<DictionaryBuilder> {
        let mut builder = DictionaryBuilder::new(ngram_size)?.stop_words(&self.stop_words);
        if let Some(threshold) = self.min_document_frequency {
            builder = builder.min_document_frequency(threshold);
        }
        if let Some(enabled) = self.numeric_filter {
            builder = builder.numeric_filter(enabled);
        }
        Ok(builder)
    }
}

/// Trained parametrizer.
#[derive(Clone, Debug, PartialEq)]
pub enum Parametrizer {
    BagOfWords(BagOfWords),
    BagOfWordsTfIdf(BagOfWordsTfIdf),
    NGrams(NGrams),
}

impl Parametrizer {
    /// Builds a parametrizer from a training corpus.
    ///
    /// # Arguments
    ///
    /// * `config` - Parametrizer settings.
    /// * `documents` - Training documents.
    ///
    /// # Returns
    ///
    /// A parametrizer ready to convert documents.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if the n-gram size is 0.
    pub fn initialize(config: &ParametrizerConfig, documents: &[Document]) -> Result<Self> {
        info!("Initializing parametrizer: {}", config.kind);
        let parametrizer = match config.kind {
            ParametrizerKind::BagOfWords => Self::BagOfWords(BagOfWords::initialize(
                documents,
                &config.dictionary_builder(1)?,
            )?),
            ParametrizerKind::BagOfWordsTfIdf => Self::BagOfWordsTfIdf(
                BagOfWordsTfIdf::initialize(documents, &config.dictionary_builder(1)?)?,
            ),
            ParametrizerKind::NGrams => Self::NGrams(NGrams::initialize(
                documents,
                &config.dictionary_builder(config.ngram_size)?,
                config.ngram_tfidf,
            )),
        };
        info!("Vector length: {}", parametrizer.vector_length());
        Ok(parametrizer)
    }

    /// Converts a document into a feature vector of [`Self::vector_length()`] elements.
    pub fn parametrize(&self, document: &Document) -> Vec<f64> {
        match self {
            Self::BagOfWords(p) => p.parametrize(document),
            Self::BagOfWordsTfIdf(p) => p.parametrize(document),
            Self::NGrams(p) => p.parametrize(document),
        }
    }

    /// Gets the sorted terms. Position `i` of a feature vector corresponds to the `i`-th term.
    pub fn terms(&self) -> &[String] {
        match self {
            Self::BagOfWords(p) => p.words(),
            Self::BagOfWordsTfIdf(p) => p.words(),
            Self::NGrams(p) => p.grams(),
        }
    }

    /// Gets IDF values parallel to [`Self::terms()`] if the parametrizer uses them.
    pub fn idf(&self) -> Option<&[f64]> {
        match self {
            Self::BagOfWords(_) => None,
            Self::BagOfWordsTfIdf(p) => Some(p.idf()),
            Self::NGrams(p) => p.idf(),
        }
    }

    pub fn vector_length(&self) -> usize {
        self.terms().len()
    }

    pub const fn kind(&self) -> ParametrizerKind {
        match self {
            Self::BagOfWords(_) => ParametrizerKind::BagOfWords,
            Self::BagOfWordsTfIdf(_) => ParametrizerKind::BagOfWordsTfIdf,
            Self::NGrams(_) => ParametrizerKind::NGrams,
        }
    }

    /// Exports the parametrizer as lines of the model format.
    pub fn export(&self) -> Vec<String> {
        let mut lines = vec![format!("{PARAMETRIZER_PREFIX}{}", self.kind())];
        match self {
            Self::BagOfWords(p) => p.export_into(&mut lines),
            Self::BagOfWordsTfIdf(p) => p.export_into(&mut lines),
            Self::NGrams(p) => p.export_into(&mut lines),
        }
        lines
    }

    /// Restores a parametrizer from lines of the model format.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidModel`] will be returned if the lines are malformed.
    pub fn load(lines: &[String]) -> Result<Self> {
        let mut rdr = SectionReader::new(lines);
        let identifier = rdr.value(PARAMETRIZER_PREFIX)?;
        let kind: ParametrizerKind = identifier
            .parse()
            .map_err(|_| DoccatError::invalid_model(format!("unknown parametrizer: {identifier}")))?;
        Ok(match kind {
            ParametrizerKind::BagOfWords => Self::BagOfWords(BagOfWords::load(&mut rdr)?),
            ParametrizerKind::BagOfWordsTfIdf => {
                Self::BagOfWordsTfIdf(BagOfWordsTfIdf::load(&mut rdr)?)
            }
            ParametrizerKind::NGrams => Self::NGrams(NGrams::load(&mut rdr)?),
        })
    }
}
