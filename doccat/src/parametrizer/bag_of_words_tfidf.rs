use log::info;

use crate::corpus::Document;
use crate::dictionary::{check_terms, term_counts, DictionaryBuilder};
use crate::errors::{DoccatError, Result};
use crate::utils::SectionReader;

const WORDS_MARKER: &str = "**_words:";
const IDF_MARKER: &str = "**_idf:";

/// Bag of words weighted by normalized term frequencies and inverse document frequencies.
///
/// The weight of a word is `count / n_words * (1 + ln(n_documents / document_frequency))`.
#[derive(Clone, Debug, PartialEq)]
pub struct BagOfWordsTfIdf {
    words: Vec<String>,
    idf: Vec<f64>,
}

impl BagOfWordsTfIdf {
    /// Builds the word dictionary and IDF values from a training corpus.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if `builder` does not produce single
    /// words.
    pub fn initialize(documents: &[Document], builder: &DictionaryBuilder) -> Result<Self> {
        if builder.ngram_size() != 1 {
            return Err(DoccatError::invalid_argument(
                "builder",
                "bag of words requires an n-gram size of 1",
            ));
        }
        let vocabulary = builder.build(documents);

        info!("Calculating IDF values");
        let n_documents = documents.len() as f64;
        let idf = vocabulary
            .count_document_frequencies(documents)
            .into_iter()
            .map(|df| {
                debug_assert!(df != 0, "a dictionary word must occur in a document");
                1.0 + (n_documents / df as f64).ln()
            })
            .collect();
        Ok(Self {
            words: vocabulary.into_terms(),
            idf,
        })
    }

    pub fn parametrize(&self, document: &Document) -> Vec<f64> {
        let mut vector = vec![0.0; self.words.len()];
        let n_words = document.words.len() as f64;
        for (idx, count) in term_counts(&self.words, &document.words, 1) {
            vector[idx] = count as f64 / n_words * self.idf[idx];
        }
        vector
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Gets IDF values parallel to [`Self::words()`].
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub(crate) fn export_into(&self, lines: &mut Vec<String>) {
        lines.push(WORDS_MARKER.to_string());
        lines.extend(self.words.iter().cloned());
        lines.push(IDF_MARKER.to_string());
        lines.extend(self.idf.iter().map(f64::to_string));
    }

    pub(crate) fn load(rdr: &mut SectionReader) -> Result<Self> {
        rdr.expect(WORDS_MARKER)?;
        let words = rdr.take_until(IDF_MARKER).to_vec();
        check_terms(&words)?;
        rdr.expect(IDF_MARKER)?;
        let mut idf: Vec<f64> = Vec::with_capacity(words.len());
        for line in rdr.rest() {
            idf.push(line.trim().parse()?);
        }
        if idf.len() != words.len() {
            return Err(DoccatError::invalid_model(format!(
                "{} words but {} IDF values",
                words.len(),
                idf.len()
            )));
        }
        Ok(Self { words, idf })
    }
}
