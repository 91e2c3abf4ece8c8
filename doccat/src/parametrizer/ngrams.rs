use log::info;

use crate::corpus::Document;
use crate::dictionary::{check_terms, term_counts, DictionaryBuilder};
use crate::errors::{DoccatError, Result};
use crate::utils::SectionReader;

const TFIDF_PREFIX: &str = "**_tfidf:";
const N_PREFIX: &str = "**_n:";
const GRAMS_MARKER: &str = "**_grams:";
const IDF_MARKER: &str = "**_idf:";

/// Word n-grams weighted by raw counts, optionally multiplied by `ln(1 + n_documents / df)`.
#[derive(Clone, Debug, PartialEq)]
pub struct NGrams {
    grams: Vec<String>,
    n: usize,
    idf: Option<Vec<f64>>,
}

impl NGrams {
    /// Builds the n-gram dictionary from a training corpus.
    ///
    /// # Arguments
    ///
    /// * `documents` - Training documents.
    /// * `builder` - A dictionary builder. Its n-gram size becomes the size of the grams.
    /// * `tfidf` - Weights counts by IDF values if `true`.
    pub fn initialize(documents: &[Document], builder: &DictionaryBuilder, tfidf: bool) -> Self {
        let vocabulary = builder.build(documents);
        let idf = tfidf.then(|| {
            info!("Calculating IDF values");
            let n_documents = documents.len() as f64;
            vocabulary
                .count_document_frequencies(documents)
                .into_iter()
                .map(|df| {
                    debug_assert!(df != 0, "a dictionary gram must occur in a document");
                    (1.0 + n_documents / df as f64).ln()
                })
                .collect()
        });
        Self {
            grams: vocabulary.into_terms(),
            n: builder.ngram_size(),
            idf,
        }
    }

    pub fn parametrize(&self, document: &Document) -> Vec<f64> {
        let mut vector = vec![0.0; self.grams.len()];
        for (idx, count) in term_counts(&self.grams, &document.words, self.n) {
            vector[idx] = match &self.idf {
                Some(idf) => count as f64 * idf[idx],
                None => count as f64,
            };
        }
        vector
    }

    /// Gets the sorted grams. Words in a gram are joined by a single space.
    pub fn grams(&self) -> &[String] {
        &self.grams
    }

    /// Gets the number of words in a gram.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Gets IDF values if counts are weighted.
    pub fn idf(&self) -> Option<&[f64]> {
        self.idf.as_deref()
    }

    pub(crate) fn export_into(&self, lines: &mut Vec<String>) {
        lines.push(format!("{TFIDF_PREFIX}{}", self.idf.is_some()));
        lines.push(format!("{N_PREFIX}{}", self.n));
        lines.push(GRAMS_MARKER.to_string());
        lines.extend(self.grams.iter().cloned());
        if let Some(idf) = &self.idf {
            lines.push(IDF_MARKER.to_string());
            lines.extend(idf.iter().map(f64::to_string));
        }
    }

    pub(crate) fn load(rdr: &mut SectionReader) -> Result<Self> {
        let tfidf = match rdr.value(TFIDF_PREFIX)? {
            "true" => true,
            "false" => false,
            v => {
                return Err(DoccatError::invalid_model(format!(
                    "invalid tfidf flag: {v}"
                )))
            }
        };
        let n: usize = rdr.value(N_PREFIX)?.trim().parse()?;
        if n == 0 {
            return Err(DoccatError::invalid_model("n-gram size must be at least 1"));
        }
        rdr.expect(GRAMS_MARKER)?;
        let grams = rdr.take_until(IDF_MARKER).to_vec();
        check_terms(&grams)?;

        let idf = if tfidf {
            rdr.expect(IDF_MARKER)?;
            let mut idf: Vec<f64> = Vec::with_capacity(grams.len());
            for line in rdr.rest() {
                idf.push(line.trim().parse()?);
            }
            if idf.len() != grams.len() {
                return Err(DoccatError::invalid_model(format!(
                    "{} grams but {} IDF values",
                    grams.len(),
                    idf.len()
                )));
            }
            Some(idf)
        } else {
            if !rdr.is_end() {
                return Err(DoccatError::invalid_model(
                    "IDF values given for unweighted n-grams",
                ));
            }
            None
        };
        Ok(Self { grams, n, idf })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Document> {
        vec![
            Document::from_labelled_text("a", "the black cat sat"),
            Document::from_labelled_text("a", "the black cat ran"),
            Document::from_labelled_text("a", "a black cat"),
            Document::from_labelled_text("b", "the red fish swam"),
        ]
    }

    fn builder() -> DictionaryBuilder {
        DictionaryBuilder::new(2).unwrap().min_document_frequency(1)
    }

    #[test]
    fn test_initialize() {
        let ngrams = NGrams::initialize(&corpus(), &builder(), false);

        assert_eq!(&["black cat", "the black"], ngrams.grams());
        assert_eq!(2, ngrams.n());
        assert_eq!(None, ngrams.idf());
    }

    #[test]
    fn test_initialize_tfidf() {
        let ngrams = NGrams::initialize(&corpus(), &builder(), true);

        // 4 documents: "black cat" in 3, "the black" in 2.
        let idf = ngrams.idf().unwrap();
        assert_eq!((1.0 + 4.0 / 3.0f64).ln(), idf[0]);
        assert_eq!(3f64.ln(), idf[1]);
    }

    #[test]
    fn test_parametrize_counts() {
        let ngrams = NGrams::initialize(&corpus(), &builder(), false);
        let d = Document::from_text("The black cat and the black cat");

        assert_eq!(vec![2.0, 2.0], ngrams.parametrize(&d));
    }

    #[test]
    fn test_parametrize_last_gram_included() {
        let ngrams = NGrams::initialize(&corpus(), &builder(), false);

        assert_eq!(vec![1.0, 0.0], ngrams.parametrize(&Document::from_text("black cat")));
    }

    #[test]
    fn test_parametrize_tfidf() {
        let ngrams = NGrams::initialize(&corpus(), &builder(), true);
        let vector = ngrams.parametrize(&Document::from_text("the black cat, black cat"));

        assert_eq!(2.0 * (1.0 + 4.0 / 3.0f64).ln(), vector[0]);
        assert_eq!(3f64.ln(), vector[1]);
    }

    #[test]
    fn test_parametrize_short_document() {
        let ngrams = NGrams::initialize(&corpus(), &builder(), true);

        assert_eq!(vec![0.0, 0.0], ngrams.parametrize(&Document::from_text("cat")));
        assert_eq!(vec![0.0, 0.0], ngrams.parametrize(&Document::from_text("")));
    }

    #[test]
    fn test_load_invalid_flag() {
        let lines: Vec<String> = ["**_tfidf:yes", "**_n:2", "**_grams:"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut rdr = SectionReader::new(&lines);

        assert_eq!(
            "InvalidModelError: invalid tfidf flag: yes",
            &NGrams::load(&mut rdr).err().unwrap().to_string()
        );
    }

    #[test]
    fn test_load_unexpected_idf() {
        let lines: Vec<String> = ["**_tfidf:false", "**_n:2", "**_grams:", "a b", "**_idf:", "1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut rdr = SectionReader::new(&lines);

        assert!(NGrams::load(&mut rdr).is_err());
    }
}
