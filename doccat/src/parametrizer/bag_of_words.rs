use crate::corpus::Document;
use crate::dictionary::{check_terms, term_counts, DictionaryBuilder};
use crate::errors::{DoccatError, Result};
use crate::utils::SectionReader;

const WORDS_MARKER: &str = "**_words:";

/// Bag of words weighted by raw term frequencies.
#[derive(Clone, Debug, PartialEq)]
pub struct BagOfWords {
    words: Vec<String>,
}

impl BagOfWords {
    /// Builds the word dictionary from a training corpus.
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
        Ok(Self {
            words: builder.build(documents).into_terms(),
        })
    }

    /// Counts every dictionary word in the document.
    pub fn parametrize(&self, document: &Document) -> Vec<f64> {
        let mut vector = vec![0.0; self.words.len()];
        for (idx, count) in term_counts(&self.words, &document.words, 1) {
            vector[idx] = count as f64;
        }
        vector
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub(crate) fn export_into(&self, lines: &mut Vec<String>) {
        lines.push(WORDS_MARKER.to_string());
        lines.extend(self.words.iter().cloned());
    }

    pub(crate) fn load(rdr: &mut SectionReader) -> Result<Self> {
        rdr.expect(WORDS_MARKER)?;
        let words = rdr.rest().to_vec();
        check_terms(&words)?;
        Ok(Self { words })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Document> {
        vec![
            Document::from_labelled_text("a", "cat dog cat"),
            Document::from_labelled_text("a", "cat dog cat"),
            Document::from_labelled_text("b", "fish fish bird"),
            Document::from_labelled_text("b", "fish fish bird"),
        ]
    }

    #[test]
    fn test_initialize() {
        let builder = DictionaryBuilder::new(1).unwrap().min_document_frequency(0);
        let bow = BagOfWords::initialize(&corpus(), &builder).unwrap();

        assert_eq!(&["bird", "cat", "dog", "fish"], bow.words());
    }

    #[test]
    fn test_initialize_rejects_ngrams() {
        let builder = DictionaryBuilder::new(2).unwrap();
        let bow = BagOfWords::initialize(&corpus(), &builder);

        assert_eq!(
            "InvalidArgumentError: builder: bag of words requires an n-gram size of 1",
            &bow.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_parametrize() {
        let builder = DictionaryBuilder::new(1).unwrap().min_document_frequency(0);
        let bow = BagOfWords::initialize(&corpus(), &builder).unwrap();

        assert_eq!(
            vec![0.0, 2.0, 0.0, 1.0],
            bow.parametrize(&Document::from_text("Cat, cat and a fish"))
        );
        assert_eq!(vec![0.0; 4], bow.parametrize(&Document::from_text("")));
    }

    #[test]
    fn test_load_unsorted_words() {
        let lines: Vec<String> = ["**_words:", "dog", "cat"].iter().map(|s| s.to_string()).collect();
        let mut rdr = SectionReader::new(&lines);

        assert_eq!(
            "InvalidModelError: terms are not sorted",
            &BagOfWords::load(&mut rdr).err().unwrap().to_string()
        );
    }
}
