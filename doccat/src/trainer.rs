use log::{debug, info};

use crate::classifier::{Classifier, ClassifierConfig};
use crate::corpus::{Classes, Document};
use crate::errors::{DoccatError, Result};
use crate::model::Model;
use crate::parametrizer::{Parametrizer, ParametrizerConfig};

/// Training settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainerConfig {
    pub parametrizer: ParametrizerConfig,
    pub classifier: ClassifierConfig,
}

/// Trainer of document classification models.
///
/// # Examples
///
/// ```
/// use doccat::{ClassifierKind, Classes, Document, Trainer, TrainerConfig};
///
/// let documents = vec![
///     Document::from_labelled_text("pets", "cat dog cat"),
///     Document::from_labelled_text("pets", "dog cat dog"),
///     Document::from_labelled_text("sea", "fish fish whale"),
///     Document::from_labelled_text("sea", "whale fish"),
/// ];
/// let mut config = TrainerConfig::default();
/// config.parametrizer.min_document_frequency = Some(0);
/// config.classifier.kind = ClassifierKind::KNearestNeighbours;
/// config.classifier.k = 1;
///
/// let trainer = Trainer::new(config);
/// let model = trainer.train(&Classes::new(["pets", "sea"]), &documents).unwrap();
///
/// assert_eq!("pets", model.classify_text("My dog").unwrap());
/// ```
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub const fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Trains a model.
    ///
    /// # Arguments
    ///
    /// * `classes` - Class table.
    /// * `documents` - Labelled training documents.
    ///
    /// # Returns
    ///
    /// A trained model.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if `documents` is empty or the
    /// settings cannot be applied to the corpus.
    pub fn train(&self, classes: &Classes, documents: &[Document]) -> Result<Model> {
        if documents.is_empty() {
            return Err(DoccatError::invalid_argument(
                "documents",
                "no training document is given",
            ));
        }
        info!("Training on {} documents", documents.len());
        let parametrizer = Parametrizer::initialize(&self.config.parametrizer, documents)?;

        info!("Parametrizing documents");
        let vectors: Vec<Vec<f64>> = documents
            .iter()
            .map(|document| parametrizer.parametrize(document))
            .collect();
        debug!("Vector length: {}", parametrizer.vector_length());

        let classifier = Classifier::train(&self.config.classifier, &vectors, documents, classes)?;
        Model::new(parametrizer, classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::classifier::ClassifierKind;
    use crate::parametrizer::ParametrizerKind;

    fn documents() -> Vec<Document> {
        vec![
            Document::from_labelled_text("a", "cat dog cat"),
            Document::from_labelled_text("a", "cat dog cat"),
            Document::from_labelled_text("b", "fish fish bird"),
            Document::from_labelled_text("b", "fish fish bird"),
        ]
    }

    fn config(parametrizer: ParametrizerKind, classifier: ClassifierKind) -> TrainerConfig {
        TrainerConfig {
            parametrizer: ParametrizerConfig {
                kind: parametrizer,
                min_document_frequency: Some(0),
                ..ParametrizerConfig::default()
            },
            classifier: ClassifierConfig {
                kind: classifier,
                ..ClassifierConfig::default()
            },
        }
    }

    #[test]
    fn test_train_bag_of_words_naive_bayes() {
        let trainer = Trainer::new(config(ParametrizerKind::BagOfWords, ClassifierKind::NaiveBayes));
        let model = trainer.train(&Classes::new(["a", "b"]), &documents()).unwrap();

        assert_eq!("a", model.classify_text("cat cat").unwrap());
        assert_eq!("b", model.classify_text("a bird").unwrap());
    }

    #[test]
    fn test_train_tfidf_idf() {
        let trainer = Trainer::new(config(
            ParametrizerKind::BagOfWordsTfIdf,
            ClassifierKind::NaiveBayes,
        ));
        let model = trainer.train(&Classes::new(["a", "b"]), &documents()).unwrap();
        let parametrizer = model.parametrizer();

        assert_eq!(&["bird", "cat", "dog", "fish"], parametrizer.terms());
        let idf = parametrizer.idf().unwrap();
        assert!((idf[1] - (1.0 + 2f64.ln())).abs() < 1e-12);
        assert!((idf[1] - 1.693).abs() < 1e-3);
    }

    #[test]
    fn test_train_every_combination() {
        let classes = Classes::new(["a", "b"]);
        for parametrizer in [
            ParametrizerKind::BagOfWords,
            ParametrizerKind::BagOfWordsTfIdf,
            ParametrizerKind::NGrams,
        ] {
            for classifier in [ClassifierKind::NaiveBayes, ClassifierKind::KNearestNeighbours] {
                let model = Trainer::new(config(parametrizer, classifier))
                    .train(&classes, &documents())
                    .unwrap();
                let evaluation = model.evaluate(&documents()).unwrap();

                assert_eq!(4, evaluation.n_total);
                assert_eq!(parametrizer, model.parametrizer().kind());
                assert_eq!(classifier, model.classifier().kind());
            }
        }
    }

    #[test]
    fn test_train_no_documents() {
        let trainer = Trainer::new(TrainerConfig::default());

        assert_eq!(
            "InvalidArgumentError: documents: no training document is given",
            &trainer
                .train(&Classes::new(["a"]), &[])
                .err()
                .unwrap()
                .to_string()
        );
    }

    #[test]
    fn test_train_default_thresholds_drop_rare_words() {
        let trainer = Trainer::new(TrainerConfig::default());

        // Every word occurs in at most 2 documents, below the default threshold.
        assert!(trainer.train(&Classes::new(["a", "b"]), &documents()).is_err());
    }
}
