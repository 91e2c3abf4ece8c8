use std::io::{BufRead, Write};

use log::{debug, info};

use crate::classifier::Classifier;
use crate::corpus::Document;
use crate::errors::{DoccatError, Result};
use crate::parametrizer::Parametrizer;
use crate::utils::CLASSIFIER_PREFIX;

/// Trained pair of a parametrizer and a classifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    parametrizer: Parametrizer,
    classifier: Classifier,
}

impl Model {
    /// Creates a model.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if the classifier does not accept the
    /// vectors produced by the parametrizer.
    pub fn new(parametrizer: Parametrizer, classifier: Classifier) -> Result<Self> {
        if parametrizer.vector_length() != classifier.dimension() {
            return Err(DoccatError::invalid_argument(
                "classifier",
                format!(
                    "expects vectors of length {}, but the parametrizer produces {}",
                    classifier.dimension(),
                    parametrizer.vector_length()
                ),
            ));
        }
        Ok(Self {
            parametrizer,
            classifier,
        })
    }

    pub fn parametrizer(&self) -> &Parametrizer {
        &self.parametrizer
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Exports the model data as text lines.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        info!("Exporting model");
        for line in self.parametrizer.export() {
            writeln!(wtr, "{line}")?;
        }
        for line in self.classifier.export() {
            writeln!(wtr, "{line}")?;
        }
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// The first line starting with `**_classifier:` separates the parametrizer section from
    /// the classifier section.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is. If the data is malformed,
    /// [`DoccatError::InvalidModel`] will be returned.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: BufRead,
    {
        info!("Loading model");
        let mut lines = vec![];
        for line in rdr.lines() {
            let mut line = line?;
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        debug!("# of model lines: {}", lines.len());

        let split = lines
            .iter()
            .position(|line| line.starts_with(CLASSIFIER_PREFIX))
            .ok_or_else(|| DoccatError::invalid_model("classifier section not found"))?;
        let parametrizer = Parametrizer::load(&lines[..split])?;
        let classifier = Classifier::load(&lines[split..])?;
        if parametrizer.vector_length() != classifier.dimension() {
            return Err(DoccatError::invalid_model(format!(
                "classifier dimension {} does not match vector length {}",
                classifier.dimension(),
                parametrizer.vector_length()
            )));
        }
        Ok(Self {
            parametrizer,
            classifier,
        })
    }

    /// Predicts the label of a document.
    pub fn classify(&self, document: &Document) -> Result<&str> {
        let vector = self.parametrizer.parametrize(document);
        self.classifier.classify(&vector)
    }

    /// Tokenizes raw text and predicts its label.
    ///
    /// # Examples
    ///
    /// ```
    /// use doccat::{Classes, Document, Trainer, TrainerConfig};
    ///
    /// let documents = vec![
    ///     Document::from_labelled_text("pets", "cat dog cat"),
    ///     Document::from_labelled_text("pets", "dog cat dog"),
    ///     Document::from_labelled_text("sea", "fish fish whale"),
    ///     Document::from_labelled_text("sea", "whale fish"),
    /// ];
    /// let mut config = TrainerConfig::default();
    /// config.parametrizer.min_document_frequency = Some(0);
    /// let model = Trainer::new(config)
    ///     .train(&Classes::new(["pets", "sea"]), &documents)
    ///     .unwrap();
    ///
    /// assert_eq!("sea", model.classify_text("A whale!").unwrap());
    /// ```
    pub fn classify_text(&self, text: &str) -> Result<&str> {
        self.classify(&Document::from_text(text))
    }

    /// Classifies labelled documents and counts correct predictions.
    ///
    /// A prediction is correct if the document has the predicted label.
    pub fn evaluate(&self, documents: &[Document]) -> Result<Evaluation> {
        info!("Evaluating {} documents", documents.len());
        let mut n_correct = 0;
        let mut predictions = Vec::with_capacity(documents.len());
        for document in documents {
            let label = self.classify(document)?;
            if document.has_class(label) {
                n_correct += 1;
            }
            predictions.push(label.to_string());
        }
        Ok(Evaluation {
            n_correct,
            n_total: documents.len(),
            predictions,
        })
    }
}

/// Result of [`Model::evaluate()`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Number of correctly classified documents.
    pub n_correct: usize,

    /// Number of evaluated documents.
    pub n_total: usize,

    /// Predicted label of each document.
    pub predictions: Vec<String>,
}

impl Evaluation {
    /// Ratio of correct predictions. Returns 0 if nothing was evaluated.
    pub fn accuracy(&self) -> f64 {
        if self.n_total == 0 {
            return 0.0;
        }
        self.n_correct as f64 / self.n_total as f64
    }

    /// Ratio of wrong predictions. Returns 0 if nothing was evaluated.
    pub fn error_rate(&self) -> f64 {
        if self.n_total == 0 {
            return 0.0;
        }
        (self.n_total - self.n_correct) as f64 / self.n_total as f64
    }
}
