//! Classifiers assigning a class label to a feature vector.

mod knn;
mod naive_bayes;

use std::fmt;
use std::str::FromStr;

use log::info;

use crate::corpus::{Classes, Document};
use crate::errors::{DoccatError, Result};
use crate::utils::{SectionReader, CLASSIFIER_PREFIX};

pub use knn::KNearestNeighbours;
pub use naive_bayes::NaiveBayes;

/// Classifier type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassifierKind {
    /// Multinomial naive Bayes.
    NaiveBayes,

    /// K-nearest neighbours.
    KNearestNeighbours,
}

impl ClassifierKind {
    /// Gets the identifier used on the command line and in model files.
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::NaiveBayes => "nbayes",
            Self::KNearestNeighbours => "knn",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for ClassifierKind {
    type Err = DoccatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "nbayes" => Ok(Self::NaiveBayes),
            "knn" => Ok(Self::KNearestNeighbours),
            _ => Err(DoccatError::invalid_argument(
                "classifier",
                format!("unknown classifier: {s}"),
            )),
        }
    }
}

/// Settings of a classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Classifier type.
    pub kind: ClassifierKind,

    /// Number of neighbours. Used only by [`ClassifierKind::KNearestNeighbours`].
    pub k: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            kind: ClassifierKind::NaiveBayes,
            k: KNearestNeighbours::DEFAULT_K,
        }
    }
}

/// Trained classifier.
#[derive(Clone, Debug, PartialEq)]
pub enum Classifier {
    NaiveBayes(NaiveBayes),
    KNearestNeighbours(KNearestNeighbours),
}

impl Classifier {
    /// Trains a classifier.
    ///
    /// # Arguments
    ///
    /// * `config` - Classifier settings.
    /// * `vectors` - Feature vectors of the training documents.
    /// * `documents` - Training documents. The `i`-th document corresponds to `vectors[i]`.
    /// * `classes` - Class table.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if the inputs cannot train the selected
    /// classifier.
    pub fn train(
        config: &ClassifierConfig,
        vectors: &[Vec<f64>],
        documents: &[Document],
        classes: &Classes,
    ) -> Result<Self> {
        info!("Training classifier: {}", config.kind);
        Ok(match config.kind {
            ClassifierKind::NaiveBayes => {
                Self::NaiveBayes(NaiveBayes::train(vectors, documents, classes)?)
            }
            ClassifierKind::KNearestNeighbours => Self::KNearestNeighbours(
                KNearestNeighbours::train(vectors, documents, classes, config.k)?,
            ),
        })
    }

    /// Predicts the label of a feature vector.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if the length of `vector` is not
    /// [`Self::dimension()`].
    pub fn classify(&self, vector: &[f64]) -> Result<&str> {
        match self {
            Self::NaiveBayes(c) => c.classify(vector),
            Self::KNearestNeighbours(c) => c.classify(vector),
        }
    }

    pub fn classes(&self) -> &Classes {
        match self {
            Self::NaiveBayes(c) => c.classes(),
            Self::KNearestNeighbours(c) => c.classes(),
        }
    }

    /// Gets the length of feature vectors accepted by the classifier.
    pub fn dimension(&self) -> usize {
        match self {
            Self::NaiveBayes(c) => c.dimension(),
            Self::KNearestNeighbours(c) => c.dimension(),
        }
    }

    pub const fn kind(&self) -> ClassifierKind {
        match self {
            Self::NaiveBayes(_) => ClassifierKind::NaiveBayes,
            Self::KNearestNeighbours(_) => ClassifierKind::KNearestNeighbours,
        }
    }

    /// Exports the classifier as lines of the model format.
    pub fn export(&self) -> Vec<String> {
        let mut lines = vec![format!("{CLASSIFIER_PREFIX}{}", self.kind())];
        match self {
            Self::NaiveBayes(c) => c.export_into(&mut lines),
            Self::KNearestNeighbours(c) => c.export_into(&mut lines),
        }
        lines
    }

    /// Restores a classifier from lines of the model format.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidModel`] will be returned if the lines are malformed.
    pub fn load(lines: &[String]) -> Result<Self> {
        let mut rdr = SectionReader::new(lines);
        let identifier = rdr.value(CLASSIFIER_PREFIX)?;
        let kind: ClassifierKind = identifier
            .parse()
            .map_err(|_| DoccatError::invalid_model(format!("unknown classifier: {identifier}")))?;
        Ok(match kind {
            ClassifierKind::NaiveBayes => Self::NaiveBayes(NaiveBayes::load(&mut rdr)?),
            ClassifierKind::KNearestNeighbours => {
                Self::KNearestNeighbours(KNearestNeighbours::load(&mut rdr)?)
            }
        })
    }
}
