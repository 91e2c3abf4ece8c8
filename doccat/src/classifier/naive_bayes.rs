use log::{debug, info};

use crate::corpus::{Classes, Document};
use crate::errors::{DoccatError, Result};
use crate::utils::{join_fields, parse_fields, SectionReader};

const CLASSES_MARKER: &str = "**_classes:";
const CLASS_PROBABILITIES_MARKER: &str = "**_class_probabilities:";
const TOKEN_PROBABILITIES_MARKER: &str = "**_token_probabilities";

/// Multinomial naive Bayes classifier with add-one smoothing.
#[derive(Clone, Debug, PartialEq)]
pub struct NaiveBayes {
    classes: Classes,
    priors: Vec<f64>,

    // likelihoods[class][term]
    likelihoods: Vec<Vec<f64>>,
}

impl NaiveBayes {
    /// Trains the classifier.
    ///
    /// # Arguments
    ///
    /// * `vectors` - Feature vectors of the training documents.
    /// * `documents` - Training documents. The `i`-th document corresponds to `vectors[i]`.
    /// * `classes` - Class table. Labels of documents that are not in the table are ignored.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if the class table or the vocabulary is
    /// empty, if no document is given, if no document has a known label, or if the vectors have
    /// different lengths.
    pub fn train(vectors: &[Vec<f64>], documents: &[Document], classes: &Classes) -> Result<Self> {
        if classes.is_empty() {
            return Err(DoccatError::invalid_argument("classes", "must not be empty"));
        }
        if vectors.is_empty() {
            return Err(DoccatError::invalid_argument(
                "documents",
                "no training document is given",
            ));
        }
        if vectors.len() != documents.len() {
            return Err(DoccatError::invalid_argument(
                "vectors",
                format!(
                    "{} vectors but {} documents",
                    vectors.len(),
                    documents.len()
                ),
            ));
        }
        let n_terms = vectors[0].len();
        if n_terms == 0 {
            return Err(DoccatError::invalid_argument(
                "vectors",
                "vocabulary must not be empty",
            ));
        }
        if vectors.iter().any(|v| v.len() != n_terms) {
            return Err(DoccatError::invalid_argument(
                "vectors",
                "all vectors must have the same length",
            ));
        }

        info!("Calculating probabilities");
        let mut occurrences = vec![0usize; classes.len()];
        let mut token_totals = vec![vec![0.0; n_terms]; classes.len()];
        for (vector, document) in vectors.iter().zip(documents) {
            let mut indices: Vec<usize> = document
                .classes()
                .iter()
                .filter_map(|label| classes.index_of(label))
                .collect();
            indices.sort_unstable();
            indices.dedup();
            for c in indices {
                occurrences[c] += 1;
                for (total, &v) in token_totals[c].iter_mut().zip(vector) {
                    *total += v;
                }
            }
        }
        let n_occurrences: usize = occurrences.iter().sum();
        if n_occurrences == 0 {
            return Err(DoccatError::invalid_argument(
                "documents",
                "no document is labelled with a known class",
            ));
        }
        debug!("# of label occurrences: {n_occurrences}");

        let priors = occurrences
            .iter()
            .map(|&n| n as f64 / n_occurrences as f64)
            .collect();
        let likelihoods = token_totals
            .into_iter()
            .map(|totals| {
                let class_total: f64 = totals.iter().sum();
                let denominator = class_total + n_terms as f64;
                totals.into_iter().map(|t| (t + 1.0) / denominator).collect()
            })
            .collect();

        Ok(Self {
            classes: classes.clone(),
            priors,
            likelihoods,
        })
    }

    /// Returns the label with the highest posterior score. Ties go to the smallest class index.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if the length of `vector` is not
    /// [`Self::dimension()`].
    pub fn classify(&self, vector: &[f64]) -> Result<&str> {
        if vector.len() != self.dimension() {
            return Err(DoccatError::invalid_argument(
                "vector",
                format!(
                    "expected length {}, got {}",
                    self.dimension(),
                    vector.len()
                ),
            ));
        }
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (c, (prior, likelihoods)) in self.priors.iter().zip(&self.likelihoods).enumerate() {
            let mut score = prior.ln();
            for (&v, &p) in vector.iter().zip(likelihoods) {
                if v != 0.0 {
                    score += v * p.ln();
                }
            }
            if c == 0 || score > best_score {
                best = c;
                best_score = score;
            }
        }
        Ok(self.classes.get(best))
    }

    pub fn classes(&self) -> &Classes {
        &self.classes
    }

    /// Gets the prior probability of each class.
    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    /// Gets the smoothed term probabilities, one row per class.
    pub fn likelihoods(&self) -> &[Vec<f64>] {
        &self.likelihoods
    }

    /// Gets the length of feature vectors accepted by the classifier.
    pub fn dimension(&self) -> usize {
        self.likelihoods.first().map_or(0, Vec::len)
    }

    pub(crate) fn export_into(&self, lines: &mut Vec<String>) {
        lines.push(CLASSES_MARKER.to_string());
        lines.push(join_fields(self.classes.labels()));
        lines.push(CLASS_PROBABILITIES_MARKER.to_string());
        lines.push(join_fields(&self.priors));
        lines.push(TOKEN_PROBABILITIES_MARKER.to_string());
        lines.extend(self.likelihoods.iter().map(join_fields));
    }

    pub(crate) fn load(rdr: &mut SectionReader) -> Result<Self> {
        rdr.expect(CLASSES_MARKER)?;
        let labels = rdr
            .next_line("class labels")?
            .split(';')
            .filter(|label| !label.is_empty())
            .map(String::from)
            .collect();
        let classes = Classes::from_sorted(labels)?;
        if classes.is_empty() {
            return Err(DoccatError::invalid_model("no classes"));
        }

        rdr.expect(CLASS_PROBABILITIES_MARKER)?;
        let priors: Vec<f64> = parse_fields(rdr.next_line("class probabilities")?)?;
        if priors.len() != classes.len() {
            return Err(DoccatError::invalid_model(format!(
                "{} classes but {} class probabilities",
                classes.len(),
                priors.len()
            )));
        }

        rdr.expect(TOKEN_PROBABILITIES_MARKER)?;
        let rows = rdr.rest();
        if rows.len() != classes.len() {
            return Err(DoccatError::invalid_model(format!(
                "{} classes but {} rows of token probabilities",
                classes.len(),
                rows.len()
            )));
        }
        let mut likelihoods: Vec<Vec<f64>> = Vec::with_capacity(rows.len());
        for row in rows {
            likelihoods.push(parse_fields(row)?);
        }
        if likelihoods.iter().any(|row| row.len() != likelihoods[0].len()) {
            return Err(DoccatError::invalid_model(
                "rows of token probabilities have different lengths",
            ));
        }

        Ok(Self {
            classes,
            priors,
            likelihoods,
        })
    }
}
