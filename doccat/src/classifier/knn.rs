use log::{debug, info};

use crate::corpus::{Classes, Document};
use crate::errors::{DoccatError, Result};
use crate::utils::{join_fields, parse_fields, SectionReader};

const CLASSES_MARKER: &str = "**_classes:";
const K_PREFIX: &str = "**_k:";
const VECTORS_MARKER: &str = "**_vectors:";
const VECTOR_CLASSES_MARKER: &str = "**_vector_classes:";

fn cosine_similarity(x: &[f64], y: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut norm_x = 0.0;
    let mut norm_y = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        dot += a * b;
        norm_x += a * a;
        norm_y += b * b;
    }
    if norm_x == 0.0 || norm_y == 0.0 {
        return 0.0;
    }
    dot / (norm_x.sqrt() * norm_y.sqrt())
}

/// K-nearest-neighbours classifier based on cosine similarity.
///
/// Training only stores the vectors. A query is compared with every stored vector; the `k` most
/// similar ones vote for their classes with weight `1 / (similarity + 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct KNearestNeighbours {
    classes: Classes,
    k: usize,
    vectors: Vec<Vec<f64>>,
    vector_classes: Vec<Vec<usize>>,
}

impl KNearestNeighbours {
    pub const DEFAULT_K: usize = 5;

    /// Trains the classifier.
    ///
    /// # Arguments
    ///
    /// * `vectors` - Feature vectors of the training documents.
    /// * `documents` - Training documents. The `i`-th document corresponds to `vectors[i]`.
    /// * `classes` - Class table. Labels of documents that are not in the table are dropped.
    /// * `k` - Number of neighbours.
    ///
    /// # Errors
    ///
    /// [`DoccatError::InvalidArgument`] will be returned if `k` is 0, if the class table is
    /// empty, if no document is given, or if the vectors have different lengths.
    pub fn train(
        vectors: &[Vec<f64>],
        documents: &[Document],
        classes: &Classes,
        k: usize,
    ) -> Result<Self> {
        if k == 0 {
            return Err(DoccatError::invalid_argument("k", "must be at least 1"));
        }
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
        if vectors.iter().any(|v| v.len() != vectors[0].len()) {
            return Err(DoccatError::invalid_argument(
                "vectors",
                "all vectors must have the same length",
            ));
        }

        info!("Storing training vectors");
        let vector_classes = documents
            .iter()
            .map(|document| {
                let mut indices: Vec<usize> = document
                    .classes()
                    .iter()
                    .filter_map(|label| classes.index_of(label))
                    .collect();
                indices.sort_unstable();
                indices.dedup();
                indices
            })
            .collect();
        debug!("# of training vectors: {}", vectors.len());

        Ok(Self {
            classes: classes.clone(),
            k,
            vectors: vectors.to_vec(),
            vector_classes,
        })
    }

    /// Returns the label with the highest vote. Ties go to the smallest class index.
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
        let mut similarities: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .map(|v| cosine_similarity(vector, v))
            .enumerate()
            .collect();
        similarities.sort_by(|(i, x), (j, y)| y.total_cmp(x).then(i.cmp(j)));

        let mut scores = vec![0.0; self.classes.len()];
        for &(i, similarity) in similarities.iter().take(self.k) {
            for &c in &self.vector_classes[i] {
                scores[c] += 1.0 / (similarity + 1.0);
            }
        }
        let mut best = 0;
        for (c, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = c;
            }
        }
        Ok(self.classes.get(best))
    }

    pub fn classes(&self) -> &Classes {
        &self.classes
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Gets the stored training vectors.
    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    /// Gets the class indices of each stored vector.
    pub fn vector_classes(&self) -> &[Vec<usize>] {
        &self.vector_classes
    }

    /// Gets the length of feature vectors accepted by the classifier.
    pub fn dimension(&self) -> usize {
        self.vectors.first().map_or(0, Vec::len)
    }

    pub(crate) fn export_into(&self, lines: &mut Vec<String>) {
        lines.push(CLASSES_MARKER.to_string());
        lines.push(join_fields(self.classes.labels()));
        lines.push(format!("{K_PREFIX}{}", self.k));
        lines.push(VECTORS_MARKER.to_string());
        lines.extend(self.vectors.iter().map(join_fields));
        lines.push(VECTOR_CLASSES_MARKER.to_string());
        lines.extend(self.vector_classes.iter().map(join_fields));
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

        let k: usize = rdr.value(K_PREFIX)?.trim().parse()?;
        if k == 0 {
            return Err(DoccatError::invalid_model("k must be at least 1"));
        }

        rdr.expect(VECTORS_MARKER)?;
        let mut vectors: Vec<Vec<f64>> = vec![];
        for line in rdr.take_until(VECTOR_CLASSES_MARKER) {
            vectors.push(parse_fields(line)?);
        }
        if vectors.is_empty() {
            return Err(DoccatError::invalid_model("no training vectors"));
        }
        if vectors.iter().any(|v| v.len() != vectors[0].len()) {
            return Err(DoccatError::invalid_model(
                "training vectors have different lengths",
            ));
        }

        rdr.expect(VECTOR_CLASSES_MARKER)?;
        let mut vector_classes: Vec<Vec<usize>> = Vec::with_capacity(vectors.len());
        for line in rdr.rest() {
            let indices: Vec<usize> = parse_fields(line)?;
            if let Some(&c) = indices.iter().find(|&&c| c >= classes.len()) {
                return Err(DoccatError::invalid_model(format!(
                    "class index out of range: {c}"
                )));
            }
            vector_classes.push(indices);
        }
        if vector_classes.len() != vectors.len() {
            return Err(DoccatError::invalid_model(format!(
                "{} training vectors but {} class sets",
                vectors.len(),
                vector_classes.len()
            )));
        }

        Ok(Self {
            classes,
            k,
            vectors,
            vector_classes,
        })
    }
}
