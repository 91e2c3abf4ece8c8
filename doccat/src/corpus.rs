use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::errors::{DoccatError, Result};
use crate::tokenizer::tokenize;

/// Document with class annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub(crate) words: Vec<String>,
    pub(crate) classes: Vec<String>,
}

impl Document {
    /// Creates a new [`Document`] from already tokenized words and class labels.
    pub fn new(words: Vec<String>, classes: Vec<String>) -> Self {
        Self { words, classes }
    }

    /// Creates a new unlabelled [`Document`] from a raw text.
    ///
    /// # Examples
    ///
    /// ```
    /// use doccat::Document;
    ///
    /// let d = Document::from_text("Cat, dog.");
    /// assert_eq!(&["cat", "dog"], d.words());
    /// assert!(d.classes().is_empty());
    /// ```
    pub fn from_text(text: &str) -> Self {
        Self {
            words: tokenize(text),
            classes: vec![],
        }
    }

    /// Creates a new [`Document`] from a raw text and a raw class line.
    ///
    /// Both strings are split by the tokenizer.
    pub fn from_labelled_text(classes: &str, text: &str) -> Self {
        Self {
            words: tokenize(text),
            classes: tokenize(classes),
        }
    }

    /// Parses a document in the corpus format.
    ///
    /// The first line holds class labels, the second line is ignored, and the third line holds
    /// the text. Missing lines are treated as empty.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    pub fn read<R>(rdr: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut lines = rdr.lines();
        let classes = lines.next().transpose()?.unwrap_or_default();
        lines.next().transpose()?;
        let text = lines.next().transpose()?.unwrap_or_default();
        Ok(Self::from_labelled_text(&classes, &text))
    }

    /// Gets the words of the document.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Gets the class labels of the document.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Checks if the document carries at least one non-empty class label.
    pub fn has_classes(&self) -> bool {
        self.classes.iter().any(|c| !c.is_empty())
    }

    /// Checks if the document is labelled with `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Sorted table of class labels.
///
/// The position of a label in the table is its class index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classes {
    labels: Vec<String>,
}

impl Classes {
    /// Creates a class table. Labels are sorted and deduplicated; empty labels are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use doccat::Classes;
    ///
    /// let classes = Classes::new(["sport", "art", "sport"]);
    /// assert_eq!(&["art", "sport"], classes.labels());
    /// assert_eq!(Some(1), classes.index_of("sport"));
    /// ```
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels
            .into_iter()
            .map(Into::into)
            .filter(|label: &String| !label.is_empty())
            .collect();
        labels.sort_unstable();
        labels.dedup();
        Self { labels }
    }

    /// Reads a class table from the first line of `rdr`.
    ///
    /// Labels are separated by whitespaces.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    pub fn read<R>(rdr: R) -> Result<Self>
    where
        R: BufRead,
    {
        let line = rdr.lines().next().transpose()?.unwrap_or_default();
        Ok(Self::new(line.split_whitespace()))
    }

    /// Restores a class table from labels that are already sorted.
    pub(crate) fn from_sorted(labels: Vec<String>) -> Result<Self> {
        if labels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DoccatError::invalid_model("classes are not sorted"));
        }
        Ok(Self { labels })
    }

    /// Gets the index of a label by binary search.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .ok()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> &str {
        &self.labels[index]
    }
}

/// Reads the class table stored in `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_classes<P>(path: P) -> Result<Classes>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Loading classes from {path:?}");
    let classes = Classes::read(BufReader::new(File::open(path)?))?;
    debug!("# of classes: {}", classes.len());
    Ok(classes)
}

/// Reads all documents stored in a directory, one document per file.
///
/// Files are visited in the order of their names. Documents without class labels are skipped.
///
/// # Errors
///
/// Returns an error if the directory or one of its files cannot be read.
pub fn load_documents<P>(dir: P) -> Result<Vec<Document>>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    info!("Loading documents from {dir:?}");
    let mut paths = vec![];
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        if i % 1000 == 0 {
            debug!("# of files: {i}");
        }
        let document = Document::read(BufReader::new(File::open(path)?))?;
        if document.has_classes() {
            documents.push(document);
        } else {
            debug!("Skipping unlabelled document {path:?}");
        }
    }
    info!("# of documents: {}", documents.len());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_document_read() {
        let d = Document::read("sport politics\nSome title\nThe Minister plays golf.\n".as_bytes())
            .unwrap();

        assert_eq!(&["sport", "politics"], d.classes());
        assert_eq!(&["the", "minister", "plays", "golf"], d.words());
        assert!(d.has_classes());
        assert!(d.has_class("politics"));
        assert!(!d.has_class("art"));
    }

    #[test]
    fn test_document_read_truncated() {
        let d = Document::read("sport\n".as_bytes()).unwrap();

        assert_eq!(&["sport"], d.classes());
        assert_eq!(&[""], d.words());
    }

    #[test]
    fn test_document_read_without_classes() {
        let d = Document::read("\n\nsome text\n".as_bytes()).unwrap();

        assert_eq!(&[""], d.classes());
        assert!(!d.has_classes());
    }

    #[test]
    fn test_classes_new_sorted_dedup() {
        let classes = Classes::new(["b", "a", "c", "a", ""]);

        assert_eq!(&["a", "b", "c"], classes.labels());
        assert_eq!(Some(0), classes.index_of("a"));
        assert_eq!(Some(2), classes.index_of("c"));
        assert_eq!(None, classes.index_of("d"));
    }

    #[test]
    fn test_classes_read() {
        let classes = Classes::read("zpr  sport\tkul\nignored line\n".as_bytes()).unwrap();

        assert_eq!(&["kul", "sport", "zpr"], classes.labels());
    }

    #[test]
    fn test_classes_from_sorted_rejects_unsorted() {
        let result = Classes::from_sorted(vec!["b".to_string(), "a".to_string()]);

        assert_eq!(
            "InvalidModelError: classes are not sorted",
            &result.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_load_documents() {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in [
            ("02.txt", "b\n\nfish fish bird\n"),
            ("01.txt", "a\n\ncat dog cat\n"),
            ("03.txt", "\n\nunlabelled\n"),
        ] {
            let mut f = File::create(dir.path().join(name)).unwrap();
            f.write_all(content.as_bytes()).unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();

        let documents = load_documents(dir.path()).unwrap();

        assert_eq!(2, documents.len());
        assert_eq!(&["a"], documents[0].classes());
        assert_eq!(&["fish", "fish", "bird"], documents[1].words());
    }

    #[test]
    fn test_load_classes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.txt");
        fs::write(&path, "b a\n").unwrap();

        let classes = load_classes(&path).unwrap();

        assert_eq!(&["a", "b"], classes.labels());
    }
}
