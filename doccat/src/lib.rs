//! # Doccat
//!
//! Doccat is a small supervised document classifier. Documents are converted into fixed-length
//! feature vectors over a vocabulary built from a training corpus (bag of words, TF-IDF, or word
//! n-grams) and labelled by a naive Bayes or k-nearest-neighbours classifier.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{prelude::*, stdin, BufReader};
//!
//! use doccat::Model;
//!
//! let mut f = BufReader::new(File::open("model.txt").unwrap());
//! let model = Model::read(&mut f).unwrap();
//!
//! for line in stdin().lock().lines() {
//!     let label = model.classify_text(&line.unwrap()).unwrap();
//!     println!("{}", label);
//! }
//! ```
//!
//! For training, see [`Trainer`].

mod classifier;
mod corpus;
mod dictionary;
mod model;
mod parametrizer;
mod stop_words;
mod tokenizer;
mod trainer;
mod utils;

pub mod errors;

pub use classifier::{
    Classifier, ClassifierConfig, ClassifierKind, KNearestNeighbours, NaiveBayes,
};
pub use corpus::{load_classes, load_documents, Classes, Document};
pub use dictionary::{DictionaryBuilder, StopWords, Vocabulary};
pub use model::{Evaluation, Model};
pub use parametrizer::{
    BagOfWords, BagOfWordsTfIdf, NGrams, Parametrizer, ParametrizerConfig, ParametrizerKind,
};
pub use tokenizer::tokenize;
pub use trainer::{Trainer, TrainerConfig};
