use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use doccat::{
    load_classes, load_documents, tokenize, ClassifierConfig, ClassifierKind, ParametrizerConfig,
    ParametrizerKind, StopWords, Trainer, TrainerConfig,
};
use env_logger::Builder;
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(about = "A program to train document classification models of Doccat.")]
struct Args {
    /// The file listing class labels on its first line
    #[arg(long)]
    classes: PathBuf,

    /// The directory of training documents
    #[arg(long)]
    train: PathBuf,

    /// The directory of test documents. The accuracy is reported before saving the model.
    #[arg(long)]
    test: Option<PathBuf>,

    /// The parametrizer: {bagofwords, tfidf, ngrams}
    #[arg(long, default_value = "bagofwords")]
    parametrizer: ParametrizerKind,

    /// The classifier: {nbayes, knn}
    #[arg(long, default_value = "nbayes")]
    classifier: ClassifierKind,

    /// The file to write the trained model to. Compressed with zstd if it ends with `.zst`.
    #[arg(long)]
    model: PathBuf,

    /// The number of words in a gram (ngrams only)
    #[arg(long, default_value = "2")]
    ngram_size: usize,

    /// Weight n-gram counts by inverse document frequencies (ngrams only)
    #[arg(long)]
    ngram_tfidf: bool,

    /// Terms occurring in at most this number of documents are dropped
    /// [default: 5 for words, 2 for n-grams]
    #[arg(long)]
    min_df: Option<usize>,

    /// Keep numbers in the word dictionary.
    #[arg(long)]
    no_numeric_filter: bool,

    /// Drop the built-in Czech stop words from the dictionary.
    #[arg(long, conflicts_with = "stop_words_file")]
    stop_words: bool,

    /// Drop the words listed in this file from the dictionary.
    #[arg(long)]
    stop_words_file: Option<PathBuf>,

    /// The number of neighbours (knn only)
    #[arg(long, default_value = "5")]
    k: usize,

    /// The number of workers for zstd (0 means multithreaded will be disabled)
    #[arg(long, default_value = "0")]
    zstd_workers: u32,

    /// Increase the verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print errors only
    #[arg(short, long)]
    quiet: bool,
}

fn init_logger(verbose: u8, quiet: bool) {
    let log_level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn is_zstd(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "zst")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(args.verbose, args.quiet);

    let stop_words = if let Some(path) = &args.stop_words_file {
        info!("Loading stop words from {path:?}");
        let words = tokenize(&fs::read_to_string(path)?)
            .into_iter()
            .filter(|w| !w.is_empty())
            .collect();
        StopWords::Custom(words)
    } else if args.stop_words {
        StopWords::Czech
    } else {
        StopWords::None
    };
    let config = TrainerConfig {
        parametrizer: ParametrizerConfig {
            kind: args.parametrizer,
            ngram_size: args.ngram_size,
            ngram_tfidf: args.ngram_tfidf,
            min_document_frequency: args.min_df,
            numeric_filter: args.no_numeric_filter.then_some(false),
            stop_words,
        },
        classifier: ClassifierConfig {
            kind: args.classifier,
            k: args.k,
        },
    };

    let classes = load_classes(&args.classes)?;
    let documents = load_documents(&args.train)?;

    info!("Start training...");
    let model = Trainer::new(config).train(&classes, &documents)?;
    info!("Finish training.");

    if let Some(path) = &args.test {
        let test_documents = load_documents(path)?;
        let evaluation = model.evaluate(&test_documents)?;
        println!("Accuracy: {}", evaluation.accuracy());
        println!("Error rate: {}", evaluation.error_rate());
        println!(
            "Correct: {}, Total: {}",
            evaluation.n_correct, evaluation.n_total
        );
    }

    let mut buf = vec![];
    model.write(&mut buf)?;

    info!("Saving model file {:?}", args.model);
    if is_zstd(&args.model) {
        let mut f = zstd::Encoder::new(File::create(&args.model)?, 19)?;
        f.multithread(args.zstd_workers)?;
        f.write_all(&buf)?;
        f.finish()?;
    } else {
        let mut f = File::create(&args.model)?;
        f.write_all(&buf)?;
    }

    Ok(())
}
