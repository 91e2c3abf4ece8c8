use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::{Path, PathBuf};

use clap::Parser;
use doccat::{load_documents, Model};
use env_logger::Builder;
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of Doccat.")]
struct Args {
    /// The model file to use when classifying documents
    #[arg(long)]
    model: PathBuf,

    /// The directory of labelled test documents
    #[arg(long)]
    test: PathBuf,

    /// Print the result of each document.
    #[arg(long)]
    verbose_results: bool,

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

fn read_model(path: &Path) -> Result<Model, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let model = if is_zstd(path) {
        Model::read(&mut BufReader::new(zstd::Decoder::new(f)?))?
    } else {
        Model::read(&mut BufReader::new(f))?
    };
    Ok(model)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(args.verbose, args.quiet);

    info!("Loading model file {:?}", args.model);
    let model = read_model(&args.model)?;
    let documents = load_documents(&args.test)?;

    let evaluation = model.evaluate(&documents)?;
    if args.verbose_results {
        for (i, (document, label)) in documents.iter().zip(&evaluation.predictions).enumerate() {
            let mark = if document.has_class(label) { "ok" } else { "ng" };
            println!(
                "{i}\t{mark}\t{label}\t{}",
                document.classes().join(" ")
            );
        }
    }
    println!("Accuracy: {}", evaluation.accuracy());
    println!("Error rate: {}", evaluation.error_rate());
    println!(
        "Correct: {}, Total: {}",
        evaluation.n_correct, evaluation.n_total
    );

    Ok(())
}
