use std::fs::File;
use std::io::{prelude::*, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::Parser;
use doccat::{Classifier, Model};
use env_logger::Builder;
use log::{info, LevelFilter};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "A program to inspect and convert trained models.")]
struct Args {
    /// Input path of the model file
    #[arg(long)]
    model_in: PathBuf,

    /// Output path of the model file. Compressed with zstd if it ends with `.zst`.
    #[arg(long)]
    model_out: Option<PathBuf>,

    /// Output the vocabulary contained in the model.
    #[arg(long)]
    dump_vocab: Option<PathBuf>,

    /// Output the class table contained in the model.
    #[arg(long)]
    dump_classes: Option<PathBuf>,

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

#[derive(Serialize)]
struct TermRecord<'a> {
    term: &'a str,
    idf: Option<f64>,
}

#[derive(Serialize)]
struct ClassRecord<'a> {
    index: usize,
    label: &'a str,
    prior: Option<f64>,
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

fn write_model(
    model: &Model,
    path: &Path,
    zstd_workers: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    if is_zstd(path) {
        let mut f = zstd::Encoder::new(File::create(path)?, 19)?;
        f.multithread(zstd_workers)?;
        model.write(&mut f)?;
        f.finish()?;
    } else {
        let mut f = BufWriter::new(File::create(path)?);
        model.write(&mut f)?;
        f.flush()?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(args.verbose, args.quiet);

    info!("Loading model file {:?}", args.model_in);
    let model = read_model(&args.model_in)?;

    if let Some(path) = args.dump_vocab {
        info!("Saving vocabulary file {path:?}");
        let parametrizer = model.parametrizer();
        let idf = parametrizer.idf();
        let mut wtr = csv::Writer::from_writer(File::create(path)?);
        for (i, term) in parametrizer.terms().iter().enumerate() {
            wtr.serialize(TermRecord {
                term,
                idf: idf.map(|idf| idf[i]),
            })?;
        }
        wtr.flush()?;
    }

    if let Some(path) = args.dump_classes {
        info!("Saving class file {path:?}");
        let priors = match model.classifier() {
            Classifier::NaiveBayes(nb) => Some(nb.priors()),
            Classifier::KNearestNeighbours(_) => None,
        };
        let mut wtr = csv::Writer::from_writer(File::create(path)?);
        for (index, label) in model.classifier().classes().labels().iter().enumerate() {
            wtr.serialize(ClassRecord {
                index,
                label,
                prior: priors.map(|priors| priors[index]),
            })?;
        }
        wtr.flush()?;
    }

    if let Some(path) = args.model_out {
        info!("Saving model file {path:?}");
        write_model(&model, &path, args.zstd_workers)?;
    }

    Ok(())
}
