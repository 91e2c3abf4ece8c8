use std::fs::File;
use std::io::{prelude::*, stdin, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use doccat::Model;
use env_logger::Builder;
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(about = "A program to classify documents. Each line of stdin is a document.")]
struct Args {
    /// The model file to use when classifying text
    #[arg(long)]
    model: PathBuf,

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

    info!("Start classification");
    let mut n_documents = 0;
    let start = Instant::now();
    for line in stdin().lock().lines() {
        let label = model.classify_text(&line?)?;
        n_documents += 1;
        println!("{label}");
    }
    let duration = start.elapsed();
    eprintln!("Elapsed: {} [sec]", duration.as_secs_f64());
    eprintln!(
        "Speed: {} [documents/sec]",
        n_documents as f64 / duration.as_secs_f64()
    );

    Ok(())
}
